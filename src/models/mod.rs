//! Navigation state: the node tree and its per-layer stacks.

pub mod layer_stack;
pub mod node_tree;

pub use layer_stack::LayerStacks;
pub use node_tree::{
    EscapeOutcome, Inert, Node, NodeBehavior, NodeId, NodeSpec, NodeTree, PanelParams, TreeError,
};
