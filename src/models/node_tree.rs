//! Navigation tree of windows and panels.
//!
//! Nodes live in a generational arena: a `NodeId` that outlived its node is
//! reported as [`TreeError::InvalidNode`] instead of aliasing a new node.
//! Parents are referenced by id only; the arena owns every node.

use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::core::{EscapePolicy, Layer, PanelId};

new_key_type! { pub struct NodeId; }

/// Opaque parameters forwarded to construction hooks.
pub type PanelParams = serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    Cycle { parent: NodeId, child: NodeId },
    InvalidNode(NodeId),
    Pinned(NodeId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Cycle { parent, child } => write!(
                f,
                "attaching {:?} under {:?} would create a cycle",
                child, parent
            ),
            TreeError::InvalidNode(id) => write!(f, "node {:?} is no longer in the tree", id),
            TreeError::Pinned(id) => write!(f, "node {:?} is pinned and cannot be moved or closed", id),
        }
    }
}

impl std::error::Error for TreeError {}

/// Lifecycle hooks through which the toolkit materializes a node.
///
/// Every hook runs synchronously on the navigation thread and must not block.
pub trait NodeBehavior {
    fn on_construct(&mut self, _node: NodeId, _params: Option<&PanelParams>) {}

    /// A singleton panel was opened again while already open.
    fn on_reopen(&mut self, _node: NodeId, _params: Option<&PanelParams>) {}

    fn on_show(&mut self, _node: NodeId) {}

    fn on_hide(&mut self, _node: NodeId) {}

    fn on_destroy(&mut self, _node: NodeId) {}

    /// `child` was hidden or destroyed. For destroyed children the id is stale.
    fn on_child_closed(&mut self, _node: NodeId, _child: NodeId) {}

    /// Only consulted for [`EscapePolicy::Custom`]. Returns whether it was handled.
    fn on_escape(&mut self, _node: NodeId) -> bool {
        false
    }
}

/// Behavior with no side effects; used for structural nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Inert;

impl NodeBehavior for Inert {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    pub panel: Option<PanelId>,
    pub layer: Layer,
    pub escape: EscapePolicy,
    pub full_screen: bool,
}

impl NodeSpec {
    pub fn new(layer: Layer, escape: EscapePolicy) -> Self {
        Self {
            panel: None,
            layer,
            escape,
            full_screen: false,
        }
    }

    pub fn panel(mut self, panel: impl Into<PanelId>) -> Self {
        self.panel = Some(panel.into());
        self
    }

    pub fn full_screen(mut self, full_screen: bool) -> Self {
        self.full_screen = full_screen;
        self
    }
}

pub struct Node {
    panel: Option<PanelId>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    layer: Layer,
    escape: EscapePolicy,
    full_screen: bool,
    visible: bool,
    interactive: bool,
    pinned: bool,
    behavior: Box<dyn NodeBehavior>,
}

impl Node {
    fn new(spec: NodeSpec, parent: Option<NodeId>, behavior: Box<dyn NodeBehavior>) -> Self {
        Self {
            panel: spec.panel,
            parent,
            children: Vec::new(),
            layer: spec.layer,
            escape: spec.escape,
            full_screen: spec.full_screen,
            visible: true,
            interactive: true,
            pinned: false,
            behavior,
        }
    }

    pub fn panel(&self) -> Option<&PanelId> {
        self.panel.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn escape_policy(&self) -> EscapePolicy {
        self.escape
    }

    pub fn is_full_screen(&self) -> bool {
        self.full_screen
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("panel", &self.panel)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("layer", &self.layer)
            .field("escape", &self.escape)
            .field("full_screen", &self.full_screen)
            .field("visible", &self.visible)
            .field("interactive", &self.interactive)
            .finish_non_exhaustive()
    }
}

/// Result of walking an escape request toward the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscapeOutcome {
    /// The walk reached the root without any node resolving it.
    Unhandled,
    Custom { node: NodeId, handled: bool },
    Hidden(NodeId),
    /// `removed` lists the closed node and its descendants, children first.
    Closed { node: NodeId, removed: Vec<NodeId> },
}

impl EscapeOutcome {
    pub fn handled(&self) -> bool {
        match self {
            EscapeOutcome::Unhandled => false,
            EscapeOutcome::Custom { handled, .. } => *handled,
            EscapeOutcome::Hidden(_) | EscapeOutcome::Closed { .. } => true,
        }
    }
}

pub struct NodeTree {
    arena: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl NodeTree {
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let mut root = Node::new(
            NodeSpec::new(Layer::Background, EscapePolicy::Ignore),
            None,
            Box::new(Inert),
        );
        root.pinned = true;
        let root = arena.insert(root);
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.arena.get(id).ok_or(TreeError::InvalidNode(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.arena.get_mut(id).ok_or(TreeError::InvalidNode(id))
    }

    pub(crate) fn behavior_mut(&mut self, id: NodeId) -> Result<&mut dyn NodeBehavior, TreeError> {
        Ok(self.get_mut(id)?.behavior.as_mut())
    }

    /// Adds a structural child of the root, e.g. a layer's conventional parent.
    pub(crate) fn insert_pinned(&mut self, spec: NodeSpec) -> NodeId {
        let mut node = Node::new(spec, Some(self.root), Box::new(Inert));
        node.pinned = true;
        let id = self.arena.insert(node);
        if let Some(root) = self.arena.get_mut(self.root) {
            root.children.push(id);
        }
        id
    }

    pub(crate) fn set_interactive(&mut self, id: NodeId, interactive: bool) {
        if let Some(node) = self.arena.get_mut(id) {
            node.interactive = interactive;
        }
    }

    /// Ancestors of `id`, nearest first, ending with the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.arena.get(id).and_then(|n| n.parent),
        }
    }

    pub fn is_ancestor(&self, ancestor: NodeId, of: NodeId) -> bool {
        self.ancestors(of).any(|id| id == ancestor)
    }

    /// Visible itself and along its whole ancestor chain.
    pub fn is_shown(&self, id: NodeId) -> bool {
        match self.arena.get(id) {
            Some(node) if node.visible => self
                .ancestors(id)
                .all(|a| self.arena.get(a).is_some_and(|n| n.visible)),
            _ => false,
        }
    }

    pub fn create_node(
        &mut self,
        parent: NodeId,
        spec: NodeSpec,
        behavior: Box<dyn NodeBehavior>,
    ) -> Result<NodeId, TreeError> {
        self.get(parent)?;
        let id = self.arena.insert(Node::new(spec, Some(parent), behavior));
        self.get_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Moves `child` (with its subtree) under `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.get(parent)?;
        let child_node = self.get(child)?;
        if child_node.pinned {
            return Err(TreeError::Pinned(child));
        }
        let old_parent = child_node.parent;
        if child == parent || self.is_ancestor(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }

        if let Some(old) = old_parent {
            if let Some(old) = self.arena.get_mut(old) {
                old.children.retain(|c| *c != child);
            }
        }
        self.get_mut(parent)?.children.push(child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Removes `node` and its subtree, children before parents, then notifies
    /// the former parent once.
    pub fn detach(&mut self, node: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let target = self.get(node)?;
        if target.pinned {
            return Err(TreeError::Pinned(node));
        }
        let parent = target.parent;

        let mut removed = Vec::new();
        self.destroy_subtree(node, &mut removed);

        if let Some(parent) = parent {
            if let Some(p) = self.arena.get_mut(parent) {
                p.children.retain(|c| *c != node);
            }
            self.notify_child_closed(parent, node)?;
        }
        tracing::debug!(node = ?node, removed = removed.len(), "node detached");
        Ok(removed)
    }

    fn destroy_subtree(&mut self, id: NodeId, removed: &mut Vec<NodeId>) {
        let children = match self.arena.get(id) {
            Some(node) => node.children.clone(),
            None => return,
        };
        for child in children {
            self.destroy_subtree(child, removed);
        }
        if let Some(mut node) = self.arena.remove(id) {
            node.behavior.on_destroy(id);
            removed.push(id);
        }
    }

    /// Returns `false` if the node was already hidden.
    pub fn hide(&mut self, id: NodeId) -> Result<bool, TreeError> {
        let node = self.get_mut(id)?;
        if node.pinned {
            return Err(TreeError::Pinned(id));
        }
        if !node.visible {
            return Ok(false);
        }
        node.visible = false;
        node.behavior.on_hide(id);
        let parent = node.parent;
        if let Some(parent) = parent {
            self.notify_child_closed(parent, id)?;
        }
        Ok(true)
    }

    /// Returns `false` if the node was already visible.
    pub fn show(&mut self, id: NodeId) -> Result<bool, TreeError> {
        let node = self.get_mut(id)?;
        if node.visible {
            return Ok(false);
        }
        node.visible = true;
        node.behavior.on_show(id);
        Ok(true)
    }

    pub fn notify_child_closed(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.get_mut(parent)?.behavior.on_child_closed(parent, child);
        Ok(())
    }

    /// Walks from `from` toward the root until a node resolves the request.
    pub fn escalate_escape(&mut self, from: NodeId) -> Result<EscapeOutcome, TreeError> {
        self.get(from)?;
        let mut current = from;
        loop {
            if current == self.root {
                return Ok(EscapeOutcome::Unhandled);
            }
            let node = self.get(current)?;
            let (escape, parent) = (node.escape, node.parent);
            match escape {
                EscapePolicy::Ignore => match parent {
                    Some(parent) => current = parent,
                    None => return Ok(EscapeOutcome::Unhandled),
                },
                EscapePolicy::Custom => {
                    let handled = self.behavior_mut(current)?.on_escape(current);
                    tracing::debug!(node = ?current, handled, "escape resolved by custom handler");
                    return Ok(EscapeOutcome::Custom {
                        node: current,
                        handled,
                    });
                }
                EscapePolicy::Hide => {
                    self.hide(current)?;
                    tracing::debug!(node = ?current, "escape hid node");
                    return Ok(EscapeOutcome::Hidden(current));
                }
                EscapePolicy::AutoClose => {
                    let removed = self.detach(current)?;
                    tracing::debug!(node = ?current, "escape closed node");
                    return Ok(EscapeOutcome::Closed {
                        node: current,
                        removed,
                    });
                }
            }
        }
    }
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Ancestors<'a> {
    tree: &'a NodeTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.arena.get(id).and_then(|n| n.parent);
        Some(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/node_tree.rs"]
mod tests;
