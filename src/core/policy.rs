use serde::{Deserialize, Serialize};

/// Ordinal draw/interaction layer. Higher layers sit above lower ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Background,
    Main,
    Popup,
    System,
}

impl Layer {
    pub const COUNT: usize = 4;

    /// Bottom to top.
    pub const ALL: [Layer; Layer::COUNT] =
        [Layer::Background, Layer::Main, Layer::Popup, Layer::System];

    pub fn index(self) -> usize {
        match self {
            Layer::Background => 0,
            Layer::Main => 1,
            Layer::Popup => 2,
            Layer::System => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Layer::Background => "background",
            Layer::Main => "main",
            Layer::Popup => "popup",
            Layer::System => "system",
        }
    }
}

/// How a node resolves an escape/back request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapePolicy {
    /// Pass the request to the parent.
    Ignore,
    /// Hide the node; it stays in the tree.
    Hide,
    /// Close (detach) the node and its subtree.
    #[default]
    AutoClose,
    /// Ask the node's behavior; its answer ends the walk.
    Custom,
}
