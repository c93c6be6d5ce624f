use crate::core::Layer;

use super::node_tree::NodeId;

/// Z-ordered open nodes per layer. The last entry of a stack is on top.
#[derive(Debug, Default, Clone)]
pub struct LayerStacks {
    stacks: [Vec<NodeId>; Layer::COUNT],
}

impl LayerStacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `id` on top of `layer`, removing it from wherever it was before.
    pub fn push(&mut self, layer: Layer, id: NodeId) {
        self.remove(id);
        self.stacks[layer.index()].push(id);
    }

    /// Moves `id` to the top of its own stack. Returns `false` if not present.
    pub fn bring_to_front(&mut self, id: NodeId) -> bool {
        match self.remove(id) {
            Some(layer) => {
                self.stacks[layer.index()].push(id);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Layer> {
        for layer in Layer::ALL {
            let stack = &mut self.stacks[layer.index()];
            if let Some(pos) = stack.iter().position(|n| *n == id) {
                stack.remove(pos);
                return Some(layer);
            }
        }
        None
    }

    pub fn layer_of(&self, id: NodeId) -> Option<Layer> {
        Layer::ALL
            .into_iter()
            .find(|layer| self.stacks[layer.index()].contains(&id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.layer_of(id).is_some()
    }

    pub fn stack(&self, layer: Layer) -> &[NodeId] {
        &self.stacks[layer.index()]
    }

    pub fn top_of(&self, layer: Layer) -> Option<NodeId> {
        self.stacks[layer.index()].last().copied()
    }

    pub fn len(&self) -> usize {
        self.stacks.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.iter().all(Vec::is_empty)
    }

    /// Highest layer first, then top of each stack first.
    pub fn iter_top_down(&self) -> impl Iterator<Item = (Layer, NodeId)> + '_ {
        Layer::ALL.into_iter().rev().flat_map(move |layer| {
            self.stacks[layer.index()]
                .iter()
                .rev()
                .map(move |id| (layer, *id))
        })
    }

    pub fn retain(&mut self, mut keep: impl FnMut(NodeId) -> bool) {
        for stack in &mut self.stacks {
            stack.retain(|id| keep(*id));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/layer_stack.rs"]
mod tests;
