//! Window/panel manager: owns the navigation tree and its layer stacks.

use rustc_hash::FxHashMap;

use crate::core::{EscapePolicy, Layer, PanelId};
use crate::models::{EscapeOutcome, LayerStacks, NodeId, NodeSpec, NodeTree, PanelParams};
use crate::services::settings::NavSettings;

use super::panels::{PanelCatalog, PanelError};

pub struct PanelManager {
    tree: NodeTree,
    layer_roots: [NodeId; Layer::COUNT],
    stacks: LayerStacks,
    catalog: PanelCatalog,
    /// Nodes opened through `open_panel`, at most one per panel id.
    singletons: FxHashMap<PanelId, NodeId>,
    escape_layers: Vec<Layer>,
}

impl PanelManager {
    pub fn new(catalog: PanelCatalog) -> Self {
        Self::with_settings(catalog, &NavSettings::default())
    }

    pub fn with_settings(mut catalog: PanelCatalog, settings: &NavSettings) -> Self {
        catalog.apply_settings(settings);

        let mut tree = NodeTree::new();
        let layer_roots =
            Layer::ALL.map(|layer| tree.insert_pinned(NodeSpec::new(layer, EscapePolicy::Ignore)));

        Self {
            tree,
            layer_roots,
            stacks: LayerStacks::new(),
            catalog,
            singletons: FxHashMap::default(),
            escape_layers: settings.escape_layers.clone(),
        }
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    pub fn catalog(&self) -> &PanelCatalog {
        &self.catalog
    }

    /// Conventional parent of top-level panels on `layer`.
    pub fn layer_root(&self, layer: Layer) -> NodeId {
        self.layer_roots[layer.index()]
    }

    pub fn stack(&self, layer: Layer) -> &[NodeId] {
        self.stacks.stack(layer)
    }

    pub fn find_open(&self, panel: &str) -> Option<NodeId> {
        self.singletons.get(panel).copied()
    }

    pub fn is_open(&self, node: NodeId) -> bool {
        self.stacks.contains(node)
    }

    /// The node an escape request would start from.
    pub fn top(&self) -> Option<NodeId> {
        self.stacks
            .iter_top_down()
            .filter(|(layer, _)| self.escape_layers.contains(layer))
            .map(|(_, id)| id)
            .find(|id| {
                self.tree.is_shown(*id) && self.tree.get(*id).is_ok_and(|n| n.is_interactive())
            })
    }

    /// Opens the singleton instance of `panel`, or brings the open one to front.
    pub fn open_panel(
        &mut self,
        panel: &str,
        params: Option<PanelParams>,
    ) -> Result<NodeId, PanelError> {
        if let Some(existing) = self.find_open(panel) {
            return self.reopen(existing, params);
        }
        let layer = self.catalog.get(panel)?.layer();
        let node = self.construct(self.layer_root(layer), panel, params)?;
        self.singletons.insert(PanelId::from(panel), node);
        Ok(node)
    }

    /// Opens a new instance of `panel`, even if others are open.
    pub fn show_window(
        &mut self,
        panel: &str,
        params: Option<PanelParams>,
    ) -> Result<NodeId, PanelError> {
        let layer = self.catalog.get(panel)?.layer();
        self.construct(self.layer_root(layer), panel, params)
    }

    /// Opens a new instance of `panel` nested under an open node.
    pub fn open_child(
        &mut self,
        parent: NodeId,
        panel: &str,
        params: Option<PanelParams>,
    ) -> Result<NodeId, PanelError> {
        self.construct(parent, panel, params)
    }

    fn construct(
        &mut self,
        parent: NodeId,
        panel: &str,
        params: Option<PanelParams>,
    ) -> Result<NodeId, PanelError> {
        let desc = self.catalog.get(panel)?;
        let layer = desc.layer();
        let node = self
            .tree
            .create_node(parent, desc.node_spec(), desc.make_behavior())?;
        self.stacks.push(layer, node);
        self.tree
            .behavior_mut(node)?
            .on_construct(node, params.as_ref());
        self.refresh_interactivity();
        tracing::debug!(panel, layer = layer.name(), node = ?node, "panel opened");
        Ok(node)
    }

    fn reopen(&mut self, node: NodeId, params: Option<PanelParams>) -> Result<NodeId, PanelError> {
        self.stacks.bring_to_front(node);
        self.tree.show(node)?;
        self.tree
            .behavior_mut(node)?
            .on_reopen(node, params.as_ref());
        self.refresh_interactivity();
        tracing::debug!(node = ?node, "panel brought to front");
        Ok(node)
    }

    /// Destroys `node` and everything nested under it.
    pub fn close_panel(&mut self, node: NodeId) -> Result<(), PanelError> {
        let removed = self.tree.detach(node)?;
        self.forget(&removed);
        self.refresh_interactivity();
        tracing::debug!(node = ?node, removed = removed.len(), "panel closed");
        Ok(())
    }

    /// Hides `node` without destroying it. Returns `false` if already hidden.
    pub fn hide_panel(&mut self, node: NodeId) -> Result<bool, PanelError> {
        let changed = self.tree.hide(node)?;
        if changed {
            self.refresh_interactivity();
        }
        Ok(changed)
    }

    /// Routes an escape request to the top-most interactive node.
    /// Returns whether any node handled it.
    pub fn handle_escape(&mut self) -> Result<bool, PanelError> {
        let Some(target) = self.top() else {
            tracing::debug!("escape: nothing open");
            return Ok(false);
        };
        let outcome = self.tree.escalate_escape(target)?;
        match &outcome {
            EscapeOutcome::Closed { removed, .. } => self.forget(removed),
            EscapeOutcome::Hidden(_)
            | EscapeOutcome::Custom { .. }
            | EscapeOutcome::Unhandled => {}
        }
        self.refresh_interactivity();
        tracing::debug!(from = ?target, outcome = ?outcome, "escape");
        Ok(outcome.handled())
    }

    fn forget(&mut self, removed: &[NodeId]) {
        self.stacks.retain(|id| !removed.contains(&id));
        self.singletons.retain(|_, id| !removed.contains(id));
    }

    // A shown full-screen node blocks everything beneath it, across layers.
    fn refresh_interactivity(&mut self) {
        let order: Vec<NodeId> = self.stacks.iter_top_down().map(|(_, id)| id).collect();
        let mut blocked = false;
        for id in order {
            self.tree.set_interactive(id, !blocked);
            let blocks = self.tree.is_shown(id)
                && self.tree.get(id).is_ok_and(|n| n.is_full_screen());
            blocked |= blocks;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/manager.rs"]
mod tests;
