use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::core::{EscapePolicy, Layer, PanelId};
use crate::models::{Inert, NodeBehavior, NodeSpec, TreeError};
use crate::services::settings::NavSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    UnknownPanel(PanelId),
    DuplicatePanel(PanelId),
    Tree(TreeError),
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::UnknownPanel(id) => write!(f, "unknown panel: {}", id),
            PanelError::DuplicatePanel(id) => write!(f, "panel declared twice: {}", id),
            PanelError::Tree(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for PanelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PanelError::Tree(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TreeError> for PanelError {
    fn from(err: TreeError) -> Self {
        PanelError::Tree(err)
    }
}

type BehaviorFactory = Rc<dyn Fn() -> Box<dyn NodeBehavior>>;

/// Static description of a panel type: where it goes and how it behaves.
#[derive(Clone)]
pub struct PanelDescriptor {
    id: PanelId,
    layer: Layer,
    escape: EscapePolicy,
    full_screen: bool,
    factory: BehaviorFactory,
}

impl PanelDescriptor {
    pub fn new(id: impl Into<PanelId>, layer: Layer) -> Self {
        Self {
            id: id.into(),
            layer,
            escape: EscapePolicy::default(),
            full_screen: false,
            factory: Rc::new(|| Box::new(Inert) as Box<dyn NodeBehavior>),
        }
    }

    pub fn escape(mut self, escape: EscapePolicy) -> Self {
        self.escape = escape;
        self
    }

    pub fn full_screen(mut self, full_screen: bool) -> Self {
        self.full_screen = full_screen;
        self
    }

    /// Builds the behavior attached to each node opened from this descriptor.
    pub fn behavior<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn NodeBehavior> + 'static,
    {
        self.factory = Rc::new(factory);
        self
    }

    pub fn id(&self) -> &PanelId {
        &self.id
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

    pub fn node_spec(&self) -> NodeSpec {
        NodeSpec::new(self.layer, self.escape)
            .panel(self.id.clone())
            .full_screen(self.full_screen)
    }

    pub fn make_behavior(&self) -> Box<dyn NodeBehavior> {
        (self.factory)()
    }
}

impl fmt::Debug for PanelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelDescriptor")
            .field("id", &self.id)
            .field("layer", &self.layer)
            .field("escape", &self.escape)
            .field("full_screen", &self.full_screen)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct PanelCatalog {
    panels: FxHashMap<PanelId, PanelDescriptor>,
}

impl PanelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: PanelDescriptor) -> Result<(), PanelError> {
        if self.panels.contains_key(descriptor.id()) {
            return Err(PanelError::DuplicatePanel(descriptor.id.clone()));
        }
        self.panels.insert(descriptor.id.clone(), descriptor);
        Ok(())
    }

    pub fn with(mut self, descriptor: PanelDescriptor) -> Result<Self, PanelError> {
        self.register(descriptor)?;
        Ok(self)
    }

    pub fn get(&self, id: &str) -> Result<&PanelDescriptor, PanelError> {
        self.panels
            .get(id)
            .ok_or_else(|| PanelError::UnknownPanel(PanelId::from(id)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.panels.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Applies per-panel overrides. Overrides naming unknown panels are skipped.
    pub fn apply_settings(&mut self, settings: &NavSettings) {
        for over in &settings.panels {
            let Some(desc) = self.panels.get_mut(over.id.as_str()) else {
                tracing::warn!(panel = %over.id, "override for unknown panel ignored");
                continue;
            };
            if let Some(layer) = over.layer {
                desc.layer = layer;
            }
            if let Some(escape) = over.escape {
                desc.escape = escape;
            }
            if let Some(full_screen) = over.full_screen {
                desc.full_screen = full_screen;
            }
            tracing::debug!(panel = %desc.id, layer = desc.layer.name(), "panel override applied");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/panels.rs"]
mod tests;
