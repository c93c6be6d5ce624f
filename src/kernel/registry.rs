//! Event key registry: one handler instance per key, built once.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::core::EventKey;

/// Errors raised by handler code, passed through the dispatcher untouched.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = Result<(), HandlerError>;

/// Reacts to a published key. `C` is whatever context the composition root
/// threads through `publish`, typically [`crate::app::NavContext`].
pub trait Handler<C> {
    fn on_publish(&self, cx: &mut C) -> HandlerResult;

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateKey(EventKey),
    UnknownKey(EventKey),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateKey(key) => {
                write!(f, "more than one handler declared for event key {:?}", key.as_str())
            }
            RegistryError::UnknownKey(key) => {
                write!(f, "no handler registered for event key {:?}", key.as_str())
            }
        }
    }
}

impl std::error::Error for RegistryError {}

type HandlerFactory<C> = Box<dyn FnOnce() -> Box<dyn Handler<C>>>;

/// One entry of the registration list handed to [`Registry::build`].
pub struct HandlerDef<C> {
    key: EventKey,
    factory: HandlerFactory<C>,
}

impl<C> HandlerDef<C> {
    pub fn new<F>(key: impl Into<EventKey>, factory: F) -> Self
    where
        F: FnOnce() -> Box<dyn Handler<C>> + 'static,
    {
        Self {
            key: key.into(),
            factory: Box::new(factory),
        }
    }

    pub fn key(&self) -> &EventKey {
        &self.key
    }
}

impl<C: 'static> HandlerDef<C> {
    /// Declares a zero-argument constructible handler type.
    pub fn of<H>(key: impl Into<EventKey>) -> Self
    where
        H: Handler<C> + Default + 'static,
    {
        Self::new(key, || Box::new(H::default()) as Box<dyn Handler<C>>)
    }
}

pub struct HandlerDescriptor<C> {
    key: EventKey,
    handler: Box<dyn Handler<C>>,
}

impl<C> HandlerDescriptor<C> {
    pub fn key(&self) -> &EventKey {
        &self.key
    }

    pub fn name(&self) -> &'static str {
        self.handler.name()
    }

    pub fn handler(&self) -> &dyn Handler<C> {
        self.handler.as_ref()
    }

    pub fn on_publish(&self, cx: &mut C) -> HandlerResult {
        self.handler.on_publish(cx)
    }
}

pub struct Registry<C> {
    handlers: FxHashMap<EventKey, HandlerDescriptor<C>>,
}

impl<C> Registry<C> {
    pub fn empty() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    pub fn build<I>(defs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = HandlerDef<C>>,
    {
        let mut handlers = FxHashMap::default();
        for def in defs {
            if handlers.contains_key(&def.key) {
                tracing::error!(key = %def.key, "duplicate event key");
                return Err(RegistryError::DuplicateKey(def.key));
            }
            let handler = (def.factory)();
            tracing::debug!(key = %def.key, handler = handler.name(), "handler registered");
            handlers.insert(
                def.key.clone(),
                HandlerDescriptor {
                    key: def.key,
                    handler,
                },
            );
        }
        Ok(Self { handlers })
    }

    pub fn resolve(&self, key: &str) -> Result<&HandlerDescriptor<C>, RegistryError> {
        self.handlers
            .get(key)
            .ok_or_else(|| RegistryError::UnknownKey(EventKey::from(key)))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &EventKey> {
        self.handlers.keys()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/registry.rs"]
mod tests;
