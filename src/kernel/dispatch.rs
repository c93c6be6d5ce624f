use std::fmt;

use crate::core::EventKey;

use super::registry::{HandlerError, Registry};

#[derive(Debug)]
pub enum DispatchError {
    UnknownKey(EventKey),
    /// The handler failed; `source` is exactly what it returned.
    Handler { key: EventKey, source: HandlerError },
}

impl DispatchError {
    pub fn key(&self) -> &EventKey {
        match self {
            DispatchError::UnknownKey(key) | DispatchError::Handler { key, .. } => key,
        }
    }

    pub fn into_handler_error(self) -> Option<HandlerError> {
        match self {
            DispatchError::Handler { source, .. } => Some(source),
            DispatchError::UnknownKey(_) => None,
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownKey(key) => {
                write!(f, "no handler registered for event key {:?}", key.as_str())
            }
            DispatchError::Handler { key, source } => {
                write!(f, "handler for {:?} failed: {}", key.as_str(), source)
            }
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Handler { source, .. } => Some(source.as_ref()),
            DispatchError::UnknownKey(_) => None,
        }
    }
}

/// Resolves event keys and runs their handlers on the calling thread.
pub struct Dispatcher<C> {
    registry: Registry<C>,
}

impl<C> Dispatcher<C> {
    pub fn new(registry: Registry<C>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry<C> {
        &self.registry
    }

    /// Swaps in a freshly built registry, returning the previous one.
    pub fn replace_registry(&mut self, registry: Registry<C>) -> Registry<C> {
        std::mem::replace(&mut self.registry, registry)
    }

    pub fn publish(&self, key: &str, cx: &mut C) -> Result<(), DispatchError> {
        let Ok(descriptor) = self.registry.resolve(key) else {
            tracing::debug!(key, "publish to unregistered key");
            return Err(DispatchError::UnknownKey(EventKey::from(key)));
        };
        tracing::debug!(key, handler = descriptor.name(), "publish");
        descriptor
            .on_publish(cx)
            .map_err(|source| DispatchError::Handler {
                key: descriptor.key().clone(),
                source,
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/dispatch.rs"]
mod tests;
