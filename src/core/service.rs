//! Collaborator services handed to handlers and panels by type.
//!
//! Id generators, serializers, audio hooks and similar collaborators live
//! here so handlers can reach them without global singletons.

use std::any::{Any, TypeId};
use std::fmt;

use rustc_hash::FxHashMap;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    NotFound(&'static str),
    AlreadyRegistered(&'static str),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(name) => write!(f, "service not found: {}", name),
            ServiceError::AlreadyRegistered(name) => {
                write!(f, "service already registered: {}", name)
            }
        }
    }
}

impl std::error::Error for ServiceError {}

pub trait Service: Any {
    fn name(&self) -> &'static str;
}

#[derive(Default)]
pub struct ServiceRegistry {
    services: FxHashMap<TypeId, Box<dyn Any>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: Service>(&mut self, service: S) -> Result<()> {
        let type_id = TypeId::of::<S>();
        if self.services.contains_key(&type_id) {
            return Err(ServiceError::AlreadyRegistered(service.name()));
        }
        tracing::debug!(service = service.name(), "service registered");
        self.services.insert(type_id, Box::new(service));
        Ok(())
    }

    pub fn get<S: Service>(&self) -> Option<&S> {
        self.services
            .get(&TypeId::of::<S>())
            .and_then(|s| s.downcast_ref::<S>())
    }

    pub fn get_mut<S: Service>(&mut self) -> Option<&mut S> {
        self.services
            .get_mut(&TypeId::of::<S>())
            .and_then(|s| s.downcast_mut::<S>())
    }

    /// Like [`get_mut`](Self::get_mut) but reports which service was missing.
    pub fn require_mut<S: Service>(&mut self) -> Result<&mut S> {
        self.get_mut::<S>()
            .ok_or(ServiceError::NotFound(std::any::type_name::<S>()))
    }

    pub fn contains<S: Service>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<S>())
    }

    pub fn remove<S: Service>(&mut self) -> Option<S> {
        self.services
            .remove(&TypeId::of::<S>())
            .and_then(|s| s.downcast::<S>().ok())
            .map(|s| *s)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/service.rs"]
mod tests;
