//! Context handed to every handler on publish.

use std::rc::Rc;

use crate::core::service::Result as ServiceResult;
use crate::core::{Service, ServiceRegistry};
use crate::kernel::{EventBus, PanelManager};

pub struct NavContext {
    panels: PanelManager,
    events: Rc<EventBus>,
    services: ServiceRegistry,
}

impl NavContext {
    pub fn new(panels: PanelManager) -> Self {
        Self::with_services(panels, ServiceRegistry::new())
    }

    pub fn with_services(panels: PanelManager, services: ServiceRegistry) -> Self {
        Self {
            panels,
            events: Rc::new(EventBus::new()),
            services,
        }
    }

    pub fn panels(&self) -> &PanelManager {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut PanelManager {
        &mut self.panels
    }

    /// Shared so subscribers can hold on to the bus themselves.
    pub fn events(&self) -> &Rc<EventBus> {
        &self.events
    }

    pub fn register<S: Service>(&mut self, service: S) -> ServiceResult<()> {
        self.services.register(service)
    }

    pub fn service<S: Service>(&self) -> Option<&S> {
        self.services.get::<S>()
    }

    pub fn service_mut<S: Service>(&mut self) -> Option<&mut S> {
        self.services.get_mut::<S>()
    }

    pub fn services_mut(&mut self) -> &mut ServiceRegistry {
        &mut self.services
    }
}
