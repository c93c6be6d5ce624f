//! Headless navigation core: event dispatch and panel management.

pub mod dispatch;
pub mod event_bus;
pub mod manager;
pub mod panels;
pub mod registry;

pub use dispatch::{DispatchError, Dispatcher};
pub use event_bus::{EventBus, SubscriptionId};
pub use manager::PanelManager;
pub use panels::{PanelCatalog, PanelDescriptor, PanelError};
pub use registry::{
    Handler, HandlerDef, HandlerDescriptor, HandlerError, HandlerResult, Registry, RegistryError,
};
