//! Shared vocabulary of the navigation core.
//!
//! - `ids`: event keys and panel ids
//! - `policy`: layers and escape policies
//! - `service`: typed collaborator registry

pub mod ids;
pub mod policy;
pub mod service;

pub use ids::{EventKey, PanelId};
pub use policy::{EscapePolicy, Layer};
pub use service::{Service, ServiceError, ServiceRegistry};
