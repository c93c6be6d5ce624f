//! Application wiring: the handler context and the host that drives it.

pub mod context;
pub mod host;

pub use context::NavContext;
pub use host::{HostError, NavigationHost, PumpSummary};
