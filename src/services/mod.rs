//! Services around the navigation core.
//!
//! - `bus`: cross-thread request marshaling
//! - `settings`: JSON settings

pub mod bus;
pub mod settings;

pub use bus::{nav_bus, NavBusReceiver, NavBusSender, NavMessage};
pub use settings::{load_settings, NavSettings, PanelOverride, SettingsError};
