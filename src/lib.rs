//! navkit - UI navigation and event dispatch core
//!
//! Module layout:
//! - core: shared ids, layers, escape policies, collaborator services
//! - models: the navigation tree and per-layer stacks
//! - kernel: event key registry, dispatcher, typed event bus, panel manager
//! - services: cross-thread request bus, settings
//! - app: handler context and the host that pumps requests
//! - logging: tracing subscriber setup

pub mod app;
pub mod core;
pub mod kernel;
pub mod logging;
pub mod models;
pub mod services;
