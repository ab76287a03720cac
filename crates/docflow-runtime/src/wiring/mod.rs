//! # Subsystem Wiring Module
//!
//! Each subsystem defines its **ports** (traits). The runtime provides
//! **adapters** implementing them and routes bus events between subsystems.

pub mod event_routing;

pub use event_routing::MetricsRouter;
