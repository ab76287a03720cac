//! # Subsystem Container
//!
//! Central container holding all subsystem instances with their adapters
//! and the shared store, bus and clock.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, DocflowConfig};
pub use subsystems::{
    DocflowContainer, DraftsService, LifecycleService, NumberingService, RuntimeHandle,
    StatusService,
};
