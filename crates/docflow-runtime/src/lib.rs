//! # Docflow Runtime
//!
//! Builds the numbering, lifecycle, drafts and project-status subsystems
//! on one document store and one event bus.
//!
//! ## Architectural Patterns
//!
//! - **EDA (Event-Driven Architecture)**: follow-up work across subsystems
//!   is triggered by bus events only
//! - **Hexagonal Architecture**: subsystems define ports, this crate
//!   provides the adapters that connect them
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docflow_runtime::{DocflowConfig, DocflowContainer};
//!
//! let config = DocflowConfig::load("docflow.toml")?;
//! docflow_telemetry::init_telemetry(&config.telemetry)?;
//!
//! let container = DocflowContainer::new(config, store, renderer, Arc::new(SystemClock))?;
//! let handle = container.start();
//! ```

pub mod adapters;
pub mod container;
pub mod wiring;

pub use container::{ConfigError, DocflowConfig, DocflowContainer, RuntimeHandle};
