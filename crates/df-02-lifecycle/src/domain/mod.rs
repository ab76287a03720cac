//! Domain module for the Lifecycle subsystem
//!
//! - state: derived `DocumentState` and lifecycle operations
//! - rules: pure precondition checks per `(project, documentType)`
//! - void: payload of storno records

pub mod rules;
pub mod state;
pub mod void;

pub use rules::FinalizePlan;
pub use state::{DocumentState, Operation};
pub use void::VoidPayload;
