//! Domain module for the Drafts subsystem

pub mod form;

pub use form::{FormSource, SaveOutcome};
