//! Domain layer for Project Status

pub mod pipeline;
pub mod proposal;

pub use pipeline::{is_advance, propose_transition};
pub use proposal::{Decision, PendingTransition, Resolution};
