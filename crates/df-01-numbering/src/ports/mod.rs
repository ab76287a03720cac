//! Ports module for the Numbering subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::NumberingApi;
pub use outbound::{CounterStore, NumberOwner, NumberRegistry};
