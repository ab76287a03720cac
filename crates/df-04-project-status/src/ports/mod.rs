//! Ports module for the Project Status subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::ProjectStatusApi;
pub use outbound::ProjectStatusStore;
