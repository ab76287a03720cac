//! Ports module for the Drafts subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::DraftApi;
pub use outbound::{DraftRepository, FinalDocumentSource};
