//! Ports module for the Lifecycle subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::{LifecycleApi, ReversalOutcome};
pub use outbound::{ArtifactGenerator, DocumentRepository, DraftGateway, NumberSource};
