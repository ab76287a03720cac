//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits. Adapters to the other docflow
//! subsystems live in the runtime.

mod artifacts;
mod mocks;
mod store;

pub use artifacts::InMemoryArtifactGenerator;
pub use mocks::{RecordingDraftGateway, SequentialNumberSource};
pub use store::StoreDocumentRepository;
