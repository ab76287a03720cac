//! # Adapters Layer (Hexagonal Architecture)

mod mocks;
mod store;

pub use mocks::InMemoryFinalDocuments;
pub use store::StoreDraftRepository;
