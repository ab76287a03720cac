//! # Shared Types Crate
//!
//! Domain entities, the document-number format and the `DocumentStore`
//! port shared by every docflow subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem types live here and nowhere else.
//! - **Store-agnostic core**: subsystems talk to persistence only through
//!   `store::DocumentStore`; the hosted database is an adapter.
//! - **Stable wire keys**: every enum serialized to the store uses camelCase
//!   keys that match the outer application's data model.

pub mod entities;
pub mod errors;
pub mod numbering;
pub mod store;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use numbering::{DocumentNumber, NumberKind};
pub use store::{DocumentStore, Fields, InMemoryDocumentStore, Predicate, StoredRecord};
pub use time::{Clock, FixedClock, SystemClock};
