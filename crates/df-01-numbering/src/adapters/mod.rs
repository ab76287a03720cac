//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits over the shared document store.

mod store;

pub use store::{StoreCounterAdapter, StoreNumberRegistry};
