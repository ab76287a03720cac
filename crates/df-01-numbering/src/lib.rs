//! # df-01-numbering
//!
//! Sequence Allocator issuing collision-free, year-scoped document numbers.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Sequential numbers**: `PREFIX-YYYY-NNNN`, one counter per series and year
//! - **Year rollover**: the first number of a new year is `...-0001`
//! - **Collision skipping**: candidates already used by a record are skipped
//! - **Fallback**: `PREFIX-YYYY-TEMP-<millis>-<DDD>` when allocation cannot
//!   complete, so finalizing a document never fails on numbering
//!
//! ## Architecture
//!
//! ```text
//! Lifecycle (2) ──allocate──→ Numbering (1) ──load/save──→ sequence_counters
//!                                   │
//!                                   ├──owners_of──→ documents
//!                                   │
//!                                   └──NumberAllocated──→ Event Bus
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use df_01_numbering::{NumberingApi, NumberingConfig, SequenceAllocator};
//!
//! let allocator = SequenceAllocator::new(
//!     NumberingConfig::default(),
//!     counters,
//!     registry,
//!     clock,
//!     events,
//! );
//!
//! let number = allocator.allocate(DocumentType::Invoice).await?;
//! assert_eq!(number.to_string(), "RE-2025-0001");
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{StoreCounterAdapter, StoreNumberRegistry};
pub use domain::{PrefixTable, SequenceCounter};
pub use error::{NumberingError, NumberingResult};
pub use ports::{CounterStore, NumberOwner, NumberRegistry, NumberingApi};
pub use service::{NumberingConfig, SequenceAllocator};
