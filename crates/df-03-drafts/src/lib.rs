//! # df-03-drafts
//!
//! Draft Autosave Coordinator: keeps the in-progress copy of every
//! `(project, documentType)` editor and decides what a form opens with.
//!
//! ## Overview
//!
//! - One draft per key, overwritten wholesale on every save
//! - A draft is never written while an active final record owns the key
//! - Opening an editor shows the final record read-only if there is one
//! - Proforma invoices are exempt: their drafts prepare the next proforma
//!
//! ## Architecture
//!
//! ```text
//! Editor ──push──→ AutosaveDebouncer ──save (after quiet period)──┐
//!                                                                 ▼
//!                                       DraftAutosaveCoordinator (3)
//!                                         │                  │
//!                                  DraftRepository   FinalDocumentSource
//!                                         │                  │
//!                                   drafts collection   Lifecycle (2)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use df_03_drafts::{AutosaveDebouncer, DraftApi, FormSource};
//!
//! let autosave = AutosaveDebouncer::spawn(api.clone(), project.clone(), DocumentType::Quotation, quiet);
//! autosave.push(payload);
//!
//! match api.rehydrate(&project, DocumentType::Quotation).await? {
//!     FormSource::Final { record } => show_read_only(record),
//!     FormSource::Draft { payload, .. } => edit(payload),
//!     FormSource::Empty => edit_blank(),
//! }
//! ```

pub mod adapters;
pub mod debouncer;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryFinalDocuments, StoreDraftRepository};
pub use debouncer::AutosaveDebouncer;
pub use domain::{FormSource, SaveOutcome};
pub use error::{DraftError, DraftResult};
pub use ports::{DraftApi, DraftRepository, FinalDocumentSource};
pub use service::{DraftAutosaveCoordinator, DraftConfig};
