//! # df-02-lifecycle
//!
//! Document Lifecycle Manager: turns drafts into immutable, numbered records
//! and governs what may happen to them afterwards.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Finalize**: number, snapshot, artifact, record, draft clear, event
//! - **Versions**: delivery notes are superseded by a new version sharing
//!   the number; old versions stay retrievable
//! - **Storno**: invoices are voided by a linked reversal record with its
//!   own number, which re-opens invoicing for the project
//!
//! ## Architecture
//!
//! ```text
//!                  ┌──next_number──→ Numbering (1)
//!                  │
//! Lifecycle (2) ───┼──generate────→ PDF renderer (external)
//!                  │
//!                  ├──clear_draft─→ Drafts (3)
//!                  │
//!                  └──DocumentFinalized / DocumentRevised / InvoiceReversed──→ Event Bus
//! ```
//!
//! ## Record Lifecycle
//!
//! | Type | finalize again | revise_version | reverse |
//! |------|----------------|----------------|---------|
//! | quotation, orderConfirmation | rejected | rejected | rejected |
//! | deliveryNote | new version | new version | rejected |
//! | invoice | rejected until reversed | rejected | storno |
//! | proformaInvoice | new record | rejected | rejected |
//!
//! ## Example
//!
//! ```rust,ignore
//! use df_02_lifecycle::{DocumentLifecycleManager, LifecycleApi, LifecycleConfig};
//!
//! let invoice = manager.finalize(&project, DocumentType::Invoice, payload).await?;
//! let outcome = manager.reverse(invoice.id, "Preiskorrektur").await?;
//! assert!(manager.can_create_new_invoice(&project).await?);
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{
    InMemoryArtifactGenerator, RecordingDraftGateway, SequentialNumberSource,
    StoreDocumentRepository,
};
pub use domain::{DocumentState, FinalizePlan, Operation, VoidPayload};
pub use error::{ArtifactError, LifecycleError, LifecycleResult};
pub use ports::{
    ArtifactGenerator, DocumentRepository, DraftGateway, LifecycleApi, NumberSource,
    ReversalOutcome,
};
pub use service::{DocumentLifecycleManager, LifecycleConfig};
