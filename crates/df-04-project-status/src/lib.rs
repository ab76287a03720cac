//! # df-04-project-status
//!
//! Project Status Coordinator: keeps each project's sales-pipeline stage in
//! step with its documents, but only with the user's confirmation.
//!
//! ## Pipeline
//!
//! ```text
//! quotation → quotationSent → orderConfirmation → deliveryNote → invoice → paid
//!      └───────────────┴──────────────┴──────────────┴───────────┴────────┴──→ lost
//! ```
//!
//! ## Confirm-and-apply
//!
//! ```text
//! Lifecycle (2) ──DocumentFinalized──→ FinalizationSubscriber
//!                                          │ propose
//!                                          ▼
//!                               ProjectStatusCoordinator ──StatusTransitionProposed──→ UI
//!                                          ▲
//!                     resolve(token, AcceptWithTransition | AcceptWithoutTransition)
//! ```
//!
//! A proposal is made only when the document advances the project. The
//! first resolution consumes the token; accepting a proposal whose `from`
//! no longer matches the project is rejected as stale.
//!
//! ## Example
//!
//! ```rust,ignore
//! use df_04_project_status::{Decision, ProjectStatusApi};
//!
//! if let Some(proposal) = status.propose(&project, DocumentType::Invoice).await? {
//!     status.resolve(proposal.token, Decision::AcceptWithTransition).await?;
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{FinalizationSubscriber, StoreProjectStatus};
pub use domain::{is_advance, propose_transition, Decision, PendingTransition, Resolution};
pub use error::{StatusError, StatusResult};
pub use ports::{ProjectStatusApi, ProjectStatusStore};
pub use service::{ProjectStatusCoordinator, StatusConfig};
