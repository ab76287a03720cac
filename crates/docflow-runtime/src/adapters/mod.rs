//! # Runtime Adapters
//!
//! Each adapter implements one subsystem's outbound port on top of another
//! subsystem's inbound API or repository.
//!
//! | Adapter | Port (owner) | Backed by |
//! |---------|--------------|-----------|
//! | `AllocatorNumberSource` | `NumberSource` (2) | `NumberingApi` (1) |
//! | `RepositoryDraftGateway` | `DraftGateway` (2) | `DraftRepository` (3) |
//! | `LifecycleFinalDocuments` | `FinalDocumentSource` (3) | `LifecycleApi` (2) |

mod drafts;
mod numbering;

pub use drafts::{LifecycleFinalDocuments, RepositoryDraftGateway};
pub use numbering::AllocatorNumberSource;
