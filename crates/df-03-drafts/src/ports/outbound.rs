//! Driven Ports (SPI - Outbound Dependencies)

use crate::error::DraftResult;
use async_trait::async_trait;
use shared_types::{DocumentRecord, DocumentType, DraftRecord, ProjectId, StoreError};

/// Persistence of drafts, one per `(project, documentType)`.
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// The live draft, `None` if absent or cleared.
    async fn get(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> Result<Option<DraftRecord>, StoreError>;

    /// Overwrite the draft wholesale.
    async fn put(&self, draft: &DraftRecord) -> Result<(), StoreError>;

    /// Mark the draft cleared. Clearing a missing draft is not an error.
    async fn clear(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> Result<(), StoreError>;
}

/// Read access to finalized records
///
/// Implemented by the runtime over the Lifecycle subsystem (2).
#[async_trait]
pub trait FinalDocumentSource: Send + Sync {
    /// The active final record of the key, if any.
    async fn active_final(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> DraftResult<Option<DocumentRecord>>;
}
