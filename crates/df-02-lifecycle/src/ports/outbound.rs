//! Driven Ports (SPI - Outbound Dependencies)

use crate::error::{ArtifactError, LifecycleResult};
use async_trait::async_trait;
use shared_types::{
    ArtifactRef, DocumentNumber, DocumentRecord, DocumentType, LifecycleState, NumberSeries,
    Payload, ProjectId, RecordId, StoreError,
};

/// Source of document numbers
///
/// Implemented by the runtime over the Numbering subsystem (1).
#[async_trait]
pub trait NumberSource: Send + Sync {
    async fn next_number(&self, series: NumberSeries) -> LifecycleResult<DocumentNumber>;
}

/// Renders a document and stores the result
///
/// The PDF renderer lives outside the core; it returns a reference to the
/// stored bytes.
#[async_trait]
pub trait ArtifactGenerator: Send + Sync {
    async fn generate(
        &self,
        document_type: DocumentType,
        number: &DocumentNumber,
        payload: &Payload,
    ) -> Result<ArtifactRef, ArtifactError>;
}

/// Persistence of document records
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Store a new record. Records are never overwritten.
    async fn insert(&self, record: &DocumentRecord) -> Result<(), StoreError>;

    async fn get(&self, id: RecordId) -> Result<Option<DocumentRecord>, StoreError>;

    /// Write the lifecycle state of an existing record (only ever to `Reversed`).
    async fn set_state(&self, id: RecordId, state: &LifecycleState) -> Result<(), StoreError>;

    /// All records of a project and type, oldest first.
    async fn list(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> Result<Vec<DocumentRecord>, StoreError>;

    /// The record whose `supersedes` points at `id`.
    async fn successor_of(&self, id: RecordId) -> Result<Option<DocumentRecord>, StoreError>;

    /// The storno record whose `reversalOf` points at `id`.
    async fn reversal_of(&self, id: RecordId) -> Result<Option<DocumentRecord>, StoreError>;
}

/// Clears the draft of a key once its final record exists
///
/// Implemented by the runtime over the Drafts subsystem (3).
#[async_trait]
pub trait DraftGateway: Send + Sync {
    async fn clear_draft(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> Result<(), StoreError>;
}
