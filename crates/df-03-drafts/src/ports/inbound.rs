//! Driving Ports (API - Inbound)

use crate::domain::{FormSource, SaveOutcome};
use crate::error::DraftResult;
use async_trait::async_trait;
use shared_types::{DocumentType, Payload, ProjectId};

/// Primary Drafts API
///
/// Callers are expected to debounce edits (see `AutosaveDebouncer`);
/// `save` itself writes on every call.
#[async_trait]
pub trait DraftApi: Send + Sync {
    /// Overwrite the draft unless an active final record owns the key.
    async fn save(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
        payload: Payload,
    ) -> DraftResult<SaveOutcome>;

    /// Form content, final payload first.
    async fn load(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> DraftResult<Option<Payload>>;

    /// Form content with its origin.
    async fn rehydrate(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> DraftResult<FormSource>;

    async fn clear(&self, project_id: &ProjectId, document_type: DocumentType) -> DraftResult<()>;
}
