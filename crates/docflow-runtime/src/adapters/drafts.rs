//! Lifecycle (2) ↔ Drafts (3)
//!
//! Both directions go through narrow adapters so neither subsystem needs
//! the other's service to be constructed first.

use std::sync::Arc;

use async_trait::async_trait;
use df_02_lifecycle::{DraftGateway, LifecycleApi};
use df_03_drafts::{DraftError, DraftRepository, DraftResult, FinalDocumentSource};
use shared_types::{DocumentRecord, DocumentType, ProjectId, StoreError};

/// Lets the lifecycle clear a draft after finalizing, straight on the
/// draft repository.
pub struct RepositoryDraftGateway<R: DraftRepository> {
    drafts: Arc<R>,
}

impl<R: DraftRepository> RepositoryDraftGateway<R> {
    pub fn new(drafts: Arc<R>) -> Self {
        Self { drafts }
    }
}

#[async_trait]
impl<R: DraftRepository + 'static> DraftGateway for RepositoryDraftGateway<R> {
    async fn clear_draft(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> Result<(), StoreError> {
        self.drafts.clear(project_id, document_type).await
    }
}

/// Lets the drafts coordinator see the active final record.
pub struct LifecycleFinalDocuments<L: LifecycleApi> {
    lifecycle: Arc<L>,
}

impl<L: LifecycleApi> LifecycleFinalDocuments<L> {
    pub fn new(lifecycle: Arc<L>) -> Self {
        Self { lifecycle }
    }
}

#[async_trait]
impl<L: LifecycleApi + 'static> FinalDocumentSource for LifecycleFinalDocuments<L> {
    async fn active_final(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> DraftResult<Option<DocumentRecord>> {
        self.lifecycle
            .load_current(project_id, document_type)
            .await
            .map_err(|e| DraftError::Lookup(e.to_string()))
    }
}
