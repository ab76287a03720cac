//! Draft Autosave Coordinator - core draft logic

use crate::domain::{FormSource, SaveOutcome};
use crate::error::DraftResult;
use crate::ports::inbound::DraftApi;
use crate::ports::outbound::{DraftRepository, FinalDocumentSource};
use async_trait::async_trait;
use shared_types::{Clock, DocumentType, DraftRecord, Payload, ProjectId};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Drafts configuration
#[derive(Clone, Debug)]
pub struct DraftConfig {
    /// Quiet period before an autosave is written
    pub debounce: Duration,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1500),
        }
    }
}

/// Draft Autosave Coordinator implementation
///
/// A draft never competes with an active final record: saves are skipped
/// and loads prefer the final payload. Proforma invoices are exempt because
/// a project may issue several of them.
pub struct DraftAutosaveCoordinator<R, F>
where
    R: DraftRepository,
    F: FinalDocumentSource,
{
    config: DraftConfig,
    drafts: Arc<R>,
    finals: Arc<F>,
    clock: Arc<dyn Clock>,
}

impl<R, F> DraftAutosaveCoordinator<R, F>
where
    R: DraftRepository,
    F: FinalDocumentSource,
{
    pub fn new(config: DraftConfig, drafts: Arc<R>, finals: Arc<F>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            drafts,
            finals,
            clock,
        }
    }

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    async fn draft_source(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> DraftResult<Option<FormSource>> {
        Ok(self
            .drafts
            .get(project_id, document_type)
            .await?
            .map(|d| FormSource::Draft {
                payload: d.payload,
                updated_at: d.updated_at,
            }))
    }

    async fn final_source(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> DraftResult<Option<FormSource>> {
        Ok(self
            .finals
            .active_final(project_id, document_type)
            .await?
            .map(|record| FormSource::Final { record }))
    }
}

#[async_trait]
impl<R, F> DraftApi for DraftAutosaveCoordinator<R, F>
where
    R: DraftRepository + 'static,
    F: FinalDocumentSource + 'static,
{
    async fn save(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
        payload: Payload,
    ) -> DraftResult<SaveOutcome> {
        if !document_type.allows_multiple_active() {
            if let Some(record) = self.finals.active_final(project_id, document_type).await? {
                debug!(
                    project_id = %project_id,
                    doc_type = %document_type,
                    number = %record.document_number,
                    "draft save skipped, final record exists"
                );
                return Ok(SaveOutcome::SkippedFinalExists {
                    record_id: record.id,
                });
            }
        }

        let updated_at = self.clock.now();
        self.drafts
            .put(&DraftRecord {
                project_id: project_id.clone(),
                document_type,
                payload,
                updated_at,
            })
            .await?;
        debug!(project_id = %project_id, doc_type = %document_type, "draft saved");
        Ok(SaveOutcome::Saved { updated_at })
    }

    async fn load(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> DraftResult<Option<Payload>> {
        Ok(self.rehydrate(project_id, document_type).await?.into_payload())
    }

    async fn rehydrate(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> DraftResult<FormSource> {
        // A proforma draft is the next proforma, not an edit of the last one.
        let source = if document_type.allows_multiple_active() {
            match self.draft_source(project_id, document_type).await? {
                Some(source) => Some(source),
                None => self.final_source(project_id, document_type).await?,
            }
        } else {
            match self.final_source(project_id, document_type).await? {
                Some(source) => Some(source),
                None => self.draft_source(project_id, document_type).await?,
            }
        };
        Ok(source.unwrap_or(FormSource::Empty))
    }

    async fn clear(&self, project_id: &ProjectId, document_type: DocumentType) -> DraftResult<()> {
        self.drafts.clear(project_id, document_type).await?;
        debug!(project_id = %project_id, doc_type = %document_type, "draft cleared");
        Ok(())
    }
}
