//! Document Lifecycle Manager - core lifecycle logic

use crate::domain::rules::{self, FinalizePlan};
use crate::domain::{DocumentState, VoidPayload};
use crate::error::{LifecycleError, LifecycleResult};
use crate::ports::inbound::{LifecycleApi, ReversalOutcome};
use crate::ports::outbound::{ArtifactGenerator, DocumentRepository, DraftGateway, NumberSource};
use async_trait::async_trait;
use shared_bus::{DocumentEvent, EventPublisher};
use shared_types::{
    ArtifactRef, Clock, DocumentNumber, DocumentRecord, DocumentType, LifecycleState,
    NumberSeries, Payload, ProjectId, RecordId,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

/// Lifecycle configuration
#[derive(Clone, Debug)]
pub struct LifecycleConfig {
    /// Longest accepted reversal reason (characters, after trimming)
    pub max_reason_len: usize,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            max_reason_len: 500,
        }
    }
}

/// Document Lifecycle Manager implementation
///
/// Write order per operation: number, artifact, record, then side effects
/// (draft clear, event). A reversal writes the storno record before marking
/// the original, so an interrupted reversal is completed by calling
/// `reverse` again.
pub struct DocumentLifecycleManager<R, N, A, D>
where
    R: DocumentRepository,
    N: NumberSource,
    A: ArtifactGenerator,
    D: DraftGateway,
{
    config: LifecycleConfig,
    repository: Arc<R>,
    numbers: Arc<N>,
    artifacts: Arc<A>,
    drafts: Arc<D>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventPublisher>,
    /// Serializes check-then-write sequences within this process
    write_lock: Mutex<()>,
}

impl<R, N, A, D> DocumentLifecycleManager<R, N, A, D>
where
    R: DocumentRepository,
    N: NumberSource,
    A: ArtifactGenerator,
    D: DraftGateway,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: LifecycleConfig,
        repository: Arc<R>,
        numbers: Arc<N>,
        artifacts: Arc<A>,
        drafts: Arc<D>,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            config,
            repository,
            numbers,
            artifacts,
            drafts,
            clock,
            events,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self, id: RecordId) -> LifecycleResult<DocumentRecord> {
        self.repository
            .get(id)
            .await?
            .ok_or(LifecycleError::NotFound(id))
    }

    fn validate_payload(payload: &Payload) -> LifecycleResult<()> {
        if payload.is_object() {
            Ok(())
        } else {
            Err(LifecycleError::ValidationFailure(
                "payload must be a JSON object".into(),
            ))
        }
    }

    fn validate_reason<'a>(&self, reason: &'a str) -> LifecycleResult<&'a str> {
        let reason = rules::validate_reason(reason)?;
        if reason.chars().count() > self.config.max_reason_len {
            return Err(LifecycleError::ValidationFailure(format!(
                "reversal reason longer than {} characters",
                self.config.max_reason_len
            )));
        }
        Ok(reason)
    }

    /// Render the artifact. `fresh` marks a number allocated for this call,
    /// which is burned if rendering fails.
    async fn render(
        &self,
        document_type: DocumentType,
        number: &DocumentNumber,
        payload: &Payload,
        fresh: bool,
    ) -> LifecycleResult<ArtifactRef> {
        self.artifacts
            .generate(document_type, number, payload)
            .await
            .map_err(|e| {
                if fresh {
                    error!(number = %number, error = %e, "artifact generation failed, number burned");
                } else {
                    warn!(number = %number, error = %e, "artifact generation failed");
                }
                LifecycleError::ArtifactFailure {
                    number: number.clone(),
                    reason: e.0,
                }
            })
    }

    async fn persist(
        &self,
        record: &DocumentRecord,
        fresh_number: Option<&DocumentNumber>,
    ) -> LifecycleResult<()> {
        self.repository.insert(record).await.map_err(|source| {
            match fresh_number {
                Some(number) => error!(number = %number, error = %source, "record not persisted, number burned"),
                None => error!(record_id = %record.id, error = %source, "record not persisted"),
            }
            LifecycleError::PersistenceFailure {
                burned_number: fresh_number.cloned(),
                source,
            }
        })
    }

    async fn clear_draft(&self, project_id: &ProjectId, document_type: DocumentType) {
        if let Err(e) = self.drafts.clear_draft(project_id, document_type).await {
            // The final record already takes precedence over the draft.
            warn!(project_id = %project_id, doc_type = %document_type, error = %e, "draft not cleared");
        }
    }

    /// New record with a fresh number. Caller holds the write lock.
    async fn create_record(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
        payload: Payload,
    ) -> LifecycleResult<DocumentRecord> {
        let number = self.numbers.next_number(document_type.into()).await?;
        let artifact = self.render(document_type, &number, &payload, true).await?;

        let record = DocumentRecord {
            id: RecordId::generate(),
            project_id: project_id.clone(),
            document_type,
            document_number: number.clone(),
            version: 1,
            lifecycle_state: LifecycleState::Final,
            payload_snapshot: payload,
            generated_artifact_ref: artifact,
            created_at: self.clock.now(),
            supersedes: None,
            reversal_of: None,
        };
        self.persist(&record, Some(&number)).await?;
        self.clear_draft(project_id, document_type).await;

        info!(
            project_id = %project_id,
            doc_type = %document_type,
            number = %number,
            temporary = number.is_temporary(),
            "document finalized"
        );
        self.events
            .publish(DocumentEvent::DocumentFinalized {
                record_id: record.id,
                project_id: record.project_id.clone(),
                document_type,
                document_number: number,
                version: record.version,
            })
            .await;
        Ok(record)
    }

    /// Next version of `current`, same number. Caller holds the write lock
    /// and has checked that `current` is the latest version.
    async fn create_revision(
        &self,
        current: DocumentRecord,
        payload: Payload,
    ) -> LifecycleResult<DocumentRecord> {
        let artifact = self
            .render(current.document_type, &current.document_number, &payload, false)
            .await?;

        let record = DocumentRecord {
            id: RecordId::generate(),
            project_id: current.project_id.clone(),
            document_type: current.document_type,
            document_number: current.document_number.clone(),
            version: current.version + 1,
            lifecycle_state: LifecycleState::Final,
            payload_snapshot: payload,
            generated_artifact_ref: artifact,
            created_at: self.clock.now(),
            supersedes: Some(current.id),
            reversal_of: None,
        };
        self.persist(&record, None).await?;
        self.clear_draft(&record.project_id, record.document_type).await;

        info!(
            project_id = %record.project_id,
            doc_type = %record.document_type,
            number = %record.document_number,
            version = record.version,
            "document revised"
        );
        self.events
            .publish(DocumentEvent::DocumentRevised {
                record_id: record.id,
                supersedes: current.id,
                project_id: record.project_id.clone(),
                document_type: record.document_type,
                document_number: record.document_number.clone(),
                version: record.version,
            })
            .await;
        Ok(record)
    }

    /// Second write of a reversal: mark the original.
    async fn mark_reversed(
        &self,
        original: DocumentRecord,
        storno: DocumentRecord,
        reason: String,
    ) -> LifecycleResult<ReversalOutcome> {
        let state = LifecycleState::Reversed {
            reason: reason.clone(),
            reversal_id: storno.id,
        };
        self.repository
            .set_state(original.id, &state)
            .await
            .map_err(|source| {
                error!(
                    record_id = %original.id,
                    storno = %storno.document_number,
                    error = %source,
                    "storno stored but original not marked; retry reverse to complete"
                );
                LifecycleError::PersistenceFailure {
                    burned_number: None,
                    source,
                }
            })?;

        let mut updated_original = original;
        updated_original.lifecycle_state = state;

        info!(
            project_id = %updated_original.project_id,
            number = %updated_original.document_number,
            storno = %storno.document_number,
            reason = %reason,
            "invoice reversed"
        );
        self.events
            .publish(DocumentEvent::InvoiceReversed {
                original_id: updated_original.id,
                reversal_id: storno.id,
                project_id: updated_original.project_id.clone(),
                original_number: updated_original.document_number.clone(),
                reversal_number: storno.document_number.clone(),
                reason,
            })
            .await;

        Ok(ReversalOutcome {
            reversal_record: storno,
            updated_original,
        })
    }
}

#[async_trait]
impl<R, N, A, D> LifecycleApi for DocumentLifecycleManager<R, N, A, D>
where
    R: DocumentRepository + 'static,
    N: NumberSource + 'static,
    A: ArtifactGenerator + 'static,
    D: DraftGateway + 'static,
{
    async fn load_current(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> LifecycleResult<Option<DocumentRecord>> {
        let records = self.repository.list(project_id, document_type).await?;
        Ok(rules::current_record(&records).cloned())
    }

    #[instrument(skip(self, payload), fields(project_id = %project_id, doc_type = %document_type))]
    async fn finalize(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
        payload: Payload,
    ) -> LifecycleResult<DocumentRecord> {
        Self::validate_payload(&payload)?;
        let _guard = self.write_lock.lock().await;

        let records = self.repository.list(project_id, document_type).await?;
        match rules::plan_finalize(document_type, &records)? {
            FinalizePlan::Create => self.create_record(project_id, document_type, payload).await,
            FinalizePlan::Revise(current) => self.create_revision(current, payload).await,
        }
    }

    #[instrument(skip(self, payload), fields(record_id = %existing))]
    async fn revise_version(
        &self,
        existing: RecordId,
        payload: Payload,
    ) -> LifecycleResult<DocumentRecord> {
        Self::validate_payload(&payload)?;
        let _guard = self.write_lock.lock().await;

        let record = self.load(existing).await?;
        let successor = self.repository.successor_of(record.id).await?;
        rules::check_revisable(&record, successor.as_ref())?;
        self.create_revision(record, payload).await
    }

    #[instrument(skip(self), fields(record_id = %existing))]
    async fn reverse(&self, existing: RecordId, reason: &str) -> LifecycleResult<ReversalOutcome> {
        let reason = self.validate_reason(reason)?;
        let _guard = self.write_lock.lock().await;

        let original = self.load(existing).await?;
        rules::check_reversible(&original)?;

        if let Some(storno) = self.repository.reversal_of(original.id).await? {
            warn!(storno = %storno.document_number, "completing interrupted reversal");
            let stored_reason = VoidPayload::from_payload(&storno.payload_snapshot)
                .map(|void| void.reason)
                .unwrap_or_else(|| reason.to_string());
            return self.mark_reversed(original, storno, stored_reason).await;
        }

        let number = self.numbers.next_number(NumberSeries::Storno).await?;
        let void = VoidPayload::for_original(&original, reason).to_payload();
        let artifact = self
            .render(original.document_type, &number, &void, true)
            .await?;

        let storno = DocumentRecord {
            id: RecordId::generate(),
            project_id: original.project_id.clone(),
            document_type: original.document_type,
            document_number: number.clone(),
            version: 1,
            lifecycle_state: LifecycleState::Final,
            payload_snapshot: void,
            generated_artifact_ref: artifact,
            created_at: self.clock.now(),
            supersedes: None,
            reversal_of: Some(original.id),
        };
        self.persist(&storno, Some(&number)).await?;
        self.mark_reversed(original, storno, reason.to_string()).await
    }

    async fn can_create_new_invoice(&self, project_id: &ProjectId) -> LifecycleResult<bool> {
        let records = self.repository.list(project_id, DocumentType::Invoice).await?;
        Ok(rules::active_records(&records).is_empty())
    }

    async fn get(&self, id: RecordId) -> LifecycleResult<DocumentRecord> {
        self.load(id).await
    }

    async fn history(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> LifecycleResult<Vec<DocumentRecord>> {
        Ok(self.repository.list(project_id, document_type).await?)
    }

    async fn state_of(&self, id: RecordId) -> LifecycleResult<DocumentState> {
        let record = self.load(id).await?;
        let successor = self.repository.successor_of(id).await?;
        Ok(rules::derive_state(&record, successor.as_ref()))
    }

    async fn current_state(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> LifecycleResult<DocumentState> {
        Ok(match self.load_current(project_id, document_type).await? {
            Some(_) => DocumentState::Final,
            None => DocumentState::Draft,
        })
    }
}
