//! Driving Ports (API - Inbound)

use crate::domain::DocumentState;
use crate::error::LifecycleResult;
use async_trait::async_trait;
use shared_types::{DocumentRecord, DocumentType, Payload, ProjectId, RecordId};

/// Result of a reversal
#[derive(Clone, Debug, PartialEq)]
pub struct ReversalOutcome {
    /// The storno record (own number from the `storno` series)
    pub reversal_record: DocumentRecord,
    /// The original, now `Reversed`
    pub updated_original: DocumentRecord,
}

/// Primary Lifecycle API
///
/// This is the driving port for the Lifecycle subsystem.
#[async_trait]
pub trait LifecycleApi: Send + Sync {
    /// The active record of a key (for proforma invoices: the newest).
    async fn load_current(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> LifecycleResult<Option<DocumentRecord>>;

    /// Turn the payload into an immutable, numbered record.
    ///
    /// A delivery note that is already final gets a new version instead.
    async fn finalize(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
        payload: Payload,
    ) -> LifecycleResult<DocumentRecord>;

    /// Supersede the current version of a delivery note.
    async fn revise_version(
        &self,
        existing: RecordId,
        payload: Payload,
    ) -> LifecycleResult<DocumentRecord>;

    /// Formally void an invoice with a storno record.
    async fn reverse(&self, existing: RecordId, reason: &str) -> LifecycleResult<ReversalOutcome>;

    /// True unless an active invoice exists for the project.
    async fn can_create_new_invoice(&self, project_id: &ProjectId) -> LifecycleResult<bool>;

    async fn get(&self, id: RecordId) -> LifecycleResult<DocumentRecord>;

    /// Every record of a key, superseded versions and storno records included.
    async fn history(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> LifecycleResult<Vec<DocumentRecord>>;

    async fn state_of(&self, id: RecordId) -> LifecycleResult<DocumentState>;

    /// State of the key as a whole: `Draft` until something is final.
    async fn current_state(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> LifecycleResult<DocumentState>;
}
