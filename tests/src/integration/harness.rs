//! Test harness: a wired container plus handles to its fakes.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use df_02_lifecycle::InMemoryArtifactGenerator;
use df_03_drafts::{DraftRepository, StoreDraftRepository};
use df_04_project_status::{PendingTransition, ProjectStatusApi};
use docflow_runtime::{ConfigError, DocflowConfig, DocflowContainer, RuntimeHandle};
use serde_json::json;
use shared_types::{
    Clock, DocumentType, DraftRecord, FixedClock, InMemoryDocumentStore, Payload, ProjectId,
};

/// How long `wait_for_pending` polls before giving up.
const PENDING_TIMEOUT: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(5);

pub struct Harness {
    pub container: DocflowContainer<InMemoryArtifactGenerator>,
    pub store: Arc<InMemoryDocumentStore>,
    pub artifacts: Arc<InMemoryArtifactGenerator>,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    /// Container with default configuration, clock at 2025-03-14 09:00 UTC.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(DocflowConfig::default())
    }

    pub fn with_config(config: DocflowConfig) -> Result<Self, ConfigError> {
        let store = Arc::new(InMemoryDocumentStore::new());
        let artifacts = Arc::new(InMemoryArtifactGenerator::new());
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap(),
        ));
        let shared_clock: Arc<dyn Clock> = clock.clone();
        let container =
            DocflowContainer::new(config, store.clone(), artifacts.clone(), shared_clock)?;
        Ok(Self {
            container,
            store,
            artifacts,
            clock,
        })
    }

    /// Start the bus consumers (metrics and status proposals).
    pub fn start(&self) -> RuntimeHandle {
        self.container.start()
    }

    /// Move the clock to noon on 2 January of `year`.
    pub fn set_year(&self, year: i32) {
        self.clock
            .set(Utc.with_ymd_and_hms(year, 1, 2, 12, 0, 0).unwrap());
    }

    /// The draft as stored, bypassing the final-first read path.
    pub async fn stored_draft(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> Option<DraftRecord> {
        StoreDraftRepository::new(self.store.clone())
            .get(project_id, document_type)
            .await
            .unwrap()
    }

    /// Poll until the project has a pending proposal or the timeout passes.
    pub async fn wait_for_pending(&self, project_id: &ProjectId) -> Vec<PendingTransition> {
        let deadline = tokio::time::Instant::now() + PENDING_TIMEOUT;
        loop {
            let pending = self.container.status.pending(project_id);
            if !pending.is_empty() || tokio::time::Instant::now() >= deadline {
                return pending;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// A form payload with a customer and a total.
pub fn payload(customer: &str, total: u64) -> Payload {
    Payload::new(json!({
        "customer": customer,
        "total": total,
        "items": [{ "description": "Montage", "amount": total }],
    }))
}
