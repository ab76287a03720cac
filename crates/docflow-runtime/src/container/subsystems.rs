//! # Subsystem Container
//!
//! Holds all subsystem instances and the shared infrastructure.
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: Document Store, Event Bus, Clock (shared)
//! Level 1: Numbering (1), Project Status (4)
//! Level 2: Lifecycle (2) - needs Numbering through AllocatorNumberSource
//! Level 3: Drafts (3) - needs Lifecycle through LifecycleFinalDocuments
//! ```
//!
//! Lifecycle clears drafts directly on the draft repository, so Drafts is
//! not needed to build Lifecycle.

use std::sync::Arc;

use df_01_numbering::{SequenceAllocator, StoreCounterAdapter, StoreNumberRegistry};
use df_02_lifecycle::{
    ArtifactGenerator, DocumentLifecycleManager, InMemoryArtifactGenerator,
    StoreDocumentRepository,
};
use df_03_drafts::{AutosaveDebouncer, DraftApi, DraftAutosaveCoordinator, StoreDraftRepository};
use df_04_project_status::{FinalizationSubscriber, ProjectStatusCoordinator, StoreProjectStatus};
use shared_bus::InMemoryEventBus;
use shared_types::{
    Clock, DocumentStore, DocumentType, InMemoryDocumentStore, ProjectId, SystemClock,
};
use tokio::task::JoinHandle;
use tracing::{info, instrument};

use crate::adapters::{AllocatorNumberSource, LifecycleFinalDocuments, RepositoryDraftGateway};
use crate::container::config::{ConfigError, DocflowConfig};
use crate::wiring::MetricsRouter;

/// Sequence allocator over the document store.
pub type NumberingService = SequenceAllocator<StoreCounterAdapter, StoreNumberRegistry>;

/// Lifecycle manager with numbering and draft clearing wired in.
pub type LifecycleService<A> = DocumentLifecycleManager<
    StoreDocumentRepository,
    AllocatorNumberSource<NumberingService>,
    A,
    RepositoryDraftGateway<StoreDraftRepository>,
>;

/// Drafts coordinator reading final records from the lifecycle.
pub type DraftsService<A> =
    DraftAutosaveCoordinator<StoreDraftRepository, LifecycleFinalDocuments<LifecycleService<A>>>;

/// Project status coordinator over the document store.
pub type StatusService = ProjectStatusCoordinator<StoreProjectStatus>;

/// Central container holding all subsystem instances.
pub struct DocflowContainer<A>
where
    A: ArtifactGenerator + 'static,
{
    /// Numbering (Subsystem 1)
    pub numbering: Arc<NumberingService>,

    /// Lifecycle (Subsystem 2)
    pub lifecycle: Arc<LifecycleService<A>>,

    /// Drafts (Subsystem 3)
    pub drafts: Arc<DraftsService<A>>,

    /// Project Status (Subsystem 4)
    pub status: Arc<StatusService>,

    /// Artifact renderer used by the lifecycle.
    pub artifacts: Arc<A>,

    // =========================================================================
    // SHARED INFRASTRUCTURE
    // =========================================================================
    pub store: Arc<dyn DocumentStore>,
    pub event_bus: Arc<InMemoryEventBus>,
    pub clock: Arc<dyn Clock>,

    /// Configuration (immutable after initialization).
    pub config: DocflowConfig,
}

impl DocflowContainer<InMemoryArtifactGenerator> {
    /// Everything in memory, on the system clock.
    pub fn in_memory(config: DocflowConfig) -> Result<Self, ConfigError> {
        Self::new(
            config,
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(InMemoryArtifactGenerator::new()),
            Arc::new(SystemClock),
        )
    }
}

impl<A> DocflowContainer<A>
where
    A: ArtifactGenerator + 'static,
{
    /// Build all subsystems on one store and one bus.
    #[instrument(name = "docflow_init", skip_all)]
    pub fn new(
        config: DocflowConfig,
        store: Arc<dyn DocumentStore>,
        artifacts: Arc<A>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let event_bus = Arc::new(InMemoryEventBus::with_capacity(config.bus.capacity));

        let numbering = Arc::new(SequenceAllocator::new(
            config.numbering_config()?,
            Arc::new(StoreCounterAdapter::new(store.clone())),
            Arc::new(StoreNumberRegistry::new(store.clone())),
            clock.clone(),
            event_bus.clone(),
        ));
        info!("  [1] Numbering initialized");

        let status = Arc::new(ProjectStatusCoordinator::new(
            config.status_config(),
            Arc::new(StoreProjectStatus::new(store.clone())),
            event_bus.clone(),
        ));
        info!("  [4] Project Status initialized");

        let draft_repository = Arc::new(StoreDraftRepository::new(store.clone()));
        let lifecycle = Arc::new(DocumentLifecycleManager::new(
            config.lifecycle_config(),
            Arc::new(StoreDocumentRepository::new(store.clone())),
            Arc::new(AllocatorNumberSource::new(numbering.clone())),
            artifacts.clone(),
            Arc::new(RepositoryDraftGateway::new(draft_repository.clone())),
            clock.clone(),
            event_bus.clone(),
        ));
        info!("  [2] Lifecycle initialized");

        let drafts = Arc::new(DraftAutosaveCoordinator::new(
            config.draft_config(),
            draft_repository,
            Arc::new(LifecycleFinalDocuments::new(lifecycle.clone())),
            clock.clone(),
        ));
        info!("  [3] Drafts initialized");

        Ok(Self {
            numbering,
            lifecycle,
            drafts,
            status,
            artifacts,
            store,
            event_bus,
            clock,
            config,
        })
    }

    /// Spawn the bus consumers. Must be called inside a tokio runtime.
    pub fn start(&self) -> RuntimeHandle {
        let router = MetricsRouter::new(self.event_bus.as_ref()).spawn();
        let proposals =
            FinalizationSubscriber::new(self.status.clone(), self.event_bus.as_ref()).spawn();
        info!(
            subscribers = self.event_bus.subscriber_count(),
            "docflow event routing started"
        );
        RuntimeHandle {
            tasks: vec![router, proposals],
        }
    }

    /// Debounced autosave for one open editor.
    pub fn autosave(&self, project_id: ProjectId, document_type: DocumentType) -> AutosaveDebouncer {
        let api: Arc<dyn DraftApi> = self.drafts.clone();
        AutosaveDebouncer::spawn(
            api,
            project_id,
            document_type,
            self.config.draft_config().debounce,
        )
    }
}

/// Background tasks started by `DocflowContainer::start`.
pub struct RuntimeHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl RuntimeHandle {
    pub fn is_running(&self) -> bool {
        self.tasks.iter().all(|t| !t.is_finished())
    }

    /// Stop all bus consumers.
    pub fn shutdown(self) {
        for task in &self.tasks {
            task.abort();
        }
        info!("docflow event routing stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use df_02_lifecycle::LifecycleApi;
    use df_03_drafts::FormSource;
    use serde_json::json;
    use shared_bus::EventPublisher;
    use shared_types::Payload;

    #[tokio::test]
    async fn test_container_wires_subsystems() {
        let container = DocflowContainer::in_memory(DocflowConfig::default()).unwrap();
        let handle = container.start();
        assert!(handle.is_running());
        assert_eq!(container.event_bus.subscriber_count(), 2);

        let p1 = ProjectId::new("P1");
        container
            .drafts
            .save(&p1, DocumentType::Quotation, Payload::new(json!({ "v": 1 })))
            .await
            .unwrap();
        let record = container
            .lifecycle
            .finalize(&p1, DocumentType::Quotation, Payload::new(json!({ "v": 1 })))
            .await
            .unwrap();
        assert_eq!(record.document_number.prefix(), "ANG");
        assert!(container.event_bus.events_published() >= 2);

        // Draft cleared by the lifecycle, final visible through the bridge.
        assert_eq!(
            container
                .drafts
                .rehydrate(&p1, DocumentType::Quotation)
                .await
                .unwrap(),
            FormSource::Final { record }
        );
        handle.shutdown();
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = DocflowConfig::default();
        config.bus.capacity = 0;
        assert!(DocflowContainer::in_memory(config).is_err());
    }
}
