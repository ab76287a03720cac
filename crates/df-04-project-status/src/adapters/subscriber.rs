//! Bus subscriber that turns finalized documents into status proposals.

use std::sync::Arc;

use shared_bus::{DocumentEvent, EventFilter, EventSubscriber, EventTopic, Subscription};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ports::inbound::ProjectStatusApi;

/// Consumes `DocumentFinalized` and registers a proposal for the project.
///
/// Revisions and reversals are ignored: only a first finalization moves
/// the pipeline.
pub struct FinalizationSubscriber {
    api: Arc<dyn ProjectStatusApi>,
    subscription: Subscription,
}

impl FinalizationSubscriber {
    pub fn new(api: Arc<dyn ProjectStatusApi>, bus: &dyn EventSubscriber) -> Self {
        let subscription = bus.subscribe(EventFilter::topics(vec![EventTopic::Lifecycle]));
        Self { api, subscription }
    }

    /// Handle one event. Returns true if a proposal was registered.
    pub async fn handle(&self, event: &DocumentEvent) -> bool {
        let DocumentEvent::DocumentFinalized {
            project_id,
            document_type,
            document_number,
            ..
        } = event
        else {
            return false;
        };

        match self.api.propose(project_id, *document_type).await {
            Ok(Some(_)) => true,
            Ok(None) => false,
            Err(e) => {
                warn!(
                    project_id = %project_id,
                    doc_type = %document_type,
                    number = %document_number,
                    error = %e,
                    "status proposal failed"
                );
                false
            }
        }
    }

    /// Process events until the bus closes.
    pub async fn run(mut self) {
        while let Some(event) = self.subscription.recv().await {
            self.handle(&event).await;
        }
        debug!("finalization subscriber stopped, bus closed");
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
