//! Autosave debouncing for one open editor.
//!
//! Edits are pushed as they happen; the latest payload is saved once no
//! new edit arrived for the quiet period. Intermediate payloads are dropped.

use std::sync::Arc;
use std::time::Duration;

use shared_types::{DocumentType, Payload, ProjectId};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::domain::SaveOutcome;
use crate::error::DraftResult;
use crate::ports::inbound::DraftApi;

enum Command {
    Push(Payload),
    Flush(oneshot::Sender<Option<DraftResult<SaveOutcome>>>),
}

/// Handle to a running autosave task.
///
/// Dropping the handle stops the task; a pending edit is discarded.
pub struct AutosaveDebouncer {
    commands: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl AutosaveDebouncer {
    pub fn spawn(
        api: Arc<dyn DraftApi>,
        project_id: ProjectId,
        document_type: DocumentType,
        quiet: Duration,
    ) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(api, project_id, document_type, quiet, rx));
        Self { commands, task }
    }

    /// Record an edit, restarting the quiet period.
    pub fn push(&self, payload: Payload) {
        if self.commands.send(Command::Push(payload)).is_err() {
            warn!("autosave task has stopped, edit dropped");
        }
    }

    /// Save the pending edit now. Returns `None` if nothing was pending.
    pub async fn flush(&self) -> Option<DraftResult<SaveOutcome>> {
        let (reply, rx) = oneshot::channel();
        self.commands.send(Command::Flush(reply)).ok()?;
        rx.await.ok().flatten()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for AutosaveDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    api: Arc<dyn DraftApi>,
    project_id: ProjectId,
    document_type: DocumentType,
    quiet: Duration,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    let mut pending: Option<(Payload, Instant)> = None;

    loop {
        let deadline = pending.as_ref().map(|(_, at)| *at);
        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Push(payload)) => {
                    pending = Some((payload, Instant::now() + quiet));
                }
                Some(Command::Flush(reply)) => {
                    let result = match pending.take() {
                        Some((payload, _)) => {
                            Some(api.save(&project_id, document_type, payload).await)
                        }
                        None => None,
                    };
                    let _ = reply.send(result);
                }
                None => break,
            },
            _ = async {
                match deadline {
                    Some(at) => sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            } => {
                if let Some((payload, _)) = pending.take() {
                    match api.save(&project_id, document_type, payload).await {
                        Ok(outcome) => {
                            debug!(project_id = %project_id, doc_type = %document_type, saved = outcome.was_saved(), "autosave");
                        }
                        Err(e) => {
                            warn!(project_id = %project_id, doc_type = %document_type, error = %e, "autosave failed");
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryFinalDocuments, StoreDraftRepository};
    use crate::service::{DraftAutosaveCoordinator, DraftConfig};
    use serde_json::json;
    use shared_types::store::collections;
    use shared_types::{InMemoryDocumentStore, SystemClock};

    fn setup() -> (Arc<InMemoryDocumentStore>, Arc<dyn DraftApi>) {
        let store = Arc::new(InMemoryDocumentStore::new());
        let api: Arc<dyn DraftApi> = Arc::new(DraftAutosaveCoordinator::new(
            DraftConfig::default(),
            Arc::new(StoreDraftRepository::new(store.clone())),
            Arc::new(InMemoryFinalDocuments::new()),
            Arc::new(SystemClock),
        ));
        (store, api)
    }

    fn p1() -> ProjectId {
        ProjectId::new("P1")
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_edit_is_saved_after_quiet_period() {
        let (store, api) = setup();
        let debouncer = AutosaveDebouncer::spawn(
            api.clone(),
            p1(),
            DocumentType::Quotation,
            Duration::from_millis(1500),
        );

        debouncer.push(Payload::new(json!({ "v": 1 })));
        tokio::time::sleep(Duration::from_millis(500)).await;
        debouncer.push(Payload::new(json!({ "v": 2 })));
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(store.is_empty(collections::DRAFTS));

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(
            api.load(&p1(), DocumentType::Quotation).await.unwrap(),
            Some(Payload::new(json!({ "v": 2 })))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_saves_immediately() {
        let (_store, api) = setup();
        let debouncer = AutosaveDebouncer::spawn(
            api.clone(),
            p1(),
            DocumentType::Invoice,
            Duration::from_secs(10),
        );

        assert!(debouncer.flush().await.is_none());
        debouncer.push(Payload::new(json!({ "total": 10 })));
        let outcome = debouncer.flush().await.unwrap().unwrap();
        assert!(outcome.was_saved());
        assert!(debouncer.flush().await.is_none());
        assert!(debouncer.is_running());
    }
}
