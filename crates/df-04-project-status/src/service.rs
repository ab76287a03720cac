//! Project Status Coordinator - core status logic

use crate::domain::{is_advance, propose_transition, Decision, PendingTransition, Resolution};
use crate::error::{StatusError, StatusResult};
use crate::ports::inbound::ProjectStatusApi;
use crate::ports::outbound::ProjectStatusStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_bus::{DocumentEvent, EventPublisher};
use shared_types::{DocumentType, ProjectId, ProjectStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Project status configuration
#[derive(Clone, Debug)]
pub struct StatusConfig {
    /// Open proposals kept per project; the oldest is dropped beyond this
    pub max_pending_per_project: usize,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            max_pending_per_project: 8,
        }
    }
}

struct PendingEntry {
    seq: u64,
    transition: PendingTransition,
}

#[derive(Default)]
struct PendingTable {
    next_seq: u64,
    entries: HashMap<Uuid, PendingEntry>,
}

impl PendingTable {
    fn for_project(&self, project_id: &ProjectId) -> Vec<&PendingEntry> {
        let mut entries: Vec<_> = self
            .entries
            .values()
            .filter(|e| &e.transition.project_id == project_id)
            .collect();
        entries.sort_by_key(|e| e.seq);
        entries
    }

    fn insert(&mut self, transition: PendingTransition, limit: usize) -> Option<Uuid> {
        let evicted = {
            let open = self.for_project(&transition.project_id);
            if open.len() >= limit.max(1) {
                open.first().map(|e| e.transition.token)
            } else {
                None
            }
        };
        if let Some(token) = evicted {
            self.entries.remove(&token);
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries
            .insert(transition.token, PendingEntry { seq, transition });
        evicted
    }
}

/// Project Status Coordinator implementation
///
/// Status changes triggered by documents are only ever proposed; the
/// project moves when the user accepts with transition. Manual changes go
/// through `apply_transition` without any pipeline checks.
pub struct ProjectStatusCoordinator<S>
where
    S: ProjectStatusStore,
{
    config: StatusConfig,
    store: Arc<S>,
    events: Arc<dyn EventPublisher>,
    pending: RwLock<PendingTable>,
    /// Serializes status read-check-write sequences
    write_lock: Mutex<()>,
}

impl<S> ProjectStatusCoordinator<S>
where
    S: ProjectStatusStore,
{
    pub fn new(config: StatusConfig, store: Arc<S>, events: Arc<dyn EventPublisher>) -> Self {
        Self {
            config,
            store,
            events,
            pending: RwLock::new(PendingTable::default()),
            write_lock: Mutex::new(()),
        }
    }

    /// Number of open proposals across all projects.
    pub fn pending_count(&self) -> usize {
        self.pending.read().entries.len()
    }

    async fn write_status(
        &self,
        project_id: &ProjectId,
        target: ProjectStatus,
    ) -> StatusResult<()> {
        let from = self.store.set_status(project_id, target).await?;
        info!(project_id = %project_id, to = %target, "project status changed");
        self.events
            .publish(DocumentEvent::ProjectStatusChanged {
                project_id: project_id.clone(),
                from,
                to: target,
            })
            .await;
        Ok(())
    }
}

#[async_trait]
impl<S> ProjectStatusApi for ProjectStatusCoordinator<S>
where
    S: ProjectStatusStore + 'static,
{
    #[instrument(skip(self), fields(project_id = %project_id, doc_type = %document_type))]
    async fn propose(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> StatusResult<Option<PendingTransition>> {
        let Some(target) = propose_transition(document_type) else {
            return Ok(None);
        };
        let current = self.store.status(project_id).await?;
        if !is_advance(current, target) {
            debug!(status = %current, target = %target, "no status proposal");
            return Ok(None);
        }

        let transition = {
            let mut pending = self.pending.write();
            if let Some(existing) = pending
                .for_project(project_id)
                .into_iter()
                .find(|e| e.transition.from == current && e.transition.to == target)
            {
                return Ok(Some(existing.transition.clone()));
            }

            let transition = PendingTransition {
                token: Uuid::new_v4(),
                project_id: project_id.clone(),
                from: current,
                to: target,
                triggered_by: document_type,
            };
            if let Some(evicted) =
                pending.insert(transition.clone(), self.config.max_pending_per_project)
            {
                warn!(token = %evicted, "pending proposal limit reached, oldest dropped");
            }
            transition
        };

        info!(token = %transition.token, from = %current, to = %target, "status transition proposed");
        self.events
            .publish(DocumentEvent::StatusTransitionProposed {
                token: transition.token,
                project_id: project_id.clone(),
                from: current,
                to: target,
            })
            .await;
        Ok(Some(transition))
    }

    #[instrument(skip(self))]
    async fn resolve(&self, token: Uuid, decision: Decision) -> StatusResult<Resolution> {
        // Held for the whole resolution so concurrent resolves of one token
        // see it consumed exactly once.
        let _guard = self.write_lock.lock().await;
        let proposal = self
            .pending
            .read()
            .entries
            .get(&token)
            .map(|e| e.transition.clone())
            .ok_or(StatusError::UnknownProposal(token))?;
        let project_id = proposal.project_id.clone();

        let resolution = match decision {
            Decision::AcceptWithoutTransition => Resolution {
                project_id: project_id.clone(),
                status: proposal.from,
                applied: false,
            },
            Decision::AcceptWithTransition => {
                // A failed read or write keeps the proposal open for a retry.
                let actual = self.store.status(&project_id).await?;
                if actual != proposal.from {
                    self.pending.write().entries.remove(&token);
                    warn!(
                        project_id = %project_id,
                        token = %token,
                        expected = %proposal.from,
                        actual = %actual,
                        "stale status proposal rejected"
                    );
                    return Err(StatusError::StaleProposal {
                        token,
                        expected: proposal.from,
                        actual,
                    });
                }
                self.write_status(&project_id, proposal.to).await?;
                Resolution {
                    project_id: project_id.clone(),
                    status: proposal.to,
                    applied: true,
                }
            }
        };
        self.pending.write().entries.remove(&token);

        debug!(project_id = %project_id, decision = decision.key(), "status proposal resolved");
        self.events
            .publish(DocumentEvent::StatusTransitionResolved {
                token,
                project_id,
                to: proposal.to,
                applied: resolution.applied,
            })
            .await;
        Ok(resolution)
    }

    fn pending(&self, project_id: &ProjectId) -> Vec<PendingTransition> {
        self.pending
            .read()
            .for_project(project_id)
            .into_iter()
            .map(|e| e.transition.clone())
            .collect()
    }

    #[instrument(skip(self), fields(project_id = %project_id))]
    async fn apply_transition(
        &self,
        project_id: &ProjectId,
        target: ProjectStatus,
    ) -> StatusResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write_status(project_id, target).await
    }

    async fn status(&self, project_id: &ProjectId) -> StatusResult<ProjectStatus> {
        Ok(self.store.status(project_id).await?)
    }
}
