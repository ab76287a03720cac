//! Driving Ports (API - Inbound)

use crate::domain::{Decision, PendingTransition, Resolution};
use crate::error::StatusResult;
use async_trait::async_trait;
use shared_types::{DocumentType, ProjectId, ProjectStatus};
use uuid::Uuid;

/// Primary Project Status API
#[async_trait]
pub trait ProjectStatusApi: Send + Sync {
    /// Register a proposal for the stage `document_type` suggests.
    ///
    /// `None` when the type moves nothing, the project is lost, or it is
    /// already at or past the target.
    async fn propose(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> StatusResult<Option<PendingTransition>>;

    /// Answer a proposal. The token is consumed either way.
    async fn resolve(&self, token: Uuid, decision: Decision) -> StatusResult<Resolution>;

    /// Open proposals of a project, oldest first.
    fn pending(&self, project_id: &ProjectId) -> Vec<PendingTransition>;

    /// Manual status change, no pipeline checks.
    async fn apply_transition(
        &self,
        project_id: &ProjectId,
        target: ProjectStatus,
    ) -> StatusResult<()>;

    async fn mark_lost(&self, project_id: &ProjectId) -> StatusResult<()> {
        self.apply_transition(project_id, ProjectStatus::Lost).await
    }

    async fn mark_paid(&self, project_id: &ProjectId) -> StatusResult<()> {
        self.apply_transition(project_id, ProjectStatus::Paid).await
    }

    async fn status(&self, project_id: &ProjectId) -> StatusResult<ProjectStatus>;
}
