//! Driven Ports (SPI - Outbound Dependencies)

use async_trait::async_trait;
use shared_types::{ProjectId, ProjectStatus, StoreError};

/// Read/write access to `Project.status`
#[async_trait]
pub trait ProjectStatusStore: Send + Sync {
    /// Current status; `NotFound` for an unknown project.
    async fn status(&self, project_id: &ProjectId) -> Result<ProjectStatus, StoreError>;

    /// Write the status, creating the project entry if needed.
    /// Returns the previous status.
    async fn set_status(
        &self,
        project_id: &ProjectId,
        status: ProjectStatus,
    ) -> Result<Option<ProjectStatus>, StoreError>;
}
