//! Document Store Adapter
//!
//! Projects live in the `projects` collection, id = project id. Only the
//! `status` field is read or written; other project fields are left alone.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use shared_types::store::collections;
use shared_types::{DocumentStore, Fields, ProjectId, ProjectStatus, StoreError, StoredRecord};
use tracing::trace;

use crate::ports::outbound::ProjectStatusStore;

const STATUS_FIELD: &str = "status";

pub struct StoreProjectStatus {
    store: Arc<dyn DocumentStore>,
}

impl StoreProjectStatus {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

fn read_status(record: &StoredRecord) -> Result<ProjectStatus, StoreError> {
    let codec = |reason: String| StoreError::Codec {
        collection: collections::PROJECTS.to_string(),
        reason: format!("project {}: {}", record.id, reason),
    };
    let value = record
        .field(STATUS_FIELD)
        .ok_or_else(|| codec("missing status".to_string()))?;
    serde_json::from_value(value.clone()).map_err(|e| codec(e.to_string()))
}

fn status_fields(status: ProjectStatus) -> Fields {
    let mut fields = Fields::new();
    fields.insert(
        STATUS_FIELD.to_string(),
        Value::String(status.key().to_string()),
    );
    fields
}

#[async_trait]
impl ProjectStatusStore for StoreProjectStatus {
    async fn status(&self, project_id: &ProjectId) -> Result<ProjectStatus, StoreError> {
        let record = self
            .store
            .get(collections::PROJECTS, project_id.as_str())
            .await?;
        read_status(&record)
    }

    async fn set_status(
        &self,
        project_id: &ProjectId,
        status: ProjectStatus,
    ) -> Result<Option<ProjectStatus>, StoreError> {
        let id = project_id.as_str();
        let previous = match self.store.find(collections::PROJECTS, id).await? {
            Some(record) => Some(read_status(&record).ok()),
            None => None,
        };

        match previous {
            Some(_) => {
                self.store
                    .update(collections::PROJECTS, id, status_fields(status))
                    .await?;
            }
            None => {
                self.store
                    .create(collections::PROJECTS, Some(id), status_fields(status))
                    .await?;
            }
        }
        trace!(project_id = %project_id, status = %status, "project status written");
        Ok(previous.flatten())
    }
}
