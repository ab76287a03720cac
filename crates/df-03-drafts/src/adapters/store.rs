//! Document Store Adapter
//!
//! Drafts live in the `drafts` collection under `<projectId>:<documentType>`.
//! The store has no delete: clearing sets `cleared` and drops the payload.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::store::{collections, decode, encode};
use shared_types::{DocumentStore, DocumentType, DraftRecord, Fields, ProjectId, StoreError};
use tracing::trace;

use crate::ports::outbound::DraftRepository;

#[derive(Serialize, Deserialize)]
struct StoredDraft {
    #[serde(flatten)]
    draft: DraftRecord,
    #[serde(default)]
    cleared: bool,
}

pub struct StoreDraftRepository {
    store: Arc<dyn DocumentStore>,
}

impl StoreDraftRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DraftRepository for StoreDraftRepository {
    async fn get(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> Result<Option<DraftRecord>, StoreError> {
        let key = DraftRecord::key_for(project_id, document_type);
        let Some(record) = self.store.find(collections::DRAFTS, &key).await? else {
            return Ok(None);
        };
        let stored: StoredDraft = decode(collections::DRAFTS, &record)?;
        Ok((!stored.cleared).then_some(stored.draft))
    }

    async fn put(&self, draft: &DraftRecord) -> Result<(), StoreError> {
        let key = draft.key();
        let fields = encode(
            collections::DRAFTS,
            &StoredDraft {
                draft: draft.clone(),
                cleared: false,
            },
        )?;

        match self.store.update(collections::DRAFTS, &key, fields.clone()).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                self.store
                    .create(collections::DRAFTS, Some(&key), fields)
                    .await?;
            }
            Err(e) => return Err(e),
        }
        trace!(key = %key, "draft written");
        Ok(())
    }

    async fn clear(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> Result<(), StoreError> {
        let key = DraftRecord::key_for(project_id, document_type);
        let mut fields = Fields::new();
        fields.insert("cleared".to_string(), Value::Bool(true));
        fields.insert("payload".to_string(), Value::Null);

        match self.store.update(collections::DRAFTS, &key, fields).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }
}
