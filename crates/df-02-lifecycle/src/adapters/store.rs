//! Document Store Adapter
//!
//! `DocumentRepository` over the `documents` collection. The store id of a
//! record is its `RecordId`.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::store::{collections, decode, encode};
use shared_types::{
    DocumentRecord, DocumentStore, DocumentType, Fields, LifecycleState, Predicate, ProjectId,
    RecordId, StoreError, StoredRecord,
};

use crate::ports::outbound::DocumentRepository;

pub struct StoreDocumentRepository {
    store: Arc<dyn DocumentStore>,
}

impl StoreDocumentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn query(&self, predicates: &[Predicate]) -> Result<Vec<DocumentRecord>, StoreError> {
        let stored = self.store.query(collections::DOCUMENTS, predicates).await?;
        let mut records = stored
            .iter()
            .map(decode_record)
            .collect::<Result<Vec<_>, _>>()?;
        records.sort_by_key(|r| (r.created_at, r.version));
        Ok(records)
    }

    async fn first(&self, predicate: Predicate) -> Result<Option<DocumentRecord>, StoreError> {
        Ok(self.query(&[predicate]).await?.into_iter().next())
    }
}

fn decode_record(stored: &StoredRecord) -> Result<DocumentRecord, StoreError> {
    decode(collections::DOCUMENTS, stored)
}

#[async_trait]
impl DocumentRepository for StoreDocumentRepository {
    async fn insert(&self, record: &DocumentRecord) -> Result<(), StoreError> {
        let fields = encode(collections::DOCUMENTS, record)?;
        self.store
            .create(collections::DOCUMENTS, Some(&record.id.to_string()), fields)
            .await?;
        Ok(())
    }

    async fn get(&self, id: RecordId) -> Result<Option<DocumentRecord>, StoreError> {
        self.store
            .find(collections::DOCUMENTS, &id.to_string())
            .await?
            .as_ref()
            .map(decode_record)
            .transpose()
    }

    async fn set_state(&self, id: RecordId, state: &LifecycleState) -> Result<(), StoreError> {
        let value = serde_json::to_value(state).map_err(|e| StoreError::Codec {
            collection: collections::DOCUMENTS.to_string(),
            reason: e.to_string(),
        })?;
        let mut fields = Fields::new();
        fields.insert("lifecycleState".to_string(), value);
        self.store
            .update(collections::DOCUMENTS, &id.to_string(), fields)
            .await?;
        Ok(())
    }

    async fn list(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> Result<Vec<DocumentRecord>, StoreError> {
        self.query(&[
            Predicate::eq("projectId", project_id.as_str()),
            Predicate::eq("documentType", document_type.key()),
        ])
        .await
    }

    async fn successor_of(&self, id: RecordId) -> Result<Option<DocumentRecord>, StoreError> {
        self.first(Predicate::eq("supersedes", id.to_string())).await
    }

    async fn reversal_of(&self, id: RecordId) -> Result<Option<DocumentRecord>, StoreError> {
        self.first(Predicate::eq("reversalOf", id.to_string())).await
    }
}
