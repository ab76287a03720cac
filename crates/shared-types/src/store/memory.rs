//! In-memory `DocumentStore` adapter.
//!
//! Collections are kept in ordered maps so `query` results are deterministic.
//! Failure injection lets tests simulate an unavailable backend per
//! collection.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::trace;
use uuid::Uuid;

use super::{DocumentStore, Fields, Predicate, StoreResult, StoredRecord};
use crate::errors::StoreError;

/// Which operations an injected failure affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// `create` and `update` fail, reads succeed.
    Writes,
    /// Every operation fails.
    All,
}

type Collection = BTreeMap<String, Fields>;

/// Thread-safe in-memory store.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
    failures: RwLock<HashMap<String, FailureMode>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent operations on `collection` fail.
    pub fn fail_collection(&self, collection: &str, mode: FailureMode) {
        self.failures.write().insert(collection.to_string(), mode);
    }

    /// Remove any injected failure on `collection`.
    pub fn heal_collection(&self, collection: &str) {
        self.failures.write().remove(collection);
    }

    /// Number of records in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn check(&self, collection: &str, write: bool) -> StoreResult<()> {
        match self.failures.read().get(collection) {
            Some(FailureMode::All) => Err(StoreError::Unavailable(format!(
                "injected failure on {collection}"
            ))),
            Some(FailureMode::Writes) if write => Err(StoreError::Unavailable(format!(
                "injected write failure on {collection}"
            ))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        fields: Fields,
    ) -> StoreResult<StoredRecord> {
        self.check(collection, true)?;
        let id = match id {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        let mut collections = self.collections.write();
        let records = collections.entry(collection.to_string()).or_default();
        if records.contains_key(&id) {
            return Err(StoreError::AlreadyExists {
                collection: collection.to_string(),
                id,
            });
        }
        records.insert(id.clone(), fields.clone());
        trace!(collection, id = %id, "record created");
        Ok(StoredRecord { id, fields })
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<StoredRecord> {
        self.check(collection, false)?;
        self.collections
            .read()
            .get(collection)
            .and_then(|records| records.get(id))
            .map(|fields| StoredRecord {
                id: id.to_string(),
                fields: fields.clone(),
            })
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> StoreResult<StoredRecord> {
        self.check(collection, true)?;
        let mut collections = self.collections.write();
        let existing = collections
            .get_mut(collection)
            .and_then(|records| records.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        for (key, value) in fields {
            existing.insert(key, value);
        }
        trace!(collection, id, "record updated");
        Ok(StoredRecord {
            id: id.to_string(),
            fields: existing.clone(),
        })
    }

    async fn query(
        &self,
        collection: &str,
        predicates: &[Predicate],
    ) -> StoreResult<Vec<StoredRecord>> {
        self.check(collection, false)?;
        let collections = self.collections.read();
        let Some(records) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(records
            .iter()
            .filter(|(_, fields)| predicates.iter().all(|p| p.matches(fields)))
            .map(|(id, fields)| StoredRecord {
                id: id.clone(),
                fields: fields.clone(),
            })
            .collect())
    }
}
