//! # Document Store Port
//!
//! Generic per-collection record store, the persistence boundary of the core.
//! The hosted document database of the outer application implements this
//! trait; `InMemoryDocumentStore` is the bundled adapter for tests and
//! single-process use.
//!
//! ## Collections
//!
//! | Collection | Record id | Content |
//! |------------|-----------|---------|
//! | `sequence_counters` | series key (`invoice`, `storno`, ...) | `{year, counterValue}` |
//! | `documents` | record uuid | `DocumentRecord` |
//! | `drafts` | `<projectId>:<documentType>` | `DraftRecord` |
//! | `projects` | project id | `{status, ...}` |

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::StoreError;

mod memory;

pub use memory::{FailureMode, InMemoryDocumentStore};

/// Field map of a stored record.
pub type Fields = serde_json::Map<String, Value>;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Well-known collection names.
pub mod collections {
    pub const SEQUENCE_COUNTERS: &str = "sequence_counters";
    pub const DOCUMENTS: &str = "documents";
    pub const DRAFTS: &str = "drafts";
    pub const PROJECTS: &str = "projects";
}

/// A record as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: String,
    pub fields: Fields,
}

impl StoredRecord {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Equality predicate on a top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: String,
    pub value: Value,
}

impl Predicate {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, fields: &Fields) -> bool {
        fields.get(&self.field) == Some(&self.value)
    }
}

/// Abstract document store.
///
/// Every method is a suspension point (network I/O in production).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a record. With `id: None` the store generates one.
    ///
    /// Fails with `AlreadyExists` if an explicit id is taken.
    async fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        fields: Fields,
    ) -> StoreResult<StoredRecord>;

    /// Fetch a record, `NotFound` if absent.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<StoredRecord>;

    /// Merge `fields` into an existing record and return the result.
    async fn update(&self, collection: &str, id: &str, fields: Fields)
        -> StoreResult<StoredRecord>;

    /// All records whose fields satisfy every predicate.
    async fn query(&self, collection: &str, predicates: &[Predicate])
        -> StoreResult<Vec<StoredRecord>>;

    /// `get` that maps `NotFound` to `None`.
    async fn find(&self, collection: &str, id: &str) -> StoreResult<Option<StoredRecord>> {
        match self.get(collection, id).await {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Serialize a typed entity into a field map.
pub fn encode<T: Serialize>(collection: &str, value: &T) -> StoreResult<Fields> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::Codec {
            collection: collection.to_string(),
            reason: format!("expected an object, got {other}"),
        }),
        Err(e) => Err(StoreError::Codec {
            collection: collection.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Deserialize a stored record into a typed entity.
pub fn decode<T: DeserializeOwned>(collection: &str, record: &StoredRecord) -> StoreResult<T> {
    serde_json::from_value(Value::Object(record.fields.clone())).map_err(|e| StoreError::Codec {
        collection: collection.to_string(),
        reason: format!("record {}: {}", record.id, e),
    })
}
