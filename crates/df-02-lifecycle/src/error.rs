//! Error types for the Lifecycle subsystem

use crate::domain::Operation;
use shared_types::{DocumentNumber, RecordId, StoreError};
use thiserror::Error;

/// Failure reported by an artifact generator (PDF renderer).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ArtifactError(pub String);

/// Lifecycle subsystem errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The record's state or type does not permit the operation
    #[error("Cannot {operation} record {record}: {reason}")]
    IllegalStateTransition {
        record: RecordId,
        operation: Operation,
        reason: String,
    },

    /// Input rejected before any number was allocated or anything written
    #[error("Validation failed: {0}")]
    ValidationFailure(String),

    /// A write failed after the operation started
    ///
    /// `burned_number` names a number that was allocated but never stored.
    #[error("Persistence failed (burned number: {}): {source}", display_burned(.burned_number))]
    PersistenceFailure {
        burned_number: Option<DocumentNumber>,
        #[source]
        source: StoreError,
    },

    /// Artifact generation failed, nothing was persisted
    #[error("Artifact generation failed for {number}: {reason}")]
    ArtifactFailure { number: DocumentNumber, reason: String },

    /// No record with this id
    #[error("Record not found: {0}")]
    NotFound(RecordId),

    /// No number could be obtained
    #[error("Numbering failed: {0}")]
    Numbering(String),

    /// Read from the document store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

fn display_burned(number: &Option<DocumentNumber>) -> String {
    number
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}

impl LifecycleError {
    pub(crate) fn illegal(record: RecordId, operation: Operation, reason: impl Into<String>) -> Self {
        Self::IllegalStateTransition {
            record,
            operation,
            reason: reason.into(),
        }
    }
}

/// Result type for Lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;
