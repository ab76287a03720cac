//! Error types for the Drafts subsystem

use shared_types::StoreError;
use thiserror::Error;

/// Drafts subsystem errors
#[derive(Debug, Error)]
pub enum DraftError {
    /// Draft storage failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Looking up the final record of the key failed
    #[error("Final record lookup failed: {0}")]
    Lookup(String),
}

/// Result type for Drafts operations
pub type DraftResult<T> = Result<T, DraftError>;
