//! Error types for the Project Status subsystem

use shared_types::{ProjectStatus, StoreError};
use thiserror::Error;
use uuid::Uuid;

/// Project status errors
#[derive(Debug, Error)]
pub enum StatusError {
    /// No open proposal with this token (never issued or already resolved)
    #[error("Unknown proposal: {0}")]
    UnknownProposal(Uuid),

    /// The project moved on since the proposal was made
    #[error("Stale proposal {token}: expected status {expected}, project is {actual}")]
    StaleProposal {
        token: Uuid,
        expected: ProjectStatus,
        actual: ProjectStatus,
    },

    /// Project storage failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for Project Status operations
pub type StatusResult<T> = Result<T, StatusError>;
