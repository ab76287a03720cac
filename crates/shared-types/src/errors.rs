//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors raised by a `DocumentStore` implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No record with this id in the collection.
    #[error("Record not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// `create` with an explicit id that is already taken.
    #[error("Record already exists: {collection}/{id}")]
    AlreadyExists { collection: String, id: String },

    /// The backing store rejected or could not serve the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Stored fields could not be mapped to or from a typed entity.
    #[error("Codec error in {collection}: {reason}")]
    Codec { collection: String, reason: String },
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors when building or parsing a `DocumentNumber`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NumberFormatError {
    #[error("Malformed document number: {0:?}")]
    Malformed(String),

    #[error("Invalid prefix {0:?}: expected 2-3 uppercase letters")]
    InvalidPrefix(String),

    #[error("Invalid year {0}: expected four digits")]
    InvalidYear(i32),

    #[error("Counter values start at 1")]
    ZeroCounter,
}
