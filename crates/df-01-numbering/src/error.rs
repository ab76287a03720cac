//! Error types for the Numbering subsystem

use shared_types::{NumberFormatError, NumberSeries, StoreError};
use thiserror::Error;

/// Numbering subsystem errors
#[derive(Debug, Error)]
pub enum NumberingError {
    /// Every candidate within the retry budget was already taken.
    ///
    /// Recovered inside `allocate` by issuing a fallback number.
    #[error("Allocation exhausted for series {series} after {attempts} attempts")]
    AllocationExhausted { series: NumberSeries, attempts: u32 },

    /// Counter store or document registry failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configured prefix is not 2-3 uppercase letters
    #[error("Invalid prefix for series {series}: {prefix:?}")]
    InvalidPrefix { series: NumberSeries, prefix: String },

    /// Number could not be built or parsed
    #[error("Invalid document number: {0}")]
    InvalidNumber(#[from] NumberFormatError),

    /// Configuration rejected
    #[error("Invalid numbering configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for Numbering operations
pub type NumberingResult<T> = Result<T, NumberingError>;
