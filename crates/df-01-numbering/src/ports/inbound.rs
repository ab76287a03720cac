//! Driving Ports (API - Inbound)

use crate::error::NumberingResult;
use async_trait::async_trait;
use shared_types::{DocumentNumber, DocumentType, NumberSeries, ProjectId};

/// Primary Numbering API
///
/// This is the driving port for the Numbering subsystem. Lifecycle (2)
/// reaches it through the runtime's `NumberSource` adapter.
#[async_trait]
pub trait NumberingApi: Send + Sync {
    /// Next number for a document type.
    ///
    /// Contention and store failures never reach the caller: they degrade
    /// to a `TEMP` fallback number. Only an unformattable number (clock
    /// outside four-digit years) is an error.
    async fn allocate(&self, document_type: DocumentType) -> NumberingResult<DocumentNumber>;

    /// Next number of an arbitrary series (used for `storno`).
    async fn allocate_series(&self, series: NumberSeries) -> NumberingResult<DocumentNumber>;

    /// Whether `number` is already used by a record of `document_type`.
    ///
    /// Records of `excluding_project` do not count. Unlike `allocate`, store
    /// failures propagate so a manual entry is never silently accepted.
    async fn number_exists(
        &self,
        number: &str,
        document_type: DocumentType,
        excluding_project: Option<&ProjectId>,
    ) -> NumberingResult<bool>;

    /// Last issued counter value of `series` in the current year.
    async fn peek(&self, series: NumberSeries) -> NumberingResult<u64>;
}
