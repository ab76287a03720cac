//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::SequenceCounter;
use crate::error::NumberingResult;
use async_trait::async_trait;
use shared_types::{DocumentNumber, DocumentType, NumberSeries, ProjectId};

/// Persistence of sequence counters.
///
/// Kept behind its own port so an atomic increment primitive can replace
/// the read-check-write cycle without touching the allocator.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Stored counter of `series`, `None` before first use.
    async fn load(&self, series: NumberSeries) -> NumberingResult<Option<SequenceCounter>>;

    /// Persist the advanced counter (create on first use).
    async fn save(&self, counter: &SequenceCounter) -> NumberingResult<()>;
}

/// A record already carrying a given number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberOwner {
    pub record_id: String,
    pub project_id: ProjectId,
    pub document_type: DocumentType,
}

/// Lookup of issued numbers in persisted documents.
#[async_trait]
pub trait NumberRegistry: Send + Sync {
    /// Every record whose document number equals `number`.
    async fn owners_of(&self, number: &DocumentNumber) -> NumberingResult<Vec<NumberOwner>>;
}
