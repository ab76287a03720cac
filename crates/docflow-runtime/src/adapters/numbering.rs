//! Lifecycle (2) → Numbering (1)

use std::sync::Arc;

use async_trait::async_trait;
use df_01_numbering::NumberingApi;
use df_02_lifecycle::{LifecycleError, LifecycleResult, NumberSource};
use shared_types::{DocumentNumber, NumberSeries};

/// Implements the lifecycle's `NumberSource` with the sequence allocator.
pub struct AllocatorNumberSource<N: NumberingApi> {
    numbering: Arc<N>,
}

impl<N: NumberingApi> AllocatorNumberSource<N> {
    pub fn new(numbering: Arc<N>) -> Self {
        Self { numbering }
    }
}

#[async_trait]
impl<N: NumberingApi + 'static> NumberSource for AllocatorNumberSource<N> {
    async fn next_number(&self, series: NumberSeries) -> LifecycleResult<DocumentNumber> {
        self.numbering
            .allocate_series(series)
            .await
            .map_err(|e| LifecycleError::Numbering(e.to_string()))
    }
}
