//! Mock adapters for running the lifecycle without the other subsystems.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared_types::{DocumentNumber, DocumentType, NumberSeries, ProjectId, StoreError};

use crate::error::{LifecycleError, LifecycleResult};
use crate::ports::outbound::{DraftGateway, NumberSource};

/// Hands out `PREFIX-YEAR-NNNN` from plain in-memory counters.
pub struct SequentialNumberSource {
    year: i32,
    counters: Mutex<HashMap<NumberSeries, u64>>,
}

impl SequentialNumberSource {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            counters: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl NumberSource for SequentialNumberSource {
    async fn next_number(&self, series: NumberSeries) -> LifecycleResult<DocumentNumber> {
        let value = {
            let mut counters = self.counters.lock();
            let counter = counters.entry(series).or_insert(0);
            *counter += 1;
            *counter
        };
        DocumentNumber::sequential(series.default_prefix(), self.year, value)
            .map_err(|e| LifecycleError::Numbering(e.to_string()))
    }
}

/// Records every cleared draft key; can be switched to fail.
#[derive(Default)]
pub struct RecordingDraftGateway {
    cleared: RwLock<Vec<(ProjectId, DocumentType)>>,
    failing: RwLock<bool>,
}

impl RecordingDraftGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.write() = failing;
    }

    pub fn cleared(&self) -> Vec<(ProjectId, DocumentType)> {
        self.cleared.read().clone()
    }
}

#[async_trait]
impl DraftGateway for RecordingDraftGateway {
    async fn clear_draft(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> Result<(), StoreError> {
        if *self.failing.read() {
            return Err(StoreError::Unavailable("drafts offline".into()));
        }
        self.cleared
            .write()
            .push((project_id.clone(), document_type));
        Ok(())
    }
}
