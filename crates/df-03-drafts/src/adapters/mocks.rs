//! Mock final-record source for running drafts standalone.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{DocumentRecord, DocumentType, ProjectId};

use crate::error::{DraftError, DraftResult};
use crate::ports::outbound::FinalDocumentSource;

#[derive(Default)]
pub struct InMemoryFinalDocuments {
    records: RwLock<HashMap<(ProjectId, DocumentType), DocumentRecord>>,
    failing: RwLock<bool>,
}

impl InMemoryFinalDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `record` the active final record of its key.
    pub fn insert(&self, record: DocumentRecord) {
        self.records
            .write()
            .insert((record.project_id.clone(), record.document_type), record);
    }

    pub fn remove(&self, project_id: &ProjectId, document_type: DocumentType) {
        self.records
            .write()
            .remove(&(project_id.clone(), document_type));
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.write() = failing;
    }
}

#[async_trait]
impl FinalDocumentSource for InMemoryFinalDocuments {
    async fn active_final(
        &self,
        project_id: &ProjectId,
        document_type: DocumentType,
    ) -> DraftResult<Option<DocumentRecord>> {
        if *self.failing.read() {
            return Err(DraftError::Lookup("documents offline".into()));
        }
        Ok(self
            .records
            .read()
            .get(&(project_id.clone(), document_type))
            .cloned())
    }
}
