//! In-memory artifact generator for tests and development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{ArtifactRef, DocumentNumber, DocumentType, Payload};

use crate::error::ArtifactError;
use crate::ports::outbound::ArtifactGenerator;

/// Keeps the rendered payload bytes keyed by reference.
///
/// References look like `artifacts/invoice/RE-2025-0001/3.json`; the
/// trailing sequence keeps versions sharing a number apart.
#[derive(Default)]
pub struct InMemoryArtifactGenerator {
    artifacts: RwLock<HashMap<ArtifactRef, Vec<u8>>>,
    sequence: AtomicU64,
    failing: AtomicBool,
}

impl InMemoryArtifactGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `generate` fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn get(&self, reference: &ArtifactRef) -> Option<Vec<u8>> {
        self.artifacts.read().get(reference).cloned()
    }

    pub fn len(&self) -> usize {
        self.artifacts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ArtifactGenerator for InMemoryArtifactGenerator {
    async fn generate(
        &self,
        document_type: DocumentType,
        number: &DocumentNumber,
        payload: &Payload,
    ) -> Result<ArtifactRef, ArtifactError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ArtifactError("renderer unavailable".into()));
        }
        let bytes = serde_json::to_vec(payload).map_err(|e| ArtifactError(e.to_string()))?;
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let reference = ArtifactRef::new(format!(
            "artifacts/{}/{}/{}.json",
            document_type, number, sequence
        ));
        self.artifacts.write().insert(reference.clone(), bytes);
        Ok(reference)
    }
}
