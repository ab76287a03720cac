//! Payload of storno records.

use serde::{Deserialize, Serialize};
use shared_types::{DocumentNumber, DocumentRecord, Payload, RecordId};

/// Content of a reversal record.
///
/// Serialized under a `void` key so renderers and readers can tell a storno
/// payload apart from a regular document payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidPayload {
    pub reversal_of: DocumentNumber,
    pub reversal_of_id: RecordId,
    pub reason: String,
    pub voided_snapshot: Payload,
}

#[derive(Serialize, Deserialize)]
struct Wrapper {
    void: VoidPayload,
}

impl VoidPayload {
    pub fn for_original(original: &DocumentRecord, reason: &str) -> Self {
        Self {
            reversal_of: original.document_number.clone(),
            reversal_of_id: original.id,
            reason: reason.to_string(),
            voided_snapshot: original.payload_snapshot.clone(),
        }
    }

    pub fn to_payload(&self) -> Payload {
        // Derived Serialize on plain data with string keys cannot fail.
        serde_json::to_value(Wrapper { void: self.clone() })
            .map(Payload::new)
            .unwrap_or_default()
    }

    /// Read back from a storno record's payload.
    pub fn from_payload(payload: &Payload) -> Option<Self> {
        serde_json::from_value::<Wrapper>(payload.as_value().clone())
            .ok()
            .map(|w| w.void)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use shared_types::{ArtifactRef, DocumentType, LifecycleState, ProjectId};

    #[test]
    fn test_void_payload_shape() {
        let original = DocumentRecord {
            id: RecordId::generate(),
            project_id: ProjectId::new("P1"),
            document_type: DocumentType::Invoice,
            document_number: "RE-2025-0001".parse().unwrap(),
            version: 1,
            lifecycle_state: LifecycleState::Final,
            payload_snapshot: Payload::new(json!({ "total": 1200 })),
            generated_artifact_ref: ArtifactRef::new("a"),
            created_at: Utc::now(),
            supersedes: None,
            reversal_of: None,
        };

        let payload = VoidPayload::for_original(&original, "Preiskorrektur").to_payload();
        let value = payload.as_value();
        assert_eq!(value["void"]["reversalOf"], "RE-2025-0001");
        assert_eq!(value["void"]["reason"], "Preiskorrektur");
        assert_eq!(value["void"]["voidedSnapshot"]["total"], 1200);

        let back = VoidPayload::from_payload(&payload).unwrap();
        assert_eq!(back.reversal_of_id, original.id);
        assert_eq!(VoidPayload::from_payload(&Payload::empty_object()), None);
    }
}
