//! What the editor shows and what a save did.

use shared_types::{DocumentRecord, Payload, RecordId, Timestamp};

/// Result of a draft save.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved { updated_at: Timestamp },
    /// An active final record owns the key; the draft was left alone.
    SkippedFinalExists { record_id: RecordId },
}

impl SaveOutcome {
    pub fn was_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Where the form content comes from when an editor opens.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSource {
    /// Read-only view of the finalized record.
    Final { record: DocumentRecord },
    /// Editable draft.
    Draft {
        payload: Payload,
        updated_at: Timestamp,
    },
    /// Nothing yet: start from an empty form.
    Empty,
}

impl FormSource {
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Final { .. })
    }

    /// The payload to fill the form with.
    pub fn into_payload(self) -> Option<Payload> {
        match self {
            Self::Final { record } => Some(record.payload_snapshot),
            Self::Draft { payload, .. } => Some(payload),
            Self::Empty => None,
        }
    }
}
