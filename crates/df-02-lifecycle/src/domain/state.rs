//! Derived document state and lifecycle operations.
//!
//! ```text
//!            finalize                reverse (invoice)
//! [DRAFT] ────────────→ [FINAL] ───────────────────→ [REVERSED]
//!                          │
//!                          │ revise_version (delivery note)
//!                          ▼
//!                 [SUPERSEDED_BY(next)]   next record: [FINAL], version + 1
//! ```
//!
//! `REVERSED` and `SUPERSEDED_BY` are terminal.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::RecordId;

/// What a document currently is, as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DocumentState {
    /// No finalized record, only (possibly) a draft.
    Draft,
    /// Immutable, numbered and current.
    Final,
    /// Voided by a storno record.
    Reversed { reason: String },
    /// Replaced by a newer version.
    SupersededBy { successor: RecordId },
}

impl DocumentState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Reversed { .. } | Self::SupersededBy { .. })
    }
}

/// State-changing lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Finalize,
    ReviseVersion,
    Reverse,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Finalize => "finalize",
            Self::ReviseVersion => "revise",
            Self::Reverse => "reverse",
        })
    }
}
