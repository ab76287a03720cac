//! Pending status changes awaiting the user's answer.

use serde::{Deserialize, Serialize};
use shared_types::{DocumentType, ProjectId, ProjectStatus};
use uuid::Uuid;

/// A proposed status change, identified by an opaque token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransition {
    pub token: Uuid,
    pub project_id: ProjectId,
    /// Status the project had when the proposal was made
    pub from: ProjectStatus,
    pub to: ProjectStatus,
    /// Document whose finalization triggered the proposal
    pub triggered_by: DocumentType,
}

/// The user's answer to a proposal.
///
/// Both variants keep the finalized document; they differ only in whether
/// the project status follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Decision {
    AcceptWithTransition,
    AcceptWithoutTransition,
}

impl Decision {
    pub fn key(self) -> &'static str {
        match self {
            Self::AcceptWithTransition => "accepted",
            Self::AcceptWithoutTransition => "declined",
        }
    }
}

/// What resolving a proposal did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub project_id: ProjectId,
    pub status: ProjectStatus,
    pub applied: bool,
}
