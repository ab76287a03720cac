//! # Document Events
//!
//! Defines all event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::entities::{DocumentType, NumberSeries, ProjectId, ProjectStatus, RecordId};
use shared_types::numbering::DocumentNumber;
use uuid::Uuid;

/// All events that can be published to the event bus.
///
/// Subsystems never call each other for follow-up work; they publish one of
/// these and interested subsystems react.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentEvent {
    // =========================================================================
    // SUBSYSTEM 1: NUMBERING
    // =========================================================================
    /// A number was handed out by the sequence allocator.
    NumberAllocated {
        series: NumberSeries,
        number: DocumentNumber,
    },

    // =========================================================================
    // SUBSYSTEM 2: LIFECYCLE
    // =========================================================================
    /// A document was finalized (first version or a proforma).
    /// Consumed by Project Status (4) to propose a stage change.
    DocumentFinalized {
        record_id: RecordId,
        project_id: ProjectId,
        document_type: DocumentType,
        document_number: DocumentNumber,
        version: u32,
    },

    /// A delivery note got a superseding version.
    DocumentRevised {
        record_id: RecordId,
        supersedes: RecordId,
        project_id: ProjectId,
        document_type: DocumentType,
        document_number: DocumentNumber,
        version: u32,
    },

    /// An invoice was formally reversed by a storno record.
    InvoiceReversed {
        original_id: RecordId,
        reversal_id: RecordId,
        project_id: ProjectId,
        original_number: DocumentNumber,
        reversal_number: DocumentNumber,
        reason: String,
    },

    // =========================================================================
    // SUBSYSTEM 4: PROJECT STATUS
    // =========================================================================
    /// A status change awaits the user's confirmation.
    StatusTransitionProposed {
        token: Uuid,
        project_id: ProjectId,
        from: ProjectStatus,
        to: ProjectStatus,
    },

    /// A pending proposal was accepted with or without applying it.
    StatusTransitionResolved {
        token: Uuid,
        project_id: ProjectId,
        to: ProjectStatus,
        applied: bool,
    },

    /// The project status was written (confirmed proposal or manual change).
    ProjectStatusChanged {
        project_id: ProjectId,
        from: Option<ProjectStatus>,
        to: ProjectStatus,
    },
}

impl DocumentEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::NumberAllocated { .. } => EventTopic::Numbering,
            Self::DocumentFinalized { .. }
            | Self::DocumentRevised { .. }
            | Self::InvoiceReversed { .. } => EventTopic::Lifecycle,
            Self::StatusTransitionProposed { .. }
            | Self::StatusTransitionResolved { .. }
            | Self::ProjectStatusChanged { .. } => EventTopic::ProjectStatus,
        }
    }

    /// Get the originating subsystem ID.
    #[must_use]
    pub fn source_subsystem(&self) -> u8 {
        match self.topic() {
            EventTopic::Numbering => 1,
            EventTopic::Lifecycle => 2,
            EventTopic::Drafts => 3,
            EventTopic::ProjectStatus | EventTopic::All => 4,
        }
    }

    /// Project the event belongs to, if any.
    #[must_use]
    pub fn project_id(&self) -> Option<&ProjectId> {
        match self {
            Self::NumberAllocated { .. } => None,
            Self::DocumentFinalized { project_id, .. }
            | Self::DocumentRevised { project_id, .. }
            | Self::InvoiceReversed { project_id, .. }
            | Self::StatusTransitionProposed { project_id, .. }
            | Self::StatusTransitionResolved { project_id, .. }
            | Self::ProjectStatusChanged { project_id, .. } => Some(project_id),
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Subsystem 1 events.
    Numbering,
    /// Subsystem 2 events.
    Lifecycle,
    /// Subsystem 3 events.
    Drafts,
    /// Subsystem 4 events.
    ProjectStatus,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Projects to include. Empty means all projects.
    pub projects: Vec<ProjectId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            projects: Vec::new(),
        }
    }

    /// Restrict the filter to one project.
    #[must_use]
    pub fn for_project(mut self, project_id: ProjectId) -> Self {
        self.projects.push(project_id);
        self
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &DocumentEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let project_match = self.projects.is_empty()
            || event
                .project_id()
                .is_some_and(|id| self.projects.contains(id));

        topic_match && project_match
    }
}
