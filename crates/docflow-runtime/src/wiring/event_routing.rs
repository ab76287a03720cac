//! # Event Routing
//!
//! Bus consumers owned by the runtime.
//!
//! ```text
//! Numbering (1) ──NumberAllocated──────────┐
//! Lifecycle (2) ──DocumentFinalized────────┼──→ MetricsRouter ──→ Prometheus
//!               ──DocumentRevised──────────┤
//!               ──InvoiceReversed──────────┤
//! Status (4)    ──StatusTransition*────────┤
//!               ──ProjectStatusChanged─────┘
//!
//! Lifecycle (2) ──DocumentFinalized──→ FinalizationSubscriber ──propose──→ Status (4)
//! ```

use docflow_telemetry::{
    log_document_event, metric_inc, DOCUMENTS_FINALIZED, DOCUMENTS_REVISED, INVOICES_REVERSED,
    NUMBERS_ALLOCATED, STATUS_TRANSITIONS,
};
use shared_bus::{DocumentEvent, EventFilter, EventSubscriber, Subscription};
use shared_types::{DocumentType, NumberKind};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Records a Prometheus sample for every bus event.
pub struct MetricsRouter {
    subscription: Subscription,
}

impl MetricsRouter {
    pub fn new(bus: &dyn EventSubscriber) -> Self {
        Self {
            subscription: bus.subscribe(EventFilter::all()),
        }
    }

    /// Map one event to its metric.
    pub fn record(event: &DocumentEvent) {
        match event {
            DocumentEvent::NumberAllocated { series, number } => {
                let kind = match number.kind() {
                    NumberKind::Sequential(_) => "sequential",
                    NumberKind::Temporary { .. } => "temporary",
                };
                metric_inc!(NUMBERS_ALLOCATED, &[series.key(), kind]);
            }
            DocumentEvent::DocumentFinalized {
                project_id,
                document_type,
                document_number,
                ..
            } => {
                metric_inc!(DOCUMENTS_FINALIZED, &[document_type.key()]);
                log_document_event!(trace, "finalization recorded", project_id, document_type, document_number);
            }
            DocumentEvent::DocumentRevised {
                project_id,
                document_type,
                document_number,
                version,
                ..
            } => {
                metric_inc!(DOCUMENTS_REVISED);
                log_document_event!(trace, "revision recorded", project_id, document_type, document_number, version = *version);
            }
            DocumentEvent::InvoiceReversed {
                project_id,
                original_number,
                ..
            } => {
                metric_inc!(INVOICES_REVERSED);
                log_document_event!(trace, "reversal recorded", project_id, DocumentType::Invoice, original_number);
            }
            DocumentEvent::StatusTransitionProposed { .. } => {
                metric_inc!(STATUS_TRANSITIONS, &["proposed"]);
            }
            DocumentEvent::StatusTransitionResolved { applied, .. } => {
                let decision = if *applied { "accepted" } else { "declined" };
                metric_inc!(STATUS_TRANSITIONS, &[decision]);
            }
            DocumentEvent::ProjectStatusChanged { .. } => {
                metric_inc!(STATUS_TRANSITIONS, &["changed"]);
            }
        }
    }

    /// Process events until the bus closes.
    pub async fn run(mut self) {
        while let Some(event) = self.subscription.recv().await {
            trace!(topic = ?event.topic(), "routing event to metrics");
            Self::record(&event);
        }
        debug!("metrics router stopped, bus closed");
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{DocumentNumber, NumberSeries, ProjectId, RecordId};

    #[test]
    fn test_events_map_to_metrics() {
        let finalized = DOCUMENTS_FINALIZED.with_label_values(&["invoice"]).get();
        let temporary = NUMBERS_ALLOCATED
            .with_label_values(&["storno", "temporary"])
            .get();
        let declined = STATUS_TRANSITIONS.with_label_values(&["declined"]).get();

        MetricsRouter::record(&DocumentEvent::DocumentFinalized {
            record_id: RecordId::generate(),
            project_id: ProjectId::new("P1"),
            document_type: DocumentType::Invoice,
            document_number: DocumentNumber::sequential("RE", 2025, 1).unwrap(),
            version: 1,
        });
        MetricsRouter::record(&DocumentEvent::NumberAllocated {
            series: NumberSeries::Storno,
            number: DocumentNumber::temporary("ST", 2025, 1_735_689_600_000, 7).unwrap(),
        });
        MetricsRouter::record(&DocumentEvent::StatusTransitionResolved {
            token: RecordId::generate().0,
            project_id: ProjectId::new("P1"),
            to: shared_types::ProjectStatus::Invoice,
            applied: false,
        });

        assert_eq!(
            DOCUMENTS_FINALIZED.with_label_values(&["invoice"]).get(),
            finalized + 1
        );
        assert_eq!(
            NUMBERS_ALLOCATED
                .with_label_values(&["storno", "temporary"])
                .get(),
            temporary + 1
        );
        assert_eq!(
            STATUS_TRANSITIONS.with_label_values(&["declined"]).get(),
            declined + 1
        );
    }
}
