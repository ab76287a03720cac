//! Invoice flow: finalize, status proposal, storno.

use df_02_lifecycle::{DocumentState, LifecycleApi, LifecycleError};
use df_04_project_status::{Decision, ProjectStatusApi};
use shared_types::{DocumentType, ProjectId, ProjectStatus};

use super::harness::{payload, Harness};

// =============================================================================
// FIXTURES
// =============================================================================

async fn project_at_delivery_note(h: &Harness, id: &str) -> ProjectId {
    let project = ProjectId::new(id);
    h.container
        .status
        .apply_transition(&project, ProjectStatus::DeliveryNote)
        .await
        .unwrap();
    project
}

// =============================================================================
// FINALIZE AND CONFIRM
// =============================================================================

#[tokio::test]
async fn test_invoice_finalization_proposes_status_and_accept_applies_it() {
    let h = Harness::new().unwrap();
    let runtime = h.start();
    let p1 = project_at_delivery_note(&h, "P1").await;

    let invoice = h
        .container
        .lifecycle
        .finalize(&p1, DocumentType::Invoice, payload("Müller GmbH", 1190))
        .await
        .unwrap();
    assert_eq!(invoice.document_number.to_string(), "RE-2025-0001");
    assert_eq!(invoice.version, 1);
    assert!(h.artifacts.get(&invoice.generated_artifact_ref).is_some());

    let pending = h.wait_for_pending(&p1).await;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].from, ProjectStatus::DeliveryNote);
    assert_eq!(pending[0].to, ProjectStatus::Invoice);

    let resolution = h
        .container
        .status
        .resolve(pending[0].token, Decision::AcceptWithTransition)
        .await
        .unwrap();
    assert!(resolution.applied);
    assert_eq!(
        h.container.status.status(&p1).await.unwrap(),
        ProjectStatus::Invoice
    );
    assert!(h.container.status.pending(&p1).is_empty());
    runtime.shutdown();
}

#[tokio::test]
async fn test_declined_proposal_keeps_status_and_record() {
    let h = Harness::new().unwrap();
    let runtime = h.start();
    let p1 = project_at_delivery_note(&h, "P1").await;

    let invoice = h
        .container
        .lifecycle
        .finalize(&p1, DocumentType::Invoice, payload("Müller GmbH", 500))
        .await
        .unwrap();

    let pending = h.wait_for_pending(&p1).await;
    assert_eq!(pending.len(), 1);
    let resolution = h
        .container
        .status
        .resolve(pending[0].token, Decision::AcceptWithoutTransition)
        .await
        .unwrap();
    assert!(!resolution.applied);

    assert_eq!(
        h.container.status.status(&p1).await.unwrap(),
        ProjectStatus::DeliveryNote
    );
    assert_eq!(
        h.container.lifecycle.state_of(invoice.id).await.unwrap(),
        DocumentState::Final
    );
    runtime.shutdown();
}

#[tokio::test]
async fn test_quotation_on_advanced_project_proposes_nothing() {
    let h = Harness::new().unwrap();
    let runtime = h.start();
    let p1 = project_at_delivery_note(&h, "P1").await;

    h.container
        .lifecycle
        .finalize(&p1, DocumentType::Quotation, payload("Müller GmbH", 80))
        .await
        .unwrap();

    // Give the subscriber time to see the event.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(h.container.status.pending(&p1).is_empty());
    runtime.shutdown();
}

#[tokio::test]
async fn test_second_invoice_finalize_is_illegal() {
    let h = Harness::new().unwrap();
    let p1 = ProjectId::new("P1");

    h.container
        .lifecycle
        .finalize(&p1, DocumentType::Invoice, payload("Müller GmbH", 100))
        .await
        .unwrap();
    let err = h
        .container
        .lifecycle
        .finalize(&p1, DocumentType::Invoice, payload("Müller GmbH", 120))
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::IllegalStateTransition { .. }));

    // The rejected attempt must not burn a number.
    assert_eq!(
        h.container
            .lifecycle
            .history(&p1, DocumentType::Invoice)
            .await
            .unwrap()
            .len(),
        1
    );
}

// =============================================================================
// STORNO
// =============================================================================

#[tokio::test]
async fn test_reverse_without_reason_is_rejected() {
    let h = Harness::new().unwrap();
    let p1 = ProjectId::new("P1");
    let invoice = h
        .container
        .lifecycle
        .finalize(&p1, DocumentType::Invoice, payload("Müller GmbH", 100))
        .await
        .unwrap();

    let err = h.container.lifecycle.reverse(invoice.id, "  ").await.unwrap_err();
    assert!(matches!(err, LifecycleError::ValidationFailure(_)));
    assert_eq!(
        h.container.lifecycle.state_of(invoice.id).await.unwrap(),
        DocumentState::Final
    );
}

#[tokio::test]
async fn test_reversal_frees_project_for_new_invoice() {
    let h = Harness::new().unwrap();
    let p1 = ProjectId::new("P1");
    let lifecycle = &h.container.lifecycle;

    let invoice = lifecycle
        .finalize(&p1, DocumentType::Invoice, payload("Müller GmbH", 1190))
        .await
        .unwrap();
    assert!(!lifecycle.can_create_new_invoice(&p1).await.unwrap());

    let outcome = lifecycle.reverse(invoice.id, "Preiskorrektur").await.unwrap();
    let storno = &outcome.reversal_record;
    assert_eq!(storno.document_number.to_string(), "ST-2025-0001");
    assert_eq!(storno.reversal_of, Some(invoice.id));
    assert_eq!(outcome.updated_original.reversal_reason(), Some("Preiskorrektur"));
    assert_eq!(
        lifecycle.state_of(invoice.id).await.unwrap(),
        DocumentState::Reversed {
            reason: "Preiskorrektur".into()
        }
    );

    assert!(lifecycle.can_create_new_invoice(&p1).await.unwrap());
    let replacement = lifecycle
        .finalize(&p1, DocumentType::Invoice, payload("Müller GmbH", 1000))
        .await
        .unwrap();
    assert_eq!(replacement.document_number.to_string(), "RE-2025-0002");

    let current = lifecycle
        .load_current(&p1, DocumentType::Invoice)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.id, replacement.id);
    assert_eq!(lifecycle.history(&p1, DocumentType::Invoice).await.unwrap().len(), 3);
}

// =============================================================================
// METRICS
// =============================================================================

#[tokio::test]
async fn test_lifecycle_events_reach_metrics() {
    let h = Harness::new().unwrap();
    let runtime = h.start();
    let p1 = ProjectId::new("P1");

    let invoice = h
        .container
        .lifecycle
        .finalize(&p1, DocumentType::Invoice, payload("Müller GmbH", 10))
        .await
        .unwrap();
    h.container
        .lifecycle
        .reverse(invoice.id, "Preiskorrektur")
        .await
        .unwrap();

    let mut output = String::new();
    for _ in 0..100 {
        output = docflow_telemetry::gather_metrics().unwrap();
        if output.contains("docflow_invoices_reversed_total")
            && output.contains("docflow_documents_finalized_total{doc_type=\"invoice\"}")
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert!(output.contains("docflow_numbers_allocated_total"));
    assert!(output.contains("docflow_invoices_reversed_total"));
    assert!(output.contains("docflow_documents_finalized_total{doc_type=\"invoice\"}"));
    runtime.shutdown();
}
