//! Delivery-note versioning.

use df_02_lifecycle::{DocumentState, LifecycleApi, LifecycleError};
use shared_types::{DocumentType, ProjectId};

use super::harness::{payload, Harness};

#[tokio::test]
async fn test_revision_keeps_number_and_old_version() {
    let h = Harness::new().unwrap();
    let p1 = ProjectId::new("P1");
    let lifecycle = &h.container.lifecycle;

    let v1 = lifecycle
        .finalize(&p1, DocumentType::DeliveryNote, payload("Müller GmbH", 3))
        .await
        .unwrap();
    let v2 = lifecycle
        .revise_version(v1.id, payload("Müller GmbH", 4))
        .await
        .unwrap();

    assert_eq!(v2.version, 2);
    assert_eq!(v2.supersedes, Some(v1.id));
    assert_eq!(v2.document_number, v1.document_number);
    assert_eq!(v2.document_number.to_string(), "LS-2025-0001");
    assert_ne!(v2.generated_artifact_ref, v1.generated_artifact_ref);

    // The superseded version stays retrievable and unchanged.
    let old = lifecycle.get(v1.id).await.unwrap();
    assert_eq!(old.payload_snapshot, payload("Müller GmbH", 3));
    assert_eq!(
        lifecycle.state_of(v1.id).await.unwrap(),
        DocumentState::SupersededBy { successor: v2.id }
    );
    assert_eq!(
        lifecycle
            .load_current(&p1, DocumentType::DeliveryNote)
            .await
            .unwrap()
            .map(|r| r.id),
        Some(v2.id)
    );
}

#[tokio::test]
async fn test_finalize_on_final_delivery_note_creates_next_version() {
    let h = Harness::new().unwrap();
    let p1 = ProjectId::new("P1");
    let lifecycle = &h.container.lifecycle;

    let v1 = lifecycle
        .finalize(&p1, DocumentType::DeliveryNote, payload("Müller GmbH", 1))
        .await
        .unwrap();
    let v2 = lifecycle
        .finalize(&p1, DocumentType::DeliveryNote, payload("Müller GmbH", 2))
        .await
        .unwrap();

    assert_eq!(v2.version, 2);
    assert_eq!(v2.supersedes, Some(v1.id));
    assert_eq!(v2.document_number, v1.document_number);
    assert_eq!(
        lifecycle
            .history(&p1, DocumentType::DeliveryNote)
            .await
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn test_superseded_version_cannot_be_revised() {
    let h = Harness::new().unwrap();
    let p1 = ProjectId::new("P1");
    let lifecycle = &h.container.lifecycle;

    let v1 = lifecycle
        .finalize(&p1, DocumentType::DeliveryNote, payload("Müller GmbH", 1))
        .await
        .unwrap();
    lifecycle
        .revise_version(v1.id, payload("Müller GmbH", 2))
        .await
        .unwrap();

    let err = lifecycle
        .revise_version(v1.id, payload("Müller GmbH", 3))
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::IllegalStateTransition { .. }));
}

#[tokio::test]
async fn test_invoices_are_not_revisable() {
    let h = Harness::new().unwrap();
    let p1 = ProjectId::new("P1");
    let invoice = h
        .container
        .lifecycle
        .finalize(&p1, DocumentType::Invoice, payload("Müller GmbH", 100))
        .await
        .unwrap();

    let err = h
        .container
        .lifecycle
        .revise_version(invoice.id, payload("Müller GmbH", 90))
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::IllegalStateTransition { .. }));
}
