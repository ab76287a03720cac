//! Autosave against the live lifecycle.

use std::time::Duration;

use df_02_lifecycle::{DocumentState, LifecycleApi};
use df_03_drafts::{DraftApi, FormSource, SaveOutcome};
use shared_types::{DocumentType, ProjectId};

use super::harness::{payload, Harness};

#[tokio::test(start_paused = true)]
async fn test_autosave_then_finalize_clears_draft() {
    let h = Harness::new().unwrap();
    let p1 = ProjectId::new("P1");
    let autosave = h.container.autosave(p1.clone(), DocumentType::Quotation);

    autosave.push(payload("Müller GmbH", 10));
    autosave.push(payload("Müller GmbH", 20));
    tokio::time::sleep(Duration::from_millis(1600)).await;

    assert_eq!(
        h.container
            .drafts
            .load(&p1, DocumentType::Quotation)
            .await
            .unwrap(),
        Some(payload("Müller GmbH", 20))
    );
    assert_eq!(
        h.container
            .lifecycle
            .current_state(&p1, DocumentType::Quotation)
            .await
            .unwrap(),
        DocumentState::Draft
    );

    let record = h
        .container
        .lifecycle
        .finalize(&p1, DocumentType::Quotation, payload("Müller GmbH", 20))
        .await
        .unwrap();
    assert!(h.stored_draft(&p1, DocumentType::Quotation).await.is_none());
    assert_eq!(
        h.container
            .drafts
            .rehydrate(&p1, DocumentType::Quotation)
            .await
            .unwrap(),
        FormSource::Final { record }
    );

    // Further edits are not written while the final record is active.
    autosave.push(payload("Müller GmbH", 30));
    let outcome = autosave.flush().await.unwrap().unwrap();
    assert!(matches!(outcome, SaveOutcome::SkippedFinalExists { .. }));
    assert!(h.stored_draft(&p1, DocumentType::Quotation).await.is_none());
}

#[tokio::test]
async fn test_proforma_draft_survives_next_to_final() {
    let h = Harness::new().unwrap();
    let p1 = ProjectId::new("P1");
    let drafts = &h.container.drafts;

    h.container
        .lifecycle
        .finalize(&p1, DocumentType::ProformaInvoice, payload("Müller GmbH", 50))
        .await
        .unwrap();

    let outcome = drafts
        .save(&p1, DocumentType::ProformaInvoice, payload("Müller GmbH", 75))
        .await
        .unwrap();
    assert!(outcome.was_saved());
    assert!(matches!(
        drafts
            .rehydrate(&p1, DocumentType::ProformaInvoice)
            .await
            .unwrap(),
        FormSource::Draft { .. }
    ));

    let second = h
        .container
        .lifecycle
        .finalize(&p1, DocumentType::ProformaInvoice, payload("Müller GmbH", 75))
        .await
        .unwrap();
    assert_eq!(second.document_number.to_string(), "PR-2025-0002");
}

#[tokio::test]
async fn test_reversed_invoice_reopens_editor_with_draft() {
    let h = Harness::new().unwrap();
    let p1 = ProjectId::new("P1");

    let invoice = h
        .container
        .lifecycle
        .finalize(&p1, DocumentType::Invoice, payload("Müller GmbH", 100))
        .await
        .unwrap();
    h.container
        .lifecycle
        .reverse(invoice.id, "Preiskorrektur")
        .await
        .unwrap();

    let outcome = h
        .container
        .drafts
        .save(&p1, DocumentType::Invoice, payload("Müller GmbH", 90))
        .await
        .unwrap();
    assert!(outcome.was_saved());
    assert_eq!(
        h.container
            .drafts
            .rehydrate(&p1, DocumentType::Invoice)
            .await
            .unwrap()
            .into_payload(),
        Some(payload("Müller GmbH", 90))
    );
}
