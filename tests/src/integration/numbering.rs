//! Number allocation through the wired container.

use df_01_numbering::NumberingApi;
use df_02_lifecycle::LifecycleApi;
use futures::future::join_all;
use serde_json::json;
use shared_types::store::{collections, FailureMode};
use shared_types::{DocumentStore, DocumentType, NumberKind, NumberSeries, ProjectId};
use std::collections::HashSet;

use super::harness::{payload, Harness};

async fn invoice_number(h: &Harness, project: &str) -> String {
    h.container
        .lifecycle
        .finalize(
            &ProjectId::new(project),
            DocumentType::Invoice,
            payload(project, 100),
        )
        .await
        .unwrap()
        .document_number
        .to_string()
}

#[tokio::test]
async fn test_invoice_numbers_are_sequential_per_year() {
    let h = Harness::new().unwrap();

    assert_eq!(invoice_number(&h, "P1").await, "RE-2025-0001");
    assert_eq!(invoice_number(&h, "P2").await, "RE-2025-0002");
    assert_eq!(invoice_number(&h, "P3").await, "RE-2025-0003");
    assert_eq!(h.container.numbering.peek(NumberSeries::Document(DocumentType::Invoice)).await.unwrap(), 3);

    h.set_year(2026);
    assert_eq!(invoice_number(&h, "P4").await, "RE-2026-0001");
}

#[tokio::test]
async fn test_series_do_not_share_counters() {
    let h = Harness::new().unwrap();
    let p1 = ProjectId::new("P1");

    let quotation = h
        .container
        .lifecycle
        .finalize(&p1, DocumentType::Quotation, payload("P1", 10))
        .await
        .unwrap();
    let confirmation = h
        .container
        .lifecycle
        .finalize(&p1, DocumentType::OrderConfirmation, payload("P1", 10))
        .await
        .unwrap();

    assert_eq!(quotation.document_number.to_string(), "ANG-2025-0001");
    assert_eq!(confirmation.document_number.to_string(), "AB-2025-0001");
    assert_eq!(invoice_number(&h, "P1").await, "RE-2025-0001");
}

#[tokio::test]
async fn test_concurrent_allocations_are_distinct() {
    let h = Harness::new().unwrap();
    let numbering = h.container.numbering.clone();

    let allocations = (0..25).map(|_| {
        let numbering = numbering.clone();
        async move { numbering.allocate(DocumentType::DeliveryNote).await.unwrap() }
    });
    let numbers = join_all(allocations).await;

    let unique: HashSet<String> = numbers.iter().map(ToString::to_string).collect();
    assert_eq!(unique.len(), 25);
    assert!(numbers.iter().all(|n| !n.is_temporary()));
    assert_eq!(
        numbering
            .peek(NumberSeries::Document(DocumentType::DeliveryNote))
            .await
            .unwrap(),
        25
    );
}

#[tokio::test]
async fn test_counter_store_outage_issues_temp_number() {
    let h = Harness::new().unwrap();
    h.store
        .fail_collection(collections::SEQUENCE_COUNTERS, FailureMode::All);

    let record = h
        .container
        .lifecycle
        .finalize(&ProjectId::new("P1"), DocumentType::Quotation, payload("P1", 10))
        .await
        .unwrap();

    let number = &record.document_number;
    assert!(number.is_temporary());
    assert!(matches!(number.kind(), NumberKind::Temporary { .. }));
    assert!(number.to_string().starts_with("ANG-2025-TEMP-"));

    h.store.heal_collection(collections::SEQUENCE_COUNTERS);
    let next = h
        .container
        .lifecycle
        .finalize(&ProjectId::new("P2"), DocumentType::Quotation, payload("P2", 10))
        .await
        .unwrap();
    assert_eq!(next.document_number.to_string(), "ANG-2025-0001");
}

#[tokio::test]
async fn test_numbers_in_use_are_skipped_after_counter_reset() {
    let h = Harness::new().unwrap();
    assert_eq!(invoice_number(&h, "P1").await, "RE-2025-0001");
    assert_eq!(invoice_number(&h, "P2").await, "RE-2025-0002");

    // Someone restored an old counter snapshot.
    let mut fields = shared_types::Fields::new();
    fields.insert("counterValue".into(), json!(0));
    h.store
        .update(collections::SEQUENCE_COUNTERS, "invoice", fields)
        .await
        .unwrap();

    assert_eq!(invoice_number(&h, "P3").await, "RE-2025-0003");
}

#[tokio::test]
async fn test_number_exists_ignores_own_project() {
    let h = Harness::new().unwrap();
    let number = invoice_number(&h, "P1").await;
    let numbering = &h.container.numbering;

    assert!(numbering
        .number_exists(&number, DocumentType::Invoice, None)
        .await
        .unwrap());
    assert!(!numbering
        .number_exists(&number, DocumentType::Invoice, Some(&ProjectId::new("P1")))
        .await
        .unwrap());
    assert!(!numbering
        .number_exists(&number, DocumentType::Quotation, None)
        .await
        .unwrap());
}
