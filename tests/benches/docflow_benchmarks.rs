//! Docflow benchmarks.
//!
//! Run with: `cargo bench -p df-tests`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use df_01_numbering::NumberingApi;
use df_02_lifecycle::LifecycleApi;
use df_04_project_status::{is_advance, propose_transition};
use docflow_runtime::{DocflowConfig, DocflowContainer};
use serde_json::json;
use shared_types::{DocumentNumber, DocumentType, Payload, ProjectId, ProjectStatus};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime")
}

// =============================================================================
// NUMBERING
// =============================================================================

fn bench_numbering(c: &mut Criterion) {
    let rt = runtime();
    let container = Arc::new(DocflowContainer::in_memory(DocflowConfig::default()).unwrap());
    let mut group = c.benchmark_group("numbering");

    group.bench_function("allocate_delivery_note", |b| {
        b.iter(|| {
            rt.block_on(container.numbering.allocate(DocumentType::DeliveryNote))
                .unwrap()
        })
    });

    group.bench_function("parse_number", |b| {
        b.iter(|| black_box("RE-2025-0042").parse::<DocumentNumber>().unwrap())
    });

    group.bench_function("parse_temp_number", |b| {
        b.iter(|| {
            black_box("RE-2025-TEMP-1735689600000-007")
                .parse::<DocumentNumber>()
                .unwrap()
        })
    });

    group.finish();
}

// =============================================================================
// LIFECYCLE
// =============================================================================

fn bench_finalize(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("lifecycle");

    for items in [1usize, 20, 200] {
        let container = DocflowContainer::in_memory(DocflowConfig::default()).unwrap();
        let payload = Payload::new(json!({
            "customer": "Müller GmbH",
            "items": (0..items).map(|i| json!({ "pos": i, "amount": 10 })).collect::<Vec<_>>(),
        }));
        let mut project = 0u64;

        group.bench_with_input(BenchmarkId::new("finalize_quotation", items), &payload, |b, payload| {
            b.iter(|| {
                project += 1;
                let id = ProjectId::new(format!("P{project}"));
                rt.block_on(container.lifecycle.finalize(
                    &id,
                    DocumentType::Quotation,
                    payload.clone(),
                ))
                .unwrap()
            })
        });
    }

    group.finish();
}

// =============================================================================
// PIPELINE
// =============================================================================

fn bench_pipeline(c: &mut Criterion) {
    c.bench_function("pipeline/propose_all_types", |b| {
        b.iter(|| {
            DocumentType::ALL
                .iter()
                .filter_map(|t| propose_transition(*t))
                .filter(|target| is_advance(black_box(ProjectStatus::Quotation), *target))
                .count()
        })
    });
}

criterion_group!(benches, bench_numbering, bench_finalize, bench_pipeline);
criterion_main!(benches);
