//! Prometheus metrics for docflow.
//!
//! All metrics follow the naming convention: `docflow_<metric>_total`.
//! They are registered on first use, so `gather_metrics` only reports
//! series that were touched or explicitly initialized.

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::TelemetryError;

fn counter(name: &str, help: &str) -> IntCounter {
    let counter = IntCounter::new(name, help).expect("metric creation failed");
    REGISTRY
        .register(Box::new(counter.clone()))
        .expect("metric registration failed");
    counter
}

fn counter_vec(name: &str, help: &str, labels: &[&str]) -> IntCounterVec {
    let counter = IntCounterVec::new(Opts::new(name, help), labels).expect("metric creation failed");
    REGISTRY
        .register(Box::new(counter.clone()))
        .expect("metric registration failed");
    counter
}

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // NUMBERING METRICS (Subsystem 1)
    // =========================================================================

    /// Numbers handed out, by series and kind
    pub static ref NUMBERS_ALLOCATED: IntCounterVec = counter_vec(
        "docflow_numbers_allocated_total",
        "Total document numbers allocated",
        &["series", "kind"]  // kind: sequential/temporary
    );

    // =========================================================================
    // LIFECYCLE METRICS (Subsystem 2)
    // =========================================================================

    /// Documents finalized, by type
    pub static ref DOCUMENTS_FINALIZED: IntCounterVec = counter_vec(
        "docflow_documents_finalized_total",
        "Total documents finalized",
        &["doc_type"]
    );

    /// Delivery-note versions created
    pub static ref DOCUMENTS_REVISED: IntCounter = counter(
        "docflow_documents_revised_total",
        "Total superseding document versions created"
    );

    /// Invoices voided by a storno record
    pub static ref INVOICES_REVERSED: IntCounter = counter(
        "docflow_invoices_reversed_total",
        "Total invoices reversed"
    );

    // =========================================================================
    // PROJECT STATUS METRICS (Subsystem 4)
    // =========================================================================

    /// Status transitions by decision
    pub static ref STATUS_TRANSITIONS: IntCounterVec = counter_vec(
        "docflow_status_transitions_total",
        "Project status proposals, resolutions and writes",
        &["decision"]  // decision: proposed/accepted/declined/changed
    );
}

/// Force registration of every metric so they show up before first use.
pub fn register_metrics() {
    lazy_static::initialize(&NUMBERS_ALLOCATED);
    lazy_static::initialize(&DOCUMENTS_FINALIZED);
    lazy_static::initialize(&DOCUMENTS_REVISED);
    lazy_static::initialize(&INVOICES_REVERSED);
    lazy_static::initialize(&STATUS_TRANSITIONS);
}

/// Encode all metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    register_metrics();
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
