//! Lifecycle rules over the records of one `(project, documentType)`.
//!
//! Everything here is pure: the service loads the records, asks these
//! functions what is allowed, and performs the writes.

use std::collections::HashSet;

use shared_types::{DocumentRecord, DocumentType, RecordId};

use super::state::{DocumentState, Operation};
use crate::error::{LifecycleError, LifecycleResult};

/// Outcome of checking a finalize request.
#[derive(Debug, Clone, PartialEq)]
pub enum FinalizePlan {
    /// Issue a new record with a fresh number.
    Create,
    /// Delivery note already final: produce the next version of this record.
    Revise(DocumentRecord),
}

/// Ids of records that have a successor version among `records`.
fn superseded_ids(records: &[DocumentRecord]) -> HashSet<RecordId> {
    records.iter().filter_map(|r| r.supersedes).collect()
}

/// Records that count as "the" document: not reversed, not a storno record,
/// not superseded. Oldest first.
pub fn active_records(records: &[DocumentRecord]) -> Vec<&DocumentRecord> {
    let superseded = superseded_ids(records);
    let mut active: Vec<&DocumentRecord> = records
        .iter()
        .filter(|r| r.is_final() && !r.is_reversal() && !superseded.contains(&r.id))
        .collect();
    active.sort_by_key(|r| (r.created_at, r.version));
    active
}

/// The current record: the single active one, or for proforma invoices the
/// most recently created.
pub fn current_record(records: &[DocumentRecord]) -> Option<&DocumentRecord> {
    active_records(records).last().copied()
}

/// Decide how a finalize request for `document_type` proceeds.
pub fn plan_finalize(
    document_type: DocumentType,
    records: &[DocumentRecord],
) -> LifecycleResult<FinalizePlan> {
    if document_type.allows_multiple_active() {
        return Ok(FinalizePlan::Create);
    }

    match current_record(records) {
        None => Ok(FinalizePlan::Create),
        Some(current) if document_type.is_revisable() => Ok(FinalizePlan::Revise(current.clone())),
        Some(current) => Err(LifecycleError::illegal(
            current.id,
            Operation::Finalize,
            format!(
                "{} {} is already final; reverse it before issuing a new one",
                document_type, current.document_number
            ),
        )),
    }
}

/// Check that `record` may get a new version. `successor` is the record
/// already superseding it, if any.
pub fn check_revisable(
    record: &DocumentRecord,
    successor: Option<&DocumentRecord>,
) -> LifecycleResult<()> {
    let illegal = |reason: String| LifecycleError::illegal(record.id, Operation::ReviseVersion, reason);

    if !record.document_type.is_revisable() {
        return Err(illegal(format!(
            "{} records cannot be versioned",
            record.document_type
        )));
    }
    if record.is_reversed() {
        return Err(illegal("record is reversed".into()));
    }
    if record.is_reversal() {
        return Err(illegal("storno records cannot be versioned".into()));
    }
    if let Some(successor) = successor {
        return Err(illegal(format!(
            "already superseded by version {} ({})",
            successor.version, successor.id
        )));
    }
    Ok(())
}

/// Check that `record` may be reversed.
pub fn check_reversible(record: &DocumentRecord) -> LifecycleResult<()> {
    let illegal = |reason: String| LifecycleError::illegal(record.id, Operation::Reverse, reason);

    if record.is_reversal() {
        return Err(illegal("a storno record cannot be reversed".into()));
    }
    if !record.document_type.is_reversible() {
        return Err(illegal(format!(
            "{} records cannot be reversed",
            record.document_type
        )));
    }
    if let Some(reason) = record.reversal_reason() {
        return Err(illegal(format!("already reversed ({reason})")));
    }
    Ok(())
}

/// Reasons must carry text.
pub fn validate_reason(reason: &str) -> LifecycleResult<&str> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(LifecycleError::ValidationFailure(
            "a reversal reason is required".into(),
        ));
    }
    Ok(trimmed)
}

/// Derived state of `record` given its successor.
pub fn derive_state(record: &DocumentRecord, successor: Option<&DocumentRecord>) -> DocumentState {
    if let Some(reason) = record.reversal_reason() {
        return DocumentState::Reversed {
            reason: reason.to_string(),
        };
    }
    match successor {
        Some(next) => DocumentState::SupersededBy { successor: next.id },
        None => DocumentState::Final,
    }
}
