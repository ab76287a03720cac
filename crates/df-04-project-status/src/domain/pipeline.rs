//! The sales pipeline and which document moves a project along it.

use shared_types::{DocumentType, ProjectStatus};

/// Stage a finalized document suggests for its project.
///
/// Finalizing a quotation means it was sent; an order confirmation means
/// delivery is next; a delivery note means invoicing is next. Proformas
/// never move the project.
pub fn propose_transition(triggering: DocumentType) -> Option<ProjectStatus> {
    match triggering {
        DocumentType::Quotation => Some(ProjectStatus::QuotationSent),
        DocumentType::OrderConfirmation => Some(ProjectStatus::DeliveryNote),
        DocumentType::DeliveryNote => Some(ProjectStatus::Invoice),
        DocumentType::Invoice => Some(ProjectStatus::Invoice),
        DocumentType::ProformaInvoice => None,
    }
}

/// Whether moving from `current` to `target` is progress worth proposing.
///
/// `Lost` is absorbing for proposals; a project already at or past the
/// target is left alone.
pub fn is_advance(current: ProjectStatus, target: ProjectStatus) -> bool {
    match (current.pipeline_rank(), target.pipeline_rank()) {
        (Some(from), Some(to)) => to > from,
        _ => false,
    }
}
