//! # Core Domain Entities
//!
//! Defines the sales-document entities shared by every subsystem.
//!
//! ## Clusters
//!
//! - **Identity**: `ProjectId`, `RecordId`
//! - **Documents**: `DocumentType`, `NumberSeries`, `DocumentRecord`, `LifecycleState`
//! - **Drafts**: `DraftRecord`
//! - **Pipeline**: `ProjectStatus`

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::numbering::DocumentNumber;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Identifier of a sales project (owned by the outer application).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of one persisted `DocumentRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Generate a fresh random record id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point in time used for `createdAt` / `updatedAt`.
pub type Timestamp = DateTime<Utc>;

// =============================================================================
// CLUSTER B: DOCUMENTS
// =============================================================================

/// The kind of sales document.
///
/// Capabilities differ per type:
///
/// | Type | Revisable | Reversible | Several active |
/// |------|-----------|------------|----------------|
/// | quotation | no | no | no |
/// | orderConfirmation | no | no | no |
/// | deliveryNote | yes (versions) | no | no |
/// | invoice | no | yes (storno) | no |
/// | proformaInvoice | no | no | yes |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    Quotation,
    OrderConfirmation,
    DeliveryNote,
    Invoice,
    ProformaInvoice,
}

impl DocumentType {
    /// Every document type, in pipeline order.
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Quotation,
        DocumentType::OrderConfirmation,
        DocumentType::DeliveryNote,
        DocumentType::Invoice,
        DocumentType::ProformaInvoice,
    ];

    /// Stable key used in store ids and serialized fields.
    pub fn key(self) -> &'static str {
        match self {
            Self::Quotation => "quotation",
            Self::OrderConfirmation => "orderConfirmation",
            Self::DeliveryNote => "deliveryNote",
            Self::Invoice => "invoice",
            Self::ProformaInvoice => "proformaInvoice",
        }
    }

    /// Parse a type from its stable key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    /// Delivery notes are re-finalized as superseding versions.
    pub fn is_revisable(self) -> bool {
        matches!(self, Self::DeliveryNote)
    }

    /// Only invoices can be formally reversed.
    pub fn is_reversible(self) -> bool {
        matches!(self, Self::Invoice)
    }

    /// Proforma invoices may have several active records per project.
    pub fn allows_multiple_active(self) -> bool {
        matches!(self, Self::ProformaInvoice)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A number series: one counter per series and calendar year.
///
/// Reversal records draw from their own `Storno` series so that reversals
/// never consume invoice numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NumberSeries {
    Document(DocumentType),
    Storno,
}

impl NumberSeries {
    /// Every series, in a stable order.
    pub const ALL: [NumberSeries; 6] = [
        NumberSeries::Document(DocumentType::Quotation),
        NumberSeries::Document(DocumentType::OrderConfirmation),
        NumberSeries::Document(DocumentType::DeliveryNote),
        NumberSeries::Document(DocumentType::Invoice),
        NumberSeries::Document(DocumentType::ProformaInvoice),
        NumberSeries::Storno,
    ];

    /// Stable key, also the counter's id in the store.
    pub fn key(self) -> &'static str {
        match self {
            Self::Document(doc_type) => doc_type.key(),
            Self::Storno => "storno",
        }
    }

    /// Built-in prefix for this series.
    pub fn default_prefix(self) -> &'static str {
        match self {
            Self::Document(DocumentType::Quotation) => "ANG",
            Self::Document(DocumentType::OrderConfirmation) => "AB",
            Self::Document(DocumentType::DeliveryNote) => "LS",
            Self::Document(DocumentType::Invoice) => "RE",
            Self::Document(DocumentType::ProformaInvoice) => "PR",
            Self::Storno => "ST",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl From<DocumentType> for NumberSeries {
    fn from(doc_type: DocumentType) -> Self {
        Self::Document(doc_type)
    }
}

impl fmt::Display for NumberSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Opaque structured document data (line items, addresses, totals, ...).
///
/// The core never interprets the content beyond requiring a JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(pub serde_json::Value);

impl Payload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// An empty JSON object.
    pub fn empty_object() -> Self {
        Self(serde_json::Value::Object(serde_json::Map::new()))
    }

    pub fn is_object(&self) -> bool {
        self.0.is_object()
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Reference to a generated artifact (e.g. the storage path of a PDF).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactRef(pub String);

impl ArtifactRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Persisted lifecycle state of a record.
///
/// Superseded delivery-note versions keep `Final`: their status is derived
/// from the existence of a successor so the stored record is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum LifecycleState {
    /// Immutable, numbered, audit-relevant.
    Final,
    /// Voided by the reversal record `reversal_id`.
    #[serde(rename_all = "camelCase")]
    Reversed {
        #[serde(rename = "reversalReason")]
        reason: String,
        reversal_id: RecordId,
    },
}

/// One concrete, finalized document instance belonging to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: RecordId,
    pub project_id: ProjectId,
    pub document_type: DocumentType,
    pub document_number: DocumentNumber,
    /// Starts at 1; only delivery notes go beyond.
    pub version: u32,
    pub lifecycle_state: LifecycleState,
    pub payload_snapshot: Payload,
    pub generated_artifact_ref: ArtifactRef,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supersedes: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reversal_of: Option<RecordId>,
}

impl DocumentRecord {
    pub fn is_final(&self) -> bool {
        matches!(self.lifecycle_state, LifecycleState::Final)
    }

    pub fn is_reversed(&self) -> bool {
        matches!(self.lifecycle_state, LifecycleState::Reversed { .. })
    }

    /// True for storno records created by a reversal.
    pub fn is_reversal(&self) -> bool {
        self.reversal_of.is_some()
    }

    pub fn reversal_reason(&self) -> Option<&str> {
        match &self.lifecycle_state {
            LifecycleState::Reversed { reason, .. } => Some(reason),
            LifecycleState::Final => None,
        }
    }

    pub fn reversed_by(&self) -> Option<RecordId> {
        match &self.lifecycle_state {
            LifecycleState::Reversed { reversal_id, .. } => Some(*reversal_id),
            LifecycleState::Final => None,
        }
    }
}

// =============================================================================
// CLUSTER C: DRAFTS
// =============================================================================

/// Mutable scratch copy of an in-progress document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub project_id: ProjectId,
    pub document_type: DocumentType,
    pub payload: Payload,
    pub updated_at: Timestamp,
}

impl DraftRecord {
    /// Store id of the draft for `(project, type)`.
    pub fn key_for(project_id: &ProjectId, document_type: DocumentType) -> String {
        format!("{}:{}", project_id, document_type.key())
    }

    pub fn key(&self) -> String {
        Self::key_for(&self.project_id, self.document_type)
    }
}

// =============================================================================
// CLUSTER D: PIPELINE
// =============================================================================

/// Business stage of a sales project.
///
/// ```text
/// quotation → quotationSent → orderConfirmation → deliveryNote → invoice → paid
///      └───────────────┴──────────────┴──────────────┴───────────┴────────┴──→ lost
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatus {
    Quotation,
    QuotationSent,
    OrderConfirmation,
    DeliveryNote,
    Invoice,
    Paid,
    Lost,
}

impl ProjectStatus {
    /// The linear pipeline, without the `Lost` side-state.
    pub const PIPELINE: [ProjectStatus; 6] = [
        ProjectStatus::Quotation,
        ProjectStatus::QuotationSent,
        ProjectStatus::OrderConfirmation,
        ProjectStatus::DeliveryNote,
        ProjectStatus::Invoice,
        ProjectStatus::Paid,
    ];

    /// Position in the pipeline; `None` for `Lost`.
    pub fn pipeline_rank(self) -> Option<usize> {
        Self::PIPELINE.iter().position(|s| *s == self)
    }

    pub fn is_lost(self) -> bool {
        matches!(self, Self::Lost)
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Quotation => "quotation",
            Self::QuotationSent => "quotationSent",
            Self::OrderConfirmation => "orderConfirmation",
            Self::DeliveryNote => "deliveryNote",
            Self::Invoice => "invoice",
            Self::Paid => "paid",
            Self::Lost => "lost",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
