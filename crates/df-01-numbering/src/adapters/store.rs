//! Document Store Adapters
//!
//! Implement `CounterStore` and `NumberRegistry` over the shared
//! `DocumentStore` port.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::store::{collections, decode, encode};
use shared_types::{DocumentNumber, DocumentStore, DocumentType, NumberSeries, Predicate, ProjectId};
use tracing::trace;

use crate::domain::SequenceCounter;
use crate::error::NumberingResult;
use crate::ports::outbound::{CounterStore, NumberOwner, NumberRegistry};

/// Stored shape of a counter in `sequence_counters`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CounterFields {
    year: i32,
    counter_value: u64,
}

/// Counters in the `sequence_counters` collection, id = series key.
pub struct StoreCounterAdapter {
    store: Arc<dyn DocumentStore>,
}

impl StoreCounterAdapter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CounterStore for StoreCounterAdapter {
    async fn load(&self, series: NumberSeries) -> NumberingResult<Option<SequenceCounter>> {
        let Some(record) = self
            .store
            .find(collections::SEQUENCE_COUNTERS, series.key())
            .await?
        else {
            return Ok(None);
        };
        let fields: CounterFields = decode(collections::SEQUENCE_COUNTERS, &record)?;
        Ok(Some(SequenceCounter {
            series,
            year: fields.year,
            counter_value: fields.counter_value,
        }))
    }

    async fn save(&self, counter: &SequenceCounter) -> NumberingResult<()> {
        let fields = encode(
            collections::SEQUENCE_COUNTERS,
            &CounterFields {
                year: counter.year,
                counter_value: counter.counter_value,
            },
        )?;
        let id = counter.series.key();

        match self
            .store
            .update(collections::SEQUENCE_COUNTERS, id, fields.clone())
            .await
        {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                self.store
                    .create(collections::SEQUENCE_COUNTERS, Some(id), fields)
                    .await?;
            }
            Err(e) => return Err(e.into()),
        }
        trace!(series = %counter.series, value = counter.counter_value, "counter saved");
        Ok(())
    }
}

/// Stored fields of a document the registry cares about.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnerFields {
    project_id: ProjectId,
    document_type: DocumentType,
}

/// Issued numbers looked up in the `documents` collection.
pub struct StoreNumberRegistry {
    store: Arc<dyn DocumentStore>,
}

impl StoreNumberRegistry {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NumberRegistry for StoreNumberRegistry {
    async fn owners_of(&self, number: &DocumentNumber) -> NumberingResult<Vec<NumberOwner>> {
        let records = self
            .store
            .query(
                collections::DOCUMENTS,
                &[Predicate::eq("documentNumber", number.to_string())],
            )
            .await?;

        records
            .iter()
            .map(|record| -> NumberingResult<NumberOwner> {
                let fields: OwnerFields = decode(collections::DOCUMENTS, record)?;
                Ok(NumberOwner {
                    record_id: record.id.clone(),
                    project_id: fields.project_id,
                    document_type: fields.document_type,
                })
            })
            .collect()
    }
}
