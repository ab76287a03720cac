//! Sequence Allocator - core numbering logic

use crate::domain::{PrefixTable, SequenceCounter};
use crate::error::{NumberingError, NumberingResult};
use crate::ports::inbound::NumberingApi;
use crate::ports::outbound::{CounterStore, NumberRegistry};
use async_trait::async_trait;
use parking_lot::Mutex as SyncMutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_bus::{DocumentEvent, EventPublisher};
use shared_types::{Clock, DocumentNumber, DocumentType, NumberSeries, ProjectId};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Numbering configuration
#[derive(Clone, Debug)]
pub struct NumberingConfig {
    /// Candidates tried before falling back to a `TEMP` number
    pub max_attempts: u32,
    /// Prefix per number series
    pub prefixes: PrefixTable,
}

impl Default for NumberingConfig {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            prefixes: PrefixTable::default(),
        }
    }
}

impl NumberingConfig {
    pub fn validate(&self) -> NumberingResult<()> {
        if self.max_attempts == 0 {
            return Err(NumberingError::InvalidConfig(
                "max_attempts must be at least 1".into(),
            ));
        }
        self.prefixes.ensure_distinct()
    }
}

/// Sequence Allocator implementation
///
/// One allocation runs at a time inside this process, so two callers here
/// never see the same counter value. Across processes the existence check,
/// the bounded retry and the fallback stand in for a lock.
pub struct SequenceAllocator<C, R>
where
    C: CounterStore,
    R: NumberRegistry,
{
    config: NumberingConfig,
    counters: Arc<C>,
    registry: Arc<R>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventPublisher>,
    allocation_lock: Mutex<()>,
    nonces: SyncMutex<StdRng>,
}

impl<C, R> SequenceAllocator<C, R>
where
    C: CounterStore,
    R: NumberRegistry,
{
    pub fn new(
        config: NumberingConfig,
        counters: Arc<C>,
        registry: Arc<R>,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            config,
            counters,
            registry,
            clock,
            events,
            allocation_lock: Mutex::new(()),
            nonces: SyncMutex::new(StdRng::from_entropy()),
        }
    }

    /// Draw `TEMP` nonces from a seeded generator (reproducible fallbacks).
    pub fn with_nonce_seed(mut self, seed: u64) -> Self {
        self.nonces = SyncMutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn config(&self) -> &NumberingConfig {
        &self.config
    }

    /// Read-check-write cycle without fallback.
    async fn allocate_sequential(
        &self,
        series: NumberSeries,
        year: i32,
    ) -> NumberingResult<DocumentNumber> {
        let prefix = self.config.prefixes.get(series);
        let stored = self.counters.load(series).await?;
        let mut counter = SequenceCounter::resume(series, stored, year);

        for attempt in 1..=self.config.max_attempts {
            let value = counter.next_value();
            let candidate = DocumentNumber::sequential(prefix, year, value)?;
            counter.advance_to(value);

            if !self.registry.owners_of(&candidate).await?.is_empty() {
                debug!(series = %series, number = %candidate, attempt, "candidate taken, skipping");
                continue;
            }

            self.counters.save(&counter).await?;
            return Ok(candidate);
        }

        // Keep the skipped range so the next call starts past it.
        if let Err(e) = self.counters.save(&counter).await {
            warn!(series = %series, error = %e, "could not persist counter after exhausted attempts");
        }
        Err(NumberingError::AllocationExhausted {
            series,
            attempts: self.config.max_attempts,
        })
    }

    /// `PREFIX-YYYY-TEMP-<millis>-<DDD>`
    ///
    /// The candidate is checked against the registry once; if taken, a
    /// different nonce is used. A failing registry leaves the first candidate.
    async fn fallback_number(
        &self,
        series: NumberSeries,
        year: i32,
    ) -> NumberingResult<DocumentNumber> {
        let prefix = self.config.prefixes.get(series);
        let millis = u64::try_from(self.clock.now().timestamp_millis()).unwrap_or_default();
        let nonce: u16 = self.nonces.lock().gen_range(0..1000);
        let candidate = DocumentNumber::temporary(prefix, year, millis, nonce)?;

        match self.registry.owners_of(&candidate).await {
            Ok(owners) if !owners.is_empty() => {
                let shift: u16 = self.nonces.lock().gen_range(1..1000);
                let retry = DocumentNumber::temporary(prefix, year, millis, (nonce + shift) % 1000)?;
                debug!(taken = %candidate, number = %retry, "fallback number taken, new nonce drawn");
                Ok(retry)
            }
            Ok(_) => Ok(candidate),
            Err(e) => {
                debug!(number = %candidate, error = %e, "fallback number not checked");
                Ok(candidate)
            }
        }
    }
}

#[async_trait]
impl<C, R> NumberingApi for SequenceAllocator<C, R>
where
    C: CounterStore + 'static,
    R: NumberRegistry + 'static,
{
    async fn allocate(&self, document_type: DocumentType) -> NumberingResult<DocumentNumber> {
        self.allocate_series(document_type.into()).await
    }

    #[instrument(skip(self), fields(series = %series))]
    async fn allocate_series(&self, series: NumberSeries) -> NumberingResult<DocumentNumber> {
        let number = {
            let _guard = self.allocation_lock.lock().await;
            let year = self.clock.current_year();

            match self.allocate_sequential(series, year).await {
                Ok(number) => {
                    info!(number = %number, "number allocated");
                    number
                }
                Err(NumberingError::InvalidNumber(e)) => return Err(e.into()),
                Err(e) => {
                    let number = self.fallback_number(series, year).await?;
                    warn!(error = %e, number = %number, "sequential allocation failed, issued fallback number");
                    number
                }
            }
        };

        self.events
            .publish(DocumentEvent::NumberAllocated {
                series,
                number: number.clone(),
            })
            .await;
        Ok(number)
    }

    async fn number_exists(
        &self,
        number: &str,
        document_type: DocumentType,
        excluding_project: Option<&ProjectId>,
    ) -> NumberingResult<bool> {
        let number: DocumentNumber = number.trim().parse()?;
        let owners = self.registry.owners_of(&number).await?;
        Ok(owners.iter().any(|owner| {
            owner.document_type == document_type && Some(&owner.project_id) != excluding_project
        }))
    }

    async fn peek(&self, series: NumberSeries) -> NumberingResult<u64> {
        let year = self.clock.current_year();
        let stored = self.counters.load(series).await?;
        Ok(SequenceCounter::resume(series, stored, year).counter_value)
    }
}
