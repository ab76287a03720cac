//! Year-scoped sequence counter.

use serde::{Deserialize, Serialize};
use shared_types::NumberSeries;

/// Persisted state of one number series.
///
/// `counter_value` is the last number handed out in `year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceCounter {
    pub series: NumberSeries,
    pub year: i32,
    pub counter_value: u64,
}

impl SequenceCounter {
    /// A fresh counter for `year`, nothing issued yet.
    pub fn fresh(series: NumberSeries, year: i32) -> Self {
        Self {
            series,
            year,
            counter_value: 0,
        }
    }

    /// Continue from the stored counter in `current_year`.
    ///
    /// A counter stored for another year restarts at 0: every series begins
    /// anew on rollover.
    pub fn resume(series: NumberSeries, stored: Option<Self>, current_year: i32) -> Self {
        match stored {
            Some(counter) if counter.year == current_year => counter,
            _ => Self::fresh(series, current_year),
        }
    }

    /// Value the next candidate would get.
    pub fn next_value(&self) -> u64 {
        self.counter_value.saturating_add(1)
    }

    /// Move the counter to `value`. Never moves backwards.
    pub fn advance_to(&mut self, value: u64) {
        self.counter_value = self.counter_value.max(value);
    }
}
