//! # Docflow Telemetry
//!
//! Logging and metrics for the docflow subsystems.
//!
//! ## Components
//!
//! - **Logs**: `tracing` subscriber with an `EnvFilter`, pretty or JSON output
//! - **Metrics**: Prometheus counters for numbering, lifecycle and status
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docflow_telemetry::{init_telemetry, TelemetryConfig};
//!
//! init_telemetry(&TelemetryConfig::from_env())?;
//! println!("{}", docflow_telemetry::gather_metrics()?);
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DOCFLOW_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `DOCFLOW_JSON_LOGS` | `false` | JSON log lines |
//! | `DOCFLOW_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `DOCFLOW_SERVICE_NAME` | `docflow` | Service name in logs |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    gather_metrics, register_metrics, DOCUMENTS_FINALIZED, DOCUMENTS_REVISED, INVOICES_REVERSED,
    NUMBERS_ALLOCATED, STATUS_TRANSITIONS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to encode Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and register all metrics.
///
/// Fails if a global subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics();
    init_logging(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
