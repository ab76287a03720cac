//! Subscriber setup and structured logging helpers.
//!
//! Every log line from a document operation carries the same fields so
//! they can be filtered per project or document:
//! - `project_id`
//! - `doc_type`
//! - `number`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured level when both are set.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))?;

    if !config.console_output {
        return tracing_subscriber::registry()
            .with(env_filter)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()));
    }

    if config.json_logs {
        // JSON output for containers/production
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "logging initialized"
    );
    Ok(())
}

/// Log a document-related event with the standard fields.
///
/// ```rust,ignore
/// log_document_event!(info, "document finalized", project_id, DocumentType::Invoice, number);
/// log_document_event!(warn, "artifact missing", project_id, doc_type, number, record_id = %id);
/// ```
#[macro_export]
macro_rules! log_document_event {
    ($level:ident, $msg:expr, $project_id:expr, $doc_type:expr, $number:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            project_id = %$project_id,
            doc_type = %$doc_type,
            number = %$number,
            $($($field)*,)?
            $msg
        )
    };
}
