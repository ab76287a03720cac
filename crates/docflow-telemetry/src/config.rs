//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive
    pub log_level: String,

    /// Whether to write logs to stdout at all
    pub console_output: bool,

    /// JSON formatted logs instead of the pretty format
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "docflow".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DOCFLOW_SERVICE_NAME`: Service name (default: docflow)
    /// - `DOCFLOW_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `DOCFLOW_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `DOCFLOW_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variables on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        if let Ok(name) = env::var("DOCFLOW_SERVICE_NAME") {
            self.service_name = name;
        }
        if let Ok(level) = env::var("DOCFLOW_LOG_LEVEL").or_else(|_| env::var("RUST_LOG")) {
            self.log_level = level;
        }
        if let Ok(v) = env::var("DOCFLOW_CONSOLE_OUTPUT") {
            self.console_output = v.to_lowercase() != "false" && v != "0";
        }
        self.json_logs = match env::var("DOCFLOW_JSON_LOGS") {
            Ok(v) => v.to_lowercase() == "true" || v == "1",
            Err(_) => self.json_logs || is_container,
        };
        self
    }
}
