//! # Docflow Configuration
//!
//! Unified configuration for all subsystems and runtime parameters.
//!
//! Sources are applied in order: built-in defaults, a TOML file (missing
//! keys keep their defaults), then environment variables. The result is
//! validated before any service is built from it.
//!
//! ```toml
//! [numbering]
//! max_attempts = 100
//!
//! [numbering.prefixes]
//! storno = "STO"
//!
//! [autosave]
//! debounce_ms = 1500
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use df_01_numbering::{NumberingConfig, NumberingError, PrefixTable};
use df_02_lifecycle::LifecycleConfig;
use df_03_drafts::DraftConfig;
use df_04_project_status::StatusConfig;
use docflow_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::NumberSeries;
use thiserror::Error;

/// Environment variable overriding `numbering.max_attempts`.
pub const ENV_MAX_ATTEMPTS: &str = "DOCFLOW_NUMBERING_MAX_ATTEMPTS";
/// Environment variable overriding `autosave.debounce_ms`.
pub const ENV_DEBOUNCE_MS: &str = "DOCFLOW_AUTOSAVE_DEBOUNCE_MS";

/// Longest accepted autosave quiet period.
const MAX_DEBOUNCE_MS: u64 = 60_000;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("unknown number series {0:?} in numbering.prefixes")]
    UnknownSeries(String),

    #[error(transparent)]
    Numbering(#[from] NumberingError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Complete docflow configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocflowConfig {
    pub numbering: NumberingSettings,
    pub lifecycle: LifecycleSettings,
    pub autosave: AutosaveSettings,
    pub status: StatusSettings,
    pub bus: BusSettings,
    pub telemetry: TelemetryConfig,
}

/// Numbering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberingSettings {
    /// Candidates tried before a `TEMP` number is issued.
    pub max_attempts: u32,
    /// Prefix overrides keyed by series (`invoice`, `storno`, ...).
    pub prefixes: BTreeMap<String, String>,
}

impl Default for NumberingSettings {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            prefixes: BTreeMap::new(),
        }
    }
}

/// Lifecycle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleSettings {
    pub max_reason_len: usize,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            max_reason_len: 500,
        }
    }
}

/// Autosave configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveSettings {
    /// Quiet period before a draft is written.
    pub debounce_ms: u64,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self { debounce_ms: 1500 }
    }
}

/// Project status configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSettings {
    pub max_pending_per_project: usize,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            max_pending_per_project: 8,
        }
    }
}

/// Event bus configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusSettings {
    /// Broadcast channel capacity; slow subscribers beyond it lag.
    pub capacity: usize,
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl DocflowConfig {
    /// Parse a TOML document. Missing sections and keys keep defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Read a TOML file, apply environment overrides and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&input)?.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        let mut config = self.apply_overrides(|var| std::env::var(var).ok())?;
        config.telemetry = config.telemetry.with_env_overrides();
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_MAX_ATTEMPTS) {
            self.numbering.max_attempts =
                value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    var: ENV_MAX_ATTEMPTS,
                    value: value.clone(),
                })?;
        }
        if let Some(value) = lookup(ENV_DEBOUNCE_MS) {
            self.autosave.debounce_ms =
                value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    var: ENV_DEBOUNCE_MS,
                    value: value.clone(),
                })?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.numbering_config()?.validate()?;
        if self.autosave.debounce_ms == 0 || self.autosave.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::Invalid(format!(
                "autosave.debounce_ms must be within 1..={MAX_DEBOUNCE_MS}"
            )));
        }
        if self.lifecycle.max_reason_len == 0 {
            return Err(ConfigError::Invalid(
                "lifecycle.max_reason_len must be at least 1".into(),
            ));
        }
        if self.status.max_pending_per_project == 0 {
            return Err(ConfigError::Invalid(
                "status.max_pending_per_project must be at least 1".into(),
            ));
        }
        if self.bus.capacity == 0 {
            return Err(ConfigError::Invalid("bus.capacity must be at least 1".into()));
        }
        Ok(())
    }

    pub fn numbering_config(&self) -> Result<NumberingConfig, ConfigError> {
        let mut prefixes = PrefixTable::new();
        for (key, prefix) in &self.numbering.prefixes {
            let series =
                NumberSeries::from_key(key).ok_or_else(|| ConfigError::UnknownSeries(key.clone()))?;
            prefixes.set(series, prefix)?;
        }
        Ok(NumberingConfig {
            max_attempts: self.numbering.max_attempts,
            prefixes,
        })
    }

    pub fn lifecycle_config(&self) -> LifecycleConfig {
        LifecycleConfig {
            max_reason_len: self.lifecycle.max_reason_len,
        }
    }

    pub fn draft_config(&self) -> DraftConfig {
        DraftConfig {
            debounce: Duration::from_millis(self.autosave.debounce_ms),
        }
    }

    pub fn status_config(&self) -> StatusConfig {
        StatusConfig {
            max_pending_per_project: self.status.max_pending_per_project,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DocflowConfig::default();
        assert_eq!(config.numbering.max_attempts, 100);
        assert_eq!(config.autosave.debounce_ms, 1500);
        assert_eq!(config.bus.capacity, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DocflowConfig::from_toml_str(
            r#"
            [numbering]
            max_attempts = 5

            [numbering.prefixes]
            storno = "STO"
            "#,
        )
        .unwrap();
        assert_eq!(config.numbering.max_attempts, 5);
        assert_eq!(config.autosave.debounce_ms, 1500);

        let numbering = config.numbering_config().unwrap();
        assert_eq!(numbering.prefixes.get(NumberSeries::Storno), "STO");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([(ENV_MAX_ATTEMPTS, "7"), (ENV_DEBOUNCE_MS, " 250 ")]);
        let config = DocflowConfig::default()
            .apply_overrides(|var| env.get(var).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.numbering.max_attempts, 7);
        assert_eq!(config.draft_config().debounce, Duration::from_millis(250));

        let err = DocflowConfig::default()
            .apply_overrides(|var| (var == ENV_MAX_ATTEMPTS).then(|| "many".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_MAX_ATTEMPTS, .. }));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = DocflowConfig::default();
        config.numbering.max_attempts = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Numbering(_))));

        let mut config = DocflowConfig::default();
        config.numbering.prefixes.insert("receipt".into(), "QU".into());
        assert!(matches!(config.validate(), Err(ConfigError::UnknownSeries(_))));

        let mut config = DocflowConfig::default();
        config.numbering.prefixes.insert("storno".into(), "RE".into());
        assert!(matches!(config.validate(), Err(ConfigError::Numbering(_))));

        let mut config = DocflowConfig::default();
        config.autosave.debounce_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[autosave]\ndebounce_ms = 900\n[bus]\ncapacity = 64").unwrap();
        let config = DocflowConfig::load(file.path()).unwrap();
        assert_eq!(config.bus.capacity, 64);

        let missing = DocflowConfig::load("/nonexistent/docflow.toml");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
