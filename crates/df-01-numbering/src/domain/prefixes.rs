//! Prefix table: one validated prefix per number series.

use std::collections::HashMap;

use shared_types::numbering::validate_prefix;
use shared_types::NumberSeries;

use crate::error::{NumberingError, NumberingResult};

/// Prefixes used when formatting numbers.
///
/// Starts from the built-in defaults (`ANG`, `AB`, `LS`, `RE`, `PR`, `ST`);
/// overrides are validated on insertion so formatting can never fail on a
/// bad prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTable {
    prefixes: HashMap<NumberSeries, String>,
}

impl PrefixTable {
    pub fn new() -> Self {
        let prefixes = NumberSeries::ALL
            .into_iter()
            .map(|series| (series, series.default_prefix().to_string()))
            .collect();
        Self { prefixes }
    }

    /// Replace the prefix of `series`.
    pub fn set(&mut self, series: NumberSeries, prefix: &str) -> NumberingResult<()> {
        validate_prefix(prefix).map_err(|_| NumberingError::InvalidPrefix {
            series,
            prefix: prefix.to_string(),
        })?;
        self.prefixes.insert(series, prefix.to_string());
        Ok(())
    }

    /// Builder form of [`PrefixTable::set`].
    pub fn with(mut self, series: NumberSeries, prefix: &str) -> NumberingResult<Self> {
        self.set(series, prefix)?;
        Ok(self)
    }

    pub fn get(&self, series: NumberSeries) -> &str {
        self.prefixes
            .get(&series)
            .map(String::as_str)
            .unwrap_or_else(|| series.default_prefix())
    }

    /// Two series sharing a prefix would issue colliding numbers.
    pub fn ensure_distinct(&self) -> NumberingResult<()> {
        let mut seen: HashMap<&str, NumberSeries> = HashMap::new();
        for series in NumberSeries::ALL {
            let prefix = self.get(series);
            if let Some(other) = seen.insert(prefix, series) {
                return Err(NumberingError::InvalidConfig(format!(
                    "prefix {prefix} used by both {other} and {series}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for PrefixTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::DocumentType;

    #[test]
    fn test_defaults() {
        let table = PrefixTable::new();
        assert_eq!(table.get(DocumentType::Quotation.into()), "ANG");
        assert_eq!(table.get(DocumentType::Invoice.into()), "RE");
        assert_eq!(table.get(NumberSeries::Storno), "ST");
        assert!(table.ensure_distinct().is_ok());
    }

    #[test]
    fn test_override_is_validated() {
        let mut table = PrefixTable::new();
        assert!(table.set(NumberSeries::Storno, "STO").is_ok());
        assert_eq!(table.get(NumberSeries::Storno), "STO");

        let err = table.set(NumberSeries::Storno, "st").unwrap_err();
        assert!(matches!(err, NumberingError::InvalidPrefix { .. }));
        assert_eq!(table.get(NumberSeries::Storno), "STO");
    }

    #[test]
    fn test_duplicate_prefixes_rejected() {
        let table = PrefixTable::new()
            .with(NumberSeries::Storno, "RE")
            .unwrap();
        assert!(matches!(
            table.ensure_distinct(),
            Err(NumberingError::InvalidConfig(_))
        ));
    }
}
