//! # Document Numbers
//!
//! The one externally visible wire format of the core:
//!
//! ```text
//! PREFIX-YYYY-NNNN                       sequential, NNNN zero-padded (never truncated)
//! PREFIX-YYYY-TEMP-<unix-millis>-<DDD>   fallback when sequential allocation fails
//! ```
//!
//! PREFIX is a 2-3 letter uppercase code per number series.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::NumberFormatError;

/// Marker segment of fallback numbers.
pub const TEMP_MARKER: &str = "TEMP";

/// Minimum width of the counter segment.
pub const COUNTER_WIDTH: usize = 4;

/// Numeric part of a document number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// Regular counter value (1-based).
    Sequential(u64),
    /// Non-sequential fallback, unique by timestamp and random suffix.
    Temporary { issued_at_ms: u64, nonce: u16 },
}

/// A human-readable document number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentNumber {
    prefix: String,
    year: i32,
    kind: NumberKind,
}

impl DocumentNumber {
    /// Build a sequential number, validating the prefix.
    pub fn sequential(prefix: &str, year: i32, counter: u64) -> Result<Self, NumberFormatError> {
        validate_prefix(prefix)?;
        validate_year(year)?;
        if counter == 0 {
            return Err(NumberFormatError::ZeroCounter);
        }
        Ok(Self {
            prefix: prefix.to_string(),
            year,
            kind: NumberKind::Sequential(counter),
        })
    }

    /// Build a fallback number. `nonce` is reduced to three digits.
    pub fn temporary(
        prefix: &str,
        year: i32,
        issued_at_ms: u64,
        nonce: u16,
    ) -> Result<Self, NumberFormatError> {
        validate_prefix(prefix)?;
        validate_year(year)?;
        Ok(Self {
            prefix: prefix.to_string(),
            year,
            kind: NumberKind::Temporary {
                issued_at_ms,
                nonce: nonce % 1000,
            },
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn kind(&self) -> NumberKind {
        self.kind
    }

    /// Counter value for sequential numbers.
    pub fn counter(&self) -> Option<u64> {
        match self.kind {
            NumberKind::Sequential(counter) => Some(counter),
            NumberKind::Temporary { .. } => None,
        }
    }

    /// Fallback numbers must be clearly distinguishable downstream.
    pub fn is_temporary(&self) -> bool {
        matches!(self.kind, NumberKind::Temporary { .. })
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NumberKind::Sequential(counter) => write!(
                f,
                "{}-{:04}-{:0width$}",
                self.prefix,
                self.year,
                counter,
                width = COUNTER_WIDTH
            ),
            NumberKind::Temporary {
                issued_at_ms,
                nonce,
            } => write!(
                f,
                "{}-{:04}-{}-{}-{:03}",
                self.prefix, self.year, TEMP_MARKER, issued_at_ms, nonce
            ),
        }
    }
}

impl FromStr for DocumentNumber {
    type Err = NumberFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        let malformed = || NumberFormatError::Malformed(s.to_string());

        let (prefix, year) = match parts.as_slice() {
            [prefix, year, ..] => (*prefix, parse_year(year).ok_or_else(malformed)?),
            _ => return Err(malformed()),
        };

        match parts.as_slice() {
            [_, _, counter] => {
                if counter.len() < COUNTER_WIDTH || !all_digits(counter) {
                    return Err(malformed());
                }
                let counter = counter.parse::<u64>().map_err(|_| malformed())?;
                Self::sequential(prefix, year, counter)
            }
            [_, _, marker, millis, nonce] if *marker == TEMP_MARKER => {
                if !all_digits(millis) || nonce.len() != 3 || !all_digits(nonce) {
                    return Err(malformed());
                }
                let millis = millis.parse::<u64>().map_err(|_| malformed())?;
                let nonce = nonce.parse::<u16>().map_err(|_| malformed())?;
                Self::temporary(prefix, year, millis, nonce)
            }
            _ => Err(malformed()),
        }
    }
}

impl Serialize for DocumentNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocumentNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Prefixes are 2-3 uppercase ASCII letters.
pub fn validate_prefix(prefix: &str) -> Result<(), NumberFormatError> {
    let valid_len = (2..=3).contains(&prefix.len());
    if valid_len && prefix.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(NumberFormatError::InvalidPrefix(prefix.to_string()))
    }
}

fn validate_year(year: i32) -> Result<(), NumberFormatError> {
    if (1000..=9999).contains(&year) {
        Ok(())
    } else {
        Err(NumberFormatError::InvalidYear(year))
    }
}

fn parse_year(segment: &str) -> Option<i32> {
    if segment.len() == 4 && all_digits(segment) {
        segment.parse().ok()
    } else {
        None
    }
}

fn all_digits(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_format() {
        let number = DocumentNumber::sequential("RE", 2025, 1).unwrap();
        assert_eq!(number.to_string(), "RE-2025-0001");
        assert_eq!(number.counter(), Some(1));
        assert!(!number.is_temporary());
    }

    #[test]
    fn test_counter_is_not_truncated_past_9999() {
        let number = DocumentNumber::sequential("LS", 2025, 12345).unwrap();
        assert_eq!(number.to_string(), "LS-2025-12345");
        let parsed: DocumentNumber = "LS-2025-12345".parse().unwrap();
        assert_eq!(parsed.counter(), Some(12345));
    }

    #[test]
    fn test_temporary_format() {
        let number = DocumentNumber::temporary("ANG", 2025, 1_735_689_600_000, 7).unwrap();
        assert_eq!(number.to_string(), "ANG-2025-TEMP-1735689600000-007");
        assert!(number.is_temporary());
        assert_eq!(number.counter(), None);

        let parsed: DocumentNumber = number.to_string().parse().unwrap();
        assert_eq!(parsed, number);
    }

    #[test]
    fn test_temporary_nonce_reduced_to_three_digits() {
        let number = DocumentNumber::temporary("RE", 2025, 1, 1234).unwrap();
        assert_eq!(number.to_string(), "RE-2025-TEMP-1-234");
    }

    #[test]
    fn test_rejects_bad_prefix() {
        assert!(matches!(
            DocumentNumber::sequential("R", 2025, 1),
            Err(NumberFormatError::InvalidPrefix(_))
        ));
        assert!(matches!(
            DocumentNumber::sequential("re", 2025, 1),
            Err(NumberFormatError::InvalidPrefix(_))
        ));
        assert!(matches!(
            DocumentNumber::sequential("STOR", 2025, 1),
            Err(NumberFormatError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_rejects_zero_counter() {
        assert_eq!(
            DocumentNumber::sequential("RE", 2025, 0),
            Err(NumberFormatError::ZeroCounter)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in [
            "",
            "RE",
            "RE-2025",
            "RE-25-0001",
            "RE-2025-001",
            "RE-2025-00a1",
            "RE-2025-TEMP-123",
            "RE-2025-TEMP-123-12",
            "RE-2025-TEMPX-123-123",
        ] {
            assert!(raw.parse::<DocumentNumber>().is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn test_serde_as_string() {
        let number = DocumentNumber::sequential("AB", 2024, 42).unwrap();
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"AB-2024-0042\"");
        let back: DocumentNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, number);
    }
}
