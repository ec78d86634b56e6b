//! Monthly pay period model.
//!
//! Payroll runs per calendar month. A [`PayPeriod`] is written and read as a
//! `YYYY-MM` string, the same form HR screens and declarations use.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month for which payroll is computed.
///
/// # Example
///
/// ```
/// use paie_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::parse("2025-03").unwrap();
/// assert_eq!(period.to_string(), "2025-03");
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayPeriod {
    year: i32,
    month: u32,
}

impl PayPeriod {
    /// Creates a period, returning `None` for a month outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// Parses a `YYYY-MM` string.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] when the string is not a valid
    /// year and month separated by a dash.
    pub fn parse(period: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriod {
            period: period.to_string(),
        };

        let (year, month) = period.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).ok_or_else(invalid)
    }

    /// The period's year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The period's month, 1-based.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Checks whether a date falls within this month.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PayPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PayPeriod {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PayPeriod> for String {
    fn from(period: PayPeriod) -> Self {
        period.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_period() {
        let period = PayPeriod::parse("2025-11").unwrap();
        assert_eq!(period.year(), 2025);
        assert_eq!(period.month(), 11);
    }

    #[test]
    fn test_parse_rejects_bad_month() {
        assert!(matches!(
            PayPeriod::parse("2025-13"),
            Err(EngineError::InvalidPeriod { .. })
        ));
        assert!(PayPeriod::parse("2025-00").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        for bad in ["", "2025", "2025/03", "25-03", "2025-3", "abcd-ef"] {
            assert!(PayPeriod::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_contains_date_boundaries() {
        let period = PayPeriod::parse("2024-02").unwrap();
        assert!(period.contains_date(date(2024, 2, 1)));
        assert!(period.contains_date(date(2024, 2, 29)));
        assert!(!period.contains_date(date(2024, 1, 31)));
        assert!(!period.contains_date(date(2024, 3, 1)));
        assert!(!period.contains_date(date(2023, 2, 15)));
    }

    #[test]
    fn test_serde_as_string() {
        let period = PayPeriod::parse("2025-01").unwrap();
        assert_eq!(serde_json::to_string(&period).unwrap(), "\"2025-01\"");

        let back: PayPeriod = serde_json::from_str("\"2025-01\"").unwrap();
        assert_eq!(back, period);

        assert!(serde_json::from_str::<PayPeriod>("\"January\"").is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let dec = PayPeriod::parse("2024-12").unwrap();
        let jan = PayPeriod::parse("2025-01").unwrap();
        assert!(dec < jan);
    }
}
