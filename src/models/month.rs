//! Calendar month keys
//!
//! A `MonthKey` names one month partition. Navigation steps exactly one
//! month at a time and wraps across year boundaries. Years are limited to
//! 0001..=9999 so every key has a four-digit file name and a calendar date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ExpenseError;

/// Earliest and latest representable years
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A calendar month, e.g. March 2024
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, rejecting months outside 1..=12 and years
    /// outside `MIN_YEAR..=MAX_YEAR`
    pub fn new(year: i32, month: u32) -> Result<Self, ExpenseError> {
        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ExpenseError::InvalidMonth(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`, clamped to the supported years
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(MIN_YEAR, MAX_YEAR),
            month: date.month(),
        }
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month; December of `MAX_YEAR` has none and returns itself
    pub fn next(&self) -> Self {
        if self.month == 12 && self.year >= MAX_YEAR {
            *self
        } else if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month; January of `MIN_YEAR` returns itself
    pub fn prev(&self) -> Self {
        if self.month == 1 && self.year <= MIN_YEAR {
            *self
        } else if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // year/month are validated on construction, day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Database file name for this month, e.g. `expenses_2024_03.db`
    pub fn file_name(&self) -> String {
        format!("expenses_{:04}_{:02}.db", self.year, self.month)
    }

    /// Recover the month from a partition file name
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_prefix("expenses_")?.strip_suffix(".db")?;
        let (year, month) = stem.split_once('_')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?).ok()
    }

    /// Human-readable label, e.g. `March 2024`
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// Parse `YYYY-MM` or `YYYY_MM`
    pub fn parse(s: &str) -> Result<Self, ExpenseError> {
        let s = s.trim();
        let invalid = || ExpenseError::InvalidMonth(s.to_string());

        let (year, month) = s.split_once(['-', '_']).ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = ExpenseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<MonthKey> for String {
    fn from(month: MonthKey) -> Self {
        month.to_string()
    }
}

impl std::str::FromStr for MonthKey {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u32) -> MonthKey {
        MonthKey::new(year, month).unwrap()
    }

    #[test]
    fn test_prev_walks_back_across_year() {
        let march = month(2024, 3);
        let feb = march.prev();
        assert_eq!(feb, month(2024, 2));
        let jan = feb.prev();
        assert_eq!(jan, month(2024, 1));
        let dec = jan.prev();
        assert_eq!(dec, month(2023, 12));
        assert_eq!(dec.next(), month(2024, 1));
    }

    #[test]
    fn test_next_wraps_year() {
        assert_eq!(month(2024, 12).next(), month(2025, 1));
        assert_eq!(month(2024, 6).next(), month(2024, 7));
    }

    #[test]
    fn test_navigation_stops_at_year_bounds() {
        let last = month(9999, 12);
        assert_eq!(last.next(), last);
        assert_eq!(last.prev(), month(9999, 11));
        assert_eq!(month(9999, 11).next(), last);

        let first = month(1, 1);
        assert_eq!(first.prev(), first);
        assert_eq!(first.next(), month(1, 2));
    }

    #[test]
    fn test_new_rejects_years_without_four_digits() {
        assert!(MonthKey::new(10000, 1).is_err());
        assert!(MonthKey::new(0, 6).is_err());
        assert!(MonthKey::new(-5, 6).is_err());
        assert!(MonthKey::parse("0000-01").is_err());
    }

    #[test]
    fn test_extreme_months_keep_label_and_file_name() {
        let last = month(9999, 12);
        assert_eq!(last.label(), "December 9999");
        assert_eq!(last.file_name(), "expenses_9999_12.db");
        assert_eq!(MonthKey::from_file_name(&last.file_name()), Some(last));
        assert_eq!(month(1, 1).label(), "January 0001");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(month(2024, 3).file_name(), "expenses_2024_03.db");
        assert_eq!(month(2023, 12).file_name(), "expenses_2023_12.db");
    }

    #[test]
    fn test_from_file_name() {
        assert_eq!(
            MonthKey::from_file_name("expenses_2024_03.db"),
            Some(month(2024, 3))
        );
        assert_eq!(MonthKey::from_file_name("expenses.db"), None);
        assert_eq!(MonthKey::from_file_name("expenses_2024_13.db"), None);
        assert_eq!(MonthKey::from_file_name("notes_2024_03.db"), None);
    }

    #[test]
    fn test_label() {
        assert_eq!(month(2024, 3).label(), "March 2024");
    }

    #[test]
    fn test_parse() {
        assert_eq!(MonthKey::parse("2024-03").unwrap(), month(2024, 3));
        assert_eq!(MonthKey::parse("2024_03").unwrap(), month(2024, 3));
        assert_eq!(MonthKey::parse("2024-3").unwrap(), month(2024, 3));
        assert!(MonthKey::parse("2024-13").is_err());
        assert!(MonthKey::parse("March").is_err());
        assert!(MonthKey::parse("24-03").is_err());
    }

    #[test]
    fn test_new_rejects_month_zero() {
        assert!(matches!(
            MonthKey::new(2024, 0),
            Err(ExpenseError::InvalidMonth(_))
        ));
    }

    #[test]
    fn test_display_and_ordering() {
        assert_eq!(month(2024, 3).to_string(), "2024-03");
        assert!(month(2023, 12) < month(2024, 1));
    }

    #[test]
    fn test_serde_goes_through_validation() {
        let json = serde_json::to_string(&month(2024, 3)).unwrap();
        assert_eq!(json, "\"2024-03\"");
        assert_eq!(serde_json::from_str::<MonthKey>(&json).unwrap(), month(2024, 3));
        assert!(serde_json::from_str::<MonthKey>("\"10000-01\"").is_err());
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(MonthKey::from_date(date), month(2024, 3));
    }
}
