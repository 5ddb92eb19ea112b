//! Reporting periods (one calendar month each)

use chrono::NaiveDate;
use std::fmt;

use crate::error::InputError;

/// One (year, month) unit of retrieval and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period, rejecting months outside 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// Parse "YYYY-MM" (also accepts "YYYYMM")
    pub fn parse(value: &str) -> Result<Self, InputError> {
        let value = value.trim();
        let invalid = || InputError::InvalidYearMonth(value.to_string());

        let (year, month) = match value.split_once('-') {
            Some(parts) => parts,
            None if value.len() == 6 && value.is_ascii() => value.split_at(4),
            None => return Err(invalid()),
        };

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Six-digit form used in request tokens and file names, e.g. "202403"
    pub fn yyyymm(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// The following month, rolling December over into January
    pub fn next(&self) -> Self {
        if self.month == 12 {
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

    /// Inclusive range of months from `start` to `end`.
    /// Empty when `start` is after `end`.
    pub fn range(start: Period, end: Period) -> PeriodRange {
        PeriodRange {
            next: Some(start),
            end,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Iterator over consecutive periods
#[derive(Debug, Clone)]
pub struct PeriodRange {
    next: Option<Period>,
    end: Period,
}

impl Iterator for PeriodRange {
    type Item = Period;

    fn next(&mut self) -> Option<Period> {
        let current = self.next.filter(|p| *p <= self.end)?;
        self.next = Some(current.next());
        Some(current)
    }
}
