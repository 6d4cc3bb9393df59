//! Calendar months and inclusive month ranges.
//!
//! Month-granular ledgers store their period as the first day of the month, so
//! a range query is a plain comparison between two first-of-month dates.

use crate::errors::{Error, Result};
use chrono::{Datelike, Months, NaiveDate};
use std::{fmt, str::FromStr};

/// A calendar month, held as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
    /// The month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// First day of the month, the normalized `period` value.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Last day of the month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.0)
    }
}

impl FromStr for Month {
    type Err = Error;

    /// Accepts `YYYY-MM`, or a full `YYYY-MM-DD` date which is normalized to day 01.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let date = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .map_err(|_| Error::validation(format!("'{s}' is not a valid month (YYYY-MM)")))?;
        Ok(Self::containing(date))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

/// Inclusive `[start, end]` range of months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    /// First month in the range
    pub start: Month,
    /// Last month in the range
    pub end: Month,
}

impl MonthRange {
    #[must_use]
    pub const fn new(start: Month, end: Month) -> Self {
        Self { start, end }
    }

    /// A range covering a single month.
    #[must_use]
    pub const fn single(month: Month) -> Self {
        Self::new(month, month)
    }

    /// Parses both bounds from `YYYY-MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }
}

impl fmt::Display for MonthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

/// Parses a `YYYY-MM-DD` date used by day-granular ledgers.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| Error::validation(format!("'{input}' is not a valid date (YYYY-MM-DD)")))
}
