//! Calendar month representation
//!
//! Budgets are scoped to a single calendar month and reports group
//! transactions by month. The canonical text form is `"MMM yyyy"`
//! (e.g. `Jan 2025`), which is also how a month is serialized.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    // Field order matters for the derived chronological ordering
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, returning `None` if `month` is not in 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
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

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.next().start_date() - Duration::days(1)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

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

    pub fn prev(&self) -> Self {
        if self.month == 1 {
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

    /// The `count` months ending at `anchor`, newest first
    ///
    /// `Month::recent(3, mar)` yields `[Mar, Feb, Jan]`.
    pub fn recent(count: usize, anchor: Month) -> Vec<Month> {
        std::iter::successors(Some(anchor), |m| Some(m.prev()))
            .take(count)
            .collect()
    }

    /// The `count` months starting at `anchor`, oldest first
    pub fn upcoming(count: usize, anchor: Month) -> Vec<Month> {
        std::iter::successors(Some(anchor), |m| Some(m.next()))
            .take(count)
            .collect()
    }

    /// Full month name, e.g. "January 2025"
    pub fn long_name(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.index()], self.year)
    }

    /// Abbreviated month name without the year, e.g. "Jan"
    pub fn short_name(&self) -> &'static str {
        &MONTH_NAMES[self.index()][..3]
    }

    fn index(&self) -> usize {
        (self.month as usize).saturating_sub(1).min(11)
    }

    /// Parse a month string
    ///
    /// Formats:
    /// - "Jan 2025" (canonical)
    /// - "January 2025"
    /// - "2025-01"
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let invalid = || MonthParseError::InvalidFormat(s.to_string());

        if let Some((name, year)) = s.split_once(char::is_whitespace) {
            let year: i32 = year.trim().parse().map_err(|_| invalid())?;
            let name = name.to_ascii_lowercase();
            let position = MONTH_NAMES.iter().position(|full| {
                let full = full.to_ascii_lowercase();
                name == full || (name.len() == 3 && full.starts_with(&name))
            });
            return match position {
                Some(idx) => Ok(Self {
                    year,
                    month: idx as u32 + 1,
                }),
                None => Err(invalid()),
            };
        }

        if let Some((year, month)) = s.split_once('-') {
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let month: u32 = month.parse().map_err(|_| invalid())?;
            return Self::new(year, month).ok_or(MonthParseError::InvalidMonth(month));
        }

        Err(invalid())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:04}", self.short_name(), self.year)
    }
}

impl std::str::FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Month {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => write!(
                f,
                "Invalid month format: {} (expected e.g. \"Jan 2025\" or \"2025-01\")",
                s
            ),
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}
