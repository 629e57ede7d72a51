//! Calendar periods used to select ledger records
//!
//! - `Month` / `Year` - validated `YYYY-MM` / `YYYY` tokens
//! - `DateRange` - inclusive `[start, end]` boundaries
//! - `Clock` / `PeriodResolver` - defaults an absent token to the current period

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inclusive date-time boundaries of a reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First instant of the first day (00:00:00.000)
    pub start: NaiveDateTime,
    /// Last instant of the last day (23:59:59.999)
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Range covering whole calendar days from `first` through `last`
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        let end_of_last = last.and_time(NaiveTime::MIN) + Duration::days(1)
            - Duration::milliseconds(1);
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: end_of_last,
        }
    }

    /// Whether a calendar date falls inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        let instant = date.and_time(NaiveTime::MIN);
        self.start <= instant && instant <= self.end
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }
}

/// A calendar month, written `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    first: NaiveDate,
}

impl Month {
    /// `None` when `month` is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month a date falls in
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Last calendar day, found as day zero of the following month
    pub fn last_day(&self) -> NaiveDate {
        (self.first + Months::new(1)) - Duration::days(1)
    }

    /// `[YYYY-MM-01 00:00:00.000, YYYY-MM-<last> 23:59:59.999]`
    pub fn range(&self) -> DateRange {
        DateRange::days(self.first, self.last_day())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidPeriod(format!("{:?} is not a month (use YYYY-MM)", s));

        if !s.is_ascii() || s.len() != 7 || s.as_bytes()[4] != b'-' {
            return Err(invalid());
        }
        let (year, month) = (&s[..4], &s[5..]);
        if !is_digits(year) || !is_digits(month) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Month {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

/// A calendar year, written `YYYY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Year {
    january: NaiveDate,
}

impl Year {
    /// `None` unless the year has four digits (0000..=9999)
    pub fn new(year: i32) -> Option<Self> {
        if !(0..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, 1, 1).map(|january| Self { january })
    }

    /// The year a date falls in
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            january: date - Duration::days(i64::from(date.ordinal0())),
        }
    }

    pub fn value(&self) -> i32 {
        self.january.year()
    }

    /// The twelve months, January first
    pub fn months(&self) -> impl Iterator<Item = Month> {
        let january = self.january;
        (0..12).map(move |offset| Month {
            first: january + Months::new(offset),
        })
    }

    /// `[YYYY-01-01 00:00:00.000, YYYY-12-31 23:59:59.999]`
    pub fn range(&self) -> DateRange {
        let december = Month {
            first: self.january + Months::new(11),
        };
        DateRange::days(self.january, december.last_day())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.value())
    }
}

impl FromStr for Year {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidPeriod(format!("{:?} is not a year (use YYYY)", s));

        if s.len() != 4 || !is_digits(s) {
            return Err(invalid());
        }
        let year: i32 = s.parse().map_err(|_| invalid())?;
        Self::new(year).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Year {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Year> for String {
    fn from(year: Year) -> Self {
        year.to_string()
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse an optional `YYYY-MM` query value; blank counts as absent
pub fn parse_optional_month(token: Option<&str>) -> Result<Option<Month>> {
    token
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .transpose()
}

/// Parse an optional `YYYY` query value; blank counts as absent
pub fn parse_optional_year(token: Option<&str>) -> Result<Option<Year>> {
    token
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .transpose()
}

/// Source of "today" for defaulting absent periods
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Turns optional month/year tokens into concrete periods
#[derive(Clone)]
pub struct PeriodResolver {
    clock: Arc<dyn Clock>,
}

impl PeriodResolver {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn current_month(&self) -> Month {
        Month::containing(self.today())
    }

    pub fn current_year(&self) -> Year {
        Year::containing(self.today())
    }

    pub fn month(&self, month: Option<Month>) -> Month {
        month.unwrap_or_else(|| self.current_month())
    }

    pub fn year(&self, year: Option<Year>) -> Year {
        year.unwrap_or_else(|| self.current_year())
    }
}

impl Default for PeriodResolver {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl fmt::Debug for PeriodResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeriodResolver")
            .field("today", &self.clock.today())
            .finish()
    }
}
