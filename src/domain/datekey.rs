use super::item::NotificationTime;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier for a single calendar day, used as the key in the todo store.
///
/// The string form is unpadded "year-month-day" with a 1-based month, e.g.
/// "2024-3-5". Every view computes keys through this type so that the month
/// grid, the week grid, and the day panel always agree on which entry a
/// calendar day maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    /// Calendar year
    pub year: i32,
    /// Month, 1-based (January = 1)
    pub month: u32,
    /// Day of month, 1-based
    pub day: u32,
}

/// Error returned when a string is not a valid date key
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date key: {0:?}")]
pub struct ParseDateKeyError(pub String);

impl DateKey {
    /// Create a key from a year, 1-based month, and day of month.
    ///
    /// Components are not range-checked here; `to_date` reports whether the
    /// key names a real calendar day.
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Create a key from a 0-based month, the convention the grid views use
    /// when walking months.
    pub fn from_month0(year: i32, month0: u32, day: u32) -> Self {
        Self::new(year, month0 + 1, day)
    }

    /// Key for the calendar day a date falls on
    pub fn from_date(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month(), date.day())
    }

    /// Key for the day containing the given instant
    pub fn today(now: DateTime<Local>) -> Self {
        Self::from_date(now.date_naive())
    }

    /// The calendar day this key names, or None if the components are out of
    /// range (e.g. a corrupt key read back from disk)
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Combine this day with a time-of-day into the absolute local instant a
    /// reminder is due.
    ///
    /// Returns None when the key is invalid or the local time does not exist
    /// (DST gap); an ambiguous time resolves to its earlier occurrence.
    pub fn fire_instant(&self, time: NotificationTime) -> Option<DateTime<Local>> {
        let date = self.to_date()?;
        let naive = date.and_hms_opt(time.hour, time.minute, 0)?;
        Local.from_local_datetime(&naive).earliest()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

impl FromStr for DateKey {
    type Err = ParseDateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let (year, month, day) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(y), Some(m), Some(d), None) => (y, m, d),
            _ => return Err(ParseDateKeyError(s.to_string())),
        };

        let year = year.parse().map_err(|_| ParseDateKeyError(s.to_string()))?;
        let month = month.parse().map_err(|_| ParseDateKeyError(s.to_string()))?;
        let day = day.parse().map_err(|_| ParseDateKeyError(s.to_string()))?;
        Ok(Self::new(year, month, day))
    }
}

// Keys serialize as their string form so the persisted JSON map looks exactly
// like {"2024-3-5": [...]}.
impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
