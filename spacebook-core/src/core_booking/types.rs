//! Identifier and date types for users, spaces and bookings

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::error::BookingError;

/// Input and display format for booking dates
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// A user is keyed by its name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(name: impl Into<String>) -> Self {
        UserId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(name: &str) -> Self {
        UserId(name.to_string())
    }
}

/// Unique identifier for a Space, stable across renames and snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(pub Uuid);

impl SpaceId {
    pub fn generate() -> Self {
        SpaceId(Uuid::new_v4())
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a Booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub Uuid);

impl BookingId {
    pub fn generate() -> Self {
        BookingId(Uuid::new_v4())
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A calendar day, written `DD-MM-YYYY`
///
/// Parsing is strict: two-digit day, two-digit month, four-digit year,
/// hyphen separated. `1-1-2099` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookingDate(NaiveDate);

impl BookingDate {
    pub fn new(date: NaiveDate) -> Self {
        BookingDate(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Midnight at the start of the day
    pub fn start(&self) -> NaiveDateTime {
        self.0.and_time(chrono::NaiveTime::MIN)
    }

    /// True when the day began strictly before `now`
    pub fn is_before(&self, now: NaiveDateTime) -> bool {
        self.start() < now
    }
}

impl FromStr for BookingDate {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BookingError::InvalidDate("date must not be empty".to_string()));
        }

        let bytes = s.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes[2] == b'-'
            && bytes[5] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
        if !shape_ok {
            return Err(BookingError::InvalidDate(format!(
                "'{}' is not in DD-MM-YYYY format",
                s
            )));
        }

        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(BookingDate)
            .map_err(|e| BookingError::InvalidDate(format!("'{}': {}", s, e)))
    }
}

impl TryFrom<String> for BookingDate {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BookingDate> for String {
    fn from(date: BookingDate) -> Self {
        date.to_string()
    }
}

impl fmt::Display for BookingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}
