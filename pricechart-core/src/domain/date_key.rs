//! DateKey: the calendar-day identity of a price row and an axis position.
//!
//! Upstream rows carry their date as a string. Everything downstream of
//! parsing (ordering, range checks, de-duplication, per-symbol lookup) works
//! on the parsed calendar day, so two spellings of the same day are one key.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Canonical rendering of a date key.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateKeyError {
    #[error("malformed date key '{0}'")]
    Malformed(String),
}

/// A calendar day, always rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a date string.
    ///
    /// Accepts `YYYY-MM-DD`, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamp, or
    /// an RFC 3339 timestamp. For timestamps the calendar day written in the
    /// string is the key; no timezone conversion is applied.
    pub fn parse(raw: &str) -> Result<Self, DateKeyError> {
        let s = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
            return Ok(Self(date));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(dt.date()));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.date_naive()));
        }
        Err(DateKeyError::Malformed(raw.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
