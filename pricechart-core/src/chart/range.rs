//! Inclusive date-window filtering of a single symbol's history.

use crate::domain::{DateKey, DateKeyError, PricePoint, SymbolHistory};
use serde::{Deserialize, Serialize};

/// Inclusive `[start, end]` window. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateKey>,
    pub end: Option<DateKey>,
}

impl DateRange {
    pub fn new(start: Option<DateKey>, end: Option<DateKey>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Parse optional bound strings. Empty strings are unbounded.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, DateKeyError> {
        Ok(Self::new(parse_bound(start)?, parse_bound(end)?))
    }

    pub fn contains(&self, key: DateKey) -> bool {
        self.start.map_or(true, |s| key >= s) && self.end.map_or(true, |e| key <= e)
    }
}

/// Parse one optional bound. `None` and blank strings are unbounded.
pub fn parse_bound(raw: Option<&str>) -> Result<Option<DateKey>, DateKeyError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => DateKey::parse(s).map(Some),
    }
}

/// Keep only the points inside `range`, sorted ascending by date.
///
/// Rows whose date fails to parse are dropped. The sort is stable, so rows
/// sharing a date keep their source order. The input is left untouched.
pub fn filter_history(history: &SymbolHistory, range: &DateRange) -> SymbolHistory {
    let mut malformed = 0usize;
    let mut kept: Vec<(DateKey, &PricePoint)> = Vec::with_capacity(history.points.len());

    for point in &history.points {
        match point.date_key() {
            Ok(key) if range.contains(key) => kept.push((key, point)),
            Ok(_) => {}
            Err(_) => malformed += 1,
        }
    }

    if malformed > 0 {
        tracing::debug!(
            symbol = %history.symbol,
            malformed,
            "dropped rows with unparseable date keys"
        );
    }

    kept.sort_by_key(|(key, _)| *key);

    SymbolHistory {
        symbol: history.symbol.clone(),
        points: kept.into_iter().map(|(_, p)| p.clone()).collect(),
    }
}
