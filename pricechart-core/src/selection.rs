//! Chart request parsing: symbol list plus optional date bounds.
//!
//! Inputs arrive as plain strings (query parameters, CLI flags). Symbols are
//! comma-separated, trimmed and upper-cased; empties and repeats are dropped
//! while first-occurrence order is kept.

use crate::chart::range::{parse_bound, DateRange};
use crate::data::provider::normalize_symbol;
use crate::domain::{DateKey, DateKeyError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("no symbols selected")]
    NoSymbols,

    #[error("invalid {which} date: {source}")]
    InvalidBound {
        which: &'static str,
        #[source]
        source: DateKeyError,
    },

    #[error("start date {start} must be on or before end date {end}")]
    InvertedRange { start: DateKey, end: DateKey },
}

/// A validated chart request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub symbols: Vec<String>,
    pub range: DateRange,
}

impl ChartRequest {
    pub fn parse(
        symbols: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, SelectionError> {
        let symbols = parse_symbols(symbols);
        if symbols.is_empty() {
            return Err(SelectionError::NoSymbols);
        }
        let range = DateRange::new(bound("start", start)?, bound("end", end)?);
        if let (Some(start), Some(end)) = (range.start, range.end) {
            if start > end {
                return Err(SelectionError::InvertedRange { start, end });
            }
        }
        Ok(Self { symbols, range })
    }

    /// Human-readable description of the window.
    pub fn range_label(&self) -> String {
        let from = self
            .range
            .start
            .map_or_else(|| "From earliest data".to_string(), |d| format!("From {d}"));
        let to = self
            .range
            .end
            .map_or_else(|| "to latest data".to_string(), |d| format!("to {d}"));
        format!("{from} {to}")
    }
}

/// Split, normalize and de-duplicate a comma-separated symbol list.
pub fn parse_symbols(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for symbol in raw.split(',').map(normalize_symbol) {
        if !symbol.is_empty() && !out.contains(&symbol) {
            out.push(symbol);
        }
    }
    out
}

fn bound(which: &'static str, raw: Option<&str>) -> Result<Option<DateKey>, SelectionError> {
    parse_bound(raw).map_err(|source| SelectionError::InvalidBound { which, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_symbol_list() {
        assert_eq!(
            parse_symbols(" aapl, MSFT ,,msft , googl"),
            vec!["AAPL", "MSFT", "GOOGL"]
        );
        assert!(parse_symbols(" , ,").is_empty());
    }

    #[test]
    fn parses_bounds() {
        let req = ChartRequest::parse("aapl", Some("2024-01-02"), Some("")).unwrap();
        assert_eq!(req.symbols, vec!["AAPL"]);
        assert_eq!(req.range.start.unwrap().to_string(), "2024-01-02");
        assert_eq!(req.range.end, None);
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert_eq!(
            ChartRequest::parse("", None, None).unwrap_err(),
            SelectionError::NoSymbols
        );
    }

    #[test]
    fn bad_bound_names_the_side() {
        let err = ChartRequest::parse("AAPL", Some("2024-01-01"), Some("later")).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidBound { which: "end", .. }));
        assert!(err.to_string().starts_with("invalid end date"));
    }

    #[test]
    fn start_after_end_is_rejected() {
        let err = ChartRequest::parse("AAPL", Some("2024-02-01"), Some("2024-01-01")).unwrap_err();
        assert_eq!(
            err,
            SelectionError::InvertedRange {
                start: DateKey::parse("2024-02-01").unwrap(),
                end: DateKey::parse("2024-01-01").unwrap(),
            }
        );
        assert_eq!(
            err.to_string(),
            "start date 2024-02-01 must be on or before end date 2024-01-01"
        );
    }

    #[test]
    fn single_day_window_is_accepted() {
        let req = ChartRequest::parse("AAPL", Some("2024-01-02"), Some("2024-01-02")).unwrap();
        assert_eq!(req.range.start, req.range.end);
    }

    #[test]
    fn range_label_mentions_open_ends() {
        let req = ChartRequest::parse("AAPL", None, Some("2024-06-30")).unwrap();
        assert_eq!(req.range_label(), "From earliest data to 2024-06-30");
    }
}
