//! CSV directory price source.
//!
//! Layout: `{dir}/{SYMBOL}.csv`, one file per symbol, with a header row:
//!
//! ```text
//! date,open,high,low,close,volume,source
//! 2024-01-02,187.15,188.44,183.89,185.64,82488700,YAHOO_FINANCE
//! ```
//!
//! `volume` and `source` columns are optional.

use super::provider::{normalize_symbol, DataError, PriceSource};
use crate::domain::{PricePoint, SymbolHistory};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<u64>,
    #[serde(default)]
    source: Option<String>,
}

pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `{dir}/{SYMBOL}.csv`, falling back to a case-insensitive stem match.
    fn symbol_path(&self, symbol: &str) -> Option<PathBuf> {
        let exact = self.dir.join(format!("{symbol}.csv"));
        if exact.is_file() {
            return Some(exact);
        }
        fs::read_dir(&self.dir)
            .ok()?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .find(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
                    && path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .is_some_and(|s| s.eq_ignore_ascii_case(symbol))
            })
    }
}

impl PriceSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn list_symbols(&self) -> Result<Vec<String>, DataError> {
        let mut symbols: Vec<String> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
            })
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(normalize_symbol))
            .collect();
        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }

    fn get_history(&self, symbol: &str) -> Result<SymbolHistory, DataError> {
        let symbol = normalize_symbol(symbol);
        let Some(path) = self.symbol_path(&symbol) else {
            return Err(DataError::SymbolNotFound { symbol });
        };

        let csv_err = |e: csv::Error| DataError::Csv {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(csv_err)?;

        let mut points = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row.map_err(csv_err)?;
            points.push(PricePoint {
                symbol: symbol.clone(),
                date: row.date,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
                source: row.source.filter(|s| !s.is_empty()),
            });
        }

        Ok(SymbolHistory::new(symbol, points))
    }
}
