//! Price source trait and structured error types.
//!
//! The PriceSource trait abstracts over where histories come from (the
//! finance-data HTTP service, a CSV directory, synthetic data) so the chart
//! core never touches the network and tests can swap in fakes.

use crate::domain::{PricePoint, SymbolHistory};
use thiserror::Error;

/// Structured error types for data operations.
///
/// Displayable in CLI output as-is.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("upstream error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error in {path}: {message}")]
    Csv { path: String, message: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for price sources.
///
/// Implementations return rows in whatever order they have them; range
/// filtering and sorting happen in the chart core.
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Symbols this source can serve.
    fn list_symbols(&self) -> Result<Vec<String>, DataError>;

    /// All daily rows for one symbol.
    fn get_history(&self, symbol: &str) -> Result<SymbolHistory, DataError>;
}

/// Upper-case and trim a ticker. Tickers are case-insensitive upstream.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// Stamp `symbol` on rows that arrived without one.
pub(crate) fn fill_symbol(symbol: &str, points: &mut [PricePoint]) {
    for p in points.iter_mut().filter(|p| p.symbol.is_empty()) {
        p.symbol = symbol.to_string();
    }
}
