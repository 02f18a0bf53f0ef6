//! Batch fetch: one history per requested symbol, retrieved in parallel.
//!
//! Results come back in the order the symbols were requested, regardless of
//! which request finished first. Failures are collected per symbol instead of
//! aborting the batch; the caller decides whether a partial set is usable.

use super::provider::{DataError, PriceSource};
use crate::domain::SymbolHistory;
use rayon::prelude::*;

#[derive(Debug)]
pub struct FetchFailure {
    pub symbol: String,
    pub error: DataError,
}

/// Outcome of a batch fetch.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Successful histories, in request order.
    pub histories: Vec<SymbolHistory>,
    /// Failed symbols, in request order.
    pub failures: Vec<FetchFailure>,
}

impl FetchOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_symbols(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.symbol.as_str()).collect()
    }
}

/// Fetch every symbol concurrently on the rayon pool.
pub fn fetch_histories(source: &dyn PriceSource, symbols: &[String]) -> FetchOutcome {
    tracing::info!(source = source.name(), count = symbols.len(), "fetching histories");

    let results: Vec<(&String, Result<SymbolHistory, DataError>)> = symbols
        .par_iter()
        .map(|symbol| (symbol, source.get_history(symbol)))
        .collect();

    let mut outcome = FetchOutcome::default();
    for (symbol, result) in results {
        match result {
            Ok(history) => {
                tracing::debug!(symbol = %symbol, rows = history.len(), "fetched history");
                outcome.histories.push(history);
            }
            Err(error) => {
                tracing::warn!(symbol = %symbol, %error, "history fetch failed");
                outcome.failures.push(FetchFailure {
                    symbol: symbol.clone(),
                    error,
                });
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;
    use std::time::Duration;

    /// Responds slower for earlier symbols so completion order is reversed.
    struct SlowFirst {
        order: Vec<String>,
    }

    impl PriceSource for SlowFirst {
        fn name(&self) -> &str {
            "slow_first"
        }

        fn list_symbols(&self) -> Result<Vec<String>, DataError> {
            Ok(self.order.clone())
        }

        fn get_history(&self, symbol: &str) -> Result<SymbolHistory, DataError> {
            if symbol == "FAIL" {
                return Err(DataError::SymbolNotFound {
                    symbol: symbol.into(),
                });
            }
            let rank = self.order.iter().position(|s| s == symbol).unwrap_or(0);
            let wait = (self.order.len() - rank) as u64 * 10;
            std::thread::sleep(Duration::from_millis(wait));
            Ok(SymbolHistory::new(
                symbol,
                vec![PricePoint {
                    symbol: symbol.into(),
                    date: "2024-01-02".into(),
                    open: 1.0,
                    high: 1.0,
                    low: 1.0,
                    close: 1.0,
                    volume: None,
                    source: None,
                }],
            ))
        }
    }

    #[test]
    fn keeps_request_order_and_collects_failures() {
        let order: Vec<String> = ["MSFT", "FAIL", "AAPL", "GOOGL"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let source = SlowFirst {
            order: order.clone(),
        };
        let outcome = fetch_histories(&source, &order);

        let got: Vec<&str> = outcome.histories.iter().map(|h| h.symbol.as_str()).collect();
        assert_eq!(got, vec!["MSFT", "AAPL", "GOOGL"]);
        assert_eq!(outcome.failed_symbols(), vec!["FAIL"]);
        assert!(!outcome.all_succeeded());
    }

    #[test]
    fn empty_request_is_empty_outcome() {
        let source = SlowFirst { order: vec![] };
        let outcome = fetch_histories(&source, &[]);
        assert!(outcome.histories.is_empty());
        assert!(outcome.all_succeeded());
    }
}
