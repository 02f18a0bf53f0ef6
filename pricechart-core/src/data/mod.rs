//! Price sources and batch retrieval

pub mod csv_source;
pub mod fetch;
pub mod http;
pub mod provider;
pub mod synthetic;

pub use csv_source::CsvSource;
pub use fetch::{fetch_histories, FetchFailure, FetchOutcome};
pub use http::{HttpSource, DEFAULT_BASE_URL};
pub use provider::{normalize_symbol, DataError, PriceSource};
pub use synthetic::{SyntheticSource, SYNTHETIC_TAG};
