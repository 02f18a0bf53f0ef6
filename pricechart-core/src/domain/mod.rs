//! Domain types for PriceChart

pub mod chart;
pub mod date_key;
pub mod price;

pub use chart::{ChartPoint, ChartSeries, DateAxis};
pub use date_key::{DateKey, DateKeyError, DATE_FORMAT};
pub use price::{PricePoint, SymbolHistory};
