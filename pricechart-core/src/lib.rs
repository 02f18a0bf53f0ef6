//! PriceChart Core: multi-symbol OHLCV alignment for charting.
//!
//! This crate turns independently sourced per-symbol price histories into
//! chart-ready series on one shared date axis:
//! - Domain types (price rows, date keys, aligned chart points)
//! - Inclusive date-range filtering
//! - Shared date axis and gap-preserving alignment (no interpolation)
//! - Presence check and hover tooltip rows
//! - Explicit, caller-owned memo of the last build
//! - Price sources (HTTP service, CSV directory, synthetic) and batch fetch

pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod selection;

pub use chart::{
    build_chart_series, format_tooltip, has_renderable_data, ChartData, ChartMemo, DateRange,
    Tooltip, TooltipRow,
};
pub use domain::{ChartPoint, ChartSeries, DateAxis, DateKey, PricePoint, SymbolHistory};
