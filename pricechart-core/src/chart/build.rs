//! The full transform: filter → axis → align.

use super::align::align_all;
use super::axis::build_date_axis;
use super::presence::has_renderable_data;
use super::range::{filter_history, DateRange};
use super::tooltip::{format_tooltip, Tooltip};
use crate::domain::{ChartSeries, DateAxis, SymbolHistory};
use serde::Serialize;

/// Aligned series plus the axis they share.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub series: Vec<ChartSeries>,
    pub axis: DateAxis,
}

impl ChartData {
    pub fn has_renderable_data(&self) -> bool {
        has_renderable_data(&self.series)
    }

    pub fn tooltip(&self, index: usize) -> Option<Tooltip> {
        format_tooltip(index, &self.series, &self.axis)
    }
}

/// Build chart-ready series from raw histories.
///
/// Each history is range-filtered, the axis is the union of the filtered
/// dates, and every series is aligned to it. Series order is input order.
pub fn build_chart_series(histories: &[SymbolHistory], range: &DateRange) -> ChartData {
    let filtered: Vec<SymbolHistory> = histories
        .iter()
        .map(|h| filter_history(h, range))
        .collect();
    let axis = build_date_axis(&filtered);
    let series = align_all(&filtered, &axis);

    tracing::debug!(
        symbols = series.len(),
        axis_len = axis.len(),
        "built chart series"
    );

    ChartData { series, axis }
}
