//! Per-symbol alignment onto the shared axis.
//!
//! Missing dates become explicit gaps (no value, no row). Nothing is
//! forward-filled or interpolated, so a line renderer cannot draw a
//! connecting segment across days a symbol did not trade.

use crate::domain::{ChartPoint, ChartSeries, DateAxis, DateKey, PricePoint, SymbolHistory};
use std::collections::HashMap;

/// Lay one symbol's points out on `axis`.
///
/// The date lookup is built once per call; a later row with the same date
/// replaces an earlier one. The result has exactly `axis.len()` points with
/// `x` values equal to the axis.
pub fn align_series(history: &SymbolHistory, axis: &DateAxis) -> ChartSeries {
    let mut by_date: HashMap<DateKey, &PricePoint> = HashMap::with_capacity(history.points.len());
    for point in &history.points {
        if let Ok(key) = point.date_key() {
            by_date.insert(key, point);
        }
    }

    let points = axis
        .iter()
        .map(|x| match by_date.get(&x) {
            Some(point) => ChartPoint::present(x, (*point).clone()),
            None => ChartPoint::gap(x),
        })
        .collect();

    ChartSeries {
        name: history.symbol.clone(),
        points,
    }
}

/// Align every history on the same axis, keeping input order.
pub fn align_all(histories: &[SymbolHistory], axis: &DateAxis) -> Vec<ChartSeries> {
    histories.iter().map(|h| align_series(h, axis)).collect()
}
