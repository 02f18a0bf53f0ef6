//! "Is there anything to draw?"

use crate::domain::ChartSeries;

/// True iff at least one point of any series carries a value.
///
/// `false` means the selection is valid but has no data in range. Loading and
/// fetch failures are reported by the fetch layer, never here.
pub fn has_renderable_data(series: &[ChartSeries]) -> bool {
    series
        .iter()
        .any(|s| s.points.iter().any(|p| p.y().is_some()))
}
