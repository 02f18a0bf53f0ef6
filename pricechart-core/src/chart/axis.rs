//! Shared date axis: the union of every symbol's dates.

use crate::domain::{DateAxis, DateKey, SymbolHistory};
use std::collections::BTreeSet;

/// Collect every distinct date across `histories`, ascending.
///
/// Keys are compared as calendar days, so the axis is strictly increasing even
/// if sources spell the same day differently. Unparseable dates never join the
/// axis.
pub fn build_date_axis(histories: &[SymbolHistory]) -> DateAxis {
    let mut all_dates: BTreeSet<DateKey> = BTreeSet::new();
    for history in histories {
        for point in &history.points {
            if let Ok(key) = point.date_key() {
                all_dates.insert(key);
            }
        }
    }
    DateAxis::from_sorted(all_dates.into_iter().collect())
}
