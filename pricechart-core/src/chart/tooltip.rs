//! Hover tooltip content for one axis position.
//!
//! Pure data: the caller decides how to draw it. `Display` gives a plain-text
//! rendering for terminals.

use crate::domain::{ChartSeries, DateAxis, DateKey};
use serde::Serialize;
use std::fmt;

/// O/H/L/C of one symbol on the hovered date, rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipRow {
    pub symbol: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub date_label: String,
    pub rows: Vec<TooltipRow>,
}

/// Round to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build the tooltip for axis position `index`.
///
/// Rows follow series order; a series with a gap at `index` contributes no
/// row. Returns `None` when `index` is past the end of the axis.
pub fn format_tooltip(index: usize, series: &[ChartSeries], axis: &DateAxis) -> Option<Tooltip> {
    let date = axis.get(index)?;
    let rows = series
        .iter()
        .filter_map(|s| {
            let meta = s.points.get(index)?.meta()?;
            Some(TooltipRow {
                symbol: s.name.clone(),
                open: round_cents(meta.open),
                high: round_cents(meta.high),
                low: round_cents(meta.low),
                close: round_cents(meta.close),
            })
        })
        .collect();

    Some(Tooltip {
        date_label: date.to_string(),
        rows,
    })
}

/// Tooltip for a date instead of an index. `None` if the date is not on the axis.
pub fn tooltip_for_date(date: DateKey, series: &[ChartSeries], axis: &DateAxis) -> Option<Tooltip> {
    format_tooltip(axis.position(date)?, series, axis)
}

impl fmt::Display for TooltipRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<8} O {:.2} · H {:.2} · L {:.2} · C {:.2}",
            self.symbol, self.open, self.high, self.low, self.close
        )
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date_label)?;
        for row in &self.rows {
            write!(f, "\n{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{align::align_all, axis::build_date_axis};
    use crate::domain::{PricePoint, SymbolHistory};

    fn point(symbol: &str, date: &str, open: f64, high: f64, low: f64, close: f64) -> PricePoint {
        PricePoint {
            symbol: symbol.into(),
            date: date.into(),
            open,
            high,
            low,
            close,
            volume: None,
            source: None,
        }
    }

    fn fixture() -> (Vec<ChartSeries>, DateAxis) {
        let histories = vec![
            SymbolHistory::new(
                "AAPL",
                vec![point("AAPL", "2024-01-01", 99.456, 101.0, 98.994, 100.006)],
            ),
            SymbolHistory::new(
                "MSFT",
                vec![
                    point("MSFT", "2024-01-01", 49.0, 51.0, 48.0, 50.0),
                    point("MSFT", "2024-01-02", 50.0, 52.0, 49.5, 51.25),
                ],
            ),
        ];
        let axis = build_date_axis(&histories);
        (align_all(&histories, &axis), axis)
    }

    #[test]
    fn rows_follow_series_order_and_skip_gaps() {
        let (series, axis) = fixture();

        let t0 = format_tooltip(0, &series, &axis).unwrap();
        assert_eq!(t0.date_label, "2024-01-01");
        let symbols: Vec<&str> = t0.rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);

        let t1 = format_tooltip(1, &series, &axis).unwrap();
        assert_eq!(t1.rows.len(), 1);
        assert_eq!(t1.rows[0].symbol, "MSFT");
        assert_eq!(t1.rows[0].close, 51.25);
    }

    #[test]
    fn values_are_rounded_to_cents() {
        let (series, axis) = fixture();
        let row = &format_tooltip(0, &series, &axis).unwrap().rows[0];
        assert_eq!(row.open, 99.46);
        assert_eq!(row.low, 98.99);
        assert_eq!(row.close, 100.01);
    }

    #[test]
    fn index_past_axis_has_no_tooltip() {
        let (series, axis) = fixture();
        assert!(format_tooltip(2, &series, &axis).is_none());
    }

    #[test]
    fn lookup_by_date() {
        let (series, axis) = fixture();
        let date = DateKey::parse("2024-01-02").unwrap();
        let t = tooltip_for_date(date, &series, &axis).unwrap();
        assert_eq!(t.rows[0].symbol, "MSFT");
        let missing = DateKey::parse("2024-02-01").unwrap();
        assert!(tooltip_for_date(missing, &series, &axis).is_none());
    }

    #[test]
    fn renders_as_text() {
        let (series, axis) = fixture();
        let text = format_tooltip(1, &series, &axis).unwrap().to_string();
        assert_eq!(
            text,
            "2024-01-02\nMSFT     O 50.00 · H 52.00 · L 49.50 · C 51.25"
        );
    }
}
