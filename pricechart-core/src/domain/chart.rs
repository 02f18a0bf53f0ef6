//! Chart-ready values: the shared date axis and per-symbol aligned series.

use super::date_key::DateKey;
use super::price::PricePoint;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Sorted, de-duplicated date keys shared by every series of one chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DateAxis(Vec<DateKey>);

impl DateAxis {
    /// Build an axis from keys that are already strictly ascending.
    pub(crate) fn from_sorted(keys: Vec<DateKey>) -> Self {
        debug_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        Self(keys)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<DateKey> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.0.iter().copied()
    }

    pub fn keys(&self) -> &[DateKey] {
        &self.0
    }

    /// Axis index of `key`, if present.
    pub fn position(&self, key: DateKey) -> Option<usize> {
        self.0.binary_search(&key).ok()
    }

    /// Category labels in axis order (`YYYY-MM-DD`).
    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|k| k.to_string()).collect()
    }
}

/// One axis position of one symbol.
///
/// The plotted value is always the close of `meta`, so a point either has
/// both a value and its originating row or has neither.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: DateKey,
    meta: Option<PricePoint>,
}

impl ChartPoint {
    pub fn present(x: DateKey, point: PricePoint) -> Self {
        Self {
            x,
            meta: Some(point),
        }
    }

    pub fn gap(x: DateKey) -> Self {
        Self { x, meta: None }
    }

    pub fn y(&self) -> Option<f64> {
        self.meta.as_ref().map(|p| p.close)
    }

    pub fn meta(&self) -> Option<&PricePoint> {
        self.meta.as_ref()
    }

    pub fn is_gap(&self) -> bool {
        self.meta.is_none()
    }
}

impl Serialize for ChartPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ChartPoint", 3)?;
        s.serialize_field("x", &self.x)?;
        s.serialize_field("y", &self.y())?;
        s.serialize_field("meta", &self.meta)?;
        s.end()
    }
}

/// A symbol's points laid out on the shared axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    #[serde(rename = "data")]
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// `y` values in axis order, `None` at gaps.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(ChartPoint::y).collect()
    }
}
