//! PricePoint and SymbolHistory: daily OHLCV rows as delivered by a source.

use super::date_key::{DateKey, DateKeyError};
use serde::{Deserialize, Deserializer, Serialize};

/// One daily OHLCV row for a symbol.
///
/// `date` is kept exactly as the source sent it; it is parsed on demand via
/// [`PricePoint::date_key`] so a malformed row can be dropped instead of
/// failing the whole history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(default)]
    pub symbol: String,
    pub date: String,
    #[serde(deserialize_with = "de_price")]
    pub open: f64,
    #[serde(deserialize_with = "de_price")]
    pub high: f64,
    #[serde(deserialize_with = "de_price")]
    pub low: f64,
    #[serde(deserialize_with = "de_price")]
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl PricePoint {
    pub fn date_key(&self) -> Result<DateKey, DateKeyError> {
        DateKey::parse(&self.date)
    }
}

/// All rows retrieved for one symbol. Row order is whatever the source sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolHistory {
    pub symbol: String,
    #[serde(alias = "prices")]
    pub points: Vec<PricePoint>,
}

impl SymbolHistory {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Prices arrive as JSON numbers (decimal columns) or as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum WirePrice {
    Number(f64),
    Text(String),
}

fn de_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match WirePrice::deserialize(deserializer)? {
        WirePrice::Number(v) => Ok(v),
        WirePrice::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("non-numeric price '{s}'"))),
    }
}
