//! Caller-owned memo for the last chart build.
//!
//! Keyed by a BLAKE3 hash over the histories and range bounds, so an
//! unchanged input set skips the O(total points) rebuild. The memo is a plain
//! value owned by whoever renders; there is no shared or global cache.

use super::build::{build_chart_series, ChartData};
use super::range::DateRange;
use crate::domain::{DateKey, SymbolHistory};
use std::fmt;

/// Structural hash of `(histories, range)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoKey(blake3::Hash);

impl MemoKey {
    pub fn compute(histories: &[SymbolHistory], range: &DateRange) -> Self {
        let mut hasher = blake3::Hasher::new();
        hash_bound(&mut hasher, range.start);
        hash_bound(&mut hasher, range.end);
        hasher.update(&(histories.len() as u64).to_le_bytes());
        for history in histories {
            hash_str(&mut hasher, &history.symbol);
            hasher.update(&(history.points.len() as u64).to_le_bytes());
            for p in &history.points {
                hash_str(&mut hasher, &p.symbol);
                hash_str(&mut hasher, &p.date);
                for v in [p.open, p.high, p.low, p.close] {
                    hasher.update(&v.to_bits().to_le_bytes());
                }
                match p.volume {
                    Some(v) => hasher.update(&[1]).update(&v.to_le_bytes()),
                    None => hasher.update(&[0]),
                };
                match &p.source {
                    Some(s) => {
                        hasher.update(&[1]);
                        hash_str(&mut hasher, s);
                    }
                    None => {
                        hasher.update(&[0]);
                    }
                }
            }
        }
        Self(hasher.finalize())
    }
}

impl fmt::Display for MemoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Length-prefixed so adjacent strings cannot run together.
fn hash_str(hasher: &mut blake3::Hasher, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

fn hash_bound(hasher: &mut blake3::Hasher, bound: Option<DateKey>) {
    match bound {
        Some(key) => {
            hasher.update(&[1]);
            hash_str(hasher, &key.to_string());
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

#[derive(Debug, Default)]
pub struct ChartMemo {
    last: Option<(MemoKey, ChartData)>,
    hits: u64,
    misses: u64,
}

impl ChartMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached chart when the inputs hash the same, else rebuild.
    pub fn get_or_build(&mut self, histories: &[SymbolHistory], range: &DateRange) -> &ChartData {
        let key = MemoKey::compute(histories, range);
        if matches!(&self.last, Some((k, _)) if *k == key) {
            self.hits += 1;
            tracing::debug!(%key, "chart memo hit");
        } else {
            self.last = None;
        }
        let misses = &mut self.misses;
        let (_, data) = self.last.get_or_insert_with(|| {
            *misses += 1;
            tracing::debug!(%key, "chart memo miss");
            (key, build_chart_series(histories, range))
        });
        data
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
