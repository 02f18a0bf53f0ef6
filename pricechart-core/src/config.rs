//! TOML configuration: where prices come from and the default chart window.
//!
//! ```toml
//! [source]
//! kind = "http"                      # http | csv | synthetic
//! base_url = "http://localhost:8080"
//! timeout_secs = 30
//! retries = 1
//! csv_dir = "data"
//!
//! [chart]
//! start = "2024-01-01"
//! end = "2024-12-31"
//! ```
//!
//! Every key is optional. `PRICECHART_API_BASE_URL` overrides `base_url`.

use crate::data::{CsvSource, DataError, HttpSource, PriceSource, SyntheticSource, DEFAULT_BASE_URL};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides `source.base_url`.
pub const BASE_URL_ENV: &str = "PRICECHART_API_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Http,
    Csv,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub base_url: String,
    pub timeout_secs: u64,
    pub retries: u32,
    pub csv_dir: PathBuf,
    /// Symbols offered by the synthetic source.
    pub synthetic_symbols: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Http,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            retries: 1,
            csv_dir: PathBuf::from("data"),
            synthetic_symbols: ["SPY", "QQQ", "AAPL", "MSFT", "GOOGL"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Default chart window. Bounds are kept as strings and validated together
/// with the symbol selection. A missing bound leaves that side unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceChartConfig {
    pub source: SourceConfig,
    pub chart: ChartConfig,
}

impl PriceChartConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load from `path` if given (defaults otherwise), then apply the
    /// environment override.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
        Ok(config)
    }

    pub fn apply_base_url_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.source.base_url = url;
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl SourceConfig {
    /// Instantiate the configured source.
    ///
    /// The synthetic source generates over `window`, or the year ending
    /// `today` when no window is given.
    pub fn build(
        &self,
        window: (Option<NaiveDate>, Option<NaiveDate>),
        today: NaiveDate,
    ) -> Result<Box<dyn PriceSource>, DataError> {
        match self.kind {
            SourceKind::Http => Ok(Box::new(HttpSource::new(
                &self.base_url,
                Duration::from_secs(self.timeout_secs),
                self.retries,
            )?)),
            SourceKind::Csv => Ok(Box::new(CsvSource::new(&self.csv_dir))),
            SourceKind::Synthetic => {
                let end = window.1.unwrap_or(today);
                let start = window.0.unwrap_or(end - chrono::Duration::days(365));
                Ok(Box::new(SyntheticSource::new(
                    self.synthetic_symbols.clone(),
                    start,
                    end,
                )))
            }
        }
    }
}
