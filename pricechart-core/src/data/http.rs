//! HTTP price source for the finance-data service.
//!
//! Endpoints:
//! - `GET {base}/symbols` → `["AAPL", "MSFT", ...]`
//! - `GET {base}/getPriceData?symbol=AAPL` → `[{symbol, date, open, ...}, ...]`
//!
//! The service answers 404 when it has no rows for a symbol. Connect/timeout
//! failures, 429 and 5xx responses are retried with exponential backoff.

use super::provider::{fill_symbol, normalize_symbol, DataError, PriceSource};
use crate::domain::{PricePoint, SymbolHistory};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default service location when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// HTTP price source.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
    max_retries: u32,
    base_delay: Duration,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration, max_retries: u32) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pricechart/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
            base_delay: Duration::from_millis(500),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn symbols_url(&self) -> String {
        format!("{}/symbols", self.base_url)
    }

    fn prices_url(&self) -> String {
        format!("{}/getPriceData", self.base_url)
    }

    /// `base_delay * 2^(attempt - 1)`, saturating for large retry counts.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    /// GET with retry. `symbol` is set for per-symbol requests so a 404 maps
    /// to [`DataError::SymbolNotFound`].
    fn get_json<T: DeserializeOwned>(&self, url: &str, symbol: Option<&str>) -> Result<T, DataError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.backoff_delay(attempt);
                tracing::debug!(url, attempt, ?delay, "retrying request");
                std::thread::sleep(delay);
            }

            let mut request = self.client.get(url);
            if let Some(sym) = symbol {
                request = request.query(&[("symbol", sym)]);
            }

            match request.send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == StatusCode::NOT_FOUND {
                        if let Some(sym) = symbol {
                            return Err(DataError::SymbolNotFound {
                                symbol: sym.to_string(),
                            });
                        }
                    }

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(DataError::RateLimited);
                        continue;
                    }

                    if status.is_server_error() {
                        last_error = Some(DataError::Upstream {
                            status: status.as_u16(),
                            message: resp.text().unwrap_or_default(),
                        });
                        continue;
                    }

                    if !status.is_success() {
                        return Err(DataError::Upstream {
                            status: status.as_u16(),
                            message: resp.text().unwrap_or_default(),
                        });
                    }

                    let body = resp
                        .text()
                        .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
                    return serde_json::from_str(&body).map_err(|e| {
                        DataError::ResponseFormatChanged(format!("failed to parse {url}: {e}"))
                    });
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl PriceSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn list_symbols(&self) -> Result<Vec<String>, DataError> {
        let symbols: Vec<String> = self.get_json(&self.symbols_url(), None)?;
        Ok(symbols.iter().map(|s| normalize_symbol(s)).collect())
    }

    fn get_history(&self, symbol: &str) -> Result<SymbolHistory, DataError> {
        let symbol = normalize_symbol(symbol);
        let mut points: Vec<PricePoint> = self.get_json(&self.prices_url(), Some(&symbol))?;
        fill_symbol(&symbol, &mut points);
        Ok(SymbolHistory::new(symbol, points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    #[test]
    fn trailing_slash_is_trimmed() {
        let src = HttpSource::new("http://example.test:8080/", Duration::from_secs(1), 0).unwrap();
        assert_eq!(src.base_url(), "http://example.test:8080");
        assert_eq!(src.symbols_url(), "http://example.test:8080/symbols");
        assert_eq!(src.prices_url(), "http://example.test:8080/getPriceData");
    }

    /// Serves one canned response per connection, then stops listening.
    /// Returns the base URL and a handle yielding the request lines seen.
    fn serve(responses: Vec<(&'static str, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let mut seen = Vec::new();
            for (status, body) in responses {
                let (stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                seen.push(line.trim_end().to_string());
                loop {
                    let mut header = String::new();
                    if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                        break;
                    }
                }
                let reply = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let mut stream = stream;
                stream.write_all(reply.as_bytes()).unwrap();
                stream.flush().unwrap();
            }
            seen
        });
        (base, handle)
    }

    fn source(base: &str, retries: u32) -> HttpSource {
        let mut src = HttpSource::new(base, Duration::from_secs(5), retries).unwrap();
        src.base_delay = Duration::from_millis(1);
        src
    }

    const ONE_ROW: &str =
        r#"[{"date":"2024-01-02","open":1.0,"high":2.0,"low":0.5,"close":"1.5"}]"#;

    #[test]
    fn not_found_maps_to_symbol_not_found() {
        let (base, handle) = serve(vec![("404 Not Found", "")]);
        let err = source(&base, 2).get_history("aapl").unwrap_err();
        assert!(
            matches!(&err, DataError::SymbolNotFound { symbol } if symbol == "AAPL"),
            "got {err:?}"
        );
        let seen = handle.join().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with("GET /getPriceData?symbol=AAPL "), "{}", seen[0]);
    }

    #[test]
    fn server_error_is_retried_then_succeeds() {
        let (base, handle) = serve(vec![
            ("500 Internal Server Error", "boom"),
            ("200 OK", ONE_ROW),
        ]);
        let history = source(&base, 1).get_history("AAPL").unwrap();
        assert_eq!(handle.join().unwrap().len(), 2);

        assert_eq!(history.symbol, "AAPL");
        assert_eq!(history.len(), 1);
        // Rows without a symbol field take the requested one.
        assert_eq!(history.points[0].symbol, "AAPL");
        assert_eq!(history.points[0].close, 1.5);
    }

    #[test]
    fn rate_limit_is_retried() {
        let (base, handle) = serve(vec![("429 Too Many Requests", ""), ("200 OK", ONE_ROW)]);
        assert_eq!(source(&base, 1).get_history("AAPL").unwrap().len(), 1);
        assert_eq!(handle.join().unwrap().len(), 2);
    }

    #[test]
    fn client_error_is_not_retried() {
        let (base, handle) = serve(vec![("400 Bad Request", "bad symbol")]);
        let err = source(&base, 3).get_history("AAPL").unwrap_err();
        match err {
            DataError::Upstream { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad symbol");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
        assert_eq!(handle.join().unwrap().len(), 1);
    }

    #[test]
    fn symbols_endpoint_is_normalized() {
        let (base, handle) = serve(vec![("200 OK", r#"["aapl"," msft "]"#)]);
        assert_eq!(source(&base, 0).list_symbols().unwrap(), vec!["AAPL", "MSFT"]);
        assert!(handle.join().unwrap()[0].starts_with("GET /symbols "));
    }

    #[test]
    fn backoff_doubles_and_saturates() {
        let src = source("http://127.0.0.1:9", 0);
        assert_eq!(src.backoff_delay(1), Duration::from_millis(1));
        assert_eq!(src.backoff_delay(3), Duration::from_millis(4));
        // Retry counts past 32 must not overflow.
        assert_eq!(src.backoff_delay(40), src.backoff_delay(33));
    }

    #[test]
    fn unreachable_service_is_a_network_error() {
        // Port 9 (discard) on localhost is closed on any sane test host.
        let mut src = HttpSource::new("http://127.0.0.1:9", Duration::from_millis(200), 1).unwrap();
        src.base_delay = Duration::from_millis(1);
        let err = src.get_history("aapl").unwrap_err();
        assert!(matches!(err, DataError::NetworkUnreachable(_)), "got {err:?}");
    }
}
