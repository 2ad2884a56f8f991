//! HTTP-backed quote and NAV resolvers
//!
//! Equity/ETF quotes come from the Yahoo Finance chart endpoint, fund NAVs
//! from mfapi.in. Both use a long-lived reqwest::Client for connection
//! pooling and a per-client timeout; a timed-out call surfaces as an
//! unavailable quote/NAV and is absorbed by the settle-all batch.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{NavResolver, QuoteResolver};
use crate::error::AdvisorError;
use crate::Result;

// The chart endpoint rejects default client user agents.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Latest traded price via `GET /v8/finance/chart/{symbol}`.
pub struct YahooQuoteResolver {
    client: Client,
    base_url: String,
}

impl YahooQuoteResolver {
    pub fn new() -> Self {
        Self::with_base_url("https://query1.finance.yahoo.com")
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for YahooQuoteResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl QuoteResolver for YahooQuoteResolver {
    async fn latest_price(&self, symbol: &str) -> Result<f64> {
        let url = format!(
            "{}/v8/finance/chart/{}?interval=1d&range=1d",
            self.base_url, symbol
        );

        debug!(symbol = %symbol, "Fetching quote");

        let response = self
            .client
            .get(&url)
            .header("User-Agent", BROWSER_USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AdvisorError::QuoteUnavailable(format!("{}: {}", symbol, e)))?;

        if !response.status().is_success() {
            return Err(AdvisorError::QuoteUnavailable(format!(
                "{}: HTTP {}",
                symbol,
                response.status()
            )));
        }

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::QuoteUnavailable(format!("{}: {}", symbol, e)))?;

        body.chart
            .and_then(|chart| chart.result)
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    results.swap_remove(0).meta
                }
            })
            .and_then(|meta| meta.regular_market_price)
            .ok_or_else(|| AdvisorError::QuoteUnavailable(symbol.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Option<Chart>,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

/// Latest fund NAV via `GET https://api.mfapi.in/mf/{code}`.
pub struct MfapiNavResolver {
    client: Client,
    base_url: String,
}

impl MfapiNavResolver {
    pub fn new() -> Self {
        Self::with_base_url("https://api.mfapi.in")
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(6))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for MfapiNavResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NavResolver for MfapiNavResolver {
    async fn latest_nav(&self, code: &str) -> Result<f64> {
        let url = format!("{}/mf/{}", self.base_url, code);

        debug!(code = %code, "Fetching NAV");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AdvisorError::NavUnavailable(format!("{}: {}", code, e)))?;

        if !response.status().is_success() {
            return Err(AdvisorError::NavUnavailable(format!(
                "{}: HTTP {}",
                code,
                response.status()
            )));
        }

        let body: NavResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::NavUnavailable(format!("{}: {}", code, e)))?;

        // mfapi returns the NAV history newest-first; nav values are strings.
        body.data
            .first()
            .and_then(|entry| entry.nav.parse::<f64>().ok())
            .ok_or_else(|| AdvisorError::NavUnavailable(code.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct NavResponse {
    #[serde(default)]
    data: Vec<NavEntry>,
}

#[derive(Debug, Deserialize)]
struct NavEntry {
    nav: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_response_parsing() {
        let body: ChartResponse = serde_json::from_str(
            r#"{"chart":{"result":[{"meta":{"regularMarketPrice":3512.45}}],"error":null}}"#,
        )
        .unwrap();

        let price = body
            .chart
            .and_then(|c| c.result)
            .and_then(|mut r| r.swap_remove(0).meta)
            .and_then(|m| m.regular_market_price);

        assert_eq!(price, Some(3512.45));
    }

    #[test]
    fn test_chart_response_missing_price() {
        let body: ChartResponse =
            serde_json::from_str(r#"{"chart":{"result":[{"meta":{}}]}}"#).unwrap();

        let price = body
            .chart
            .and_then(|c| c.result)
            .and_then(|mut r| r.swap_remove(0).meta)
            .and_then(|m| m.regular_market_price);

        assert_eq!(price, None);
    }

    #[test]
    fn test_nav_response_parses_string_nav() {
        let body: NavResponse = serde_json::from_str(
            r#"{"meta":{"scheme_name":"SBI Bluechip"},"data":[{"date":"28-08-2026","nav":"81.2543"},{"date":"27-08-2026","nav":"80.9912"}]}"#,
        )
        .unwrap();

        let nav = body.data.first().and_then(|e| e.nav.parse::<f64>().ok());
        assert_eq!(nav, Some(81.2543));
    }
}
