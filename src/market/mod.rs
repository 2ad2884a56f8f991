//! Quote and NAV resolution
//!
//! External collaborator boundary. A batch of candidates is resolved
//! concurrently with settle-all semantics: every lookup completes
//! independently and a failed or non-positive result drops only that
//! candidate, never the batch.

use futures::future::join_all;
use std::collections::HashMap;
use tracing::warn;

use crate::error::AdvisorError;
use crate::models::{Candidate, PricedCandidate};
use crate::Result;

pub mod http;
pub use http::{MfapiNavResolver, YahooQuoteResolver};

/// Latest traded price for an equity or ETF symbol. No retry at this layer.
#[async_trait::async_trait]
pub trait QuoteResolver: Send + Sync {
    async fn latest_price(&self, symbol: &str) -> Result<f64>;
}

/// Latest net asset value for a fund code. No retry at this layer.
#[async_trait::async_trait]
pub trait NavResolver: Send + Sync {
    async fn latest_nav(&self, code: &str) -> Result<f64>;
}

/// Resolve prices for all candidates concurrently, settling every outcome.
pub async fn resolve_quotes(
    resolver: &dyn QuoteResolver,
    candidates: Vec<Candidate>,
) -> Vec<PricedCandidate> {
    let lookups = candidates.into_iter().map(|candidate| async move {
        let price = match resolver.latest_price(&candidate.symbol).await {
            Ok(p) if p > 0.0 => Some(p),
            Ok(p) => {
                warn!(symbol = %candidate.symbol, price = p, "Dropping non-positive quote");
                None
            }
            Err(e) => {
                warn!(symbol = %candidate.symbol, error = %e, "Quote resolution failed");
                None
            }
        };
        PricedCandidate { candidate, price }
    });

    join_all(lookups).await
}

/// Resolve NAVs for all fund candidates concurrently, settling every outcome.
pub async fn resolve_navs(
    resolver: &dyn NavResolver,
    candidates: Vec<Candidate>,
) -> Vec<PricedCandidate> {
    let lookups = candidates.into_iter().map(|candidate| async move {
        let price = match resolver.latest_nav(&candidate.symbol).await {
            Ok(nav) if nav > 0.0 => Some(nav),
            Ok(nav) => {
                warn!(code = %candidate.symbol, nav = nav, "Dropping non-positive NAV");
                None
            }
            Err(e) => {
                warn!(code = %candidate.symbol, error = %e, "NAV resolution failed");
                None
            }
        };
        PricedCandidate { candidate, price }
    });

    join_all(lookups).await
}

/// Fixed-price resolver for development and testing.
/// Keeps the demo binary functional without market access.
pub struct FixedQuotes {
    prices: HashMap<String, f64>,
}

impl FixedQuotes {
    pub fn new(entries: &[(&str, f64)]) -> Self {
        Self {
            prices: entries
                .iter()
                .map(|(symbol, price)| (symbol.to_string(), *price))
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl QuoteResolver for FixedQuotes {
    async fn latest_price(&self, symbol: &str) -> Result<f64> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| AdvisorError::QuoteUnavailable(symbol.to_string()))
    }
}

/// Fixed-NAV resolver for development and testing.
pub struct FixedNavs {
    navs: HashMap<String, f64>,
}

impl FixedNavs {
    pub fn new(entries: &[(&str, f64)]) -> Self {
        Self {
            navs: entries
                .iter()
                .map(|(code, nav)| (code.to_string(), *nav))
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl NavResolver for FixedNavs {
    async fn latest_nav(&self, code: &str) -> Result<f64> {
        self.navs
            .get(code)
            .copied()
            .ok_or_else(|| AdvisorError::NavUnavailable(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetClass;

    fn candidates(symbols: &[&str]) -> Vec<Candidate> {
        symbols
            .iter()
            .map(|s| Candidate::new(s, s, AssetClass::Stocks))
            .collect()
    }

    #[tokio::test]
    async fn test_settle_all_isolates_failures() {
        let resolver = FixedQuotes::new(&[("A", 100.0), ("C", 250.5)]);
        let priced = resolve_quotes(&resolver, candidates(&["A", "B", "C"])).await;

        assert_eq!(priced.len(), 3);
        assert_eq!(priced[0].price, Some(100.0));
        assert_eq!(priced[1].price, None);
        assert_eq!(priced[2].price, Some(250.5));
    }

    #[tokio::test]
    async fn test_non_positive_quotes_are_dropped() {
        let resolver = FixedQuotes::new(&[("A", 0.0), ("B", -4.0)]);
        let priced = resolve_quotes(&resolver, candidates(&["A", "B"])).await;

        assert!(priced.iter().all(|p| p.price.is_none()));
    }

    #[tokio::test]
    async fn test_nav_batch_preserves_order() {
        let resolver = FixedNavs::new(&[("119598", 81.25), ("120465", 52.1)]);
        let mut funds = candidates(&["119598", "000000", "120465"]);
        for f in &mut funds {
            f.class = AssetClass::MutualFund;
        }

        let priced = resolve_navs(&resolver, funds).await;
        assert_eq!(priced[0].price, Some(81.25));
        assert_eq!(priced[1].price, None);
        assert_eq!(priced[2].price, Some(52.1));
    }
}
