//! Prediction client
//!
//! Sends the user's request to the external allocation model and returns
//! target class percentages plus an expected annual return. Transient
//! failures are retried under a bounded policy; exhausting the retries is
//! the single fatal failure point of the whole pipeline.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::error::AdvisorError;
use crate::models::{AllocationRequest, Allocations, ModelPrediction, RiskTier};
use crate::Result;

pub mod http;
pub use http::HttpPredictionModel;

/// One call to the external model. Implementations do not retry.
#[async_trait::async_trait]
pub trait PredictionModel: Send + Sync {
    async fn predict(&self, request: &AllocationRequest) -> Result<ModelPrediction>;
}

/// Bounded retry strategy: fixed delay between attempts, per-attempt timeout.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
            attempt_timeout: Duration::from_secs(30),
        }
    }
}

/// Wraps any model with the retry policy. Only the final attempt's
/// failure is surfaced, as `PredictionUnavailable`.
pub struct PredictionClient {
    model: Arc<dyn PredictionModel>,
    policy: RetryPolicy,
}

impl PredictionClient {
    pub fn new(model: Arc<dyn PredictionModel>) -> Self {
        Self::with_policy(model, RetryPolicy::default())
    }

    pub fn with_policy(model: Arc<dyn PredictionModel>, policy: RetryPolicy) -> Self {
        Self { model, policy }
    }

    pub async fn predict(&self, request: &AllocationRequest) -> Result<ModelPrediction> {
        let mut last_error = String::from("no attempts made");

        for attempt in 1..=self.policy.max_attempts {
            match timeout(self.policy.attempt_timeout, self.model.predict(request)).await {
                Ok(Ok(prediction)) => {
                    info!(attempt, "Prediction received");
                    return Ok(prediction);
                }
                Ok(Err(e)) => {
                    last_error = e.to_string();
                    warn!(attempt, error = %last_error, "Prediction attempt failed");
                }
                Err(_) => {
                    last_error = format!(
                        "attempt timed out after {:?}",
                        self.policy.attempt_timeout
                    );
                    warn!(attempt, "Prediction attempt timed out");
                }
            }

            if attempt < self.policy.max_attempts {
                sleep(self.policy.delay).await;
            }
        }

        Err(AdvisorError::PredictionUnavailable(last_error))
    }
}

/// Zero out classes the user excluded, renormalizing the rest to 100.
/// An empty preference set allows all classes; if everything selected is
/// zero the split falls back to an even three-way division.
pub fn apply_preferred_types(
    allocations: Allocations,
    preferred: &[crate::models::AssetClass],
) -> Allocations {
    use crate::models::AssetClass;

    let keep = |class: AssetClass| preferred.is_empty() || preferred.contains(&class);

    let filtered = Allocations {
        stocks: if keep(AssetClass::Stocks) { allocations.stocks.max(0.0) } else { 0.0 },
        etf: if keep(AssetClass::Etf) { allocations.etf.max(0.0) } else { 0.0 },
        mutualfund: if keep(AssetClass::MutualFund) {
            allocations.mutualfund.max(0.0)
        } else {
            0.0
        },
    };

    let total = filtered.stocks + filtered.etf + filtered.mutualfund;
    if total == 0.0 {
        return Allocations {
            stocks: 33.33,
            etf: 33.33,
            mutualfund: 33.33,
        };
    }

    let pct = |v: f64| (v / total * 100.0 * 100.0).round() / 100.0;
    Allocations {
        stocks: pct(filtered.stocks),
        etf: pct(filtered.etf),
        mutualfund: pct(filtered.mutualfund),
    }
}

/// Offline rule-based model.
/// Keeps the demo binary and tests functional without the ML service;
/// the split rules follow risk tier and time category.
pub struct HeuristicModel;

impl HeuristicModel {
    fn raw_allocations(risk: RiskTier, horizon_years: u32) -> Allocations {
        // Time categories: short ≤ 2y, medium ≤ 5y, long > 5y.
        let long = horizon_years > 5;
        let at_least_medium = horizon_years > 2;

        match risk {
            RiskTier::High => {
                if long {
                    Allocations { stocks: 60.0, etf: 40.0, mutualfund: 0.0 }
                } else {
                    Allocations { stocks: 0.0, etf: 100.0, mutualfund: 0.0 }
                }
            }
            RiskTier::Medium => {
                if at_least_medium {
                    Allocations { stocks: 0.0, etf: 30.0, mutualfund: 70.0 }
                } else {
                    Allocations { stocks: 0.0, etf: 0.0, mutualfund: 100.0 }
                }
            }
            RiskTier::Low => Allocations { stocks: 0.0, etf: 0.0, mutualfund: 100.0 },
        }
    }
}

#[async_trait::async_trait]
impl PredictionModel for HeuristicModel {
    async fn predict(&self, request: &AllocationRequest) -> Result<ModelPrediction> {
        let expected_return = match request.risk {
            RiskTier::Low => 6.0,
            RiskTier::Medium => 10.0,
            RiskTier::High => 14.0,
        };

        let raw = Self::raw_allocations(request.risk, request.horizon_years);

        Ok(ModelPrediction {
            expected_return,
            allocations: apply_preferred_types(raw, &request.preferred_types),
        })
    }
}
