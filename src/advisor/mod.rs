//! Advisor engine — drives the whole-request pipeline
//!
//! RECEIVED → PREDICTING → PLANNING → RECONCILING → PROJECTING → COMPLETE
//!
//! Prediction is the sole fatal step; every later stage absorbs its own
//! failures as reduced invested amount. Each run is a stateless, pure
//! transformation of one request — nothing persists between calls.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AdvisorError;
use crate::market::{NavResolver, QuoteResolver};
use crate::models::{
    AllocationRequest, PortfolioPlan, Recommendation, RecommendationSet,
};
use crate::money::Money;
use crate::planner::{plan_equities, plan_funds, split_budgets, DEFAULT_FUND_UNIT};
use crate::prediction::PredictionClient;
use crate::projection::project;
use crate::reconcile::reconcile;
use crate::universe::Universe;
use crate::Result;

pub struct AdvisorEngine {
    prediction: PredictionClient,
    quotes: Arc<dyn QuoteResolver>,
    navs: Arc<dyn NavResolver>,
    universe: Arc<Universe>,
    fund_unit: Money,
}

impl AdvisorEngine {
    pub fn new(
        prediction: PredictionClient,
        quotes: Arc<dyn QuoteResolver>,
        navs: Arc<dyn NavResolver>,
    ) -> Self {
        Self {
            prediction,
            quotes,
            navs,
            universe: Arc::new(Universe::builtin().clone()),
            fund_unit: DEFAULT_FUND_UNIT,
        }
    }

    pub fn with_universe(mut self, universe: Arc<Universe>) -> Self {
        self.universe = universe;
        self
    }

    pub fn with_fund_unit(mut self, unit: Money) -> Self {
        self.fund_unit = unit;
        self
    }

    /// Run one recommendation computation end to end.
    pub async fn recommend(&self, request: AllocationRequest) -> Result<Recommendation> {
        // === RECEIVED ===
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(AdvisorError::InvalidRequest(
                "amount must be a positive number".to_string(),
            ));
        }
        if request.horizon_years == 0 {
            return Err(AdvisorError::InvalidRequest(
                "horizon must be at least one year".to_string(),
            ));
        }

        let amount = Money::from_major(request.amount);

        info!(
            amount = %amount,
            risk = %request.risk,
            horizon_years = request.horizon_years,
            "Advisor: request received"
        );

        // === PREDICTING === (the only fatal step)
        let prediction = self.prediction.predict(&request).await?;

        debug!(
            stocks_pct = prediction.allocations.stocks,
            etf_pct = prediction.allocations.etf,
            fund_pct = prediction.allocations.mutualfund,
            expected_return = prediction.expected_return,
            "Advisor: allocation targets received"
        );

        // === PLANNING ===
        let (stock_budget, etf_budget, fund_budget) =
            split_budgets(amount, &prediction.allocations);

        let stock_candidates = self.universe.equities_for(&request.preferred_sectors);
        let etf_candidates = self.universe.etfs();
        let fund_candidates = self.universe.funds();

        // Disjoint budgets and candidate sets: the planners run concurrently.
        let (stocks, etf, funds) = tokio::join!(
            plan_equities(stock_budget, stock_candidates, self.quotes.as_ref()),
            plan_equities(etf_budget, etf_candidates, self.quotes.as_ref()),
            plan_funds(
                fund_budget,
                fund_candidates,
                self.navs.as_ref(),
                self.fund_unit
            ),
        );

        let mut plan = PortfolioPlan { stocks, etf, funds };

        // === RECONCILING ===
        let uninvested = reconcile(&mut plan, amount, self.fund_unit);
        let total_invested = plan.total_invested();

        debug!(
            total_invested = %total_invested,
            uninvested = %uninvested,
            "Advisor: reconciliation complete"
        );

        // === PROJECTING ===
        let projection = project(
            total_invested,
            prediction.expected_return,
            request.horizon_years,
        );

        // === COMPLETE ===
        info!(
            total_invested = %total_invested,
            future_value = projection.future_value,
            "Advisor: recommendation complete"
        );

        Ok(Recommendation {
            recommendation_id: Uuid::new_v4(),
            expected_return: prediction.expected_return,
            allocations: prediction.allocations.into(),
            recommendations: RecommendationSet {
                stocks: plan.stocks.orders,
                etf: plan.etf.orders,
                mutualfund: plan.funds.orders,
            },
            total_principal: projection.total_principal,
            profit: projection.profit,
            future_value: projection.future_value,
            total_invested: total_invested.round_major(),
            uninvested_amount: uninvested.round_major(),
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{FixedNavs, FixedQuotes};
    use crate::models::{Allocations, AssetClass, Candidate, ModelPrediction, RiskTier};
    use crate::prediction::{PredictionModel, RetryPolicy};
    use crate::projection::annuity_due_future_value;
    use std::time::Duration;

    struct FixedModel {
        prediction: ModelPrediction,
    }

    #[async_trait::async_trait]
    impl PredictionModel for FixedModel {
        async fn predict(&self, _request: &AllocationRequest) -> Result<ModelPrediction> {
            Ok(self.prediction.clone())
        }
    }

    struct FailingModel;

    #[async_trait::async_trait]
    impl PredictionModel for FailingModel {
        async fn predict(&self, _request: &AllocationRequest) -> Result<ModelPrediction> {
            Err(AdvisorError::PredictionUnavailable("down".to_string()))
        }
    }

    fn test_universe() -> Arc<Universe> {
        Arc::new(Universe::new(
            vec![(
                "IT".to_string(),
                vec![
                    Candidate::new("Alpha", "ALPHA", AssetClass::Stocks),
                    Candidate::new("Beta", "BETA", AssetClass::Stocks),
                    Candidate::new("Gamma", "GAMMA", AssetClass::Stocks),
                ],
            )],
            vec![
                Candidate::new("Fund One", "F1", AssetClass::MutualFund),
                Candidate::new("Fund Two", "F2", AssetClass::MutualFund),
                Candidate::new("Fund Three", "F3", AssetClass::MutualFund),
            ],
            vec![Candidate::new("Index ETF", "INDEX", AssetClass::Etf)],
        ))
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            delay: Duration::from_millis(1),
            attempt_timeout: Duration::from_millis(100),
        }
    }

    fn engine_with(
        model: Arc<dyn PredictionModel>,
        quotes: FixedQuotes,
        navs: FixedNavs,
    ) -> AdvisorEngine {
        AdvisorEngine::new(
            PredictionClient::with_policy(model, fast_policy()),
            Arc::new(quotes),
            Arc::new(navs),
        )
        .with_universe(test_universe())
    }

    fn request(amount: f64) -> AllocationRequest {
        AllocationRequest {
            amount,
            income: 50000.0,
            risk: RiskTier::Medium,
            horizon_years: 1,
            preferred_sectors: vec!["IT".to_string()],
            preferred_types: vec![],
            goal: "wealth".to_string(),
        }
    }

    fn half_stocks_half_funds() -> Arc<dyn PredictionModel> {
        Arc::new(FixedModel {
            prediction: ModelPrediction {
                expected_return: 12.0,
                allocations: Allocations {
                    stocks: 50.0,
                    etf: 0.0,
                    mutualfund: 50.0,
                },
            },
        })
    }

    #[tokio::test]
    async fn test_end_to_end_conservation_and_projection() {
        let engine = engine_with(
            half_stocks_half_funds(),
            FixedQuotes::new(&[("ALPHA", 301.0), ("BETA", 150.0), ("GAMMA", 999.0)]),
            FixedNavs::new(&[("F1", 50.0), ("F2", 80.0), ("F3", 25.0)]),
        );

        let rec = engine.recommend(request(100000.0)).await.unwrap();

        // conservation within the ±1 rounding epsilon
        assert!((rec.total_invested + rec.uninvested_amount - 100000).abs() <= 1);

        // stock orders: non-negative integer quantities, never over budget
        let stock_total: f64 = rec
            .recommendations
            .stocks
            .iter()
            .map(|o| o.amount.as_major())
            .sum();
        assert!(stock_total <= 50000.0);

        // the projection applies the annuity-due formula to the invested total
        let expected_fv =
            annuity_due_future_value(rec.total_invested as f64, 0.01, 12);
        assert!((rec.future_value as f64 - expected_fv).abs() <= 1.0);
        assert_eq!(rec.profit, rec.future_value - rec.total_principal);
        assert_eq!(rec.expected_return, 12.0);
    }

    #[tokio::test]
    async fn test_prediction_failure_is_fatal() {
        let engine = engine_with(
            Arc::new(FailingModel),
            FixedQuotes::new(&[("ALPHA", 100.0)]),
            FixedNavs::new(&[("F1", 50.0)]),
        );

        let err = engine.recommend(request(10000.0)).await.unwrap_err();
        assert!(matches!(err, AdvisorError::PredictionUnavailable(_)));
    }

    #[tokio::test]
    async fn test_all_quotes_failing_degrades_to_uninvested() {
        // No stock is priced: the stock budget flows into uninvested and the
        // reconciler pushes what fits into the funds.
        let engine = engine_with(
            half_stocks_half_funds(),
            FixedQuotes::new(&[]),
            FixedNavs::new(&[("F1", 50.0), ("F2", 80.0), ("F3", 25.0)]),
        );

        let rec = engine.recommend(request(30000.0)).await.unwrap();

        assert!(rec.recommendations.stocks.is_empty());
        assert!(!rec.recommendations.mutualfund.is_empty());
        // fund orders absorbed the stock budget in whole units
        assert!(rec.uninvested_amount < 500);
        assert!((rec.total_invested + rec.uninvested_amount - 30000).abs() <= 1);
    }

    #[tokio::test]
    async fn test_every_resolver_failing_leaves_everything_uninvested() {
        let engine = engine_with(
            half_stocks_half_funds(),
            FixedQuotes::new(&[]),
            FixedNavs::new(&[]),
        );

        let rec = engine.recommend(request(20000.0)).await.unwrap();

        assert!(rec.recommendations.stocks.is_empty());
        assert!(rec.recommendations.etf.is_empty());
        assert!(rec.recommendations.mutualfund.is_empty());
        assert_eq!(rec.total_invested, 0);
        assert_eq!(rec.uninvested_amount, 20000);
        assert_eq!(rec.total_principal, 0);
        assert_eq!(rec.future_value, 0);
    }

    #[tokio::test]
    async fn test_invalid_requests_rejected() {
        let engine = engine_with(
            half_stocks_half_funds(),
            FixedQuotes::new(&[]),
            FixedNavs::new(&[]),
        );

        let mut bad_amount = request(0.0);
        bad_amount.amount = 0.0;
        assert!(matches!(
            engine.recommend(bad_amount).await.unwrap_err(),
            AdvisorError::InvalidRequest(_)
        ));

        let mut bad_horizon = request(1000.0);
        bad_horizon.horizon_years = 0;
        assert!(matches!(
            engine.recommend(bad_horizon).await.unwrap_err(),
            AdvisorError::InvalidRequest(_)
        ));
    }

    #[tokio::test]
    async fn test_fund_amounts_are_unit_multiples() {
        let engine = engine_with(
            half_stocks_half_funds(),
            FixedQuotes::new(&[("ALPHA", 301.0)]),
            FixedNavs::new(&[("F1", 50.0), ("F2", 80.0), ("F3", 25.0)]),
        );

        let rec = engine.recommend(request(100000.0)).await.unwrap();

        for order in &rec.recommendations.mutualfund {
            assert_eq!(order.amount.minor() % DEFAULT_FUND_UNIT.minor(), 0);
        }
    }
}
