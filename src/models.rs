//! Core data models for the allocation & projection engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::money::Money;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// Instrument class, serialized with the original wire tags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AssetClass {
    #[serde(rename = "stocks", alias = "Stocks")]
    Stocks,
    #[serde(rename = "etf", alias = "ETFs")]
    Etf,
    #[serde(rename = "mutualfund", alias = "Mutual Funds")]
    MutualFund,
}

impl AssetClass {
    pub fn tag(&self) -> &'static str {
        match self {
            AssetClass::Stocks => "stocks",
            AssetClass::Etf => "etf",
            AssetClass::MutualFund => "mutualfund",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

//
// ================= Request =================
//

/// Immutable per-request input. Field aliases match the original wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    #[serde(alias = "amountToInvest")]
    pub amount: f64,
    #[serde(default)]
    pub income: f64,
    pub risk: RiskTier,
    #[serde(alias = "horizon")]
    pub horizon_years: u32,
    #[serde(default, alias = "preferredSectors")]
    pub preferred_sectors: Vec<String>,
    #[serde(default, alias = "preferredTypes")]
    pub preferred_types: Vec<AssetClass>,
    #[serde(default)]
    pub goal: String,
}

//
// ================= Prediction =================
//

/// Target percent per class, 0–100. Not guaranteed to sum to 100.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Allocations {
    #[serde(default)]
    pub stocks: f64,
    #[serde(default)]
    pub etf: f64,
    #[serde(default)]
    pub mutualfund: f64,
}

impl Allocations {
    pub fn percent_for(&self, class: AssetClass) -> f64 {
        match class {
            AssetClass::Stocks => self.stocks,
            AssetClass::Etf => self.etf,
            AssetClass::MutualFund => self.mutualfund,
        }
    }
}

/// Produced once per request by the prediction client; read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPrediction {
    pub expected_return: f64,
    pub allocations: Allocations,
}

//
// ================= Candidates =================
//

/// An instrument eligible for selection, before price resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub symbol: String,
    pub class: AssetClass,
}

impl Candidate {
    pub fn new(name: &str, symbol: &str, class: AssetClass) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            class,
        }
    }
}

/// Candidate with its resolved quote/NAV. `price` is absent when the
/// resolver failed or returned a non-positive value.
#[derive(Debug, Clone)]
pub struct PricedCandidate {
    pub candidate: Candidate,
    pub price: Option<f64>,
}

//
// ================= Orders =================
//

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EquityOrder {
    pub name: String,
    pub symbol: String,
    pub price: Money,
    pub quantity: u64,
    pub amount: Money,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FundOrder {
    pub name: String,
    /// Latest NAV at which the units were computed.
    pub price: Money,
    pub units: f64,
    pub amount: Money,
}

//
// ================= Plans =================
//

/// One class's budget slice and the orders carved out of it.
#[derive(Debug, Clone, Serialize)]
pub struct ClassPlan<O> {
    pub budget: Money,
    pub orders: Vec<O>,
    pub invested: Money,
}

impl<O> ClassPlan<O> {
    /// Empty plan: the entire budget stays uninvested.
    pub fn empty(budget: Money) -> Self {
        Self {
            budget,
            orders: Vec::new(),
            invested: Money::ZERO,
        }
    }

    pub fn leftover(&self) -> Money {
        self.budget - self.invested
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioPlan {
    pub stocks: ClassPlan<EquityOrder>,
    pub etf: ClassPlan<EquityOrder>,
    pub funds: ClassPlan<FundOrder>,
}

impl PortfolioPlan {
    pub fn total_invested(&self) -> Money {
        self.stocks.invested + self.etf.invested + self.funds.invested
    }
}

//
// ================= Projection =================
//

/// Whole-unit outputs of the growth projector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProjectionResult {
    pub total_principal: i64,
    pub profit: i64,
    pub future_value: i64,
    pub expected_return: f64,
}

//
// ================= Final Result =================
//

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AllocationSlice {
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationBreakdown {
    pub stocks: AllocationSlice,
    pub etf: AllocationSlice,
    pub mutualfund: AllocationSlice,
}

impl From<Allocations> for AllocationBreakdown {
    fn from(a: Allocations) -> Self {
        Self {
            stocks: AllocationSlice { percent: a.stocks },
            etf: AllocationSlice { percent: a.etf },
            mutualfund: AllocationSlice { percent: a.mutualfund },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationSet {
    pub stocks: Vec<EquityOrder>,
    pub etf: Vec<EquityOrder>,
    pub mutualfund: Vec<FundOrder>,
}

/// Final result returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub recommendation_id: Uuid,
    pub expected_return: f64,
    pub allocations: AllocationBreakdown,
    pub recommendations: RecommendationSet,
    pub total_principal: i64,
    pub profit: i64,
    pub future_value: i64,
    pub total_invested: i64,
    pub uninvested_amount: i64,
    pub created_at: DateTime<Utc>,
}
