//! Portfolio Advisor — Allocation & Projection Engine
//!
//! Turns model-predicted percentage allocations into concrete buy orders:
//! - Resolves live prices/NAVs for candidate instruments (partial failure tolerated)
//! - Splits each class budget into per-instrument orders under rounding and lot constraints
//! - Reconciles unspent budget into the pooled-fund class
//! - Projects long-horizon growth via recurring-investment compounding
//!
//! PIPELINE:
//! RECEIVED → PREDICTING → PLANNING → RECONCILING → PROJECTING → COMPLETE

pub mod advisor;
pub mod api;
pub mod error;
pub mod market;
pub mod models;
pub mod money;
pub mod planner;
pub mod prediction;
pub mod projection;
pub mod reconcile;
pub mod universe;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use money::Money;
