//! Growth projector
//!
//! Projects long-horizon compounding growth of the actually-invested
//! amount, treated as an equivalent flat monthly contribution (annuity-due
//! recurring-deposit formula). Internal computation stays in full f64
//! precision; outputs round to whole currency units at this boundary only.

use crate::models::ProjectionResult;
use crate::money::Money;

/// Future value of a fixed monthly contribution compounding at
/// `monthly_rate`, each contribution earning interest from deposit.
/// The zero-rate limit degenerates to simple accumulation.
pub fn annuity_due_future_value(monthly: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return monthly * months as f64;
    }
    monthly * (((1.0 + monthly_rate).powi(months as i32) - 1.0) / monthly_rate)
        * (1.0 + monthly_rate)
}

/// Project principal growth over the horizon.
pub fn project(principal: Money, expected_return_pct: f64, horizon_years: u32) -> ProjectionResult {
    let months = horizon_years * 12;
    let monthly_rate = expected_return_pct / 100.0 / 12.0;
    let monthly = principal.as_major();

    let future_value = annuity_due_future_value(monthly, monthly_rate, months).round() as i64;
    let total_principal = (monthly * months as f64).round() as i64;

    // profit derives from the rounded figures so the three reported
    // numbers always add up exactly
    ProjectionResult {
        total_principal,
        profit: future_value - total_principal,
        future_value,
        expected_return: expected_return_pct,
    }
}
