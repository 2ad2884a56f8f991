//! Class planners
//!
//! Each planner takes one class's budget slice and a candidate list,
//! resolves prices/NAVs concurrently, and carves the budget into orders.
//! The three planners touch disjoint budgets and share no state.

use crate::models::Allocations;
use crate::money::Money;

pub mod equity;
pub mod fund;

pub use equity::plan_equities;
pub use fund::plan_funds;

/// Default minimum incremental amount for a pooled-fund order (₹500).
pub const DEFAULT_FUND_UNIT: Money = Money::from_minor(500_00);

/// Slice the investable amount into per-class budgets by target percent.
/// Percents are clamped to 0–100 and need not sum to 100: a shortfall
/// surfaces later as uninvested amount, and an overshoot is scaled back
/// so the three budgets can never exceed the investable amount.
pub fn split_budgets(amount: Money, allocations: &Allocations) -> (Money, Money, Money) {
    let stocks = allocations.stocks.clamp(0.0, 100.0);
    let etf = allocations.etf.clamp(0.0, 100.0);
    let mutualfund = allocations.mutualfund.clamp(0.0, 100.0);

    let total = stocks + etf + mutualfund;
    let scale = if total > 100.0 { 100.0 / total } else { 1.0 };

    let slice =
        |pct: f64| Money::from_minor((amount.minor() as f64 * pct * scale / 100.0).round() as i64);

    (slice(stocks), slice(etf), slice(mutualfund))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_budgets() {
        let allocations = Allocations {
            stocks: 50.0,
            etf: 0.0,
            mutualfund: 50.0,
        };
        let (stocks, etf, funds) = split_budgets(Money::from_major(100000.0), &allocations);

        assert_eq!(stocks, Money::from_major(50000.0));
        assert_eq!(etf, Money::ZERO);
        assert_eq!(funds, Money::from_major(50000.0));
    }

    #[test]
    fn test_split_budgets_clamps_negative_percents() {
        let allocations = Allocations {
            stocks: -20.0,
            etf: 40.0,
            mutualfund: 33.33,
        };
        let (stocks, etf, funds) = split_budgets(Money::from_major(10000.0), &allocations);

        assert_eq!(stocks, Money::ZERO);
        assert_eq!(etf, Money::from_major(4000.0));
        assert_eq!(funds, Money::from_major(3333.0));
    }

    #[test]
    fn test_split_budgets_scales_down_overshooting_percents() {
        let allocations = Allocations {
            stocks: 100.0,
            etf: 100.0,
            mutualfund: 0.0,
        };
        let (stocks, etf, funds) = split_budgets(Money::from_major(10000.0), &allocations);

        assert_eq!(stocks, Money::from_major(5000.0));
        assert_eq!(etf, Money::from_major(5000.0));
        assert_eq!(funds, Money::ZERO);
    }
}
