//! Pooled-fund planner
//!
//! Fund purchases are quantized to a minimum unit size (default ₹500):
//! each fund's target is the nearest unit multiple of its equal share,
//! clipped so the running total never exceeds the budget.

use tracing::debug;

use crate::market::{resolve_navs, NavResolver};
use crate::models::{Candidate, ClassPlan, FundOrder};
use crate::money::{round3, Money};

/// Plan unit-quantized fund orders for the pooled-fund class.
///
/// Funds with no resolvable NAV are dropped. Each remaining fund targets
/// `max(unit, round(share/unit)*unit)`; walking in order, a target that
/// would overshoot the budget is clipped to the largest unit multiple that
/// still fits, and skipped entirely once less than one unit remains.
pub async fn plan_funds(
    budget: Money,
    candidates: Vec<Candidate>,
    navs: &dyn NavResolver,
    unit: Money,
) -> ClassPlan<FundOrder> {
    if !budget.is_positive() || candidates.is_empty() {
        return ClassPlan::empty(budget);
    }

    let priced = resolve_navs(navs, candidates).await;
    let valid: Vec<(Candidate, f64)> = priced
        .into_iter()
        .filter_map(|p| p.price.map(|nav| (p.candidate, nav)))
        .collect();

    if valid.is_empty() {
        debug!("No funds with a resolvable NAV; budget stays uninvested");
        return ClassPlan::empty(budget);
    }

    let share = budget.split(valid.len() as u64);
    let target = share.round_to(unit).max(unit);

    let mut orders = Vec::with_capacity(valid.len());
    let mut invested = Money::ZERO;

    for (candidate, nav) in valid {
        let remaining = budget - invested;
        let amount = if target > remaining {
            remaining.floor_to(unit)
        } else {
            target
        };

        if amount < unit {
            continue;
        }

        orders.push(FundOrder {
            name: candidate.name,
            price: Money::from_major(nav),
            units: round3(amount.as_major() / nav),
            amount,
        });
        invested += amount;
    }

    debug!(
        budget = %budget,
        invested = %invested,
        orders = orders.len(),
        "Fund plan complete"
    );

    ClassPlan {
        budget,
        orders,
        invested,
    }
}
