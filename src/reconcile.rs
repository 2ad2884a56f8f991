//! Leftover reconciler
//!
//! Runs strictly after all three planners complete. Pools every class's
//! unspent budget (plus any shortfall from percents not summing to 100)
//! and folds what fits back into the pooled-fund class: funds are the only
//! class able to absorb arbitrary leftover in fixed unit increments, while
//! equity/ETF leftover sits below purchase granularity.

use tracing::debug;

use crate::models::PortfolioPlan;
use crate::money::{round3, Money};

/// Fold reconcilable leftover into the first fund order.
/// Returns the final uninvested amount; afterwards
/// `plan.total_invested() + uninvested == request_amount` exactly.
pub fn reconcile(plan: &mut PortfolioPlan, request_amount: Money, unit: Money) -> Money {
    let mut uninvested = request_amount - plan.total_invested();

    if uninvested >= unit {
        if let Some(order) = plan.funds.orders.first_mut() {
            let extra = uninvested.floor_to(unit);
            let nav = order.price.as_major();

            order.amount += extra;
            order.units = round3(order.units + extra.as_major() / nav);
            plan.funds.invested += extra;
            uninvested -= extra;

            debug!(extra = %extra, uninvested = %uninvested, "Leftover folded into first fund order");
        }
    }

    uninvested
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassPlan, FundOrder};
    use crate::planner::DEFAULT_FUND_UNIT;

    fn plan_with_fund_order(invested: f64, nav: f64) -> PortfolioPlan {
        let amount = Money::from_major(invested);
        PortfolioPlan {
            stocks: ClassPlan::empty(Money::ZERO),
            etf: ClassPlan::empty(Money::ZERO),
            funds: ClassPlan {
                budget: amount,
                orders: vec![FundOrder {
                    name: "F1".to_string(),
                    price: Money::from_major(nav),
                    units: round3(invested / nav),
                    amount,
                }],
                invested: amount,
            },
        }
    }

    #[test]
    fn test_leftover_folds_into_first_fund_order() {
        let mut plan = plan_with_fund_order(3500.0, 50.0);
        let request = Money::from_major(4734.0); // 1234 uninvested

        let uninvested = reconcile(&mut plan, request, DEFAULT_FUND_UNIT);

        assert_eq!(uninvested, Money::from_major(234.0));
        assert_eq!(plan.funds.orders[0].amount, Money::from_major(4500.0));
        assert_eq!(plan.funds.orders[0].units, round3(4500.0 / 50.0));
        assert_eq!(plan.total_invested() + uninvested, request);
    }

    #[test]
    fn test_leftover_below_unit_is_untouched() {
        let mut plan = plan_with_fund_order(3500.0, 50.0);
        let request = Money::from_major(3999.0);

        let uninvested = reconcile(&mut plan, request, DEFAULT_FUND_UNIT);

        assert_eq!(uninvested, Money::from_major(499.0));
        assert_eq!(plan.funds.orders[0].amount, Money::from_major(3500.0));
    }

    #[test]
    fn test_no_fund_orders_means_no_redistribution() {
        let mut plan = PortfolioPlan {
            stocks: ClassPlan::empty(Money::from_major(5000.0)),
            etf: ClassPlan::empty(Money::ZERO),
            funds: ClassPlan::empty(Money::from_major(5000.0)),
        };
        let request = Money::from_major(10000.0);

        let uninvested = reconcile(&mut plan, request, DEFAULT_FUND_UNIT);

        assert_eq!(uninvested, request);
        assert!(plan.funds.orders.is_empty());
    }

    #[test]
    fn test_absorbs_percent_shortfall() {
        // Model percents summing short of 100 leave slack beyond the class
        // leftovers; the reconciler treats it the same way.
        let mut plan = plan_with_fund_order(3000.0, 25.0);
        let request = Money::from_major(10000.0);

        let uninvested = reconcile(&mut plan, request, DEFAULT_FUND_UNIT);

        assert_eq!(uninvested, Money::ZERO);
        assert_eq!(plan.funds.orders[0].amount, Money::from_major(10000.0));
        assert_eq!(plan.total_invested(), request);
    }
}
