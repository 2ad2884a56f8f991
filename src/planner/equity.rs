//! Equity / ETF planner
//!
//! Equal-split, two-pass whole-share allocation. The same algorithm covers
//! equities and ETFs; they differ only in candidate universe.

use tracing::debug;

use crate::market::{resolve_quotes, QuoteResolver};
use crate::models::{Candidate, ClassPlan, EquityOrder};
use crate::money::Money;

/// Plan whole-share buy orders for one class.
///
/// Candidates whose price cannot be resolved are dropped; if none remain
/// the full budget stays uninvested. The first pass gives every priced
/// candidate an equal share floored to whole units; the second pass walks
/// the same order once more, converting the pooled rounding remainder into
/// extra units wherever a price still fits. One extra pass suffices: the
/// remainder it recovers is smaller than the per-instrument share.
pub async fn plan_equities(
    budget: Money,
    candidates: Vec<Candidate>,
    quotes: &dyn QuoteResolver,
) -> ClassPlan<EquityOrder> {
    if !budget.is_positive() || candidates.is_empty() {
        return ClassPlan::empty(budget);
    }

    let priced = resolve_quotes(quotes, candidates).await;
    let valid: Vec<(Candidate, Money)> = priced
        .into_iter()
        .filter_map(|p| p.price.map(|price| (p.candidate, Money::from_major(price))))
        .filter(|(_, price)| price.is_positive())
        .collect();

    if valid.is_empty() {
        debug!("No priced candidates; budget stays uninvested");
        return ClassPlan::empty(budget);
    }

    let per_instrument = budget.split(valid.len() as u64);
    let mut orders: Vec<Option<EquityOrder>> = (0..valid.len()).map(|_| None).collect();
    let mut invested = Money::ZERO;

    // First pass: equal share per instrument, floored to whole units.
    for (slot, (candidate, price)) in orders.iter_mut().zip(valid.iter()) {
        let quantity = per_instrument.units_of(*price);
        if quantity == 0 {
            continue;
        }
        let amount = price.times(quantity);
        *slot = Some(EquityOrder {
            name: candidate.name.clone(),
            symbol: candidate.symbol.clone(),
            price: *price,
            quantity,
            amount,
        });
        invested += amount;
    }

    // Second pass: redistribute the pooled remainder in the same stable order.
    let mut remaining = budget - invested;
    for (slot, (candidate, price)) in orders.iter_mut().zip(valid.iter()) {
        if *price > remaining {
            continue;
        }
        let extra = remaining.units_of(*price);
        if extra == 0 {
            continue;
        }
        let amount = price.times(extra);
        match slot {
            Some(order) => {
                order.quantity += extra;
                order.amount += amount;
            }
            None => {
                *slot = Some(EquityOrder {
                    name: candidate.name.clone(),
                    symbol: candidate.symbol.clone(),
                    price: *price,
                    quantity: extra,
                    amount,
                });
            }
        }
        invested += amount;
        remaining -= amount;
    }

    debug!(
        budget = %budget,
        invested = %invested,
        orders = orders.iter().flatten().count(),
        "Equity plan complete"
    );

    ClassPlan {
        budget,
        orders: orders.into_iter().flatten().collect(),
        invested,
    }
}
