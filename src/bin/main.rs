//! Offline demo: runs one recommendation against fixed quotes/NAVs and the
//! rule-based model, so the full pipeline can be exercised without any
//! network access.

use portfolio_advisor::{
    advisor::AdvisorEngine,
    market::{FixedNavs, FixedQuotes},
    models::{AllocationRequest, RiskTier},
    prediction::{HeuristicModel, PredictionClient},
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("Portfolio Advisor demo starting");

    // Create components (offline fixtures in place of live feeds)
    let prediction = PredictionClient::new(Arc::new(HeuristicModel));
    let quotes = FixedQuotes::new(&[
        ("TCS.NS", 3512.45),
        ("INFY.NS", 1498.30),
        ("WIPRO.NS", 244.10),
        ("HCLTECH.NS", 1372.00),
        ("TECHM.NS", 1540.75),
        ("NIFTYBEES.NS", 254.12),
        ("JUNIORBEES.NS", 72.88),
        ("BANKBEES.NS", 501.40),
        ("GOLDBEES.NS", 65.23),
        ("MON100.NS", 172.09),
    ]);
    let navs = FixedNavs::new(&[
        ("119598", 81.2543),
        ("120586", 103.41),
        ("118968", 412.778),
        ("120465", 52.1034),
        ("122639", 77.9112),
    ]);

    let engine = AdvisorEngine::new(prediction, Arc::new(quotes), Arc::new(navs));

    // Run a sample request
    let request = AllocationRequest {
        amount: 100000.0,
        income: 75000.0,
        risk: RiskTier::High,
        horizon_years: 8,
        preferred_sectors: vec!["IT".to_string()],
        preferred_types: vec![],
        goal: "wealth".to_string(),
    };

    info!(
        amount = request.amount,
        risk = %request.risk,
        "Running advisor"
    );

    match engine.recommend(request).await {
        Ok(rec) => {
            println!("\n=== RECOMMENDATION {} ===", rec.recommendation_id);
            println!("Expected annual return: {}%", rec.expected_return);

            println!("\nStocks:");
            for order in &rec.recommendations.stocks {
                println!(
                    "  {} ({}) x{} @ {} = {}",
                    order.name, order.symbol, order.quantity, order.price, order.amount
                );
            }
            println!("ETFs:");
            for order in &rec.recommendations.etf {
                println!(
                    "  {} ({}) x{} @ {} = {}",
                    order.name, order.symbol, order.quantity, order.price, order.amount
                );
            }
            println!("Mutual funds:");
            for order in &rec.recommendations.mutualfund {
                println!(
                    "  {} — {:.3} units @ {} = {}",
                    order.name, order.units, order.price, order.amount
                );
            }

            println!("\nTotal invested:   {}", rec.total_invested);
            println!("Uninvested:       {}", rec.uninvested_amount);
            println!("Principal (time): {}", rec.total_principal);
            println!("Future value:     {}", rec.future_value);
            println!("Profit:           {}", rec.profit);
            Ok(())
        }
        Err(e) => {
            eprintln!("Recommendation failed: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}
