use portfolio_advisor::{
    advisor::AdvisorEngine,
    api::start_server,
    market::{MfapiNavResolver, YahooQuoteResolver},
    money::Money,
    prediction::{HttpPredictionModel, PredictionClient},
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let ml_server_url = std::env::var("ML_SERVER_URL").unwrap_or_else(|_| {
        eprintln!("⚠️  ML_SERVER_URL not set in .env, defaulting to http://localhost:8000");
        "http://localhost:8000".to_string()
    });

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    let fund_unit = std::env::var("FUND_UNIT_SIZE")
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .map(Money::from_major);

    info!("🚀 Portfolio Advisor - API Server");
    info!("📍 Port: {}", api_port);

    // Create components
    let prediction = PredictionClient::new(Arc::new(HttpPredictionModel::new(ml_server_url)));
    let mut engine = AdvisorEngine::new(
        prediction,
        Arc::new(YahooQuoteResolver::new()),
        Arc::new(MfapiNavResolver::new()),
    );
    if let Some(unit) = fund_unit {
        engine = engine.with_fund_unit(unit);
    }

    info!("✅ Advisor engine initialized");
    info!("📡 Starting API server...");

    // Start API server
    start_server(Arc::new(engine), api_port).await?;

    Ok(())
}
