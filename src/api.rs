//! REST API server for the allocation & projection engine
//!
//! Exposes the advisor via HTTP endpoints. Degraded market data never
//! surfaces as an error here — only a failed prediction (502) or an
//! invalid request (400) do.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::advisor::AdvisorEngine;
use crate::error::AdvisorError;
use crate::models::{AllocationRequest, AssetClass, RiskTier};

/// =============================
/// Request Model
/// =============================

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(alias = "amountToInvest")]
    pub amount: f64,
    #[serde(default)]
    pub income: f64,
    pub risk: String,
    #[serde(alias = "horizon")]
    pub horizon_years: u32,
    #[serde(default, alias = "preferredSectors")]
    pub preferred_sectors: Vec<String>,
    #[serde(default, alias = "preferredTypes")]
    pub preferred_types: Vec<AssetClass>,
    #[serde(default)]
    pub goal: String,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<AdvisorEngine>,
}

/// =============================
/// Helpers — String → Enum Parsing
/// =============================

fn parse_risk(r: &str) -> RiskTier {
    match r.to_lowercase().as_str() {
        "low" => RiskTier::Low,
        "medium" | "moderate" => RiskTier::Medium,
        "high" => RiskTier::High,
        _ => RiskTier::Medium,
    }
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Recommendation Endpoint
/// =============================

async fn recommend(
    State(state): State<ApiState>,
    Json(req): Json<RecommendRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    info!(
        amount = req.amount,
        risk = %req.risk,
        horizon_years = req.horizon_years,
        "Received recommendation request"
    );

    let request = AllocationRequest {
        amount: req.amount,
        income: req.income,
        risk: parse_risk(&req.risk),
        horizon_years: req.horizon_years,
        preferred_sectors: req.preferred_sectors,
        preferred_types: req.preferred_types,
        goal: req.goal,
    };

    match state.engine.recommend(request).await {
        Ok(recommendation) => (StatusCode::OK, Json(ApiResponse::success(recommendation))),
        Err(AdvisorError::InvalidRequest(msg)) => {
            (StatusCode::BAD_REQUEST, Json(ApiResponse::error(msg)))
        }
        Err(e) => {
            // Generic message to the caller; upstream detail stays in the logs.
            error!(error = %e, "Recommendation failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::error(
                    "Recommendation service temporarily unavailable".to_string(),
                )),
            )
        }
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(engine: Arc<AdvisorEngine>) -> Router {
    let state = ApiState { engine };

    Router::new()
        .route("/health", axum::routing::get(health))
        .route("/api/recommend", post(recommend))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    engine: Arc<AdvisorEngine>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(engine);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
