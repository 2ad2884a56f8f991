//! HTTP client for the external prediction service
//!
//! POSTs the request to `{base_url}/predict` and decodes the target
//! allocation percentages plus expected annual return.

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info};

use super::PredictionModel;
use crate::error::AdvisorError;
use crate::models::{AllocationRequest, AssetClass, ModelPrediction};
use crate::Result;

pub struct HttpPredictionModel {
    client: Client,
    base_url: String,
}

impl HttpPredictionModel {
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Wire format of the prediction service request.
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    #[serde(rename = "amountToInvest")]
    amount_to_invest: f64,
    income: f64,
    risk: String,
    horizon: u32,
    goal: &'a str,
    #[serde(rename = "preferredTypes")]
    preferred_types: &'a [AssetClass],
}

impl<'a> From<&'a AllocationRequest> for PredictRequest<'a> {
    fn from(request: &'a AllocationRequest) -> Self {
        Self {
            amount_to_invest: request.amount,
            income: request.income,
            risk: request.risk.to_string(),
            horizon: request.horizon_years,
            goal: &request.goal,
            preferred_types: &request.preferred_types,
        }
    }
}

#[async_trait::async_trait]
impl PredictionModel for HttpPredictionModel {
    async fn predict(&self, request: &AllocationRequest) -> Result<ModelPrediction> {
        let url = format!("{}/predict", self.base_url);
        let body = PredictRequest::from(request);

        info!("Calling prediction service");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Prediction request failed: {}", e);
                AdvisorError::PredictionUnavailable(format!("request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Prediction service error response: {}", error_text);
            return Err(AdvisorError::PredictionUnavailable(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let prediction: ModelPrediction = response.json().await.map_err(|e| {
            error!("Failed to parse prediction response: {}", e);
            AdvisorError::PredictionUnavailable(format!("parse error: {}", e))
        })?;

        info!(
            expected_return = prediction.expected_return,
            "Prediction received"
        );

        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskTier;

    #[test]
    fn test_request_serialization_uses_wire_names() {
        let request = AllocationRequest {
            amount: 100000.0,
            income: 50000.0,
            risk: RiskTier::Medium,
            horizon_years: 5,
            preferred_sectors: vec!["IT".to_string()],
            preferred_types: vec![AssetClass::Stocks, AssetClass::Etf],
            goal: "retirement".to_string(),
        };

        let json = serde_json::to_value(PredictRequest::from(&request)).unwrap();
        assert_eq!(json["amountToInvest"], 100000.0);
        assert_eq!(json["risk"], "medium");
        assert_eq!(json["horizon"], 5);
        assert_eq!(json["preferredTypes"][0], "stocks");
    }

    #[test]
    fn test_prediction_response_parsing() {
        let prediction: ModelPrediction = serde_json::from_str(
            r#"{"expected_return":12.4,"allocations":{"stocks":48.5,"mutualfund":31.5,"etf":20.0}}"#,
        )
        .unwrap();

        assert_eq!(prediction.expected_return, 12.4);
        assert_eq!(prediction.allocations.stocks, 48.5);
        assert_eq!(prediction.allocations.mutualfund, 31.5);
    }
}
