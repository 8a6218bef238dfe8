//! Risk-assessment endpoints consumed by the page around the map core.
//!
//! The coordinator never calls these; they only define the shape of the
//! data the page passes down alongside the county selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::communities::FetchError;

#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessmentRequest {
    pub location: String,
    pub selected_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiskAssessmentOutput {
    pub risk_score: i32,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub map_data: Option<Value>,
    #[serde(default)]
    pub comparison_data: Option<Value>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictorRequest {
    pub community_name_part: String,
    pub county_name_part: String,
    pub state_abbr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictorOutput {
    #[serde(default)]
    pub bp_prediction: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub levels_used: Vec<String>,
    #[serde(default)]
    pub individual_predictions: Option<BTreeMap<String, Option<f64>>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub input_latitude: Option<f64>,
    #[serde(default)]
    pub input_longitude: Option<f64>,
    #[serde(default)]
    pub risk_factors_summary: Option<String>,
    #[serde(default)]
    pub map_data_details: Option<Value>,
}

/// Client for the risk-score endpoints.
pub struct RiskClient {
    base_url: String,
    client: reqwest::Client,
}

impl RiskClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    pub async fn assess_risk(
        &self,
        request: &RiskAssessmentRequest,
    ) -> Result<RiskAssessmentOutput, FetchError> {
        self.post_json(&self.url("/api/v1/assessment/assess-risk"), request)
            .await
    }

    pub async fn predict_bp_risk(
        &self,
        request: &PredictorRequest,
    ) -> Result<PredictorOutput, FetchError> {
        let output: PredictorOutput = self
            .post_json(&self.url("/api/v1/predictor/predict-bp-risk"), request)
            .await?;

        // The predictor reports failures inside a 200 body.
        if let Some(message) = output.error.clone().filter(|m| !m.is_empty()) {
            return Err(FetchError::Payload { message });
        }
        Ok(output)
    }

    async fn post_json<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, FetchError> {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                message: format!("Fetch failed: {e}"),
            })?;

        let status = resp.status();
        if !status.is_success() {
            #[derive(Deserialize)]
            struct ErrorBody {
                #[serde(default)]
                detail: String,
            }
            let detail = resp
                .json::<ErrorBody>()
                .await
                .map(|b| b.detail)
                .unwrap_or_default();
            return Err(FetchError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        resp.json().await.map_err(|e| FetchError::Transport {
            message: format!("Malformed response payload: {e}"),
        })
    }
}
