//! HTTP client for the Gail risk service.
//!
//! One POST per submission, no internal retry: a failed attempt returns
//! to an interactive wizard and retry is the user's call. Error bodies
//! are mined for the most specific message the service offers —
//! FastAPI emits three shapes (`detail` as a string, `detail.error`
//! from the service's own handlers, and a `detail` array from request
//! validation) and all three are handled before falling back to a
//! generic line.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use soraya_core::models::assessment::RiskAssessmentResult;
use soraya_core::models::form::FormSnapshot;

use crate::error::{GatewayError, GENERIC_SERVICE_MESSAGE};
use crate::request::build_request;

// ── Diagnostics payloads ─────────────────────────────────────────────────────

/// `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub calculator_ready: bool,
}

/// `GET /api/gail/info`, reduced to the fields worth logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_name: String,
    pub version: String,
}

/// `GET /api/gail/races`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceCatalog {
    pub main_races: Vec<RaceEntry>,
    pub asian_subraces: Vec<RaceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceEntry {
    pub code: u32,
    pub name: String,
    pub name_fa: String,
}

// ── Client ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GailClient {
    http: reqwest::Client,
    base_url: String,
}

impl GailClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Normalize the snapshot and submit it. Exactly one attempt.
    pub async fn submit(
        &self,
        snapshot: &FormSnapshot,
    ) -> Result<RiskAssessmentResult, GatewayError> {
        let request = build_request(snapshot)?;
        let url = format!("{}/api/gail/calculate", self.base_url);

        info!(age = request.age, race = request.race, "submitting risk calculation");

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Service {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        let result: RiskAssessmentResult = response
            .json()
            .await
            .map_err(|e| GatewayError::ResponseParse(e.to_string()))?;

        info!(
            category = %result.risk_assessment.risk_category,
            relative_risk = result.risk_assessment.relative_risk_5year,
            "risk calculation received"
        );

        Ok(result)
    }

    // Startup diagnostics. Failures here are logged by the caller and
    // never block the intake.

    pub async fn health(&self) -> Result<HealthStatus, GatewayError> {
        self.get_json(&format!("{}/api/health", self.base_url)).await
    }

    pub async fn model_info(&self) -> Result<ModelInfo, GatewayError> {
        self.get_json(&format!("{}/api/gail/info", self.base_url)).await
    }

    pub async fn races(&self) -> Result<RaceCatalog, GatewayError> {
        self.get_json(&format!("{}/api/gail/races", self.base_url)).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, GatewayError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Service {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::ResponseParse(e.to_string()))
    }
}

// ── Error-body mining ────────────────────────────────────────────────────────

/// Pull the most specific human-readable message out of a non-2xx body.
pub fn extract_error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return GENERIC_SERVICE_MESSAGE.to_string();
    };

    if let Some(detail) = json.get("detail") {
        if let Some(text) = detail.as_str() {
            return text.to_string();
        }
        if let Some(text) = detail.get("error").and_then(|e| e.as_str()) {
            return text.to_string();
        }
        if let Some(text) = detail
            .as_array()
            .and_then(|entries| entries.first())
            .and_then(|entry| entry.get("msg"))
            .and_then(|msg| msg.as_str())
        {
            return text.to_string();
        }
    }

    if let Some(text) = json.get("error").and_then(|e| e.as_str()) {
        return text.to_string();
    }

    GENERIC_SERVICE_MESSAGE.to_string()
}
