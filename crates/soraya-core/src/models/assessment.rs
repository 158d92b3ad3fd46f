use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Successful payload from `POST /api/gail/calculate`. Field names track
/// the service contract exactly; immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskAssessmentResult {
    pub success: bool,
    pub message: String,
    pub patient_info: PatientInfo,
    pub risk_assessment: RiskAssessment,
    pub disclaimer: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientInfo {
    pub age: u32,
    pub race_name_fa: String,
    pub projection_age_5year: u32,
    pub projection_age_lifetime: u32,
}

/// Risks are probabilities in [0, 1]; the lifetime horizon is absent for
/// patients the model cannot project (age > 75).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskAssessment {
    pub absolute_risk_5year: f64,
    pub average_risk_5year: f64,
    pub relative_risk_5year: f64,
    #[serde(default)]
    pub absolute_risk_lifetime: Option<f64>,
    #[serde(default)]
    pub average_risk_lifetime: Option<f64>,
    #[serde(default)]
    pub relative_risk_lifetime: Option<f64>,
    pub risk_category: String,
    pub interpretation_fa: String,
    pub recommendations_fa: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    /// Maps the service's category label. The deployed service emits the
    /// Persian literals; English labels are accepted for forward
    /// compatibility. Unrecognized labels return None and the caller
    /// decides the fallback.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "پایین" => Some(Self::Low),
            "متوسط" => Some(Self::Medium),
            "بالا" => Some(Self::High),
            other => match other.to_ascii_lowercase().as_str() {
                "low" => Some(Self::Low),
                "medium" | "moderate" => Some(Self::Medium),
                "high" => Some(Self::High),
                _ => None,
            },
        }
    }

    pub fn accent_hex(self) -> &'static str {
        match self {
            Self::Low => "#2e7d32",
            Self::Medium => "#f9a825",
            Self::High => "#c62828",
        }
    }
}
