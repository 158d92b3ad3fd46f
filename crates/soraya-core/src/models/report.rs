use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::assessment::RiskCategory;
use super::finding::RiskFactorFinding;

/// The full view-model bundle produced by the report renderer. The
/// frontend and the document exporter both consume this verbatim; there
/// is no second extraction path from raw result data.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RenderedReport {
    pub title: String,
    pub generated_on: jiff::civil::Date,
    pub patient: PatientPanel,
    pub score: ScorePanel,
    pub interpretation: String,
    pub findings: Vec<RiskFactorFinding>,
    pub recommendations: Vec<RenderedRecommendation>,
    pub disclaimer: String,
    pub model_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientPanel {
    pub age: u32,
    pub race_label: String,
    pub projection_age_5year: u32,
    pub projection_age_lifetime: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScorePanel {
    pub category: RiskCategory,
    /// Category label verbatim from the service; drives the badge text.
    pub category_label: String,
    pub accent_hex: String,
    /// Rounded percent points; the headline counter animates toward this.
    pub absolute_5year_percent: f64,
    pub absolute_5year: String,
    pub average_5year: String,
    pub relative_5year: String,
    pub lifetime: Option<LifetimeFigures>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LifetimeFigures {
    pub absolute: String,
    pub average: String,
    pub relative: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RenderedRecommendation {
    pub text: String,
    pub priority: RecommendationPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RecommendationPriority {
    Routine,
    High,
}
