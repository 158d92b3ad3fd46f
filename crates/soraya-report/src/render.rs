//! Assembly of the rendered report from a service result and the form
//! snapshot.

use tracing::warn;

use soraya_core::models::assessment::{RiskAssessmentResult, RiskCategory};
use soraya_core::models::form::FormSnapshot;
use soraya_core::models::report::{
    LifetimeFigures, PatientPanel, RecommendationPriority, RenderedRecommendation, RenderedReport,
    ScorePanel,
};

use crate::findings::derive_findings;
use crate::format;

pub const REPORT_TITLE: &str = "Breast Cancer Risk Assessment";

/// Stamped when the service metadata does not carry a model version.
const FALLBACK_MODEL_VERSION: &str = "Gail v2 (BCRA)";

/// Build the full view-model bundle. Never fails: an unrecognized
/// category label degrades to Medium with a warning, and every other
/// input is taken as delivered.
pub fn render(
    result: &RiskAssessmentResult,
    snapshot: &FormSnapshot,
    generated_on: jiff::civil::Date,
) -> RenderedReport {
    let assessment = &result.risk_assessment;

    let category = RiskCategory::from_label(&assessment.risk_category).unwrap_or_else(|| {
        warn!(
            label = %assessment.risk_category,
            "unrecognized risk category label, presenting as medium"
        );
        RiskCategory::Medium
    });

    let lifetime = match (
        assessment.absolute_risk_lifetime,
        assessment.average_risk_lifetime,
        assessment.relative_risk_lifetime,
    ) {
        (Some(absolute), Some(average), Some(relative)) => Some(LifetimeFigures {
            absolute: format::percent(absolute),
            average: format::percent(average),
            relative: format::ratio(relative),
        }),
        _ => None,
    };

    let score = ScorePanel {
        category,
        category_label: assessment.risk_category.clone(),
        accent_hex: category.accent_hex().to_string(),
        absolute_5year_percent: format::percent_points(assessment.absolute_risk_5year),
        absolute_5year: format::percent(assessment.absolute_risk_5year),
        average_5year: format::percent(assessment.average_risk_5year),
        relative_5year: format::ratio(assessment.relative_risk_5year),
        lifetime,
    };

    let patient = PatientPanel {
        age: result.patient_info.age,
        race_label: result.patient_info.race_name_fa.clone(),
        projection_age_5year: result.patient_info.projection_age_5year,
        projection_age_lifetime: result.patient_info.projection_age_lifetime,
    };

    RenderedReport {
        title: REPORT_TITLE.to_string(),
        generated_on,
        patient,
        score,
        interpretation: assessment.interpretation_fa.clone(),
        findings: derive_findings(snapshot),
        recommendations: assessment
            .recommendations_fa
            .iter()
            .map(|text| split_priority_marker(text))
            .collect(),
        disclaimer: result.disclaimer.clone(),
        model_version: model_version(result),
    }
}

/// The service flags urgent recommendations with a leading warning
/// glyph. The marker reclassifies priority and is stripped from the
/// displayed text. Both the emoji form and the bare glyph are handled;
/// the service emits the former.
fn split_priority_marker(text: &str) -> RenderedRecommendation {
    let trimmed = text.trim();
    let stripped = trimmed
        .strip_prefix("⚠️")
        .or_else(|| trimmed.strip_prefix('⚠'));

    match stripped {
        Some(rest) => RenderedRecommendation {
            text: rest.trim_start().to_string(),
            priority: RecommendationPriority::High,
        },
        None => RenderedRecommendation {
            text: trimmed.to_string(),
            priority: RecommendationPriority::Routine,
        },
    }
}

fn model_version(result: &RiskAssessmentResult) -> String {
    result
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.get("model_version"))
        .and_then(|version| version.as_str())
        .unwrap_or(FALLBACK_MODEL_VERSION)
        .to_string()
}
