use jiff::civil::date;

use soraya_core::field_keys as keys;
use soraya_core::models::assessment::{
    PatientInfo, RiskAssessment, RiskAssessmentResult, RiskCategory,
};
use soraya_core::models::form::{FormData, FormSnapshot};
use soraya_core::models::report::RecommendationPriority;
use soraya_report::format;
use soraya_report::render::{render, REPORT_TITLE};

fn snapshot() -> FormSnapshot {
    let mut form = FormData::new();
    form.set(keys::AGE, "52");
    form.set(keys::EVER_HAD_BIOPSY, "no");
    form.set(keys::HAS_ATYPICAL_HYPERPLASIA, "no");
    form.set(keys::AGE_AT_MENARCHE, "13");
    form.set(keys::AGE_AT_FIRST_BIRTH, "25");
    form.set(keys::NUM_FIRST_DEGREE_RELATIVES, "0");
    form.snapshot()
}

fn service_result() -> RiskAssessmentResult {
    RiskAssessmentResult {
        success: true,
        message: "ok".to_string(),
        patient_info: PatientInfo {
            age: 52,
            race_name_fa: "سفیدپوست/سایر".to_string(),
            projection_age_5year: 57,
            projection_age_lifetime: 90,
        },
        risk_assessment: RiskAssessment {
            absolute_risk_5year: 0.0234,
            average_risk_5year: 0.0168,
            relative_risk_5year: 1.2371,
            absolute_risk_lifetime: Some(0.1012),
            average_risk_lifetime: Some(0.0899),
            relative_risk_lifetime: Some(1.1257),
            risk_category: "متوسط".to_string(),
            interpretation_fa: "ریسک شما نزدیک میانگین است".to_string(),
            recommendations_fa: vec![
                "ماموگرافی سالانه طبق نظر پزشک".to_string(),
                "⚠️ مشاوره با متخصص سرطان‌شناسی".to_string(),
            ],
        },
        disclaimer: "این ابزار فقط یک برآورد آماری است".to_string(),
        metadata: Some(serde_json::json!({
            "model_version": "Gail v2 (BCRA)",
            "calculation_date": "2026-08-25T10:30:00Z",
        })),
    }
}

#[test]
fn probabilities_render_as_two_decimal_percentages() {
    let report = render(&service_result(), &snapshot(), date(2026, 8, 25));

    assert_eq!(report.score.absolute_5year, "2.34%");
    assert_eq!(report.score.average_5year, "1.68%");
    assert_eq!(report.score.relative_5year, "1.24x");
    assert!((report.score.absolute_5year_percent - 2.34).abs() < 1e-9);

    let lifetime = report.score.lifetime.expect("lifetime figures expected");
    assert_eq!(lifetime.absolute, "10.12%");
    assert_eq!(lifetime.average, "8.99%");
    assert_eq!(lifetime.relative, "1.13x");
}

#[test]
fn category_label_is_taken_verbatim_and_mapped() {
    let report = render(&service_result(), &snapshot(), date(2026, 8, 25));

    assert_eq!(report.score.category, RiskCategory::Medium);
    assert_eq!(report.score.category_label, "متوسط");
    assert_eq!(report.score.accent_hex, RiskCategory::Medium.accent_hex());
}

#[test]
fn unrecognized_category_degrades_to_medium_but_keeps_the_label() {
    let mut result = service_result();
    result.risk_assessment.risk_category = "astronomical".to_string();

    let report = render(&result, &snapshot(), date(2026, 8, 25));
    assert_eq!(report.score.category, RiskCategory::Medium);
    assert_eq!(report.score.category_label, "astronomical");
}

#[test]
fn high_priority_marker_is_stripped_and_reclassifies() {
    let report = render(&service_result(), &snapshot(), date(2026, 8, 25));

    assert_eq!(report.recommendations.len(), 2);
    assert_eq!(report.recommendations[0].priority, RecommendationPriority::Routine);

    let urgent = &report.recommendations[1];
    assert_eq!(urgent.priority, RecommendationPriority::High);
    assert!(!urgent.text.contains('⚠'));
    assert!(urgent.text.starts_with("مشاوره"));
}

#[test]
fn missing_lifetime_projection_renders_without_lifetime_figures() {
    let mut result = service_result();
    result.risk_assessment.absolute_risk_lifetime = None;
    result.risk_assessment.average_risk_lifetime = None;
    result.risk_assessment.relative_risk_lifetime = None;

    let report = render(&result, &snapshot(), date(2026, 8, 25));
    assert!(report.score.lifetime.is_none());
}

#[test]
fn model_version_comes_from_metadata_with_a_fallback() {
    let report = render(&service_result(), &snapshot(), date(2026, 8, 25));
    assert_eq!(report.model_version, "Gail v2 (BCRA)");

    let mut result = service_result();
    result.metadata = None;
    let report = render(&result, &snapshot(), date(2026, 8, 25));
    assert_eq!(report.model_version, "Gail v2 (BCRA)");
}

#[test]
fn report_carries_title_date_patient_and_findings() {
    let report = render(&service_result(), &snapshot(), date(2026, 8, 25));

    assert_eq!(report.title, REPORT_TITLE);
    assert_eq!(report.generated_on, date(2026, 8, 25));
    assert_eq!(report.patient.age, 52);
    assert_eq!(report.patient.race_label, "سفیدپوست/سایر");
    assert_eq!(report.patient.projection_age_lifetime, 90);
    assert!(!report.findings.is_empty());
    assert_eq!(report.interpretation, "ریسک شما نزدیک میانگین است");
    assert!(!report.disclaimer.is_empty());
}

#[test]
fn format_helpers_keep_exactly_two_decimals() {
    assert_eq!(format::percent(0.023461), "2.35%");
    assert_eq!(format::percent(0.0), "0.00%");
    assert_eq!(format::percent(1.0), "100.00%");
    assert_eq!(format::ratio(2.0), "2.00x");
    assert!((format::round2(2.3449) - 2.34).abs() < 1e-9);
    assert!((format::round2(2.3451) - 2.35).abs() < 1e-9);
}
