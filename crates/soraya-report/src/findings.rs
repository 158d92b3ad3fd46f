//! Risk-factor findings derived from the intake answers.
//!
//! Six rules in a fixed order; the order is display-significant and the
//! output is a deterministic function of the snapshot. Rules that have
//! nothing to say for a given answer emit no finding at all.

use soraya_core::field_keys as keys;
use soraya_core::models::finding::{Impact, Polarity, RiskFactorFinding};
use soraya_core::models::form::FormSnapshot;

const AGE_THRESHOLD: i64 = 50;
const EARLY_MENARCHE_THRESHOLD: i64 = 12;
const LATE_FIRST_BIRTH_THRESHOLD: i64 = 30;

pub fn derive_findings(snapshot: &FormSnapshot) -> Vec<RiskFactorFinding> {
    let mut findings = Vec::new();

    // 1. Age.
    let age = parse_int(snapshot, keys::AGE);
    if age.is_some_and(|a| a >= AGE_THRESHOLD) {
        findings.push(finding(
            "Age",
            "At this age, age itself has become a meaningful risk factor.",
            Impact::Moderate,
            Polarity::Negative,
            "age",
        ));
    } else {
        findings.push(finding(
            "Age",
            "Below 50, age contributes comparatively little risk.",
            Impact::Low,
            Polarity::Neutral,
            "age",
        ));
    }

    // 2. Prior biopsies.
    if snapshot.get_trimmed(keys::EVER_HAD_BIOPSY) == Some("yes") {
        let count = parse_int(snapshot, keys::NUMBER_OF_BIOPSIES).unwrap_or(1);
        findings.push(finding(
            "Breast biopsies",
            format!("Benign biopsy count: {count}. Benign breast disease is associated with elevated risk."),
            if count > 1 { Impact::High } else { Impact::Moderate },
            Polarity::Negative,
            "biopsy",
        ));
    } else {
        findings.push(finding(
            "Breast biopsies",
            "No benign breast biopsies on record.",
            Impact::Low,
            Polarity::Positive,
            "biopsy",
        ));
    }

    // 3. Atypical hyperplasia. Emitted only when present.
    if snapshot.get_trimmed(keys::HAS_ATYPICAL_HYPERPLASIA) == Some("yes") {
        findings.push(finding(
            "Atypical hyperplasia",
            "Atypical hyperplasia on a previous biopsy markedly raises risk.",
            Impact::VeryHigh,
            Polarity::Negative,
            "pathology",
        ));
    }

    // 4. Family history.
    let relatives = parse_int(snapshot, keys::NUM_FIRST_DEGREE_RELATIVES).unwrap_or(0);
    if relatives > 0 {
        findings.push(finding(
            "Family history",
            format!("{relatives} first-degree relative(s) with breast cancer."),
            if relatives > 1 { Impact::VeryHigh } else { Impact::High },
            Polarity::Negative,
            "family",
        ));
    } else {
        findings.push(finding(
            "Family history",
            "No first-degree relatives with breast cancer.",
            Impact::Low,
            Polarity::Positive,
            "family",
        ));
    }

    // 5. Early menarche. Emitted only below the threshold.
    if parse_int(snapshot, keys::AGE_AT_MENARCHE).is_some_and(|a| a < EARLY_MENARCHE_THRESHOLD) {
        findings.push(finding(
            "Age at menarche",
            "A first menstrual period before 12 modestly raises lifetime estrogen exposure.",
            Impact::Low,
            Polarity::Negative,
            "menarche",
        ));
    }

    // 6. First live birth. The null sentinel means no births.
    match snapshot.get_trimmed(keys::AGE_AT_FIRST_BIRTH) {
        Some(value) if value == keys::NULL_SENTINEL => {
            findings.push(finding(
                "First live birth",
                "No full-term births; nulliparity modestly raises risk.",
                Impact::Low,
                Polarity::Negative,
                "birth",
            ));
        }
        Some(value) => {
            if value
                .parse::<i64>()
                .is_ok_and(|age| age >= LATE_FIRST_BIRTH_THRESHOLD)
            {
                findings.push(finding(
                    "First live birth",
                    "A first birth at 30 or later modestly raises risk.",
                    Impact::Low,
                    Polarity::Negative,
                    "birth",
                ));
            }
        }
        None => {}
    }

    findings
}

fn parse_int(snapshot: &FormSnapshot, key: &str) -> Option<i64> {
    snapshot.get_trimmed(key).and_then(|v| v.parse().ok())
}

fn finding(
    name: &str,
    description: impl Into<String>,
    impact: Impact,
    polarity: Polarity,
    icon: &str,
) -> RiskFactorFinding {
    RiskFactorFinding {
        name: name.to_string(),
        description: description.into(),
        impact,
        polarity,
        icon: icon.to_string(),
    }
}
