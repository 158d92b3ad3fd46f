//! Projection of a form snapshot into the service's request contract.
//!
//! The per-field sentinel rules here are the external contract and are
//! deliberately not unified:
//!
//! - boolean flags arrive as the literal strings `"true"`/`"false"`;
//!   only `"true"` coerces to true.
//! - the three-state history fields pass through as strings, with
//!   `"unknown"` substituted when the key is absent.
//! - `age_at_first_birth` serializes an explicit JSON null for both the
//!   null sentinel and an absent key — the field is always present.
//! - `number_of_biopsies` is sent only while `ever_had_biopsy` is
//!   `"yes"`; the service rejects a count alongside a "no" answer.
//! - `sub_race` is sent only for the Asian/Pacific Islander race code.

use serde::{Deserialize, Serialize};

use soraya_core::field_keys as keys;
use soraya_core::models::form::FormSnapshot;

use crate::error::GatewayError;

/// Wire request for `POST /api/gail/calculate`. Constructed fresh per
/// attempt and never mutated after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub has_breast_cancer_history: bool,
    pub has_genetic_mutation: String,
    pub age: u32,
    pub race: u32,
    pub sub_race: Option<u32>,
    pub ever_had_biopsy: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub number_of_biopsies: Option<u32>,
    pub has_atypical_hyperplasia: String,
    pub age_at_menarche: u32,
    pub age_at_first_birth: Option<u32>,
    pub num_first_degree_relatives: u32,
}

pub fn build_request(snapshot: &FormSnapshot) -> Result<SubmissionRequest, GatewayError> {
    let ever_had_biopsy = three_state(snapshot, keys::EVER_HAD_BIOPSY);

    let number_of_biopsies = if ever_had_biopsy == "yes" {
        Some(required_number(snapshot, keys::NUMBER_OF_BIOPSIES)?)
    } else {
        None
    };

    let race = required_number(snapshot, keys::RACE)?;
    let sub_race = if race == 4 {
        optional_number(snapshot, keys::SUB_RACE)?
    } else {
        None
    };

    Ok(SubmissionRequest {
        has_breast_cancer_history: snapshot.get_trimmed(keys::HAS_BREAST_CANCER_HISTORY)
            == Some("true"),
        has_genetic_mutation: three_state(snapshot, keys::HAS_GENETIC_MUTATION),
        age: required_number(snapshot, keys::AGE)?,
        race,
        sub_race,
        ever_had_biopsy,
        number_of_biopsies,
        has_atypical_hyperplasia: three_state(snapshot, keys::HAS_ATYPICAL_HYPERPLASIA),
        age_at_menarche: required_number(snapshot, keys::AGE_AT_MENARCHE)?,
        age_at_first_birth: optional_number(snapshot, keys::AGE_AT_FIRST_BIRTH)?,
        num_first_degree_relatives: required_number(snapshot, keys::NUM_FIRST_DEGREE_RELATIVES)?,
    })
}

fn three_state(snapshot: &FormSnapshot, key: &str) -> String {
    snapshot
        .get_trimmed(key)
        .unwrap_or(keys::UNKNOWN_SENTINEL)
        .to_string()
}

fn required_number(snapshot: &FormSnapshot, key: &str) -> Result<u32, GatewayError> {
    let value = snapshot
        .get_trimmed(key)
        .ok_or_else(|| GatewayError::MissingField(key.to_string()))?;
    parse_number(key, value)
}

/// Absent and the null sentinel both map to None; anything else must
/// parse.
fn optional_number(snapshot: &FormSnapshot, key: &str) -> Result<Option<u32>, GatewayError> {
    match snapshot.get_trimmed(key) {
        None => Ok(None),
        Some(value) if value == keys::NULL_SENTINEL => Ok(None),
        Some(value) => parse_number(key, value).map(Some),
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32, GatewayError> {
    value.parse().map_err(|_| GatewayError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}
