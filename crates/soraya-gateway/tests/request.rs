use soraya_core::field_keys as keys;
use soraya_core::models::form::{FormData, FormSnapshot};
use soraya_gateway::client::extract_error_message;
use soraya_gateway::error::{GatewayError, GENERIC_SERVICE_MESSAGE};
use soraya_gateway::request::{build_request, SubmissionRequest};

fn snapshot_from(pairs: &[(&str, &str)]) -> FormSnapshot {
    let mut form = FormData::new();
    for (key, value) in pairs {
        form.set(*key, *value);
    }
    form.snapshot()
}

fn complete_snapshot() -> FormSnapshot {
    snapshot_from(&[
        (keys::HAS_BREAST_CANCER_HISTORY, "false"),
        (keys::HAS_GENETIC_MUTATION, "no"),
        (keys::AGE, "52"),
        (keys::RACE, "1"),
        (keys::EVER_HAD_BIOPSY, "yes"),
        (keys::NUMBER_OF_BIOPSIES, "2"),
        (keys::HAS_ATYPICAL_HYPERPLASIA, "no"),
        (keys::AGE_AT_MENARCHE, "12"),
        (keys::AGE_AT_FIRST_BIRTH, "28"),
        (keys::NUM_FIRST_DEGREE_RELATIVES, "1"),
    ])
}

#[test]
fn complete_form_maps_every_field() {
    let request = build_request(&complete_snapshot()).unwrap();

    assert!(!request.has_breast_cancer_history);
    assert_eq!(request.has_genetic_mutation, "no");
    assert_eq!(request.age, 52);
    assert_eq!(request.race, 1);
    assert_eq!(request.sub_race, None);
    assert_eq!(request.ever_had_biopsy, "yes");
    assert_eq!(request.number_of_biopsies, Some(2));
    assert_eq!(request.has_atypical_hyperplasia, "no");
    assert_eq!(request.age_at_menarche, 12);
    assert_eq!(request.age_at_first_birth, Some(28));
    assert_eq!(request.num_first_degree_relatives, 1);
}

#[test]
fn boolean_flag_coerces_only_the_true_literal() {
    let mut pairs = vec![
        (keys::HAS_GENETIC_MUTATION, "no"),
        (keys::AGE, "45"),
        (keys::RACE, "1"),
        (keys::EVER_HAD_BIOPSY, "no"),
        (keys::HAS_ATYPICAL_HYPERPLASIA, "no"),
        (keys::AGE_AT_MENARCHE, "13"),
        (keys::NUM_FIRST_DEGREE_RELATIVES, "0"),
    ];

    pairs.push((keys::HAS_BREAST_CANCER_HISTORY, "true"));
    let request = build_request(&snapshot_from(&pairs)).unwrap();
    assert!(request.has_breast_cancer_history);

    pairs.pop();
    pairs.push((keys::HAS_BREAST_CANCER_HISTORY, "false"));
    let request = build_request(&snapshot_from(&pairs)).unwrap();
    assert!(!request.has_breast_cancer_history);

    // Absent flag reads as false, not as an error.
    pairs.pop();
    let request = build_request(&snapshot_from(&pairs)).unwrap();
    assert!(!request.has_breast_cancer_history);
}

#[test]
fn absent_three_state_fields_become_the_unknown_sentinel() {
    let request = build_request(&snapshot_from(&[
        (keys::HAS_BREAST_CANCER_HISTORY, "false"),
        (keys::AGE, "45"),
        (keys::RACE, "2"),
        (keys::AGE_AT_MENARCHE, "13"),
        (keys::NUM_FIRST_DEGREE_RELATIVES, "0"),
    ]))
    .unwrap();

    assert_eq!(request.has_genetic_mutation, "unknown");
    assert_eq!(request.ever_had_biopsy, "unknown");
    assert_eq!(request.has_atypical_hyperplasia, "unknown");
}

#[test]
fn null_sentinel_serializes_as_explicit_json_null() {
    let mut pairs = vec![
        (keys::HAS_BREAST_CANCER_HISTORY, "false"),
        (keys::HAS_GENETIC_MUTATION, "no"),
        (keys::AGE, "45"),
        (keys::RACE, "1"),
        (keys::EVER_HAD_BIOPSY, "no"),
        (keys::HAS_ATYPICAL_HYPERPLASIA, "no"),
        (keys::AGE_AT_MENARCHE, "13"),
        (keys::NUM_FIRST_DEGREE_RELATIVES, "0"),
    ];
    pairs.push((keys::AGE_AT_FIRST_BIRTH, "null"));

    let request = build_request(&snapshot_from(&pairs)).unwrap();
    assert_eq!(request.age_at_first_birth, None);

    let json = serde_json::to_value(&request).unwrap();
    let field = json.get("age_at_first_birth").expect("field must be present");
    assert!(field.is_null());
}

#[test]
fn biopsy_count_is_omitted_unless_biopsy_is_yes() {
    // A stale count can linger in the form after the answer flips to
    // "no"; the request must not carry it.
    let request = build_request(&snapshot_from(&[
        (keys::HAS_BREAST_CANCER_HISTORY, "false"),
        (keys::HAS_GENETIC_MUTATION, "no"),
        (keys::AGE, "45"),
        (keys::RACE, "1"),
        (keys::EVER_HAD_BIOPSY, "no"),
        (keys::NUMBER_OF_BIOPSIES, "3"),
        (keys::HAS_ATYPICAL_HYPERPLASIA, "no"),
        (keys::AGE_AT_MENARCHE, "13"),
        (keys::NUM_FIRST_DEGREE_RELATIVES, "0"),
    ]))
    .unwrap();

    assert_eq!(request.number_of_biopsies, None);
    let json = serde_json::to_value(&request).unwrap();
    assert!(json.get("number_of_biopsies").is_none());
}

#[test]
fn sub_race_is_sent_only_for_the_asian_race_code() {
    let mut pairs = vec![
        (keys::HAS_BREAST_CANCER_HISTORY, "false"),
        (keys::HAS_GENETIC_MUTATION, "no"),
        (keys::AGE, "45"),
        (keys::EVER_HAD_BIOPSY, "no"),
        (keys::HAS_ATYPICAL_HYPERPLASIA, "no"),
        (keys::AGE_AT_MENARCHE, "13"),
        (keys::NUM_FIRST_DEGREE_RELATIVES, "0"),
        (keys::SUB_RACE, "9"),
    ];

    pairs.push((keys::RACE, "2"));
    let request = build_request(&snapshot_from(&pairs)).unwrap();
    assert_eq!(request.sub_race, None);

    pairs.pop();
    pairs.push((keys::RACE, "4"));
    let request = build_request(&snapshot_from(&pairs)).unwrap();
    assert_eq!(request.sub_race, Some(9));
}

#[test]
fn missing_required_number_is_an_error() {
    let err = build_request(&snapshot_from(&[
        (keys::HAS_BREAST_CANCER_HISTORY, "false"),
        (keys::RACE, "1"),
        (keys::AGE_AT_MENARCHE, "13"),
        (keys::NUM_FIRST_DEGREE_RELATIVES, "0"),
    ]))
    .unwrap_err();

    assert!(matches!(err, GatewayError::MissingField(field) if field == keys::AGE));
}

#[test]
fn unparsable_number_is_an_error() {
    let err = build_request(&snapshot_from(&[
        (keys::HAS_BREAST_CANCER_HISTORY, "false"),
        (keys::AGE, "fifty"),
        (keys::RACE, "1"),
        (keys::AGE_AT_MENARCHE, "13"),
        (keys::NUM_FIRST_DEGREE_RELATIVES, "0"),
    ]))
    .unwrap_err();

    assert!(matches!(err, GatewayError::InvalidNumber { key, .. } if key == keys::AGE));
}

#[test]
fn request_round_trips_through_json() {
    let request = build_request(&complete_snapshot()).unwrap();

    let json = serde_json::to_string(&request).unwrap();
    let back: SubmissionRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(request, back);
}

#[test]
fn error_mining_reads_detail_string() {
    let body = r#"{"detail": "age must be between 35 and 85"}"#;
    assert_eq!(extract_error_message(body), "age must be between 35 and 85");
}

#[test]
fn error_mining_reads_nested_detail_error() {
    let body = r#"{"detail": {"success": false, "error": "sub_race requires race 4", "error_code": "VALIDATION_ERROR"}}"#;
    assert_eq!(extract_error_message(body), "sub_race requires race 4");
}

#[test]
fn error_mining_reads_first_validation_entry() {
    let body = r#"{"detail": [{"loc": ["body", "age"], "msg": "Input should be less than or equal to 85", "type": "less_than_equal"}]}"#;
    assert_eq!(
        extract_error_message(body),
        "Input should be less than or equal to 85"
    );
}

#[test]
fn error_mining_reads_top_level_error() {
    let body = r#"{"error": "service unavailable"}"#;
    assert_eq!(extract_error_message(body), "service unavailable");
}

#[test]
fn error_mining_falls_back_on_garbage() {
    assert_eq!(extract_error_message("<html>502</html>"), GENERIC_SERVICE_MESSAGE);
    assert_eq!(extract_error_message(""), GENERIC_SERVICE_MESSAGE);
    assert_eq!(extract_error_message("{}"), GENERIC_SERVICE_MESSAGE);
}
