use soraya_core::field_keys as keys;
use soraya_intake::error::IntakeError;
use soraya_intake::schema::GROUP_ASIAN_SUBRACE;
use soraya_intake::wizard::{StepState, Wizard, WizardPhase};

/// Fill every step with values that validate, up to but not including
/// the final submit.
fn filled_wizard() -> Wizard {
    let mut wizard = Wizard::new();
    // Step 1 validates on seeded defaults.
    wizard.advance().unwrap();
    wizard.set_field(keys::AGE, "52").unwrap();
    wizard.set_field(keys::RACE, "1").unwrap();
    wizard.advance().unwrap();
    // Step 3 validates on seeded defaults (biopsy details stay hidden).
    wizard.advance().unwrap();
    wizard.set_field(keys::AGE_AT_MENARCHE, "12").unwrap();
    wizard.set_field(keys::AGE_AT_FIRST_BIRTH, "28").unwrap();
    wizard
}

#[test]
fn new_wizard_starts_at_step_one_with_defaults_applied() {
    let wizard = Wizard::new();
    let progress = wizard.progress();
    assert_eq!(progress.current, 1);
    assert_eq!(progress.total, 4);
    assert_eq!(wizard.form().get(keys::HAS_BREAST_CANCER_HISTORY), Some("false"));
    assert_eq!(wizard.form().get(keys::EVER_HAD_BIOPSY), Some("unknown"));
    assert_eq!(wizard.form().get(keys::NUM_FIRST_DEGREE_RELATIVES), Some("0"));
}

#[test]
fn advance_moves_forward_when_step_validates() {
    let mut wizard = Wizard::new();
    let progress = wizard.advance().unwrap();
    assert_eq!(progress.current, 2);
    assert_eq!(wizard.phase(), WizardPhase::Transitioning);
}

#[test]
fn advance_is_blocked_by_missing_required_field() {
    let mut wizard = Wizard::new();
    wizard.advance().unwrap();

    let err = wizard.advance().unwrap_err();
    let IntakeError::ValidationFailed { step, issues } = err else {
        panic!("expected ValidationFailed, got {err:?}");
    };
    assert_eq!(step, 2);
    assert!(issues.iter().any(|i| i.key == keys::AGE));
    assert!(issues.iter().any(|i| i.key == keys::RACE));
    assert_eq!(wizard.progress().current, 2);
}

#[test]
fn out_of_range_age_blocks_with_bounds_message() {
    let mut wizard = Wizard::new();
    wizard.advance().unwrap();
    wizard.set_field(keys::AGE, "30").unwrap();
    wizard.set_field(keys::RACE, "1").unwrap();

    let err = wizard.advance().unwrap_err();
    let IntakeError::ValidationFailed { issues, .. } = err else {
        panic!("expected ValidationFailed, got {err:?}");
    };
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("between 35 and 85"));

    wizard.set_field(keys::AGE, "60").unwrap();
    assert!(wizard.advance().is_ok());
}

#[test]
fn retreat_never_validates_and_stops_at_step_one() {
    let mut wizard = filled_wizard();
    assert_eq!(wizard.progress().current, 4);

    // Step 4 intentionally left incomplete.
    wizard.set_field(keys::AGE_AT_MENARCHE, "").unwrap();

    assert_eq!(wizard.retreat().current, 3);
    assert_eq!(wizard.retreat().current, 2);
    assert_eq!(wizard.retreat().current, 1);
    assert_eq!(wizard.retreat().current, 1);
}

#[test]
fn advance_past_final_step_is_refused() {
    let mut wizard = filled_wizard();
    let err = wizard.advance().unwrap_err();
    assert!(matches!(err, IntakeError::AtFinalStep));
}

#[test]
fn repeated_identical_set_field_reports_unchanged() {
    let mut wizard = Wizard::new();
    wizard.advance().unwrap();

    let first = wizard.set_field(keys::AGE, "52").unwrap();
    assert!(first.changed);

    // The mirrored slider echoes the same value back.
    let echo = wizard.set_field(keys::AGE, "52").unwrap();
    assert!(!echo.changed);

    let moved = wizard.set_field(keys::AGE, "53").unwrap();
    assert!(moved.changed);
}

#[test]
fn set_field_rejects_unknown_keys() {
    let mut wizard = Wizard::new();
    let err = wizard.set_field("favorite_color", "blue").unwrap_err();
    assert!(matches!(err, IntakeError::UnknownField(_)));
}

#[test]
fn set_field_reports_visibility_changes_immediately() {
    let mut wizard = Wizard::new();
    wizard.advance().unwrap();

    let update = wizard.set_field(keys::RACE, "4").unwrap();
    assert!(!update.hidden_groups.contains(GROUP_ASIAN_SUBRACE));

    let update = wizard.set_field(keys::RACE, "2").unwrap();
    assert!(update.hidden_groups.contains(GROUP_ASIAN_SUBRACE));
}

#[test]
fn begin_submission_requires_final_step() {
    let mut wizard = Wizard::new();
    let err = wizard.begin_submission().unwrap_err();
    assert!(matches!(err, IntakeError::NotAtFinalStep));
}

#[test]
fn begin_submission_validates_final_step() {
    let mut wizard = filled_wizard();
    wizard.set_field(keys::AGE_AT_MENARCHE, "").unwrap();

    let err = wizard.begin_submission().unwrap_err();
    assert!(matches!(err, IntakeError::ValidationFailed { step: 4, .. }));
    assert!(!wizard.is_submitting());
}

#[test]
fn submission_latch_blocks_a_second_attempt() {
    let mut wizard = filled_wizard();
    let snapshot = wizard.begin_submission().unwrap();
    assert_eq!(snapshot.get(keys::AGE), Some("52"));
    assert!(wizard.is_submitting());

    let err = wizard.begin_submission().unwrap_err();
    assert!(matches!(err, IntakeError::SubmissionInFlight));
}

#[test]
fn edits_are_frozen_while_submission_is_outstanding() {
    let mut wizard = filled_wizard();
    wizard.begin_submission().unwrap();

    let err = wizard.set_field(keys::AGE, "60").unwrap_err();
    assert!(matches!(err, IntakeError::SubmissionInFlight));
}

#[test]
fn finish_submission_restores_an_interactive_wizard() {
    let mut wizard = filled_wizard();
    wizard.begin_submission().unwrap();
    wizard.finish_submission();

    assert!(!wizard.is_submitting());
    assert!(wizard.begin_submission().is_ok());
}

#[test]
fn progress_indicators_mark_completed_active_and_upcoming() {
    let mut wizard = Wizard::new();
    wizard.advance().unwrap();

    let progress = wizard.progress();
    assert_eq!(progress.steps[0].state, StepState::Completed);
    assert_eq!(progress.steps[1].state, StepState::Active);
    assert_eq!(progress.steps[2].state, StepState::Upcoming);
    assert_eq!(progress.steps[3].state, StepState::Upcoming);
    assert!((progress.fraction - 0.5).abs() < 1e-9);
}

#[test]
fn finish_transition_clears_the_phase() {
    let mut wizard = Wizard::new();
    wizard.advance().unwrap();
    assert_eq!(wizard.phase(), WizardPhase::Transitioning);

    wizard.finish_transition();
    assert_eq!(wizard.phase(), WizardPhase::Idle);
}

#[test]
fn reset_discards_form_values_and_returns_to_step_one() {
    let mut wizard = filled_wizard();
    wizard.reset();

    assert_eq!(wizard.progress().current, 1);
    assert_eq!(wizard.form().get(keys::AGE), None);
    assert_eq!(wizard.form().get(keys::EVER_HAD_BIOPSY), Some("unknown"));
    assert!(!wizard.is_submitting());
}
