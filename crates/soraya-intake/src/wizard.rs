//! The intake wizard state machine.
//!
//! Owns the current step and the form values. Forward navigation and
//! submission validate; back navigation never does. The submission
//! latch here is the single mutual-exclusion point of the workflow:
//! while a snapshot is outstanding, edits and further submissions are
//! refused until the caller reports completion.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use soraya_core::models::form::{FormData, FormSnapshot};

use crate::error::IntakeError;
use crate::rules;
use crate::schema::{self, StepDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum WizardPhase {
    Idle,
    /// A step change's visual transition is still playing. Display
    /// concern only; cleared by a scheduled task, never load-bearing.
    Transitioning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StepState {
    Completed,
    Active,
    Upcoming,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StepIndicator {
    pub index: u8,
    pub title: String,
    pub state: StepState,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProgressInfo {
    pub current: u8,
    pub total: u8,
    pub fraction: f64,
    pub steps: Vec<StepIndicator>,
}

/// Outcome of a field write. `changed == false` means the stored value
/// was already identical; callers skip re-sync so the mirrored age
/// controls cannot echo updates back and forth.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldUpdate {
    pub changed: bool,
    pub hidden_groups: BTreeSet<String>,
}

#[derive(Debug)]
pub struct Wizard {
    current: u8,
    form: FormData,
    phase: WizardPhase,
    submitting: bool,
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            current: 1,
            form: schema::seeded_form(),
            phase: WizardPhase::Idle,
            submitting: false,
        }
    }

    pub fn current_step(&self) -> &'static StepDefinition {
        // current is kept in [1, total] by every transition.
        &schema::intake_steps()[usize::from(self.current) - 1]
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn hidden_groups(&self) -> BTreeSet<String> {
        rules::evaluate_visibility(&self.form)
    }

    /// Write one field value and re-evaluate conditional visibility.
    /// Refused while a submission is outstanding; the snapshot handed to
    /// the gateway stays the last word until the attempt resolves.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<FieldUpdate, IntakeError> {
        if self.submitting {
            return Err(IntakeError::SubmissionInFlight);
        }
        if schema::field_def(key).is_none() {
            return Err(IntakeError::UnknownField(key.to_string()));
        }

        let changed = self.form.set(key, value);
        Ok(FieldUpdate {
            changed,
            hidden_groups: rules::evaluate_visibility(&self.form),
        })
    }

    /// Issues for the current step, as the frontend would see them on a
    /// blocked advance.
    pub fn validate_current(&self) -> Vec<rules::FieldIssue> {
        rules::validate_step(self.current_step(), &self.form, &self.hidden_groups())
    }

    /// Move forward one step. Blocked with field issues when the current
    /// step does not validate; the caller surfaces them and the step does
    /// not change.
    pub fn advance(&mut self) -> Result<ProgressInfo, IntakeError> {
        if self.submitting {
            return Err(IntakeError::SubmissionInFlight);
        }
        let issues = self.validate_current();
        if !issues.is_empty() {
            return Err(IntakeError::ValidationFailed {
                step: self.current,
                issues,
            });
        }
        if self.current == schema::total_steps() {
            return Err(IntakeError::AtFinalStep);
        }

        self.current += 1;
        self.phase = WizardPhase::Transitioning;
        Ok(self.progress())
    }

    /// Move back one step. Never validates; a no-op at step 1.
    pub fn retreat(&mut self) -> ProgressInfo {
        if self.current > 1 && !self.submitting {
            self.current -= 1;
            self.phase = WizardPhase::Idle;
        }
        self.progress()
    }

    /// Clears the transition phase; invoked by the scheduled task that
    /// owns the step-change animation timing.
    pub fn finish_transition(&mut self) {
        self.phase = WizardPhase::Idle;
    }

    /// Validate the final step, freeze the form, and latch the
    /// submission. Exactly one snapshot may be outstanding; callers must
    /// pair this with [`finish_submission`](Self::finish_submission) on
    /// every exit path.
    pub fn begin_submission(&mut self) -> Result<FormSnapshot, IntakeError> {
        if self.submitting {
            return Err(IntakeError::SubmissionInFlight);
        }
        if self.current != schema::total_steps() {
            return Err(IntakeError::NotAtFinalStep);
        }
        let issues = self.validate_current();
        if !issues.is_empty() {
            return Err(IntakeError::ValidationFailed {
                step: self.current,
                issues,
            });
        }

        self.submitting = true;
        Ok(self.form.snapshot())
    }

    /// Release the submission latch. Safe to call on success and on
    /// failure; the wizard returns to an interactive state either way.
    pub fn finish_submission(&mut self) {
        self.submitting = false;
    }

    pub fn progress(&self) -> ProgressInfo {
        let total = schema::total_steps();
        let steps = schema::intake_steps()
            .iter()
            .map(|step| StepIndicator {
                index: step.index,
                title: step.title.clone(),
                state: if step.index < self.current {
                    StepState::Completed
                } else if step.index == self.current {
                    StepState::Active
                } else {
                    StepState::Upcoming
                },
            })
            .collect();

        ProgressInfo {
            current: self.current,
            total,
            fraction: f64::from(self.current) / f64::from(total),
            steps,
        }
    }

    /// Discard all intake state and start a fresh session.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}
