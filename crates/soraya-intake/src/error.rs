use thiserror::Error;

use crate::rules::FieldIssue;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("step {step} has {} invalid field(s)", issues.len())]
    ValidationFailed { step: u8, issues: Vec<FieldIssue> },

    #[error("already at the final step")]
    AtFinalStep,

    #[error("submission is only available at the final step")]
    NotAtFinalStep,

    #[error("a submission is already in flight")]
    SubmissionInFlight,
}
