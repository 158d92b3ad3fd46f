//! Conditional-visibility evaluation and field/step validation.
//!
//! Pure functions over the schema and current form values. Callers own
//! the presentation of any issue returned.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use soraya_core::field_keys::NULL_SENTINEL;
use soraya_core::models::form::FormData;

use crate::schema::{self, FieldDef, StepDefinition};

/// One invalid field, with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct FieldIssue {
    pub key: String,
    pub message: String,
}

/// Group ids currently hidden by their conditional rules. A group is
/// hidden unless its trigger field holds exactly the show-when value.
pub fn evaluate_visibility(form: &FormData) -> BTreeSet<String> {
    let mut hidden = BTreeSet::new();
    for rule in schema::conditional_rules() {
        let visible = form.get(&rule.trigger_key) == Some(rule.show_when.as_str());
        if !visible {
            hidden.insert(rule.group.clone());
        }
    }
    hidden
}

fn is_hidden(field: &FieldDef, hidden: &BTreeSet<String>) -> bool {
    field
        .group
        .as_ref()
        .is_some_and(|group| hidden.contains(group))
}

/// Validate one field. Hidden fields are exempt from every check,
/// including required-ness.
pub fn validate_field(
    field: &FieldDef,
    value: Option<&str>,
    visible: bool,
) -> Result<(), FieldIssue> {
    if !visible {
        return Ok(());
    }

    let trimmed = value.map(str::trim).filter(|v| !v.is_empty());
    let Some(trimmed) = trimmed else {
        if field.required {
            return Err(FieldIssue {
                key: field.key.clone(),
                message: format!("{} is required", field.label),
            });
        }
        return Ok(());
    };

    if field.allows_null_sentinel && trimmed == NULL_SENTINEL {
        return Ok(());
    }

    if let Some(bounds) = &field.bounds {
        let Ok(parsed) = trimmed.parse::<i64>() else {
            return Err(FieldIssue {
                key: field.key.clone(),
                message: format!("{} must be a whole number", field.label),
            });
        };
        if !bounds.contains(parsed) {
            return Err(FieldIssue {
                key: field.key.clone(),
                message: format!(
                    "{} must be between {} and {}",
                    field.label, bounds.min, bounds.max
                ),
            });
        }
    }

    Ok(())
}

/// Validate every field of a step against the current form values.
/// Returns an empty vec when the step may be advanced or submitted.
pub fn validate_step(
    step: &StepDefinition,
    form: &FormData,
    hidden: &BTreeSet<String>,
) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    for field in &step.fields {
        let visible = !is_hidden(field, hidden);
        if let Err(issue) = validate_field(field, form.get(&field.key), visible) {
            issues.push(issue);
        }
    }
    issues
}
