//! Static definition of the four intake steps.
//!
//! Field keys, bounds, defaults, and conditional groups live here as
//! data. The rule engine and the wizard read this table; nothing else
//! defines intake structure.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use soraya_core::field_keys as keys;
use soraya_core::models::form::FormData;

pub const GROUP_ASIAN_SUBRACE: &str = "asian_subrace";
pub const GROUP_BIOPSY_DETAILS: &str = "biopsy_details";

/// How the frontend renders a field. Behavior-relevant only for the
/// dual-control and null-toggle variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ControlKind {
    /// Mutually exclusive options; only the chosen value is recorded.
    Radio,
    /// Dropdown over coded options.
    Select,
    /// Bounded integer input.
    Number,
    /// Bounded integer input mirrored by a slider. Both controls write
    /// the same key; the wizard's change-detection breaks the echo loop.
    SliderNumber,
    /// Bounded integer input with a "none" toggle that records the
    /// null sentinel instead of a number.
    NullableNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NumericBounds {
    pub min: i64,
    pub max: i64,
}

impl NumericBounds {
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldDef {
    pub key: String,
    pub label: String,
    pub control: ControlKind,
    pub required: bool,
    pub options: Vec<FieldOption>,
    pub bounds: Option<NumericBounds>,
    /// Accepts the literal null sentinel in place of a number.
    pub allows_null_sentinel: bool,
    pub default: Option<String>,
    /// Conditional group this field belongs to; None = always visible.
    pub group: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StepDefinition {
    /// 1-based, contiguous.
    pub index: u8,
    pub title: String,
    pub fields: Vec<FieldDef>,
}

/// Shows `group` only while the trigger field equals `show_when`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConditionalRule {
    pub trigger_key: String,
    pub show_when: String,
    pub group: String,
}

pub fn intake_steps() -> &'static [StepDefinition] {
    static STEPS: LazyLock<Vec<StepDefinition>> = LazyLock::new(|| {
        let yes_no = |yes: &str, no: &str| {
            vec![
                FieldOption {
                    value: "false".to_string(),
                    label: no.to_string(),
                },
                FieldOption {
                    value: "true".to_string(),
                    label: yes.to_string(),
                },
            ]
        };
        let three_state = || {
            vec![
                FieldOption {
                    value: "yes".to_string(),
                    label: "Yes".to_string(),
                },
                FieldOption {
                    value: "no".to_string(),
                    label: "No".to_string(),
                },
                FieldOption {
                    value: "unknown".to_string(),
                    label: "Don't know".to_string(),
                },
            ]
        };

        vec![
            StepDefinition {
                index: 1,
                title: "Eligibility".to_string(),
                fields: vec![
                    FieldDef {
                        key: keys::HAS_BREAST_CANCER_HISTORY.to_string(),
                        label: "Prior breast cancer, DCIS, LCIS, or chest radiotherapy"
                            .to_string(),
                        control: ControlKind::Radio,
                        required: true,
                        options: yes_no("Yes", "No"),
                        bounds: None,
                        allows_null_sentinel: false,
                        default: Some("false".to_string()),
                        group: None,
                    },
                    FieldDef {
                        key: keys::HAS_GENETIC_MUTATION.to_string(),
                        label: "Known BRCA1/BRCA2 mutation or genetic syndrome".to_string(),
                        control: ControlKind::Radio,
                        required: true,
                        options: three_state(),
                        bounds: None,
                        allows_null_sentinel: false,
                        default: Some("unknown".to_string()),
                        group: None,
                    },
                ],
            },
            StepDefinition {
                index: 2,
                title: "About You".to_string(),
                fields: vec![
                    FieldDef {
                        key: keys::AGE.to_string(),
                        label: "Age".to_string(),
                        control: ControlKind::SliderNumber,
                        required: true,
                        options: vec![],
                        bounds: Some(NumericBounds { min: 35, max: 85 }),
                        allows_null_sentinel: false,
                        default: None,
                        group: None,
                    },
                    FieldDef {
                        key: keys::RACE.to_string(),
                        label: "Race / ethnicity".to_string(),
                        control: ControlKind::Select,
                        required: true,
                        options: [
                            ("1", "White"),
                            ("2", "African American"),
                            ("3", "Hispanic"),
                            ("4", "Asian or Pacific Islander"),
                            ("5", "Other / unknown"),
                        ]
                        .iter()
                        .map(|(value, label)| FieldOption {
                            value: value.to_string(),
                            label: label.to_string(),
                        })
                        .collect(),
                        bounds: None,
                        allows_null_sentinel: false,
                        default: None,
                        group: None,
                    },
                    FieldDef {
                        key: keys::SUB_RACE.to_string(),
                        label: "Asian subgroup".to_string(),
                        control: ControlKind::Select,
                        required: true,
                        options: [
                            ("7", "Chinese"),
                            ("8", "Japanese"),
                            ("9", "Filipino"),
                            ("10", "Hawaiian"),
                            ("11", "Other Pacific Islander"),
                            ("12", "Other Asian"),
                        ]
                        .iter()
                        .map(|(value, label)| FieldOption {
                            value: value.to_string(),
                            label: label.to_string(),
                        })
                        .collect(),
                        bounds: None,
                        allows_null_sentinel: false,
                        default: None,
                        group: Some(GROUP_ASIAN_SUBRACE.to_string()),
                    },
                ],
            },
            StepDefinition {
                index: 3,
                title: "Medical History".to_string(),
                fields: vec![
                    FieldDef {
                        key: keys::EVER_HAD_BIOPSY.to_string(),
                        label: "Ever had a breast biopsy with a benign result".to_string(),
                        control: ControlKind::Radio,
                        required: true,
                        options: three_state(),
                        bounds: None,
                        allows_null_sentinel: false,
                        default: Some("unknown".to_string()),
                        group: None,
                    },
                    FieldDef {
                        key: keys::NUMBER_OF_BIOPSIES.to_string(),
                        label: "Number of breast biopsies".to_string(),
                        control: ControlKind::Number,
                        required: true,
                        options: vec![],
                        bounds: Some(NumericBounds { min: 1, max: 30 }),
                        allows_null_sentinel: false,
                        default: None,
                        group: Some(GROUP_BIOPSY_DETAILS.to_string()),
                    },
                    FieldDef {
                        key: keys::HAS_ATYPICAL_HYPERPLASIA.to_string(),
                        label: "Atypical hyperplasia on any biopsy".to_string(),
                        control: ControlKind::Radio,
                        required: true,
                        options: three_state(),
                        bounds: None,
                        allows_null_sentinel: false,
                        default: Some("unknown".to_string()),
                        group: None,
                    },
                ],
            },
            StepDefinition {
                index: 4,
                title: "Family & Reproductive History".to_string(),
                fields: vec![
                    FieldDef {
                        key: keys::AGE_AT_MENARCHE.to_string(),
                        label: "Age at first menstrual period".to_string(),
                        control: ControlKind::Number,
                        required: true,
                        options: vec![],
                        bounds: Some(NumericBounds { min: 7, max: 17 }),
                        allows_null_sentinel: false,
                        default: None,
                        group: None,
                    },
                    FieldDef {
                        key: keys::AGE_AT_FIRST_BIRTH.to_string(),
                        label: "Age at first live birth".to_string(),
                        control: ControlKind::NullableNumber,
                        required: false,
                        options: vec![],
                        bounds: Some(NumericBounds { min: 10, max: 55 }),
                        allows_null_sentinel: true,
                        default: None,
                        group: None,
                    },
                    FieldDef {
                        key: keys::NUM_FIRST_DEGREE_RELATIVES.to_string(),
                        label: "First-degree relatives with breast cancer".to_string(),
                        control: ControlKind::Number,
                        required: true,
                        options: vec![],
                        bounds: Some(NumericBounds { min: 0, max: 10 }),
                        allows_null_sentinel: false,
                        default: Some("0".to_string()),
                        group: None,
                    },
                ],
            },
        ]
    });
    &STEPS
}

pub fn conditional_rules() -> &'static [ConditionalRule] {
    static RULES: LazyLock<Vec<ConditionalRule>> = LazyLock::new(|| {
        vec![
            ConditionalRule {
                trigger_key: keys::RACE.to_string(),
                show_when: "4".to_string(),
                group: GROUP_ASIAN_SUBRACE.to_string(),
            },
            ConditionalRule {
                trigger_key: keys::EVER_HAD_BIOPSY.to_string(),
                show_when: "yes".to_string(),
                group: GROUP_BIOPSY_DETAILS.to_string(),
            },
        ]
    });
    &RULES
}

pub fn total_steps() -> u8 {
    intake_steps().len() as u8
}

/// Look up a field definition by key across all steps.
pub fn field_def(key: &str) -> Option<&'static FieldDef> {
    intake_steps()
        .iter()
        .flat_map(|step| &step.fields)
        .find(|field| field.key == key)
}

/// A fresh form with every schema default applied.
pub fn seeded_form() -> FormData {
    let mut form = FormData::new();
    for step in intake_steps() {
        for field in &step.fields {
            if let Some(default) = &field.default {
                form.set(field.key.clone(), default.clone());
            }
        }
    }
    form
}
