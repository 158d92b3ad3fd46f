//! Intake field key conventions.
//!
//! Pure string constants. These are the canonical FormData keys shared by
//! the intake schema, the submission gateway, and the report renderer.
//! Names track the external service's request contract.

pub const HAS_BREAST_CANCER_HISTORY: &str = "has_breast_cancer_history";
pub const HAS_GENETIC_MUTATION: &str = "has_genetic_mutation";
pub const AGE: &str = "age";
pub const RACE: &str = "race";
pub const SUB_RACE: &str = "sub_race";
pub const EVER_HAD_BIOPSY: &str = "ever_had_biopsy";
pub const NUMBER_OF_BIOPSIES: &str = "number_of_biopsies";
pub const HAS_ATYPICAL_HYPERPLASIA: &str = "has_atypical_hyperplasia";
pub const AGE_AT_MENARCHE: &str = "age_at_menarche";
pub const AGE_AT_FIRST_BIRTH: &str = "age_at_first_birth";
pub const NUM_FIRST_DEGREE_RELATIVES: &str = "num_first_degree_relatives";

/// Sentinel recorded when an optional numeric field is explicitly
/// answered "none" (e.g. no live births). Distinct from an absent key.
pub const NULL_SENTINEL: &str = "null";

/// Sentinel for the three-state history fields when the patient cannot
/// answer. Passed through to the service verbatim.
pub const UNKNOWN_SENTINEL: &str = "unknown";
