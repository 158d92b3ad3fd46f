//! soraya-report
//!
//! Turns a risk-assessment response and the intake snapshot into the
//! view-model bundle everything downstream renders from. Pure and
//! deterministic — a successful service response always renders, and
//! identical inputs always produce identical output.

pub mod findings;
pub mod format;
pub mod render;
