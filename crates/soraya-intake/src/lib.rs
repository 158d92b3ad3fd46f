//! soraya-intake
//!
//! The guided intake: step schema, conditional-visibility and validation
//! rules, and the wizard state machine. Pure state — no HTTP, no Tauri.
//! The schema is data; the rule engine never hard-codes a field bound.

pub mod error;
pub mod rules;
pub mod schema;
pub mod wizard;
