//! soraya-core
//!
//! Pure domain types for the Soraya intake and reporting pipeline.
//! No HTTP, no Tauri — this is the shared vocabulary of the Soraya system.

pub mod field_keys;
pub mod models;
pub mod toast;
