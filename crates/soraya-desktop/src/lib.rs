//! soraya-desktop library root.
//!
//! Re-exports internal modules so that integration tests can exercise
//! them directly (e.g. the submission flow) without going through the
//! Tauri command layer.

pub mod config;
pub mod session;
pub mod transition;
