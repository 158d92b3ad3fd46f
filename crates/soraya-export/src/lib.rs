//! soraya-export
//!
//! PDF generation from the rendered report view-model. Three stages:
//! Tera template → markdown-ish text, line layout with pagination,
//! then PDF assembly.

pub mod error;
pub mod layout;
pub mod pdf;
pub mod render;
pub mod styles;
