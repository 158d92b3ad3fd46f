//! soraya-charts
//!
//! Owner of the chart rendering surfaces. The registry enforces the one
//! rule that matters here: at most one live chart per surface, with the
//! previous instance torn down before a replacement is installed. The
//! webview draws from the specs; this side owns their lifecycle.

pub mod comparison;
pub mod registry;
pub mod spec;
pub mod trajectory;

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
