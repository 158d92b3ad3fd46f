use serde::{Deserialize, Serialize};

/// Document styling for the PDF export. Text is set in the built-in
/// Helvetica pair, so only sizes and margins are configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Body text font size in points.
    pub body_size: usize,

    /// Heading 1 font size in points.
    pub heading1_size: usize,

    /// Heading 2 font size in points.
    pub heading2_size: usize,

    /// Footer font size in points.
    pub footer_size: usize,

    /// Page margin in inches (applied uniformly).
    pub margin_inches: f64,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_size: 11,
            heading1_size: 18,
            heading2_size: 14,
            footer_size: 8,
            margin_inches: 1.0,
        }
    }
}
