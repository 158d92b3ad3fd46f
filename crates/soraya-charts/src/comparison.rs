//! The three-segment doughnut comparing the patient's 5-year risk to the
//! population average.

use crate::round2;
use crate::spec::{ChartKind, ChartSeries, ChartSpec};

const AVERAGE_COLOR: &str = "#90a4ae";
const REMAINDER_COLOR: &str = "#eceff1";

/// Segment data is `[absolute%, average%, 100 − absolute%]`, each
/// rounded to two decimals. Inputs are probabilities in [0, 1].
pub fn spec(absolute_5year: f64, average_5year: f64, accent_hex: &str) -> ChartSpec {
    let absolute_pct = round2(absolute_5year * 100.0);
    let average_pct = round2(average_5year * 100.0);
    let remainder_pct = round2(100.0 - absolute_pct);

    ChartSpec {
        kind: ChartKind::Doughnut,
        labels: vec![
            "Your 5-year risk".to_string(),
            "Population average".to_string(),
            "Remaining".to_string(),
        ],
        series: vec![ChartSeries {
            label: "5-year risk".to_string(),
            values: vec![absolute_pct, average_pct, remainder_pct],
            colors: vec![
                accent_hex.to_string(),
                AVERAGE_COLOR.to_string(),
                REMAINDER_COLOR.to_string(),
            ],
        }],
        subtitle: None,
    }
}
