//! The four-point risk trajectory line.
//!
//! A deliberate simplification of a continuous risk curve: now, +5
//! years, +10 years (weighted 0.3 between the two horizons), and the
//! lifetime point capped at age 90. The weight and the cap are part of
//! the product's presentation contract.

use crate::round2;
use crate::spec::{ChartKind, ChartSeries, ChartSpec};

const LINE_COLOR: &str = "#1e88e5";
const AGE_CAP: u32 = 90;
const TEN_YEAR_WEIGHT: f64 = 0.3;

/// Inputs are probabilities in [0, 1]. A missing lifetime projection
/// (the service omits it past age 75) flattens the tail to the 5-year
/// value rather than dropping the chart.
pub fn spec(
    current_age: u32,
    horizon_age: u32,
    absolute_5year: f64,
    absolute_lifetime: Option<f64>,
) -> ChartSpec {
    let five_year_pct = round2(absolute_5year * 100.0);
    let lifetime_pct = round2(absolute_lifetime.unwrap_or(absolute_5year) * 100.0);
    let ten_year_pct = round2(five_year_pct + (lifetime_pct - five_year_pct) * TEN_YEAR_WEIGHT);

    let ages = [
        current_age,
        current_age + 5,
        current_age + 10,
        AGE_CAP.min(current_age + 45),
    ];

    ChartSpec {
        kind: ChartKind::Line,
        labels: ages.iter().map(|age| age.to_string()).collect(),
        series: vec![ChartSeries {
            label: "Absolute risk".to_string(),
            values: vec![0.0, five_year_pct, ten_year_pct, lifetime_pct],
            colors: vec![LINE_COLOR.to_string()],
        }],
        subtitle: Some(format!("Projected to age {horizon_age}")),
    }
}
