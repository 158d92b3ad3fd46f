//! Numeric presentation rules: probabilities as two-decimal percentages,
//! relative risk as a two-decimal multiplier.

/// `0.0234` → `"2.34%"`.
pub fn percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// `1.2371` → `"1.24x"`.
pub fn ratio(value: f64) -> String {
    format!("{value:.2}x")
}

/// Probability to rounded percent points: `0.0234` → `2.34`.
pub fn percent_points(probability: f64) -> f64 {
    round2(probability * 100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
