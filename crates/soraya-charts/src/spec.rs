use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Named rendering targets. Each holds at most one live chart.
pub mod surfaces {
    pub const COMPARISON: &str = "risk-comparison";
    pub const TRAJECTORY: &str = "risk-trajectory";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChartKind {
    Doughnut,
    Line,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
    /// One color per value for segmented charts, a single color for
    /// line series.
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub subtitle: Option<String>,
}

/// A live chart. The id is what the webview disposes when told a
/// surface was replaced.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChartInstance {
    pub id: Uuid,
    pub surface: String,
    pub spec: ChartSpec,
}
