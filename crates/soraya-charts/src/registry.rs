//! The chart surface registry.
//!
//! Destroy-before-create: installing onto a surface that already holds a
//! chart removes and reports the prior instance first, so the webview
//! can dispose its object and no two live charts ever share a surface.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;
use uuid::Uuid;

use crate::spec::{surfaces, ChartInstance, ChartSpec};
use crate::{comparison, trajectory};

/// Result of an install: the new chart plus the id the webview must
/// dispose, if any.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstallOutcome {
    pub instance: ChartInstance,
    pub replaced: Option<Uuid>,
}

#[derive(Debug, Default)]
pub struct ChartRegistry {
    live: HashMap<String, ChartInstance>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_comparison(
        &mut self,
        absolute_5year: f64,
        average_5year: f64,
        accent_hex: &str,
    ) -> InstallOutcome {
        self.install(
            surfaces::COMPARISON,
            comparison::spec(absolute_5year, average_5year, accent_hex),
        )
    }

    pub fn render_trajectory(
        &mut self,
        current_age: u32,
        horizon_age: u32,
        absolute_5year: f64,
        absolute_lifetime: Option<f64>,
    ) -> InstallOutcome {
        self.install(
            surfaces::TRAJECTORY,
            trajectory::spec(current_age, horizon_age, absolute_5year, absolute_lifetime),
        )
    }

    fn install(&mut self, surface: &str, spec: ChartSpec) -> InstallOutcome {
        let instance = ChartInstance {
            id: Uuid::new_v4(),
            surface: surface.to_string(),
            spec,
        };

        let replaced = self
            .live
            .insert(surface.to_string(), instance.clone())
            .map(|previous| previous.id);

        if let Some(previous_id) = replaced {
            info!(surface, replaced = %previous_id, chart = %instance.id, "chart replaced");
        } else {
            info!(surface, chart = %instance.id, "chart installed");
        }

        InstallOutcome { instance, replaced }
    }

    pub fn live(&self, surface: &str) -> Option<&ChartInstance> {
        self.live.get(surface)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Remove one surface's chart, returning the id to dispose.
    pub fn teardown(&mut self, surface: &str) -> Option<Uuid> {
        let removed = self.live.remove(surface).map(|instance| instance.id);
        if let Some(id) = removed {
            info!(surface, chart = %id, "chart torn down");
        }
        removed
    }

    /// Remove every chart; session reset. Returns the ids to dispose.
    pub fn teardown_all(&mut self) -> Vec<Uuid> {
        let ids: Vec<Uuid> = self.live.drain().map(|(_, instance)| instance.id).collect();
        if !ids.is_empty() {
            info!(count = ids.len(), "all charts torn down");
        }
        ids
    }
}
