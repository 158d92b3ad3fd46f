use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use tauri::State;

use soraya_core::toast::Toast;
use soraya_desktop::config::{self, ConfigInfo, Theme};
use soraya_desktop::session::{
    self, AdvanceOutcome, IntakeView, ResetView, STEP_TRANSITION, SubmitOutcome,
};
use soraya_gateway::client::HealthStatus;
use soraya_intake::wizard::{FieldUpdate, ProgressInfo};

use crate::state::DesktopState;

#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub reachable: bool,
    pub health: Option<HealthStatus>,
    pub detail: Option<String>,
}

#[tauri::command]
pub async fn get_intake_view(state: State<'_, DesktopState>) -> Result<IntakeView, String> {
    Ok(state.session.lock().await.intake_view())
}

#[tauri::command]
pub async fn set_field(
    state: State<'_, DesktopState>,
    key: String,
    value: String,
) -> Result<FieldUpdate, String> {
    state
        .session
        .lock()
        .await
        .set_field(&key, &value)
        .map_err(|e| e.to_string())
}

/// Advance the wizard and schedule the transition clear. The scheduled
/// task checks its ticket before touching the wizard, so a reset or a
/// faster second advance makes it a no-op.
#[tauri::command]
pub async fn advance_step(state: State<'_, DesktopState>) -> Result<AdvanceOutcome, String> {
    let (outcome, ticket) = {
        let mut session = state.session.lock().await;
        let outcome = session.advance().map_err(|e| e.to_string())?;
        let ticket = matches!(outcome, AdvanceOutcome::Advanced { .. })
            .then(|| session.transitions.issue());
        (outcome, ticket)
    };

    if let Some(ticket) = ticket {
        let handle = Arc::clone(&state.session);
        tauri::async_runtime::spawn(async move {
            tokio::time::sleep(STEP_TRANSITION).await;
            let mut session = handle.lock().await;
            if ticket.is_current() {
                session.finish_transition();
            }
        });
    }

    Ok(outcome)
}

#[tauri::command]
pub async fn retreat_step(state: State<'_, DesktopState>) -> Result<ProgressInfo, String> {
    Ok(state.session.lock().await.retreat())
}

#[tauri::command]
pub async fn submit_assessment(state: State<'_, DesktopState>) -> Result<SubmitOutcome, String> {
    session::submit_assessment(&state.session).await
}

/// Current report as base64 PDF bytes, for the frontend's inline
/// preview pane.
#[tauri::command]
pub async fn export_report(state: State<'_, DesktopState>) -> Result<String, String> {
    let session = state.session.lock().await;
    let bytes = session.export_pdf().map_err(|e| e.to_string())?;
    Ok(STANDARD.encode(bytes))
}

/// Export the report and write it where the save dialog points. Returns
/// the chosen path, or None when the patient closes the dialog.
#[tauri::command]
pub async fn save_report_to_disk(state: State<'_, DesktopState>) -> Result<Option<String>, String> {
    let (bytes, file_name) = {
        let session = state.session.lock().await;
        let bytes = session.export_pdf().map_err(|e| e.to_string())?;
        (bytes, session.export_file_name())
    };

    let Some(handle) = rfd::AsyncFileDialog::new()
        .set_file_name(&file_name)
        .add_filter("PDF", &["pdf"])
        .save_file()
        .await
    else {
        return Ok(None);
    };

    let path = handle.path().to_path_buf();
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| e.to_string())?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "report saved");
    Ok(Some(path.display().to_string()))
}

#[tauri::command]
pub async fn reset_session(state: State<'_, DesktopState>) -> Result<ResetView, String> {
    Ok(state.session.lock().await.reset())
}

#[tauri::command]
pub async fn drain_toasts(state: State<'_, DesktopState>) -> Result<Vec<Toast>, String> {
    Ok(state.session.lock().await.drain_toasts())
}

#[tauri::command]
pub async fn get_settings(state: State<'_, DesktopState>) -> Result<ConfigInfo, String> {
    let session = state.session.lock().await;
    Ok(config::config_info(session.config()))
}

#[tauri::command]
pub async fn set_theme(state: State<'_, DesktopState>, theme: Theme) -> Result<ConfigInfo, String> {
    state
        .session
        .lock()
        .await
        .set_theme(theme)
        .map_err(|e| e.to_string())
}

/// Ping the risk service for the status footer. Unreachable is a normal
/// answer here, not an error.
#[tauri::command]
pub async fn service_status(state: State<'_, DesktopState>) -> Result<ServiceStatus, String> {
    let client = state.session.lock().await.client().clone();
    match client.health().await {
        Ok(health) => Ok(ServiceStatus {
            reachable: true,
            health: Some(health),
            detail: None,
        }),
        Err(e) => Ok(ServiceStatus {
            reachable: false,
            health: None,
            detail: Some(e.user_message()),
        }),
    }
}
