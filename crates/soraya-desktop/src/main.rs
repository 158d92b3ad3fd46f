#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::sync::Arc;

use eyre::Result;
use tauri::Manager;
use tokio::sync::Mutex;

use soraya_desktop::session::Session;

mod commands;
mod state;

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = soraya_desktop::config::load_or_init()?;
    let session = Session::new(config).map_err(|e| eyre::eyre!("service client: {e}"))?;

    tauri::Builder::default()
        .manage(state::DesktopState::new(session))
        .setup(|app| {
            let state: tauri::State<'_, state::DesktopState> = app.state();
            let session = Arc::clone(&state.session);
            tauri::async_runtime::spawn(startup_probe(session));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_intake_view,
            commands::set_field,
            commands::advance_step,
            commands::retreat_step,
            commands::submit_assessment,
            commands::export_report,
            commands::save_report_to_disk,
            commands::reset_session,
            commands::drain_toasts,
            commands::get_settings,
            commands::set_theme,
            commands::service_status,
        ])
        .run(tauri::generate_context!())
        .map_err(|e| eyre::eyre!("tauri error: {e}"))?;

    Ok(())
}

/// Log service reachability and catalog shape once at launch; failures
/// are advisory, the app starts either way.
async fn startup_probe(session: Arc<Mutex<Session>>) {
    let client = session.lock().await.client().clone();

    match client.health().await {
        Ok(health) => {
            tracing::info!(status = %health.status, version = %health.version, "risk service reachable");
        }
        Err(e) => {
            tracing::warn!(error = %e, "risk service unreachable at startup");
            return;
        }
    }

    match client.model_info().await {
        Ok(info) => tracing::info!(model = %info.model_name, version = %info.version, "model info"),
        Err(e) => tracing::warn!(error = %e, "model info unavailable"),
    }

    match client.races().await {
        Ok(catalog) => tracing::info!(
            main_races = catalog.main_races.len(),
            asian_subraces = catalog.asian_subraces.len(),
            "race catalog loaded"
        ),
        Err(e) => tracing::warn!(error = %e, "race catalog unavailable"),
    }
}
