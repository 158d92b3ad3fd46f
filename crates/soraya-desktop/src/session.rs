//! One patient session: the wizard, the service client, the rendered
//! report, and every piece of frontend-visible state that outlives a
//! single command invocation.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use soraya_charts::registry::{ChartRegistry, InstallOutcome};
use soraya_core::models::assessment::RiskAssessmentResult;
use soraya_core::models::form::FormSnapshot;
use soraya_core::models::report::RenderedReport;
use soraya_core::toast::{Toast, ToastQueue};
use soraya_export::styles::DocumentStyles;
use soraya_gateway::client::GailClient;
use soraya_gateway::error::GatewayError;
use soraya_intake::error::IntakeError;
use soraya_intake::rules::FieldIssue;
use soraya_intake::schema::{self, StepDefinition};
use soraya_intake::wizard::{FieldUpdate, ProgressInfo, Wizard, WizardPhase};
use soraya_report::render::render;

use crate::config::{self, ConfigInfo, SorayaConfig, Theme};
use crate::transition::TransitionGate;

/// How long the frontend's step-change animation runs before the wizard
/// returns to the interactive phase.
pub const STEP_TRANSITION: Duration = Duration::from_millis(300);

const REVIEW_FIELDS_MESSAGE: &str = "Please fix the highlighted fields to continue.";

/// Everything the intake screen needs to draw itself.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeView {
    pub steps: Vec<StepDefinition>,
    pub progress: ProgressInfo,
    pub phase: WizardPhase,
    pub submitting: bool,
    pub values: FormSnapshot,
    pub hidden_groups: BTreeSet<String>,
    pub has_report: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    Advanced { progress: ProgressInfo },
    Blocked { issues: Vec<FieldIssue> },
}

/// Result of a submission attempt. `Failed` is an expected outcome
/// (service down, model rejection), not a command error; the command
/// layer reserves `Err` for misuse such as submitting mid-flight.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Completed {
        report: RenderedReport,
        comparison: InstallOutcome,
        trajectory: InstallOutcome,
    },
    Blocked {
        issues: Vec<FieldIssue>,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetView {
    pub view: IntakeView,
    /// Chart instances the frontend must dispose before redrawing.
    pub disposed_charts: Vec<Uuid>,
}

pub struct Session {
    config: SorayaConfig,
    wizard: Wizard,
    client: GailClient,
    charts: ChartRegistry,
    toasts: ToastQueue,
    pub transitions: TransitionGate,
    result: Option<RiskAssessmentResult>,
    report: Option<RenderedReport>,
}

impl Session {
    pub fn new(config: SorayaConfig) -> Result<Self, GatewayError> {
        let client = GailClient::new(
            &config.service_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self {
            config,
            wizard: Wizard::new(),
            client,
            charts: ChartRegistry::new(),
            toasts: ToastQueue::new(),
            transitions: TransitionGate::new(),
            result: None,
            report: None,
        })
    }

    pub fn config(&self) -> &SorayaConfig {
        &self.config
    }

    pub fn client(&self) -> &GailClient {
        &self.client
    }

    pub fn report(&self) -> Option<&RenderedReport> {
        self.report.as_ref()
    }

    pub fn chart_count(&self) -> usize {
        self.charts.live_count()
    }

    pub fn intake_view(&self) -> IntakeView {
        IntakeView {
            steps: schema::intake_steps().to_vec(),
            progress: self.wizard.progress(),
            phase: self.wizard.phase(),
            submitting: self.wizard.is_submitting(),
            values: self.wizard.form().snapshot(),
            hidden_groups: self.wizard.hidden_groups(),
            has_report: self.report.is_some(),
        }
    }

    pub fn set_field(&mut self, key: &str, value: &str) -> Result<FieldUpdate, IntakeError> {
        self.wizard.set_field(key, value)
    }

    /// Move the wizard forward. A blocked advance queues one review
    /// toast and hands the field issues back for inline display.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, IntakeError> {
        match self.wizard.advance() {
            Ok(progress) => Ok(AdvanceOutcome::Advanced { progress }),
            Err(IntakeError::ValidationFailed { issues, .. }) => {
                self.toasts.error(REVIEW_FIELDS_MESSAGE);
                Ok(AdvanceOutcome::Blocked { issues })
            }
            Err(other) => Err(other),
        }
    }

    pub fn retreat(&mut self) -> ProgressInfo {
        self.wizard.retreat()
    }

    pub fn finish_transition(&mut self) {
        self.wizard.finish_transition();
    }

    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }

    pub fn set_theme(&mut self, theme: Theme) -> eyre::Result<ConfigInfo> {
        self.config.theme = theme;
        config::save_config(&self.config)?;
        Ok(config::config_info(&self.config))
    }

    /// Export the current report as PDF bytes.
    pub fn export_pdf(&self) -> eyre::Result<Vec<u8>> {
        let report = self
            .report
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no rendered report to export"))?;
        let bytes = soraya_export::pdf::export_pdf(report, &DocumentStyles::default())?;
        Ok(bytes)
    }

    /// Default file name offered by the save dialog.
    pub fn export_file_name(&self) -> String {
        match &self.report {
            Some(report) => format!("risk-report-{}.pdf", report.generated_on),
            None => "risk-report.pdf".to_string(),
        }
    }

    /// Discard the wizard, the assessment, and every live chart.
    pub fn reset(&mut self) -> ResetView {
        self.wizard.reset();
        self.result = None;
        self.report = None;
        let disposed_charts = self.charts.teardown_all();
        self.transitions.cancel();
        info!("session reset");
        ResetView {
            view: self.intake_view(),
            disposed_charts,
        }
    }
}

/// Submit the frozen form to the risk service and, on success, render
/// the report and install both charts.
///
/// The session lock is held only to latch the submission and to apply
/// the outcome; the HTTP round trip runs unlocked so toast drains and
/// status polls stay responsive. [`Wizard::finish_submission`] runs on
/// every path, so a failed attempt leaves the wizard ready to retry.
pub async fn submit_assessment(handle: &Arc<Mutex<Session>>) -> Result<SubmitOutcome, String> {
    let (client, snapshot) = {
        let mut session = handle.lock().await;
        match session.wizard.begin_submission() {
            Ok(snapshot) => (session.client.clone(), snapshot),
            Err(IntakeError::ValidationFailed { issues, .. }) => {
                session.toasts.error(REVIEW_FIELDS_MESSAGE);
                return Ok(SubmitOutcome::Blocked { issues });
            }
            Err(other) => return Err(other.to_string()),
        }
    };

    let outcome = client.submit(&snapshot).await;

    let mut session = handle.lock().await;
    session.wizard.finish_submission();
    match outcome {
        Ok(result) => {
            let report = render(&result, &snapshot, jiff::Zoned::now().date());
            let assessment = &result.risk_assessment;
            let comparison = session.charts.render_comparison(
                assessment.absolute_risk_5year,
                assessment.average_risk_5year,
                &report.score.accent_hex,
            );
            let trajectory = session.charts.render_trajectory(
                result.patient_info.age,
                result.patient_info.projection_age_lifetime,
                assessment.absolute_risk_5year,
                assessment.absolute_risk_lifetime,
            );
            info!(category = ?report.score.category, "assessment rendered");
            session.toasts.success("Risk assessment completed.");
            session.result = Some(result);
            session.report = Some(report.clone());
            Ok(SubmitOutcome::Completed {
                report,
                comparison,
                trajectory,
            })
        }
        Err(error) => {
            let message = error.user_message();
            warn!(error = %error, "submission failed");
            session.toasts.error(message.clone());
            Ok(SubmitOutcome::Failed { message })
        }
    }
}
