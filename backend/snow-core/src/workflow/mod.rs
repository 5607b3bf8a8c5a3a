//! Top-level CR workflows: create-and-promote, read-only verification,
//! and the monitoring variant that mails a status report on failure.
//!
//! Every stage propagates `Result`; only the binary decides process
//! termination.

use crate::CR_NUMBER_VARIABLE;
use crate::auth::get_token;
use crate::context::vars::{
    CREATE_OPTIONAL_VARS, CREATE_REQUIRED_VARS, VERIFY_REQUIRED_VARS, VariableSource,
    read_pipeline_vars,
};
use crate::context::{STATE_IMPLEMENT, apply_defaults, cr_defaults, keys};
use crate::error::workflow::WorkflowError;
use crate::report::{Mailer, MonitorReport, StageStatus};
use crate::retry::RetryClient;
use crate::snow_client::ServiceNowClient;
use crate::template::set_context;

use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde_json::Value;
use tokio::time::sleep as TokioSleep;

/// Fixed wait between CR creation and the implement transition, giving
/// ServiceNow time to finish scheduling the record.
pub const GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Result of the create-and-promote workflow.
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub cr_number: String,
    /// Whether the implement transition was accepted.
    pub implemented: bool,
}

/// Result of the monitoring workflow.
#[derive(Debug, Clone)]
pub struct MonitorOutcome {
    pub report: MonitorReport,
    pub result: Option<Value>,
}

/// Create a CR from pipeline variables and the plan template, publish
/// its number, then move it to implement state after the grace period.
///
/// The implement patch is only issued once create has returned a
/// success body; a rejected create fails the workflow instead.
pub async fn create_and_promote(
    source: &mut dyn VariableSource,
    template_path: &Path,
) -> Result<CreateOutcome, WorkflowError> {
    let mut context = read_pipeline_vars(source, CREATE_REQUIRED_VARS, CREATE_OPTIONAL_VARS)?;
    apply_defaults(&mut context, cr_defaults());
    set_context(&mut context, template_path)?;

    let retry = RetryClient::new()?;
    let token = get_token(&retry, &context).await?;
    let client = ServiceNowClient::new(retry, context.require(keys::URL)?, &token)?;

    let Some(cr_number) = client.create_change_request(&context).await? else {
        warn!("ServiceNow did not report success for the create call");
        return Err(WorkflowError::create_rejected());
    };
    info!("CR number: {cr_number}");

    // Hand the number to downstream pipeline steps before promoting.
    source.set(CR_NUMBER_VARIABLE, &cr_number);

    info!(
        "Graceful wait for {} secs before moving CR to implement state",
        GRACE_PERIOD.as_secs()
    );
    TokioSleep(GRACE_PERIOD).await;

    context.insert(keys::CR_STATE, STATE_IMPLEMENT);
    context.insert(keys::CR_NUMBER, cr_number.clone());
    let implemented = client.update_change_request(&context).await?;

    Ok(CreateOutcome {
        cr_number,
        implemented,
    })
}

/// Fetch an existing CR (its number must be in the variables) and
/// return the raw result object.
pub async fn verify(source: &dyn VariableSource) -> Result<Option<Value>, WorkflowError> {
    let context = read_pipeline_vars(source, VERIFY_REQUIRED_VARS, &[])?;

    let retry = RetryClient::new()?;
    let token = get_token(&retry, &context).await?;
    let client = ServiceNowClient::new(retry, context.require(keys::URL)?, &token)?;

    let result = client.get_change_request(&context).await?;
    Ok(result)
}

/// Verification with a status report threaded through the stages. On
/// any failure the report is mailed before the error surfaces -
/// notify, then fail.
pub async fn monitor(
    source: &dyn VariableSource,
    mailer: &Mailer,
) -> Result<MonitorOutcome, WorkflowError> {
    let mut report = MonitorReport::new();

    match monitor_stages(source, &mut report).await {
        Ok(result) => Ok(MonitorOutcome { report, result }),
        Err(error) => {
            report.record_error(error.to_string());
            if let Err(mail_error) = mailer.send_status_report(&report) {
                warn!("Failed to send monitoring report: {mail_error}");
            }
            Err(error)
        }
    }
}

async fn monitor_stages(
    source: &dyn VariableSource,
    report: &mut MonitorReport,
) -> Result<Option<Value>, WorkflowError> {
    let context = read_pipeline_vars(source, VERIFY_REQUIRED_VARS, &[])?;

    let retry = RetryClient::new()?;
    let token = get_token(&retry, &context).await?;
    report.connectivity = StageStatus::Success;
    report.auth_tokens = StageStatus::Success;

    let client = ServiceNowClient::new(retry, context.require(keys::URL)?, &token)?;
    let result = client.get_change_request(&context).await?;
    if result.is_some() {
        report.fetch_cr = StageStatus::Success;
    }

    Ok(result)
}
