//! Site/environment plan template resolution.
//!
//! The template file maps a site name either directly to a plan record
//! or to per-environment records:
//!
//! ```json
//! {
//!   "site-a": {
//!     "prod": {
//!       "Cmdb_Ci": "CI1",
//!       "Install Plan": "...",
//!       "Testing Plan": "...",
//!       "Rollback": "..."
//!     }
//!   }
//! }
//! ```

use crate::context::{CrContext, keys};
use crate::error::template::TemplateError;

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;
use serde_json::Value;

/// Default template location; overridable from the CLI.
pub const DEFAULT_TEMPLATE_PATH: &str = "/etc/sncr/cr-plan-templates.json";

/// Plan record for one site (or one site/environment pair).
#[derive(Debug, Clone, Deserialize)]
pub struct PlanTemplate {
    #[serde(rename = "Cmdb_Ci")]
    pub cmdb_ci: String,
    #[serde(rename = "Install Plan")]
    pub install_plan: String,
    #[serde(rename = "Testing Plan")]
    pub testing_plan: String,
    #[serde(rename = "Rollback")]
    pub rollback: String,
}

/// Resolve the plan record for a site, preferring an
/// environment-specific sub-entry when one exists.
pub fn load_template(
    path: &Path,
    site: &str,
    environment: &str,
) -> Result<PlanTemplate, TemplateError> {
    let contents = fs::read_to_string(path).map_err(|e| TemplateError::read(path, e))?;
    let data: Value =
        serde_json::from_str(&contents).map_err(|e| TemplateError::parse(path, e.to_string()))?;

    let Some(entry) = data.get(site) else {
        return Err(TemplateError::site_not_defined(site));
    };

    let record = entry.get(environment).unwrap_or(entry);
    serde_json::from_value(record.clone())
        .map_err(|e| TemplateError::malformed(site, e.to_string()))
}

/// Resolve the plan template for the context's site/environment and
/// copy the record into it.
pub fn set_context(context: &mut CrContext, template_path: &Path) -> Result<(), TemplateError> {
    info!("BEGIN: Setting deployment context");

    let site = context.require(keys::WEB_SITE_NAME)?.to_owned();
    let environment = context.require(keys::ENVIRONMENT_NAME)?.to_owned();
    let template = load_template(template_path, &site, &environment)?;

    context.insert(keys::CR_CMDB_CI, template.cmdb_ci);
    context.insert(
        keys::CR_IMPLEMENTATION_PLAN,
        cleandoc(&template.install_plan),
    );
    context.insert(keys::CR_TEST_PLAN, cleandoc(&template.testing_plan));
    context.insert(keys::CR_BACKOUT_PLAN, cleandoc(&template.rollback));

    info!("END: Setting deployment context");
    Ok(())
}

/// Dedent plan text: drop surrounding blank lines and strip the
/// leading whitespace common to all lines after the first.
pub fn cleandoc(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                line.trim_start().trim_end().to_owned()
            } else {
                line.chars().skip(margin).collect::<String>().trim_end().to_owned()
            }
        })
        .collect();

    while cleaned.first().is_some_and(|line| line.is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|line| line.is_empty()) {
        cleaned.pop();
    }

    cleaned.join("\n")
}
