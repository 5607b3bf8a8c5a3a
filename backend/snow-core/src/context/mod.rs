//! Change-request context: the flat key/value mapping assembled from
//! pipeline variables and computed defaults, plus the variable layer
//! that feeds it.

pub mod vars;

pub use vars::{
    EnvVariableSource, MapVariableSource, VariableSource, read_pipeline_vars, to_snake_case,
};

use crate::error::context::ContextError;

use std::collections::BTreeMap;
use std::time::SystemTime;

use humantime::format_rfc3339_seconds;
use log::info;

/// Context keys, in their snake_case form.
pub mod keys {
    pub const URL: &str = "url";
    pub const AUTH_GRANT_TYPE: &str = "auth_grant_type";
    pub const AUTH_CLIENT_ID: &str = "auth_client_id";
    pub const AUTH_CLIENT_SECRET: &str = "auth_client_secret";
    pub const AUTH_USERNAME: &str = "auth_username";
    pub const AUTH_PASSWORD: &str = "auth_password";
    pub const WEB_SITE_NAME: &str = "web_site_name";
    pub const ENVIRONMENT_NAME: &str = "environment_name";
    pub const PROJECT_NAME: &str = "project_name";
    pub const RELEASE_NUMBER: &str = "release_number";
    pub const RELEASE_NOTES: &str = "release_notes";
    pub const DEPLOYMENT_CREATED_BY_USERNAME: &str = "deployment_created_by_username";
    pub const CR_TYPE: &str = "cr_type";
    pub const CR_STATE: &str = "cr_state";
    pub const CR_DURATION: &str = "cr_duration";
    pub const CR_START_DATE: &str = "cr_start_date";
    pub const CR_CMDB_CI: &str = "cr_cmdb_ci";
    pub const CR_IMPLEMENTATION_PLAN: &str = "cr_implementation_plan";
    pub const CR_TEST_PLAN: &str = "cr_test_plan";
    pub const CR_BACKOUT_PLAN: &str = "cr_backout_plan";
    pub const CR_NUMBER: &str = "cr_number";
}

/// CR state vocabulary. Freshly created CRs are scheduled; the promote
/// step moves them to implement.
pub const STATE_SCHEDULED: &str = "scheduled";
pub const STATE_IMPLEMENT: &str = "implement";

const DEFAULT_CR_TYPE: &str = "standard";
const DEFAULT_CR_DURATION: &str = "180";

/// Flat string map threaded through every workflow stage.
#[derive(Debug, Clone, Default)]
pub struct CrContext {
    values: BTreeMap<String, String>,
}

impl CrContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a key that must be present.
    #[track_caller]
    pub fn require(&self, key: &str) -> Result<&str, ContextError> {
        self.get(key).ok_or_else(|| ContextError::missing_key(key))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

/// Release-independent parameters required to move a CR through the
/// scheduled/implement states.
pub fn cr_defaults() -> Vec<(&'static str, String)> {
    info!("BEGIN: Reading CR defaults");
    let defaults = vec![
        (keys::CR_TYPE, DEFAULT_CR_TYPE.to_owned()),
        (keys::CR_STATE, STATE_SCHEDULED.to_owned()),
        (keys::CR_DURATION, DEFAULT_CR_DURATION.to_owned()),
        (
            keys::CR_START_DATE,
            format_rfc3339_seconds(SystemTime::now()).to_string(),
        ),
    ];
    info!("END: Reading CR defaults");
    defaults
}

/// Fill in defaults for keys the pipeline did not supply.
pub fn apply_defaults(context: &mut CrContext, defaults: Vec<(&'static str, String)>) {
    for (key, value) in defaults {
        if !context.contains(key) {
            context.insert(key, value);
        }
    }
}
