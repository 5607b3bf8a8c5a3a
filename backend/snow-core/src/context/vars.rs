//! Pipeline variable access and name normalization.
//!
//! Variables arrive under dotted, capitalized names such as
//! `ServiceNow.Auth.ClientId`. Context keys are the flattened
//! snake_case forms with the leading namespace segment dropped
//! (`auth_client_id`).

use crate::context::CrContext;
use crate::error::context::ContextError;

use std::collections::BTreeMap;
use std::env;

use log::{debug, info};

/// Variables the create-and-promote workflow requires.
pub const CREATE_REQUIRED_VARS: &[&str] = &[
    "ServiceNow.Url",
    "ServiceNow.Auth.GrantType",
    "ServiceNow.Auth.ClientId",
    "ServiceNow.Auth.ClientSecret",
    "ServiceNow.Auth.Username",
    "ServiceNow.Auth.Password",
    "WebSiteName",
    "Octopus.Environment.Name",
    "Octopus.Deployment.CreatedBy.Username",
    "Octopus.Project.Name",
];

/// Optional release metadata folded into the CR justification text.
pub const CREATE_OPTIONAL_VARS: &[&str] = &["Octopus.Release.Number", "Octopus.Release.Notes"];

/// Variables the verify and monitor workflows require. The CR must
/// already exist, so its number is mandatory here.
pub const VERIFY_REQUIRED_VARS: &[&str] = &[
    "ServiceNow.Url",
    "ServiceNow.Auth.GrantType",
    "ServiceNow.Auth.ClientId",
    "ServiceNow.Auth.ClientSecret",
    "ServiceNow.Auth.Username",
    "ServiceNow.Auth.Password",
    "ServiceNow.Cr.Number",
];

/// Key/value provider backing the context. Production reads the
/// process environment; tests use [`MapVariableSource`].
pub trait VariableSource {
    fn get(&self, name: &str) -> Option<String>;

    /// Publish a value for downstream pipeline steps.
    fn set(&mut self, name: &str, value: &str);
}

/// Reads variables from the process environment, trying the dotted
/// name first and its underscore form second (CI runners commonly
/// export `ServiceNow.Url` as `ServiceNow_Url`).
pub struct EnvVariableSource;

impl EnvVariableSource {
    pub fn new() -> Self {
        // A .env file is a convenience for local runs; absence is fine.
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded .env from: {path:?}"),
            Err(_) => debug!("No .env file found - using process environment only"),
        }
        Self
    }
}

impl Default for EnvVariableSource {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableSource for EnvVariableSource {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name)
            .or_else(|_| env::var(name.replace('.', "_")))
            .ok()
    }

    fn set(&mut self, name: &str, value: &str) {
        // Emitted on stdout so the wrapping pipeline step can capture
        // the pair; in-process state is not mutated.
        println!("{name}={value}");
        info!("Published pipeline variable {name}");
    }
}

/// In-memory source for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MapVariableSource {
    values: BTreeMap<String, String>,
}

impl MapVariableSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl VariableSource for MapVariableSource {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_owned(), value.to_owned());
    }
}

/// Read the given variables into a context keyed by their snake_case
/// names. A missing required variable is fatal; optional variables are
/// skipped when absent or empty.
pub fn read_pipeline_vars(
    source: &dyn VariableSource,
    required: &[&str],
    optional: &[&str],
) -> Result<CrContext, ContextError> {
    info!("BEGIN: Reading pipeline variables");
    let mut context = CrContext::new();

    for name in required {
        let value = source
            .get(name)
            .ok_or_else(|| ContextError::missing_variable(*name))?;
        context.insert(to_snake_case(name), value);
    }

    for name in optional {
        match source.get(name) {
            Some(value) if !value.is_empty() => context.insert(to_snake_case(name), value),
            _ => debug!("Optional variable '{name}' not set"),
        }
    }

    info!("END: Reading pipeline variables");
    Ok(context)
}

/// Convert a dotted capitalized variable name to its flat snake_case
/// context key.
///
/// The first dot-segment is a namespace and is dropped, unless the
/// name has no dot at all. A run of consecutive uppercase letters is
/// one word, not one word per letter: `CRNumber` becomes `cr_number`.
pub fn to_snake_case(name: &str) -> String {
    let segments: Vec<&str> = name.split('.').collect();
    let parts = if segments.len() > 1 {
        &segments[1..]
    } else {
        &segments[..]
    };

    parts
        .iter()
        .map(|part| snake_segment(part))
        .collect::<Vec<_>>()
        .join("_")
}

fn snake_segment(part: &str) -> String {
    let chars: Vec<char> = part.chars().collect();
    let mut out = String::with_capacity(part.len() + 4);

    for (index, &current) in chars.iter().enumerate() {
        if current.is_uppercase() {
            let boundary = match index.checked_sub(1).map(|i| chars[i]) {
                None => false,
                Some(previous) if previous.is_uppercase() => {
                    // Inside an uppercase run; break only where the run
                    // hands over to a lowercase tail (CRNumber -> cr_number).
                    matches!(chars.get(index + 1), Some(next) if next.is_lowercase())
                }
                Some(_) => true,
            };
            if boundary {
                out.push('_');
            }
            out.extend(current.to_lowercase());
        } else {
            out.push(current);
        }
    }

    out
}
