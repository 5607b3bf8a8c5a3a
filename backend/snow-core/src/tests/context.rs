// Unit tests for the context module: name conversion, variable
// reading and default application.

use crate::context::vars::{
    CREATE_OPTIONAL_VARS, CREATE_REQUIRED_VARS, MapVariableSource, read_pipeline_vars,
    to_snake_case,
};
use crate::context::{CrContext, apply_defaults, cr_defaults, keys};
use crate::error::context::ContextError;

use serial_test::serial;

/// **VALUE**: Verifies the namespace segment is dropped and each
/// remaining segment is converted to snake_case.
///
/// **BUG THIS CATCHES**: Off-by-one segment handling would map
/// `ServiceNow.Auth.ClientId` to `service_now_auth_client_id` and every
/// context lookup downstream would miss.
#[test]
fn given_dotted_name_when_to_snake_case_then_drops_namespace() {
    assert_eq!(to_snake_case("ServiceNow.Auth.ClientId"), "auth_client_id");
    assert_eq!(to_snake_case("ServiceNow.Url"), "url");
    assert_eq!(to_snake_case("Octopus.Release.Number"), "release_number");
    assert_eq!(
        to_snake_case("Octopus.Deployment.CreatedBy.Username"),
        "deployment_created_by_username"
    );
}

/// **VALUE**: Single-segment names have no namespace to drop; the whole
/// string is converted.
#[test]
fn given_undotted_name_when_to_snake_case_then_uses_all_segments() {
    assert_eq!(to_snake_case("WebSiteName"), "web_site_name");
}

/// **VALUE**: An uppercase run is one word boundary, not one per
/// letter.
///
/// **BUG THIS CATCHES**: A per-letter splitter would produce
/// `c_r_number` and the key would never match.
#[test]
fn given_uppercase_run_when_to_snake_case_then_treats_run_as_one_word() {
    assert_eq!(to_snake_case("CRNumber"), "cr_number");
    assert_eq!(to_snake_case("ServiceNow.Cr.CRNumber"), "cr_cr_number");
}

#[test]
fn given_missing_key_when_require_then_names_the_key() {
    let context = CrContext::new();

    let error = context.require(keys::CR_NUMBER).unwrap_err();

    match error {
        ContextError::MissingKey { key, .. } => assert_eq!(key, "cr_number"),
        other => panic!("expected MissingKey, got {other:?}"),
    }
}

fn create_vars() -> MapVariableSource {
    MapVariableSource::new()
        .with("ServiceNow.Url", "https://snow.example.com/api/change")
        .with("ServiceNow.Auth.GrantType", "password")
        .with("ServiceNow.Auth.ClientId", "id")
        .with("ServiceNow.Auth.ClientSecret", "secret")
        .with("ServiceNow.Auth.Username", "svc-user")
        .with("ServiceNow.Auth.Password", "pw")
        .with("WebSiteName", "site-a")
        .with("Octopus.Environment.Name", "prod")
        .with("Octopus.Deployment.CreatedBy.Username", "deployer")
        .with("Octopus.Project.Name", "storefront")
}

/// **VALUE**: Verifies required variables land in the context under
/// their snake_case keys and optional ones are skipped when absent.
#[test]
fn given_all_required_vars_when_read_pipeline_vars_then_context_is_populated() {
    let source = create_vars();

    let context = read_pipeline_vars(&source, CREATE_REQUIRED_VARS, CREATE_OPTIONAL_VARS)
        .expect("all required variables are present");

    assert_eq!(
        context.get(keys::URL),
        Some("https://snow.example.com/api/change")
    );
    assert_eq!(context.get(keys::WEB_SITE_NAME), Some("site-a"));
    assert_eq!(context.get(keys::PROJECT_NAME), Some("storefront"));
    assert_eq!(context.get(keys::RELEASE_NUMBER), None);
}

/// **VALUE**: A missing required variable fails fast and names the
/// dotted variable, not its snake_case form - that is the name the
/// operator has to fix in the pipeline.
#[test]
fn given_missing_required_var_when_read_pipeline_vars_then_names_the_variable() {
    let source = create_vars();
    let incomplete = ["ServiceNow.Url", "ServiceNow.Cr.Number"];

    let error = read_pipeline_vars(&source, &incomplete, &[]).unwrap_err();

    match error {
        ContextError::MissingVariable { name, .. } => {
            assert_eq!(name, "ServiceNow.Cr.Number");
        }
        other => panic!("expected MissingVariable, got {other:?}"),
    }
}

#[test]
fn given_optional_var_present_when_read_pipeline_vars_then_included() {
    let source = create_vars().with("Octopus.Release.Number", "1.2.3");

    let context =
        read_pipeline_vars(&source, CREATE_REQUIRED_VARS, CREATE_OPTIONAL_VARS).unwrap();

    assert_eq!(context.get(keys::RELEASE_NUMBER), Some("1.2.3"));
}

#[test]
fn given_empty_optional_var_when_read_pipeline_vars_then_skipped() {
    let source = create_vars().with("Octopus.Release.Notes", "");

    let context =
        read_pipeline_vars(&source, CREATE_REQUIRED_VARS, CREATE_OPTIONAL_VARS).unwrap();

    assert_eq!(context.get(keys::RELEASE_NOTES), None);
}

/// **VALUE**: CI runners commonly export `ServiceNow.Url` as
/// `ServiceNow_Url`; the environment source must find either form.
///
/// **BUG THIS CATCHES**: Dropping the underscore fallback would make
/// every variable "missing" on runners that sanitize dots.
#[test]
#[serial]
fn given_underscored_env_var_when_get_then_dotted_lookup_finds_it() {
    use crate::context::vars::{EnvVariableSource, VariableSource};

    // Process environment is global state, hence #[serial].
    unsafe { std::env::set_var("ServiceNow_Test_Var", "from-env") };

    let source = EnvVariableSource::new();
    assert_eq!(
        source.get("ServiceNow.Test.Var"),
        Some(String::from("from-env"))
    );
    assert_eq!(source.get("ServiceNow.Test.Missing"), None);

    unsafe { std::env::remove_var("ServiceNow_Test_Var") };
}

/// **VALUE**: Defaults only fill gaps; pipeline-supplied values win.
#[test]
fn given_pipeline_value_when_apply_defaults_then_pipeline_value_wins() {
    let mut context = CrContext::new();
    context.insert(keys::CR_DURATION, "60");

    apply_defaults(&mut context, cr_defaults());

    assert_eq!(context.get(keys::CR_DURATION), Some("60"));
    assert_eq!(context.get(keys::CR_TYPE), Some("standard"));
    assert_eq!(context.get(keys::CR_STATE), Some("scheduled"));
    assert!(context.get(keys::CR_START_DATE).is_some());
}
