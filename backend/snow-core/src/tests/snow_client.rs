// Unit tests for CR payload construction.

use crate::context::{CrContext, keys};
use crate::snow_client::{build_create_payload, build_justification};

fn create_context() -> CrContext {
    let mut context = CrContext::new();
    context.insert(keys::PROJECT_NAME, "storefront");
    context.insert(keys::WEB_SITE_NAME, "site-a");
    context.insert(keys::AUTH_USERNAME, "svc-user");
    context.insert(keys::CR_CMDB_CI, "CI1");
    context.insert(keys::CR_DURATION, "180");
    context.insert(keys::CR_START_DATE, "2026-08-25T00:00:00Z");
    context.insert(keys::CR_TYPE, "standard");
    context.insert(keys::CR_STATE, "scheduled");
    context.insert(keys::CR_IMPLEMENTATION_PLAN, "install");
    context.insert(keys::CR_TEST_PLAN, "test");
    context.insert(keys::CR_BACKOUT_PLAN, "rollback");
    context
}

/// **VALUE**: Verifies the fixed payload shape: caller fields in their
/// ServiceNow field names plus the organizational constants.
///
/// **BUG THIS CATCHES**: A renamed or dropped field here silently
/// produces rejected CRs in production; ServiceNow does not echo which
/// field was wrong.
#[test]
fn given_full_context_when_build_create_payload_then_fields_and_constants_present() {
    let payload = build_create_payload(&create_context()).unwrap();

    assert_eq!(payload["cmdb_ci"], "CI1");
    assert_eq!(payload["u_duration"], "180");
    assert_eq!(payload["assigned_to"], "svc-user");
    assert_eq!(payload["state"], "scheduled");
    assert_eq!(payload["type"], "standard");
    assert_eq!(payload["backout_plan"], "rollback");
    assert_eq!(payload["implementation_plan"], "install");
    assert_eq!(payload["test_plan"], "test");

    // organizational defaults
    assert_eq!(payload["u_modified_by"], "api_octopus");
    assert_eq!(payload["u_impacted_site"], "4");
    assert_eq!(payload["u_atb_cust_impact"], "0");
    assert_eq!(payload["risk"], "low");
    assert_eq!(payload["u_environment"], "production");
    assert_eq!(payload["assignment_group"], "L3 Release Engineering");
}

/// `requested_by` rides along only when the deployment initiator is
/// known.
#[test]
fn given_deployment_initiator_when_build_create_payload_then_requested_by_included() {
    let mut context = create_context();
    assert!(build_create_payload(&context).unwrap().get("requested_by").is_none());

    context.insert(keys::DEPLOYMENT_CREATED_BY_USERNAME, "deployer");

    let payload = build_create_payload(&context).unwrap();
    assert_eq!(payload["requested_by"], "deployer");
}

#[test]
fn given_release_metadata_when_build_justification_then_appended_in_order() {
    let mut context = create_context();
    context.insert(keys::RELEASE_NUMBER, "1.2.3");
    context.insert(keys::RELEASE_NOTES, "hotfix");

    let justification = build_justification(&context).unwrap();

    assert_eq!(
        justification,
        "Project Name: storefront, WebSiteName: site-a, Release Number: 1.2.3, Release Notes: hotfix"
    );
}

#[test]
fn given_only_project_when_build_justification_then_no_trailing_parts() {
    let mut context = CrContext::new();
    context.insert(keys::PROJECT_NAME, "storefront");

    assert_eq!(
        build_justification(&context).unwrap(),
        "Project Name: storefront"
    );
}

/// Justification and short description carry the same text.
#[test]
fn given_full_context_when_build_create_payload_then_descriptions_match() {
    let payload = build_create_payload(&create_context()).unwrap();

    assert_eq!(payload["justification"], payload["short_description"]);
}
