// Unit tests for plan template resolution and dedenting.

use crate::context::{CrContext, keys};
use crate::error::template::TemplateError;
use crate::template::{cleandoc, load_template, set_context};

use std::io::Write;

use tempfile::NamedTempFile;

const TEMPLATE_JSON: &str = r#"{
    "site-a": {
        "prod": {
            "Cmdb_Ci": "CI1",
            "Install Plan": "x",
            "Testing Plan": "y",
            "Rollback": "z"
        }
    },
    "site-b": {
        "Cmdb_Ci": "CI2",
        "Install Plan": "install",
        "Testing Plan": "test",
        "Rollback": "rollback"
    }
}"#;

fn template_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(TEMPLATE_JSON.as_bytes()).expect("write template");
    file
}

/// **VALUE**: The environment-specific sub-entry wins when present.
#[test]
fn given_site_with_environment_entry_when_load_template_then_uses_sub_entry() {
    let file = template_file();

    let template = load_template(file.path(), "site-a", "prod").unwrap();

    assert_eq!(template.cmdb_ci, "CI1");
    assert_eq!(template.install_plan, "x");
}

/// **VALUE**: A site without per-environment records falls back to the
/// site-level record.
#[test]
fn given_site_without_environment_entry_when_load_template_then_uses_site_record() {
    let file = template_file();

    let template = load_template(file.path(), "site-b", "prod").unwrap();

    assert_eq!(template.cmdb_ci, "CI2");
    assert_eq!(template.rollback, "rollback");
}

/// **VALUE**: An absent site is a data error naming the site, fatal
/// immediately with no retry.
#[test]
fn given_unknown_site_when_load_template_then_site_not_defined() {
    let file = template_file();

    let error = load_template(file.path(), "site-c", "prod").unwrap_err();

    match error {
        TemplateError::SiteNotDefined { site, .. } => assert_eq!(site, "site-c"),
        other => panic!("expected SiteNotDefined, got {other:?}"),
    }
}

/// **VALUE**: End-to-end context resolution: the template record lands
/// in the context under the cr_* keys.
#[test]
fn given_site_and_environment_when_set_context_then_cmdb_ci_is_resolved() {
    let file = template_file();
    let mut context = CrContext::new();
    context.insert(keys::WEB_SITE_NAME, "site-a");
    context.insert(keys::ENVIRONMENT_NAME, "prod");

    set_context(&mut context, file.path()).unwrap();

    assert_eq!(context.get(keys::CR_CMDB_CI), Some("CI1"));
    assert_eq!(context.get(keys::CR_IMPLEMENTATION_PLAN), Some("x"));
    assert_eq!(context.get(keys::CR_TEST_PLAN), Some("y"));
    assert_eq!(context.get(keys::CR_BACKOUT_PLAN), Some("z"));
}

#[test]
fn given_unknown_site_when_set_context_then_error_names_the_site() {
    let file = template_file();
    let mut context = CrContext::new();
    context.insert(keys::WEB_SITE_NAME, "nowhere");
    context.insert(keys::ENVIRONMENT_NAME, "prod");

    let error = set_context(&mut context, file.path()).unwrap_err();

    assert!(error.to_string().contains("nowhere"));
}

#[test]
fn given_indented_plan_text_when_cleandoc_then_common_margin_is_stripped() {
    let text = "\n        Step 1: stop the service\n        Step 2: deploy\n            (verify logs)\n";

    assert_eq!(
        cleandoc(text),
        "Step 1: stop the service\nStep 2: deploy\n    (verify logs)"
    );
}

#[test]
fn given_single_line_when_cleandoc_then_only_trimmed() {
    assert_eq!(cleandoc("   restart nginx   "), "restart nginx");
}

#[test]
fn given_blank_surrounding_lines_when_cleandoc_then_dropped() {
    assert_eq!(cleandoc("\n\n  plan\n\n"), "plan");
}
