// Unit tests for the monitoring report.

use crate::report::{MonitorReport, StageStatus};

#[test]
fn given_new_report_when_rendered_then_every_stage_is_na() {
    let report = MonitorReport::new();

    let html = report.to_html();

    assert_eq!(html.matches("<td>NA</td>").count(), 4);
    assert!(!report.has_errors());
}

/// **VALUE**: The HTML table reflects exactly the stages that
/// succeeded before the failure, so the recipient can see how far the
/// run got.
#[test]
fn given_partial_success_when_rendered_then_statuses_appear_in_table() {
    let mut report = MonitorReport::new();
    report.connectivity = StageStatus::Success;
    report.auth_tokens = StageStatus::Success;
    report.record_error("Maximum retries exceeded for GET ...");

    let html = report.to_html();

    assert_eq!(html.matches("<td>SUCCESS</td>").count(), 2);
    assert!(html.contains("Maximum retries exceeded"));
    assert!(report.has_errors());
}

/// The first error wins; later stages must not overwrite it.
#[test]
fn given_recorded_error_when_record_error_again_then_first_is_kept() {
    let mut report = MonitorReport::new();
    report.record_error("first");
    report.record_error("second");

    assert_eq!(report.other_errors.as_deref(), Some("first"));
}

#[test]
fn given_stage_status_when_displayed_then_matches_report_vocabulary() {
    assert_eq!(StageStatus::NotApplicable.to_string(), "NA");
    assert_eq!(StageStatus::Success.to_string(), "SUCCESS");
}
