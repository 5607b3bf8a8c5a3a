// Unit tests for the app error type

use crate::error::SncrError;

use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Verifies the app error keeps its message and location in
/// the rendered output.
///
/// **WHY THIS MATTERS**: The binary logs this Display output as its
/// last line before a non-zero exit; it is the only diagnostics a
/// pipeline operator sees.
///
/// **BUG THIS CATCHES**: Would catch the Display format dropping the
/// message or the capture site.
#[test]
fn given_sncr_error_when_displayed_then_contains_message_and_location() {
    let err = SncrError::Sncr {
        message: String::from("Failed to create log file"),
        location: ErrorLocation::from(Location::caller()),
    };

    let rendered = err.to_string();
    assert!(rendered.contains("Failed to create log file"));
    assert!(rendered.contains("error.rs"), "Should name the capture site");
}
