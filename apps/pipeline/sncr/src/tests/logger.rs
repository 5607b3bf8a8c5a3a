// Unit tests for logger module initialization logic

use crate::logger::{initialize, log_file_path};

use std::path::Path;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: The logger is process-global; a second call
/// (tests, future setup hooks) must degrade to a warning instead of
/// crashing the step at startup.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to panic when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    let temp_dir = std::env::temp_dir().join("sncr-test-logger");
    std::fs::create_dir_all(&temp_dir).unwrap();

    let result1 = initialize(&temp_dir);
    let result2 = initialize(&temp_dir);

    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );

    std::fs::remove_dir_all(&temp_dir).ok();
}

/// **VALUE**: Verifies the log path the mail-log flow attaches matches
/// what the logger writes.
///
/// **BUG THIS CATCHES**: Would catch the file name drifting between the
/// writer and the attachment reader.
#[test]
fn given_log_dir_when_path_built_then_joins_fixed_file_name() {
    let path = log_file_path(Path::new("/var/log/sncr"));
    assert_eq!(path, Path::new("/var/log/sncr/sncr.log"));
}
