// Unit tests for command-line parsing
// Tests focus on defaults pipeline configurations rely on

use crate::cli::{Cli, Command};

use snow_core::template::DEFAULT_TEMPLATE_PATH;

use std::path::PathBuf;

use clap::Parser;

/// **VALUE**: Verifies the create subcommand works with no extra flags.
///
/// **WHY THIS MATTERS**: Pipeline step definitions invoke `sncr create`
/// bare and rely on the packaged template path and the current directory
/// for logs. A new required flag would break every existing pipeline.
///
/// **BUG THIS CATCHES**: Would catch a template or log-dir argument
/// losing its default and becoming mandatory.
#[test]
fn given_bare_create_when_parsed_then_defaults_apply() {
    // GIVEN / WHEN: The minimal create invocation
    let cli = Cli::try_parse_from(["sncr", "create"]).unwrap();

    // THEN: Defaults fill in the template and log directory
    assert_eq!(cli.log_dir, PathBuf::from("."));
    match cli.command {
        Command::Create { template } => {
            assert_eq!(template, PathBuf::from(DEFAULT_TEMPLATE_PATH));
        }
        other => panic!("Expected Create, got {other:?}"),
    }
}

/// **VALUE**: Verifies --log-dir is accepted as a global flag.
///
/// **WHY THIS MATTERS**: The mail-log flow attaches the file the logger
/// wrote; both sides read the same flag, so it must parse in any
/// subcommand position.
///
/// **BUG THIS CATCHES**: Would catch the flag losing `global = true`,
/// which makes `sncr verify --log-dir X` a parse error.
#[test]
fn given_log_dir_after_subcommand_when_parsed_then_accepted() {
    let cli = Cli::try_parse_from(["sncr", "verify", "--log-dir", "/var/log/sncr"]).unwrap();

    assert_eq!(cli.log_dir, PathBuf::from("/var/log/sncr"));
    assert!(matches!(cli.command, Command::Verify));
}

/// **VALUE**: Verifies mail-log requires the file but not the subject.
///
/// **BUG THIS CATCHES**: Would catch the subject default disappearing or
/// the log file silently defaulting to a path that may not exist.
#[test]
fn given_mail_log_when_parsed_then_file_required_subject_defaulted() {
    // Missing --log-file is a parse error
    assert!(Cli::try_parse_from(["sncr", "mail-log"]).is_err());

    let cli = Cli::try_parse_from(["sncr", "mail-log", "--log-file", "step.log"]).unwrap();
    match cli.command {
        Command::MailLog { log_file, subject } => {
            assert_eq!(log_file, PathBuf::from("step.log"));
            assert_eq!(subject, "Deployment step log");
        }
        other => panic!("Expected MailLog, got {other:?}"),
    }
}
