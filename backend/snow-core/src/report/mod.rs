//! Connectivity monitoring report and its SMTP delivery.
//!
//! The report is a plain value handed from stage to stage and given to
//! the mailer once, at the end. Each field starts at `NA` and flips to
//! `SUCCESS` as the corresponding stage proves itself.

pub mod mailer;

pub use mailer::Mailer;

use std::fmt;

/// Per-stage outcome in the monitoring report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StageStatus {
    #[default]
    NotApplicable,
    Success,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageStatus::NotApplicable => write!(f, "NA"),
            StageStatus::Success => write!(f, "SUCCESS"),
        }
    }
}

/// Four-field status accumulator for the monitoring workflow.
#[derive(Debug, Clone, Default)]
pub struct MonitorReport {
    /// Pipeline host reached the ServiceNow instance.
    pub connectivity: StageStatus,
    /// Token grant succeeded.
    pub auth_tokens: StageStatus,
    /// CR details were fetched.
    pub fetch_cr: StageStatus,
    /// First error encountered, if any.
    pub other_errors: Option<String>,
}

impl MonitorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        if self.other_errors.is_none() {
            self.other_errors = Some(message.into());
        }
    }

    pub fn has_errors(&self) -> bool {
        self.other_errors.is_some()
    }

    fn error_cell(&self) -> &str {
        self.other_errors.as_deref().unwrap_or("NA")
    }

    /// The fixed HTML status table sent in the notification mail.
    pub fn to_html(&self) -> String {
        format!(
            r#"<html>
    <head>
    <style>
        table, th, td {{
            border: 1px solid black;
            border-collapse: collapse;
        }}
    </style>
    </head>
    <body>
        <p>Pipeline-ServiceNow monitoring update</p>
        <table>
            <tbody>
                <tr>
                    <td>Connectivity from pipeline server -> ServiceNow</td>
                    <td>{connectivity}</td>
                </tr>
                <tr>
                    <td>Authentication</td>
                    <td>{auth_tokens}</td>
                </tr>
                <tr>
                    <td>Fetch CR details</td>
                    <td>{fetch_cr}</td>
                </tr>
                <tr>
                    <td>Error message</td>
                    <td>{other_errors}</td>
                </tr>
            </tbody>
        </table>
    </body>
</html>"#,
            connectivity = self.connectivity,
            auth_tokens = self.auth_tokens,
            fetch_cr = self.fetch_cr,
            other_errors = self.error_cell(),
        )
    }
}
