//! SMTP submission to the corporate relay.
//!
//! Two flavors: the monitoring status table as an HTML body, and a
//! plaintext body carrying a step log as an attachment.

use crate::context::vars::VariableSource;
use crate::error::context::ContextError;
use crate::error::mail::MailError;
use crate::report::MonitorReport;

use std::fs;
use std::path::Path;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::{Message, SmtpTransport, Transport};
use log::info;

/// Plain relay, no auth, no TLS. Overridable via `Mail.SmtpHost` /
/// `Mail.SmtpPort`.
const DEFAULT_RELAY_HOST: &str = "mail-relay.corp.local";
const DEFAULT_RELAY_PORT: u16 = 25;

const MONITOR_SUBJECT: &str = "Pipeline-ServiceNow connectivity monitoring";
const LOG_ATTACHMENT_NAME: &str = "tasklog.txt";

const MAIL_FROM_VAR: &str = "Mail.From";
const MAIL_TO_VAR: &str = "Mail.To";
const MAIL_HOST_VAR: &str = "Mail.SmtpHost";
const MAIL_PORT_VAR: &str = "Mail.SmtpPort";

pub struct Mailer {
    relay_host: String,
    relay_port: u16,
    from: String,
    to: String,
}

impl Mailer {
    pub fn new(relay_host: String, relay_port: u16, from: String, to: String) -> Self {
        Self {
            relay_host,
            relay_port,
            from,
            to,
        }
    }

    /// Addresses come from pipeline variables; the relay falls back to
    /// the fixed default when not overridden.
    pub fn from_vars(source: &dyn VariableSource) -> Result<Self, MailError> {
        let from = source
            .get(MAIL_FROM_VAR)
            .ok_or_else(|| ContextError::missing_variable(MAIL_FROM_VAR))?;
        let to = source
            .get(MAIL_TO_VAR)
            .ok_or_else(|| ContextError::missing_variable(MAIL_TO_VAR))?;

        let relay_host = source
            .get(MAIL_HOST_VAR)
            .unwrap_or_else(|| DEFAULT_RELAY_HOST.to_owned());
        let relay_port = source
            .get(MAIL_PORT_VAR)
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_RELAY_PORT);

        Ok(Self::new(relay_host, relay_port, from, to))
    }

    /// Send the monitoring status table as an HTML mail.
    pub fn send_status_report(&self, report: &MonitorReport) -> Result<(), MailError> {
        info!("BEGIN: Sending email");

        let email = Message::builder()
            .from(self.from.parse()?)
            .to(self.to.parse()?)
            .subject(MONITOR_SUBJECT)
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(report.to_html()),
            )?;

        self.submit(&email)?;

        info!("END: Sending email");
        Ok(())
    }

    /// Send a plaintext mail with a step log attached.
    pub fn send_log_report(
        &self,
        subject: &str,
        body: &str,
        log_path: &Path,
    ) -> Result<(), MailError> {
        info!("BEGIN: Sending email");

        info!("Preparing attachment..");
        let log_contents = fs::read(log_path).map_err(|e| MailError::log_read(log_path, e))?;
        let attachment = Attachment::new(LOG_ATTACHMENT_NAME.to_owned())
            .body(log_contents, ContentType::TEXT_PLAIN);

        let email = Message::builder()
            .from(self.from.parse()?)
            .to(self.to.parse()?)
            .subject(subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(body.to_owned()))
                    .singlepart(attachment),
            )?;

        self.submit(&email)?;

        info!("END: Sending email");
        Ok(())
    }

    fn submit(&self, email: &Message) -> Result<(), MailError> {
        info!("Sending mail..");
        let transport = SmtpTransport::builder_dangerous(&self.relay_host)
            .port(self.relay_port)
            .build();
        transport.send(email)?;
        info!("Mail sent successfully!!");
        Ok(())
    }
}
