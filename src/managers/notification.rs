//! Email report manager
//!
//! Sends the summary log of a failed run to the alert recipient over SMTP.

use anyhow::Context;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{Message, SmtpTransport, Transport};
use std::fmt::Display;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::config::MailSettings;
use crate::managers::backup::RunSummary;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Summary log not found: {0:?}")]
    SummaryNotFound(PathBuf),

    #[error("Failed to read summary log {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// Delivers the end-of-run report
pub trait Notifier {
    /// Send the summary log of `summary` to `recipient`
    ///
    /// Returns `Ok(false)` when delivery failed; delivery problems are logged
    /// and never abort the run.
    fn send_report(&self, recipient: &str, summary: &RunSummary) -> Result<bool>;
}

/// Subject line of the report email
pub fn report_subject(hostname: &str, has_failures: bool) -> String {
    let outcome = if has_failures {
        "ended with errors"
    } else {
        "success"
    };
    format!("[backup@{}]: {}", hostname, outcome)
}

/// Plain-text email reporter
pub struct ReportMailer<T: Transport = SmtpTransport> {
    transport: T,
    sender_user: String,
    sender_server: String,
    hostname: String,
}

impl ReportMailer<SmtpTransport> {
    /// Create a mailer talking plain SMTP to the local mail transport agent
    pub fn smtp(settings: &MailSettings) -> Self {
        let transport = SmtpTransport::builder_dangerous(&settings.server)
            .port(settings.port)
            .build();
        Self::new(transport, &settings.server)
    }
}

impl<T> ReportMailer<T>
where
    T: Transport,
    T::Error: Display,
{
    /// Create a mailer over any transport, sending as `<user>@<sender_server>`
    pub fn new(transport: T, sender_server: &str) -> Self {
        Self {
            transport,
            sender_user: whoami::username(),
            sender_server: sender_server.to_string(),
            hostname: local_hostname(),
        }
    }

    /// Override the invoking user and host name
    pub fn with_identity(mut self, user: &str, hostname: &str) -> Self {
        self.sender_user = user.to_string();
        self.hostname = hostname.to_string();
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sender(&self) -> String {
        format!("{}@{}", self.sender_user, self.sender_server)
    }

    fn build_message(&self, recipient: &str, subject: String, body: String) -> anyhow::Result<Message> {
        let from: Mailbox = self
            .sender()
            .parse()
            .with_context(|| format!("Invalid sender address: {}", self.sender()))?;
        let to: Mailbox = recipient
            .parse()
            .with_context(|| format!("Invalid recipient address: {}", recipient))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .context("Failed to build report email")
    }
}

impl<T> Notifier for ReportMailer<T>
where
    T: Transport,
    T::Error: Display,
{
    fn send_report(&self, recipient: &str, summary: &RunSummary) -> Result<bool> {
        let path = &summary.summary_log;
        if !path.exists() {
            return Err(ReportError::SummaryNotFound(path.clone()));
        }

        let body = fs::read_to_string(path).map_err(|source| ReportError::ReadError {
            path: path.clone(),
            source,
        })?;

        let subject = report_subject(&self.hostname, summary.has_failures());
        debug!("Report subject: {}", subject);

        let message = match self.build_message(recipient, subject, body) {
            Ok(message) => message,
            Err(e) => {
                error!("{:#}", e);
                return Ok(false);
            }
        };

        match self.transport.send(&message) {
            Ok(_) => {
                info!("Sent backup report to {}", recipient);
                Ok(true)
            }
            Err(e) => {
                error!("Failed to send backup report to {}: {}", recipient, e);
                Ok(false)
            }
        }
    }
}

fn local_hostname() -> String {
    whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string())
}

/// A mock notifier for testing that records reports instead of sending them
/// Available for use in external test crates
pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};

    pub const MOCK_HOSTNAME: &str = "mock-host";

    /// Recorded report
    #[derive(Clone, Debug)]
    pub struct SentReport {
        pub recipient: String,
        pub subject: String,
        pub failed: usize,
        pub summary_log: PathBuf,
    }

    #[derive(Clone)]
    pub struct MockNotifier {
        pub reports: Arc<Mutex<Vec<SentReport>>>,
        delivered: bool,
    }

    impl Default for MockNotifier {
        fn default() -> Self {
            Self {
                reports: Arc::default(),
                delivered: true,
            }
        }
    }

    impl MockNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        /// Report delivery failure from every call
        pub fn failing() -> Self {
            Self {
                delivered: false,
                ..Self::default()
            }
        }

        pub fn get_reports(&self) -> Vec<SentReport> {
            self.reports.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.reports.lock().unwrap().len()
        }
    }

    impl Notifier for MockNotifier {
        fn send_report(&self, recipient: &str, summary: &RunSummary) -> Result<bool> {
            self.reports.lock().unwrap().push(SentReport {
                recipient: recipient.to_string(),
                subject: report_subject(MOCK_HOSTNAME, summary.has_failures()),
                failed: summary.failed,
                summary_log: summary.summary_log.clone(),
            });
            Ok(self.delivered)
        }
    }
}
