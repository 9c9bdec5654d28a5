//! # Configuration
//!
//! Process configuration read once at startup from the environment (and an
//! optional `.env` file loaded by the binary). Message wording lives in an
//! optional YAML template file next to it.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Optional YAML message template
//! - 1.0.0: Initial release with ledger source, SMTP and log settings

use anyhow::{anyhow, Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::features::ledger::LedgerSource;
use crate::features::reminders::MessageTemplate;

pub const DEFAULT_SHEET_NAME: &str = "data";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
/// Implicit TLS submission port
pub const DEFAULT_SMTP_PORT: u16 = 465;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILE: &str = "email_reminders.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_TEMPLATE_PATH: &str = "reminder.yaml";

/// Outbound mail settings
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub sender_email: String,
    pub sender_name: Option<String>,
    pub password: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("sender_email", &self.sender_email)
            .field("sender_name", &self.sender_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub ledger_source: LedgerSource,
    pub smtp: SmtpConfig,
    pub template: MessageTemplate,
    pub fetch_timeout: Duration,
    /// `None` sends log output to stderr
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| anyhow!("Missing required environment variable {key}"))
        };

        let ledger_source = match (get("LEDGER_SOURCE"), get("SHEET_ID")) {
            (Some(source), _) => LedgerSource::parse(&source)?,
            (None, Some(sheet_id)) => {
                let sheet_name =
                    get("SHEET_NAME").unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());
                LedgerSource::google_sheet(&sheet_id, &sheet_name)?
            }
            (None, None) => {
                return Err(anyhow!(
                    "Missing ledger source: set LEDGER_SOURCE or SHEET_ID"
                ))
            }
        };

        let port = match get("SMTP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("SMTP_PORT is not a valid port: {raw}"))?,
            None => DEFAULT_SMTP_PORT,
        };

        let fetch_timeout_secs = match get("FETCH_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("FETCH_TIMEOUT_SECS is not a number: {raw}"))?,
            None => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        let smtp = SmtpConfig {
            host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            port,
            sender_email: require("SENDER_EMAIL")?,
            sender_name: get("SENDER_NAME"),
            password: require("SENDER_PASSWORD")?,
        };

        // LOG_FILE set to an empty value means stderr, so read it unfiltered
        let log_file = match lookup("LOG_FILE") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from(DEFAULT_LOG_FILE)),
        };

        let template_path =
            get("REMINDER_TEMPLATE_PATH").unwrap_or_else(|| DEFAULT_TEMPLATE_PATH.to_string());
        let template = MessageTemplate::load_or_default(Path::new(&template_path))?;

        Ok(Config {
            ledger_source,
            smtp,
            template,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            log_file,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    /// Signature line used when the template does not set one
    pub fn default_signature(&self) -> &str {
        self.smtp
            .sender_name
            .as_deref()
            .unwrap_or(&self.smtp.sender_email)
    }
}
