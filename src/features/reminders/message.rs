//! Reminder message rendering
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Subject prefix, currency and signature read from `reminder.yaml`
//! - 1.0.0: Initial release

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::features::ledger::InvoiceRecord;

/// Display format for due dates, e.g. `20, Jul 2024`
pub const DUE_DATE_FORMAT: &str = "%d, %b %Y";

/// Shown in place of a due date the ledger left blank
const UNKNOWN_DUE_DATE: &str = "unknown";

/// Wording that varies per deployment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageTemplate {
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Closing line; the sender name or address when unset
    #[serde(default)]
    pub signature: Option<String>,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            subject_prefix: default_subject_prefix(),
            currency: default_currency(),
            signature: None,
        }
    }
}

impl MessageTemplate {
    /// Load the template from a YAML file, or use the defaults when the file
    /// does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display()))?;
        Self::from_yaml(&contents)
            .with_context(|| format!("Invalid template {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Fill in the signature if the template left it unset
    pub fn with_default_signature(mut self, signature: &str) -> Self {
        if self.signature.is_none() {
            self.signature = Some(signature.to_string());
        }
        self
    }
}

fn default_subject_prefix() -> String {
    "[Coding Is Fun]".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

/// A rendered reminder, ready for the mailer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMessage {
    pub invoice_no: String,
    pub recipient_name: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl ReminderMessage {
    pub fn render(record: &InvoiceRecord, template: &MessageTemplate) -> Self {
        let subject = if template.subject_prefix.is_empty() {
            format!("Invoice: {}", record.invoice_no)
        } else {
            format!("{} Invoice: {}", template.subject_prefix, record.invoice_no)
        };

        let due_date = record
            .due_date
            .map(|d| d.format(DUE_DATE_FORMAT).to_string())
            .unwrap_or_else(|| UNKNOWN_DUE_DATE.to_string());

        let mut lines = vec![
            format!("Hi {},", record.name),
            "I hope you are well.".to_string(),
            format!(
                "I just wanted to drop you a quick note to remind you that {} {} in respect of our invoice {} is due for payment on {}.",
                record.amount, template.currency, record.invoice_no, due_date
            ),
            "I would be really grateful if you could confirm that everything is on track for payment.".to_string(),
            "Best regards".to_string(),
        ];
        if let Some(signature) = &template.signature {
            lines.push(signature.clone());
        }

        ReminderMessage {
            invoice_no: record.invoice_no.clone(),
            recipient_name: record.name.clone(),
            recipient: record.email.clone(),
            subject,
            body: lines.join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> InvoiceRecord {
        InvoiceRecord {
            invoice_no: "INV-21-12-009".to_string(),
            name: "Sarthak".to_string(),
            email: "sarthak@example.com".to_string(),
            amount: "5".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 7, 20),
            reminder_date: NaiveDate::from_ymd_opt(2024, 7, 15),
            has_paid: Some("no".to_string()),
        }
    }

    #[test]
    fn test_render_subject_with_prefix() {
        let msg = ReminderMessage::render(&record(), &MessageTemplate::default());
        assert_eq!(msg.subject, "[Coding Is Fun] Invoice: INV-21-12-009");
        assert_eq!(msg.recipient, "sarthak@example.com");
        assert_eq!(msg.recipient_name, "Sarthak");
    }

    #[test]
    fn test_render_subject_without_prefix() {
        let template = MessageTemplate {
            subject_prefix: String::new(),
            ..MessageTemplate::default()
        };
        let msg = ReminderMessage::render(&record(), &template);
        assert_eq!(msg.subject, "Invoice: INV-21-12-009");
    }

    #[test]
    fn test_render_body() {
        let template = MessageTemplate::default().with_default_signature("Accounts Team");
        let msg = ReminderMessage::render(&record(), &template);

        assert!(msg.body.starts_with("Hi Sarthak,\n"));
        assert!(msg.body.contains(
            "remind you that 5 INR in respect of our invoice INV-21-12-009 is due for payment on 20, Jul 2024."
        ));
        assert!(msg.body.ends_with("Best regards\nAccounts Team"));
    }

    #[test]
    fn test_render_single_digit_day_is_padded() {
        let mut rec = record();
        rec.due_date = NaiveDate::from_ymd_opt(2024, 3, 5);
        let msg = ReminderMessage::render(&rec, &MessageTemplate::default());
        assert!(msg.body.contains("due for payment on 05, Mar 2024."));
    }

    #[test]
    fn test_render_missing_due_date() {
        let mut rec = record();
        rec.due_date = None;
        let msg = ReminderMessage::render(&rec, &MessageTemplate::default());
        assert!(msg.body.contains("due for payment on unknown."));
    }

    #[test]
    fn test_template_from_yaml_partial() {
        let template = MessageTemplate::from_yaml("currency: USD\nsignature: Jane Doe\n").unwrap();
        assert_eq!(template.currency, "USD");
        assert_eq!(template.subject_prefix, "[Coding Is Fun]");
        assert_eq!(template.signature.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_template_explicit_signature_kept() {
        let template = MessageTemplate::from_yaml("signature: Jane Doe\n")
            .unwrap()
            .with_default_signature("billing@example.com");
        assert_eq!(template.signature.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_template_invalid_yaml() {
        assert!(MessageTemplate::from_yaml("currency: [unclosed").is_err());
    }

    #[test]
    fn test_template_missing_file_uses_defaults() {
        let template =
            MessageTemplate::load_or_default(Path::new("/nonexistent/reminder.yaml")).unwrap();
        assert_eq!(template, MessageTemplate::default());
    }
}
