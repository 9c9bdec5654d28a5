//! # Feature: Reminders
//!
//! Decides which ledger rows are owed a reminder today and emails each one.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Dispatch returns a per-row outcome report instead of a bare count
//! - 1.1.0: Message wording moved to a YAML template
//! - 1.0.0: Initial release with SMTP delivery

pub mod dispatcher;
pub mod eligibility;
pub mod mailer;
pub mod message;

pub use dispatcher::{DispatchOutcome, DispatchReport, Dispatcher};
pub use eligibility::{classify, normalize, Eligibility, SkipReason};
pub use mailer::{Mailer, SmtpMailer};
pub use message::{MessageTemplate, ReminderMessage};
