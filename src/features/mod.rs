//! # Features
//!
//! - `ledger`: fetch and parse the invoice ledger
//! - `reminders`: eligibility, rendering and delivery of reminder emails

pub mod ledger;
pub mod reminders;

pub use ledger::{parse_ledger, InvoiceRecord, LedgerLoader, LedgerSource, LoadError};
pub use reminders::{
    classify, DispatchOutcome, DispatchReport, Dispatcher, Eligibility, Mailer, MessageTemplate,
    ReminderMessage, SkipReason, SmtpMailer,
};
