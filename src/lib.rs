// Core layer - configuration and logging
pub mod core;

// Features layer - ledger loading and reminder dispatch
pub mod features;

// Application layer - one batch run
pub mod runner;

pub use crate::core::Config;

pub use features::{
    // Ledger
    parse_ledger, InvoiceRecord, LedgerLoader, LedgerSource, LoadError,
    // Reminders
    classify, DispatchOutcome, DispatchReport, Dispatcher, Eligibility, Mailer,
    MessageTemplate, ReminderMessage, SkipReason, SmtpMailer,
};
