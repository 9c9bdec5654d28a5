//! Reminder dispatch
//!
//! Walks the ledger in load order, sends a reminder for every eligible row and
//! records one outcome per attempt. A failed send never stops the walk.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Outcome report replaces the bare sent counter
//! - 1.0.0: Initial release

use chrono::NaiveDate;
use log::{debug, error, info};

use super::eligibility::{classify, Eligibility};
use super::mailer::Mailer;
use super::message::{MessageTemplate, ReminderMessage};
use crate::features::ledger::InvoiceRecord;

/// Result of one attempted reminder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent { invoice_no: String, email: String },
    Failed { invoice_no: String, error: String },
}

/// Everything that happened during one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// One entry per attempted row, in ledger order
    pub outcomes: Vec<DispatchOutcome>,
    pub skipped: usize,
}

impl DispatchReport {
    pub fn sent(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DispatchOutcome::Sent { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.sent()
    }

    /// The one-line run summary
    pub fn summary(&self) -> String {
        format!("Total Emails Sent: {}", self.sent())
    }
}

pub struct Dispatcher<M: Mailer> {
    mailer: M,
    template: MessageTemplate,
    today: NaiveDate,
}

impl<M: Mailer> Dispatcher<M> {
    pub fn new(mailer: M, template: MessageTemplate, today: NaiveDate) -> Self {
        Self {
            mailer,
            template,
            today,
        }
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Process every record, one at a time, in order
    pub async fn run(&self, records: &[InvoiceRecord]) -> DispatchReport {
        let mut report = DispatchReport::default();

        for record in records {
            match classify(record, self.today) {
                Eligibility::Skip(reason) => {
                    debug!("Skipping invoice {}: {:?}", record.invoice_no, reason);
                    report.skipped += 1;
                }
                Eligibility::Eligible => {
                    let outcome = self.dispatch(record).await;
                    report.outcomes.push(outcome);
                }
            }
        }

        report
    }

    async fn dispatch(&self, record: &InvoiceRecord) -> DispatchOutcome {
        let message = ReminderMessage::render(record, &self.template);

        match self.mailer.send(&message).await {
            Ok(()) => {
                info!(
                    "Email sent to {} for Invoice {}",
                    record.email, record.invoice_no
                );
                DispatchOutcome::Sent {
                    invoice_no: record.invoice_no.clone(),
                    email: record.email.clone(),
                }
            }
            Err(e) => {
                error!(
                    "Failed to send email for Invoice {}: {:#}",
                    record.invoice_no, e
                );
                DispatchOutcome::Failed {
                    invoice_no: record.invoice_no.clone(),
                    error: format!("{e:#}"),
                }
            }
        }
    }
}
