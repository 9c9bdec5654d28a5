//! One batch run: load the ledger, then dispatch reminders.
//!
//! A failed load ends the run before any mail is sent.

use log::{error, info};
use std::io::Write;

use crate::core::CRITICAL_TARGET;
use crate::features::ledger::{LedgerLoader, LedgerSource, LoadError};
use crate::features::reminders::{DispatchReport, Dispatcher, Mailer};

/// Process exit status for a completed run, including runs with failed sends
pub const EXIT_OK: u8 = 0;
/// Process exit status when the run could not dispatch at all
pub const EXIT_FAILURE: u8 = 1;

pub async fn run<M: Mailer>(
    loader: &LedgerLoader,
    source: &LedgerSource,
    dispatcher: &Dispatcher<M>,
) -> Result<DispatchReport, LoadError> {
    let records = loader.load(source).await?;
    let report = dispatcher.run(&records).await;

    info!(
        "Dispatch finished: {} sent, {} failed, {} skipped",
        report.sent(),
        report.failed(),
        report.skipped
    );

    Ok(report)
}

/// Report how the run ended and pick the exit status.
///
/// Success logs and prints the summary line. Failure logs `Script failed`
/// under [`CRITICAL_TARGET`], prints the error and never prints a summary.
pub fn conclude<W: Write>(result: anyhow::Result<DispatchReport>, out: &mut W) -> u8 {
    match result {
        Ok(report) => {
            let summary = report.summary();
            info!("{summary}");
            let _ = writeln!(out, "{summary}");
            EXIT_OK
        }
        Err(e) => {
            error!(target: CRITICAL_TARGET, "Script failed: {e:#}");
            let _ = writeln!(out, "{e:#}");
            EXIT_FAILURE
        }
    }
}
