//! Log output setup
//!
//! Timestamped, leveled lines appended to a single log file for the whole run:
//! `2024-07-20 09:15:02,118 - INFO - Email sent to ...`
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{Context, Result};
use chrono::Local;
use log::{Level, Record};
use std::fs::OpenOptions;
use std::io::Write;

use super::Config;

/// Log target for failures that end the run. Rendered as `CRITICAL`.
pub const CRITICAL_TARGET: &str = "invoice_reminder::critical";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Install the global logger. Must be called once, before any log macro.
pub fn init(config: &Config) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.log_level),
    );

    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {}",
            Local::now().format(TIMESTAMP_FORMAT),
            level_label(record),
            record.args()
        )
    });

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Logger already initialized")?;
    Ok(())
}

fn level_label(record: &Record) -> &'static str {
    label_for(record.target(), record.level())
}

fn label_for(target: &str, level: Level) -> &'static str {
    if target == CRITICAL_TARGET {
        "CRITICAL"
    } else {
        level.as_str()
    }
}
