use anyhow::{Context, Result};
use chrono::Local;
use dotenvy::dotenv;
use log::info;
use std::process::ExitCode;

use invoice_reminder::core::{logging, Config};
use invoice_reminder::features::ledger::LedgerLoader;
use invoice_reminder::features::reminders::{DispatchReport, Dispatcher, SmtpMailer};
use invoice_reminder::runner;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv().ok();

    // The logger needs the config, so config errors can only reach stderr
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config) {
        eprintln!("Failed to set up logging: {e:#}");
        return ExitCode::FAILURE;
    }

    let result = run(&config).await;
    ExitCode::from(runner::conclude(result, &mut std::io::stdout()))
}

async fn run(config: &Config) -> Result<DispatchReport> {
    info!("Starting invoice reminder run");
    println!("Loading invoice ledger from {}", config.ledger_source);

    let loader = LedgerLoader::new(config.fetch_timeout)?;
    let mailer = SmtpMailer::new(&config.smtp)?;
    let template = config
        .template
        .clone()
        .with_default_signature(config.default_signature());
    let dispatcher = Dispatcher::new(mailer, template, Local::now().date_naive());

    let report = runner::run(&loader, &config.ledger_source, &dispatcher)
        .await
        .context("Failed to load the invoice ledger; check the source URL, access permissions and data format")?;

    Ok(report)
}
