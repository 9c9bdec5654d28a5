//! Ledger fetching and CSV parsing
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Local file sources
//! - 1.0.0: Initial release

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::{error, info};
use reqwest::Url;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::error::LoadError;
use super::record::{parse_date, InvoiceRecord};

// ============================================================================
// Constants
// ============================================================================

/// Google Sheets host; the export path is `/spreadsheets/d/{id}/gviz/tq`
const GOOGLE_SHEETS_BASE: &str = "https://docs.google.com/";

const COL_INVOICE_NO: &str = "invoice_no";
const COL_NAME: &str = "name";
const COL_EMAIL: &str = "email";
const COL_AMOUNT: &str = "amount";
const COL_DUE_DATE: &str = "due_date";
const COL_REMINDER_DATE: &str = "reminder_date";
const COL_HAS_PAID: &str = "has_paid";

// ============================================================================
// Source
// ============================================================================

/// Where the ledger CSV comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerSource {
    Url(Url),
    Path(PathBuf),
}

impl LedgerSource {
    /// `http://` and `https://` values are URLs, anything else is a file path
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(LedgerSource::Url(Url::parse(value)?))
        } else {
            Ok(LedgerSource::Path(PathBuf::from(value)))
        }
    }

    /// CSV export URL for one worksheet of a Google Sheets document
    pub fn google_sheet(sheet_id: &str, sheet_name: &str) -> Result<Self> {
        let mut url = Url::parse(GOOGLE_SHEETS_BASE)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("{GOOGLE_SHEETS_BASE} cannot take a path"))?
            .pop_if_empty()
            .extend(&["spreadsheets", "d", sheet_id.trim(), "gviz", "tq"]);
        url.query_pairs_mut()
            .append_pair("tqx", "out:csv")
            .append_pair("sheet", sheet_name);
        Ok(LedgerSource::Url(url))
    }
}

impl fmt::Display for LedgerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerSource::Url(url) => write!(f, "{url}"),
            LedgerSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

// ============================================================================
// Loader
// ============================================================================

/// Fetches and parses the ledger. One attempt per call, no retry.
pub struct LedgerLoader {
    client: reqwest::Client,
}

impl LedgerLoader {
    pub fn new(timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(LoadError::Transport)?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Read the raw CSV text from the source
    pub async fn fetch(&self, source: &LedgerSource) -> Result<String, LoadError> {
        match source {
            LedgerSource::Url(url) => {
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(LoadError::Transport)?;

                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Http {
                        status: status.as_u16(),
                    });
                }

                response.text().await.map_err(LoadError::Transport)
            }
            LedgerSource::Path(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }

    /// Fetch and parse the ledger, logging the cause of any failure
    pub async fn load(&self, source: &LedgerSource) -> Result<Vec<InvoiceRecord>, LoadError> {
        info!("Loading invoice ledger from {source}");

        let result = match self.fetch(source).await {
            Ok(data) => parse_ledger(&data),
            Err(e) => Err(e),
        };

        match &result {
            Ok(records) => info!("Loaded {} invoice rows from {source}", records.len()),
            Err(e) if e.is_transport() => error!("Failed to fetch ledger from {source}: {e}"),
            Err(e) => error!("Ledger from {source} has an invalid format: {e}"),
        }

        result
    }
}

// ============================================================================
// Parsing
// ============================================================================

struct Columns {
    invoice_no: usize,
    name: usize,
    email: usize,
    amount: usize,
    due_date: usize,
    reminder_date: usize,
    has_paid: usize,
}

/// Parse ledger CSV text. Column order is free and extra columns are ignored.
pub fn parse_ledger(data: &str) -> Result<Vec<InvoiceRecord>, LoadError> {
    let data = data.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let headers = reader.headers()?.clone();
    let idx = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };

    let col = Columns {
        invoice_no: idx(COL_INVOICE_NO)?,
        name: idx(COL_NAME)?,
        email: idx(COL_EMAIL)?,
        amount: idx(COL_AMOUNT)?,
        due_date: idx(COL_DUE_DATE)?,
        reminder_date: idx(COL_REMINDER_DATE)?,
        has_paid: idx(COL_HAS_PAID)?,
    };

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let row_no = i + 1;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        records.push(InvoiceRecord {
            invoice_no: cell(col.invoice_no).to_string(),
            name: cell(col.name).to_string(),
            email: cell(col.email).to_string(),
            amount: cell(col.amount).to_string(),
            due_date: date_cell(cell(col.due_date), row_no, COL_DUE_DATE)?,
            reminder_date: date_cell(cell(col.reminder_date), row_no, COL_REMINDER_DATE)?,
            has_paid: text_cell(cell(col.has_paid)),
        });
    }

    Ok(records)
}

fn text_cell(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn date_cell(
    value: &str,
    row: usize,
    column: &'static str,
) -> Result<Option<NaiveDate>, LoadError> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_date(value)
        .map(Some)
        .ok_or_else(|| LoadError::InvalidDate {
            row,
            column,
            value: value.to_string(),
        })
}

// ============================================================================
// Tests
// ============================================================================
