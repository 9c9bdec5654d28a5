//! # Feature: Ledger
//!
//! Loads the invoice ledger (CSV with a header row) from a Google Sheets
//! export URL, any other HTTP(S) URL, or a local file.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Local file sources, header names matched after trimming
//! - 1.0.0: Initial release with Google Sheets CSV export loading

pub mod error;
pub mod loader;
pub mod record;

pub use error::LoadError;
pub use loader::{parse_ledger, LedgerLoader, LedgerSource};
pub use record::{parse_date, InvoiceRecord};
