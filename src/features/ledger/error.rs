//! Ledger load failures
//!
//! Transport failures (the source could not be read) and format failures (the
//! data is not a usable ledger) share one type so the caller can stop the run
//! on either, while still telling them apart.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not reach ledger source: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("ledger source returned HTTP {status}")]
    Http { status: u16 },

    #[error("could not read ledger file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed ledger data: {0}")]
    Csv(#[from] csv::Error),

    #[error("ledger is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: cannot parse {column} '{value}' as a date")]
    InvalidDate {
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl LoadError {
    /// True when the source itself could not be read, false when its contents
    /// were unusable
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LoadError::Transport(_) | LoadError::Http { .. } | LoadError::Io { .. }
        )
    }
}
