use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{LedgerError, Result};

pub const DEFAULT_LEDGER_FILE: &str = "finance_data.csv";
pub const COLUMNS: [&str; 4] = ["date", "amount", "category", "description"];
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Where the ledger lives and how its rows are laid out.
///
/// Built once at startup and handed to both the store and the query engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    path: PathBuf,
    columns: [&'static str; 4],
    date_format: &'static str,
}

impl LedgerConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            columns: COLUMNS,
            date_format: DATE_FORMAT,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &[&'static str; 4] {
        &self.columns
    }

    /// Human readable form of the date format, used in prompts.
    pub fn date_hint(&self) -> &'static str {
        "dd-mm-yyyy"
    }

    pub fn parse_date(&self, value: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), self.date_format).map_err(|_| {
            LedgerError::MalformedDate {
                value: value.to_string(),
                format: self.date_hint().to_string(),
            }
        })
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.date_format).to_string()
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_FILE)
    }
}
