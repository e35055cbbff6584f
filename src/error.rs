//! Error type shared by the ledger store and the query engine.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger file has not been created yet.
    #[error("ledger file '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    /// A stored date or a query bound did not match the ledger date format.
    #[error("malformed date '{value}', expected the format {format}")]
    MalformedDate { value: String, format: String },

    /// An income or expense row carries an amount that is not a decimal number.
    #[error("malformed amount '{0}'")]
    MalformedAmount(String),

    /// The header row of the ledger file is not the fixed column list.
    #[error("unexpected ledger header [{found}], expected [{expected}]")]
    SchemaMismatch { expected: String, found: String },

    /// A running total left the range a decimal can hold.
    #[error("total is too large to compute")]
    AmountOverflow,

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
