//! Errors returned by the ledger store and services.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    /// An outcome would take the balance below zero.
    #[error("Your balance is insufficient: current total is {total}")]
    InsufficientBalance { total: Decimal },

    #[error("Can't find the file: {path}")]
    FileNotFound { path: String },

    /// A CSV row names a category that is neither stored nor newly created.
    #[error("Row {line}: could not resolve category '{category}'")]
    CategoryResolutionFailure { line: u64, category: String },

    #[error("Invalid transaction: {0}")]
    InvalidInput(String),

    #[error("Row {line}: {message}")]
    InvalidRow { line: u64, message: String },

    #[error("CSV file is missing the '{0}' column")]
    MissingColumn(String),

    /// Stored values add up to more than `Decimal` can hold.
    #[error("Balance overflow: transaction totals are too large to add up")]
    BalanceOverflow,

    #[error("Transaction {0} not found")]
    TransactionNotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub(crate) type Result<T, E = LedgerError> = std::result::Result<T, E>;
