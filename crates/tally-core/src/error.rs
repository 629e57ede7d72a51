//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ledger store unavailable: {0}")]
    StoreUnavailable(String),
}

impl Error {
    /// Whether the failure is worth retrying (the store could not be reached
    /// or was momentarily locked)
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Pool(_) | Self::StoreUnavailable(_) => true,
            Self::Database(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
