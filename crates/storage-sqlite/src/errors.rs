//! Storage-specific error types for SQLite operations.
//!
//! Diesel and r2d2 errors are wrapped here and converted to the
//! database-agnostic errors of `rentledger_core` before leaving the crate.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use rentledger_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Storage-specific errors that wrap Diesel and r2d2 types.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value could not be read back into its domain type.
    #[error("Invalid value '{value}' in column {column}")]
    InvalidColumn { column: &'static str, value: String },

    #[error("Writer unavailable: {0}")]
    WriterUnavailable(String),

    /// A core error raised inside a write job, kept intact for the caller.
    #[error(transparent)]
    Core(#[from] Error),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::Database(DatabaseError::ForeignKeyViolation(
                info.message().to_string(),
            )),
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            e @ StorageError::InvalidColumn { .. } => {
                Error::Database(DatabaseError::Internal(e.to_string()))
            }
            StorageError::WriterUnavailable(e) => {
                Error::Database(DatabaseError::TransactionFailed(e))
            }
            StorageError::Core(e) => e,
        }
    }
}

/// Extension trait for converting Diesel and r2d2 results to core results.
///
/// The orphan rule keeps us from implementing `From<DieselError> for Error`,
/// so conversions go through [`StorageError`].
pub trait IntoCore<T> {
    fn into_core(self) -> rentledger_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> rentledger_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> rentledger_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
