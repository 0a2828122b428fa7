//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the author lookup and article CRUD contracts.
//! - Keep SQL and transaction details out of services and adapters.
//!
//! # Invariants
//! - Every repository call runs in exactly one SQLite transaction.
//! - Domain outcomes are return values; only storage faults and row-count
//!   mismatches become `RepoError`.

use crate::db::DbError;
use crate::model::article::ModelValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod article_repo;
pub mod author_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for author and article persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Validation(ModelValidationError),
    /// A mutation expected to touch an exact number of rows touched a
    /// different number. The enclosing transaction is rolled back.
    UnexpectedRowCount {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::UnexpectedRowCount {
                operation,
                expected,
                actual,
            } => write!(
                f,
                "{operation} expected to affect {expected} row(s), affected {actual}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::UnexpectedRowCount { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn parse_flag(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
