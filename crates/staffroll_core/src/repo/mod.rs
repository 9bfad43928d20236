//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts (find/save/exists probes).
//! - Isolate SQLite query details from policy orchestration.
//!
//! # Invariants
//! - Repositories never filter by soft-delete flags; visibility is policy.
//! - Store unique-index violations surface as `RepoError::UniqueViolation`.

use crate::db::DbError;
use rusqlite::Connection;
use thiserror::Error;

pub mod department_repo;
pub mod employee_repo;
pub mod sport_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match unique_violation_detail(&value) {
            Some(detail) => Self::UniqueViolation(detail),
            None => Self::Db(DbError::Sqlite(value)),
        }
    }
}

fn unique_violation_detail(err: &rusqlite::Error) -> Option<String> {
    match err {
        rusqlite::Error::SqliteFailure(inner, message)
            if inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Some(message.clone().unwrap_or_else(|| inner.to_string()))
        }
        _ => None,
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn parse_flag(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}

/// Runs `f` inside a named savepoint on a shared connection.
///
/// Rolls back everything `f` wrote when it returns an error. Savepoints nest,
/// so this is safe to call while an outer transaction is open.
pub(crate) fn with_savepoint<T>(
    conn: &Connection,
    name: &str,
    f: impl FnOnce() -> RepoResult<T>,
) -> RepoResult<T> {
    conn.execute_batch(&format!("SAVEPOINT {name};"))?;
    match f() {
        Ok(value) => {
            conn.execute_batch(&format!("RELEASE {name};"))?;
            Ok(value)
        }
        Err(err) => {
            conn.execute_batch(&format!("ROLLBACK TO {name}; RELEASE {name};"))?;
            Err(err)
        }
    }
}
