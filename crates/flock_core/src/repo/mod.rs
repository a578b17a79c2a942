//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for groups, people, and
//!   attendance.
//! - Isolate SQLite query and transaction details from service orchestration.
//!
//! # Invariants
//! - Write paths validate their payload before the first SQL statement.
//! - Multi-statement writes run inside one immediate transaction; an early
//!   return rolls the whole write back.
//! - Repository APIs return semantic errors (`GroupNotFound`, `Conflict`)
//!   in addition to DB transport errors.

use crate::db::DbError;
use crate::model::group::GroupId;
use crate::model::person::PersonId;
use crate::model::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod attendance_repo;
pub mod group_repo;
pub mod person_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by group, person, and attendance persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    GroupNotFound(GroupId),
    PersonNotFound(PersonId),
    /// Unique-constraint violation, e.g. a duplicate username.
    Conflict(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::GroupNotFound(id) => write!(f, "group not found: {id}"),
            Self::PersonNotFound(id) => write!(f, "person not found: {id}"),
            Self::Conflict(message) => write!(f, "constraint conflict: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::GroupNotFound(_) | Self::PersonNotFound(_) => None,
            Self::Conflict(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
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
        if let rusqlite::Error::SqliteFailure(err, ref message) = value {
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
                let detail = message
                    .clone()
                    .unwrap_or_else(|| "unique constraint violation".to_string());
                return Self::Conflict(detail);
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}
