//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs for group
//!   lifecycle, attendance sheets, and discipleship assignments.
//! - Map repository errors onto the caller-facing taxonomy and emit one
//!   diagnostic event per failed operation.
//!
//! # Invariants
//! - Datastore failures stay generic in `Display`; the underlying cause is
//!   only written to the log.
//! - Conflict `Display` uses stable wording; the raw constraint detail is
//!   only written to the log.
//! - Log events carry ids and counts, never personal names.

use crate::model::group::GroupId;
use crate::model::person::PersonId;
use crate::model::ValidationError;
use crate::repo::RepoError;
use log::{error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod attendance_service;
pub mod discipleship_service;
pub mod group_service;
pub mod person_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Caller-facing error taxonomy for all use-case services.
///
/// Embedding layers map these onto their own status codes: validation and
/// leader failures are caller mistakes, the not-found variants target a
/// missing record, `Conflict` is a uniqueness clash, and `Datastore` is an
/// internal failure whose detail is deliberately withheld from `Display`.
#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    /// Assignment target is not a current leader, or does not exist.
    InvalidLeader(PersonId),
    GroupNotFound(GroupId),
    PersonNotFound(PersonId),
    /// Unassignment without an active discipler link.
    AssignmentNotFound(PersonId),
    /// Unique-constraint violation. Carries the raw constraint detail,
    /// which is logged but never displayed.
    Conflict(String),
    Datastore(RepoError),
}

impl ServiceError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::InvalidLeader(_) => "invalid_leader",
            Self::GroupNotFound(_) => "group_not_found",
            Self::PersonNotFound(_) => "person_not_found",
            Self::AssignmentNotFound(_) => "assignment_not_found",
            Self::Conflict(_) => "conflict",
            Self::Datastore(_) => "datastore",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidLeader(id) => write!(f, "person {id} is not a valid leader"),
            Self::GroupNotFound(id) => write!(f, "group not found: {id}"),
            Self::PersonNotFound(id) => write!(f, "person not found: {id}"),
            Self::AssignmentNotFound(id) => {
                write!(f, "no discipler assignment exists for person {id}")
            }
            Self::Conflict(detail) => write!(f, "conflict: {}", conflict_reason(detail)),
            Self::Datastore(_) => write!(f, "internal datastore error"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Datastore(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::GroupNotFound(id) => Self::GroupNotFound(id),
            RepoError::PersonNotFound(id) => Self::PersonNotFound(id),
            RepoError::Conflict(message) => Self::Conflict(message),
            other => Self::Datastore(other),
        }
    }
}

/// Stable caller-facing wording for a unique-constraint conflict.
fn conflict_reason(detail: &str) -> &'static str {
    if detail.contains("people.username") {
        "username already in use"
    } else {
        "value already in use"
    }
}

/// Emits one failure event in the shared log grammar.
///
/// Datastore failures log their underlying cause at error level; expected
/// rejections (validation, not-found, conflict) stay at warn level.
pub(crate) fn log_service_error(
    event: &'static str,
    module: &'static str,
    context: &str,
    err: &ServiceError,
) {
    let context = if context.is_empty() {
        String::new()
    } else {
        format!(" {context}")
    };
    match err {
        ServiceError::Datastore(cause) => error!(
            "event={event} module={module} status=error{context} error_code={} error={cause}",
            err.code()
        ),
        ServiceError::Conflict(detail) => warn!(
            "event={event} module={module} status=error{context} error_code={} error={detail}",
            err.code()
        ),
        other => warn!(
            "event={event} module={module} status=error{context} error_code={} error={other}",
            other.code()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{conflict_reason, ServiceError};

    #[test]
    fn conflict_reason_names_username_collisions() {
        assert_eq!(
            conflict_reason("UNIQUE constraint failed: people.username"),
            "username already in use"
        );
        assert_eq!(
            conflict_reason("unique constraint violation"),
            "value already in use"
        );
    }

    #[test]
    fn conflict_display_never_repeats_constraint_detail() {
        let err = ServiceError::Conflict("UNIQUE constraint failed: people.username".to_string());
        assert_eq!(err.to_string(), "conflict: username already in use");
    }
}
