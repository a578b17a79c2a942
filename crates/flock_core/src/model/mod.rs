//! Domain model for groups, people, and attendance.
//!
//! # Responsibility
//! - Define canonical records and write payloads used by core business logic.
//! - Centralize input validation shared by the repository layer.
//!
//! # Invariants
//! - Every persisted record carries an `i64` row id assigned by SQLite.
//! - Validation rejects bad input before any datastore statement runs.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod attendance;
pub mod group;
pub mod person;
pub mod roster;

/// Input rejection raised before any write statement executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    BlankGroupName,
    BlankLeaderName,
    BlankHostName,
    BlankPersonName,
    EmptyPersonPatch,
    EmptyAttendanceBatch,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankGroupName => write!(f, "group name must not be blank"),
            Self::BlankLeaderName => write!(f, "a first leader name is required"),
            Self::BlankHostName => write!(f, "a first host name is required"),
            Self::BlankPersonName => write!(f, "person name must not be blank"),
            Self::EmptyPersonPatch => write!(f, "person update contains no fields"),
            Self::EmptyAttendanceBatch => write!(f, "attendance batch contains no entries"),
        }
    }
}

impl Error for ValidationError {}
