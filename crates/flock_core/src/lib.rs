//! Core domain logic for Flock: small-group rosters, attendance, and
//! discipleship tracking. This crate is the single source of truth for
//! business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::attendance::{
    AttendanceEntry, AttendanceRecord, AttendanceStatus, MeetingSheet, RecordId,
};
pub use model::group::{Group, GroupDraft, GroupId};
pub use model::person::{DiscipleshipStatus, NewPerson, Person, PersonId, PersonPatch};
pub use model::roster::{group_roster, resolve_roster, RosterRole};
pub use model::ValidationError;
pub use repo::attendance_repo::{AttendanceRepository, SqliteAttendanceRepository};
pub use repo::group_repo::{GroupRepository, SqliteGroupRepository};
pub use repo::person_repo::{PersonRepository, SqlitePersonRepository};
pub use repo::{RepoError, RepoResult};
pub use service::attendance_service::AttendanceService;
pub use service::discipleship_service::DiscipleshipService;
pub use service::group_service::GroupService;
pub use service::person_service::PersonService;
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
