//! Discipleship assignment use-case service.
//!
//! # Responsibility
//! - Link people to the leader who disciples them, and unlink them again.
//! - Graduate people out of the discipleship pipeline.
//!
//! # Invariants
//! - Assignment requires the discipler to be a current leader at assignment
//!   time; the link is not re-checked afterwards.
//! - Unassignment requires an active link and fails without touching the
//!   row otherwise.
//! - Graduation is idempotent: repeating it leaves the same final state.

use crate::model::person::{DiscipleshipStatus, Person, PersonId};
use crate::repo::person_repo::PersonRepository;
use crate::service::{log_service_error, ServiceError, ServiceResult};
use log::info;

const MODULE: &str = "discipleship_service";

/// Discipleship service facade over repository implementations.
pub struct DiscipleshipService<R: PersonRepository> {
    repo: R,
}

impl<R: PersonRepository> DiscipleshipService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Assigns a leader as the person's discipler.
    ///
    /// The leader check and the link write are two statements; the check
    /// holds at assignment time only. Re-assigning overwrites any existing
    /// link.
    pub fn assign_discipler(
        &self,
        person_id: PersonId,
        leader_id: PersonId,
    ) -> ServiceResult<DiscipleshipStatus> {
        let context = || format!("person_id={person_id} leader_id={leader_id}");

        match self.repo.is_leader(leader_id) {
            Ok(Some(true)) => {}
            Ok(_) => {
                let err = ServiceError::InvalidLeader(leader_id);
                log_service_error("discipler_assign", MODULE, &context(), &err);
                return Err(err);
            }
            Err(err) => {
                let err = ServiceError::from(err);
                log_service_error("discipler_assign", MODULE, &context(), &err);
                return Err(err);
            }
        }

        match self.repo.set_discipler(person_id, leader_id) {
            Ok(status) => {
                info!(
                    "event=discipler_assign module={MODULE} status=ok person_id={person_id} leader_id={leader_id}"
                );
                Ok(status)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                log_service_error("discipler_assign", MODULE, &context(), &err);
                Err(err)
            }
        }
    }

    /// Removes the person's active discipler link.
    ///
    /// Fails with `AssignmentNotFound` when no link is active, including
    /// for ids that do not exist.
    pub fn unassign_discipler(&self, person_id: PersonId) -> ServiceResult<DiscipleshipStatus> {
        match self.repo.clear_discipler(person_id) {
            Ok(Some(status)) => {
                info!(
                    "event=discipler_unassign module={MODULE} status=ok person_id={person_id}"
                );
                Ok(status)
            }
            Ok(None) => {
                let err = ServiceError::AssignmentNotFound(person_id);
                log_service_error(
                    "discipler_unassign",
                    MODULE,
                    &format!("person_id={person_id}"),
                    &err,
                );
                Err(err)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                log_service_error(
                    "discipler_unassign",
                    MODULE,
                    &format!("person_id={person_id}"),
                    &err,
                );
                Err(err)
            }
        }
    }

    /// Graduates a person: clears the discipler link plus both follow-up
    /// flags and returns the final record.
    pub fn graduate_person(&self, person_id: PersonId) -> ServiceResult<Person> {
        match self.repo.graduate(person_id) {
            Ok(person) => {
                info!("event=person_graduate module={MODULE} status=ok person_id={person_id}");
                Ok(person)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                log_service_error(
                    "person_graduate",
                    MODULE,
                    &format!("person_id={person_id}"),
                    &err,
                );
                Err(err)
            }
        }
    }
}
