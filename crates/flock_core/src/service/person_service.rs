//! Person use-case service.
//!
//! # Responsibility
//! - Provide standalone create/patch/delete APIs for person records.
//!
//! # Invariants
//! - Username uniqueness violations surface as `Conflict`, never as a
//!   generic datastore failure.
//! - Deleting a person also removes their attendance and clears discipler
//!   links pointing at them.

use crate::model::person::{NewPerson, Person, PersonId, PersonPatch};
use crate::repo::person_repo::PersonRepository;
use crate::service::{log_service_error, ServiceError, ServiceResult};
use log::info;

const MODULE: &str = "person_service";

/// Person service facade over repository implementations.
pub struct PersonService<R: PersonRepository> {
    repo: R,
}

impl<R: PersonRepository> PersonService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one person record.
    pub fn create_person(&self, person: &NewPerson) -> ServiceResult<Person> {
        match self.repo.create_person(person) {
            Ok(created) => {
                info!(
                    "event=person_create module={MODULE} status=ok person_id={}",
                    created.id
                );
                Ok(created)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                log_service_error("person_create", MODULE, "", &err);
                Err(err)
            }
        }
    }

    /// Applies a partial update to an existing person.
    pub fn update_person(&self, id: PersonId, patch: &PersonPatch) -> ServiceResult<Person> {
        match self.repo.update_person(id, patch) {
            Ok(person) => {
                info!("event=person_update module={MODULE} status=ok person_id={}", person.id);
                Ok(person)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                log_service_error("person_update", MODULE, &format!("person_id={id}"), &err);
                Err(err)
            }
        }
    }

    /// Deletes a person with their attendance and inbound discipler links.
    ///
    /// Returns the record as it was before deletion.
    pub fn delete_person(&mut self, id: PersonId) -> ServiceResult<Person> {
        match self.repo.delete_person(id) {
            Ok(person) => {
                info!("event=person_delete module={MODULE} status=ok person_id={}", person.id);
                Ok(person)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                log_service_error("person_delete", MODULE, &format!("person_id={id}"), &err);
                Err(err)
            }
        }
    }

    /// Gets one person by id.
    pub fn get_person(&self, id: PersonId) -> ServiceResult<Option<Person>> {
        self.repo.get_person(id).map_err(ServiceError::from)
    }
}
