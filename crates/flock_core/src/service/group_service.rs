//! Group lifecycle use-case service.
//!
//! # Responsibility
//! - Resolve the submitted roster and create the group with its people.
//! - Provide full-update and cascading-delete APIs for groups.
//!
//! # Invariants
//! - Group creation and the resolved roster members land atomically.
//! - Full update rewrites descriptive columns only; person rows created at
//!   group creation keep living their own lifecycle.
//! - Deletion removes the group's attendance and detaches its people before
//!   the group row goes away.

use crate::model::group::{Group, GroupDraft, GroupId};
use crate::model::roster::group_roster;
use crate::repo::group_repo::GroupRepository;
use crate::service::{log_service_error, ServiceError, ServiceResult};
use log::info;

const MODULE: &str = "group_service";

/// Group service facade over repository implementations.
pub struct GroupService<R: GroupRepository> {
    repo: R,
}

impl<R: GroupRepository> GroupService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a group plus one person row per distinct roster name.
    ///
    /// The four submitted names are trimmed, deduplicated case-sensitively,
    /// and anyone listed as both leader and host comes out a leader.
    pub fn create_group(&mut self, draft: &GroupDraft) -> ServiceResult<Group> {
        let roster = group_roster(draft);

        match self.repo.create_group(draft, &roster) {
            Ok(group) => {
                info!(
                    "event=group_create module={MODULE} status=ok group_id={} people_created={}",
                    group.id,
                    roster.len()
                );
                Ok(group)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                log_service_error("group_create", MODULE, "", &err);
                Err(err)
            }
        }
    }

    /// Overwrites every descriptive field of an existing group.
    pub fn update_group(&self, id: GroupId, draft: &GroupDraft) -> ServiceResult<Group> {
        match self.repo.update_group(id, draft) {
            Ok(group) => {
                info!("event=group_update module={MODULE} status=ok group_id={}", group.id);
                Ok(group)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                log_service_error("group_update", MODULE, &format!("group_id={id}"), &err);
                Err(err)
            }
        }
    }

    /// Deletes a group with its attendance history, detaching its people.
    ///
    /// Returns the record as it was before deletion.
    pub fn delete_group(&mut self, id: GroupId) -> ServiceResult<Group> {
        match self.repo.delete_group(id) {
            Ok(group) => {
                info!("event=group_delete module={MODULE} status=ok group_id={}", group.id);
                Ok(group)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                log_service_error("group_delete", MODULE, &format!("group_id={id}"), &err);
                Err(err)
            }
        }
    }

    /// Gets one group by id.
    pub fn get_group(&self, id: GroupId) -> ServiceResult<Option<Group>> {
        self.repo.get_group(id).map_err(ServiceError::from)
    }

    /// Lists all groups ordered by name.
    pub fn list_groups(&self) -> ServiceResult<Vec<Group>> {
        self.repo.list_groups().map_err(ServiceError::from)
    }
}
