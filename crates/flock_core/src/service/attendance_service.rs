//! Attendance recording use-case service.
//!
//! # Responsibility
//! - Apply whole meeting sheets through the attendance repository.
//!
//! # Invariants
//! - A sheet either lands completely or not at all.
//! - Resubmitting a sheet for the same meeting corrects it in place.

use crate::model::attendance::{AttendanceRecord, MeetingSheet};
use crate::model::group::GroupId;
use crate::repo::attendance_repo::AttendanceRepository;
use crate::service::{log_service_error, ServiceError, ServiceResult};
use log::info;

const MODULE: &str = "attendance_service";

/// Attendance service facade over repository implementations.
pub struct AttendanceService<R: AttendanceRepository> {
    repo: R,
}

impl<R: AttendanceRepository> AttendanceService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records one meeting sheet atomically.
    ///
    /// Each entry upserts the row keyed by `(meeting_date, group_id,
    /// person_id)`, so corrections overwrite instead of duplicating. The
    /// sheet note lands on every row of the submission.
    pub fn record_attendance(
        &mut self,
        sheet: &MeetingSheet,
    ) -> ServiceResult<Vec<AttendanceRecord>> {
        match self.repo.record_meeting(sheet) {
            Ok(records) => {
                info!(
                    "event=attendance_record module={MODULE} status=ok group_id={} meeting_date={} rows={}",
                    sheet.group_id,
                    sheet.meeting_date,
                    records.len()
                );
                Ok(records)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                log_service_error(
                    "attendance_record",
                    MODULE,
                    &format!(
                        "group_id={} meeting_date={} entries={}",
                        sheet.group_id,
                        sheet.meeting_date,
                        sheet.entries.len()
                    ),
                    &err,
                );
                Err(err)
            }
        }
    }

    /// Lists every attendance record of one group.
    pub fn list_for_group(&self, group_id: GroupId) -> ServiceResult<Vec<AttendanceRecord>> {
        self.repo
            .list_for_group(group_id)
            .map_err(ServiceError::from)
    }
}
