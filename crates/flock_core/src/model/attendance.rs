//! Attendance domain model.
//!
//! # Responsibility
//! - Define the persisted attendance record and the batch submission shape.
//!
//! # Invariants
//! - One record exists per `(meeting_date, group_id, person_id)`; repeated
//!   submissions overwrite status and note instead of adding rows.

use crate::model::group::GroupId;
use crate::model::person::PersonId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable row id for an attendance record.
pub type RecordId = i64;

/// How a person showed up at a given meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Known member who came back.
    Returning,
    /// First-time visitor.
    New,
}

/// Persisted attendance record for one person at one meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: RecordId,
    pub meeting_date: NaiveDate,
    pub group_id: GroupId,
    pub person_id: PersonId,
    pub status: AttendanceStatus,
    /// Meeting-level note, stored on every row of the sheet.
    pub note: Option<String>,
}

/// One person's entry inside a meeting sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub person_id: PersonId,
    pub status: AttendanceStatus,
}

/// Batch submission covering one group meeting on one date.
///
/// The whole sheet is applied in a single transaction; a failing entry
/// discards every other entry of the same submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingSheet {
    pub meeting_date: NaiveDate,
    pub group_id: GroupId,
    pub entries: Vec<AttendanceEntry>,
    pub note: Option<String>,
}
