//! Attendance repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist meeting sheets as one attendance row per person per date.
//! - Keep each sheet submission inside one transaction.
//!
//! # Invariants
//! - `(meeting_date, group_id, person_id)` stays unique; resubmission
//!   overwrites status and note in place.
//! - A failing entry rolls back every other entry of the same sheet.

use crate::model::attendance::{AttendanceRecord, AttendanceStatus, MeetingSheet};
use crate::model::group::GroupId;
use crate::model::ValidationError;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, TransactionBehavior};

const ATTENDANCE_SELECT_SQL: &str = "SELECT
    id,
    meeting_date,
    group_id,
    person_id,
    status,
    note
FROM attendance_records";

const MEETING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository interface for attendance sheets.
pub trait AttendanceRepository {
    /// Upserts the whole sheet atomically.
    ///
    /// Returns the resulting rows in submission order, whether each entry
    /// inserted a new row or overwrote an earlier one.
    fn record_meeting(&mut self, sheet: &MeetingSheet) -> RepoResult<Vec<AttendanceRecord>>;

    fn list_for_group(&self, group_id: GroupId) -> RepoResult<Vec<AttendanceRecord>>;
}

/// SQLite-backed attendance repository.
pub struct SqliteAttendanceRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteAttendanceRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl AttendanceRepository for SqliteAttendanceRepository<'_> {
    fn record_meeting(&mut self, sheet: &MeetingSheet) -> RepoResult<Vec<AttendanceRecord>> {
        if sheet.entries.is_empty() {
            return Err(ValidationError::EmptyAttendanceBatch.into());
        }

        let meeting_date = sheet.meeting_date.format(MEETING_DATE_FORMAT).to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut records = Vec::with_capacity(sheet.entries.len());

        {
            let mut read_back = tx.prepare(&format!(
                "{ATTENDANCE_SELECT_SQL}
                 WHERE meeting_date = ?1 AND group_id = ?2 AND person_id = ?3;"
            ))?;

            for entry in &sheet.entries {
                tx.execute(
                    "INSERT INTO attendance_records (
                        meeting_date,
                        group_id,
                        person_id,
                        status,
                        note
                    ) VALUES (?1, ?2, ?3, ?4, ?5)
                    ON CONFLICT (meeting_date, group_id, person_id) DO UPDATE SET
                        status = excluded.status,
                        note = excluded.note;",
                    params![
                        meeting_date.as_str(),
                        sheet.group_id,
                        entry.person_id,
                        status_to_db(entry.status),
                        sheet.note.as_deref(),
                    ],
                )?;

                let mut rows = read_back.query(params![
                    meeting_date.as_str(),
                    sheet.group_id,
                    entry.person_id
                ])?;
                match rows.next()? {
                    Some(row) => records.push(parse_attendance_row(row)?),
                    None => {
                        return Err(RepoError::InvalidData(
                            "recorded attendance row missing in read-back".to_string(),
                        ));
                    }
                }
            }
        }

        tx.commit()?;
        Ok(records)
    }

    fn list_for_group(&self, group_id: GroupId) -> RepoResult<Vec<AttendanceRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ATTENDANCE_SELECT_SQL}
             WHERE group_id = ?1
             ORDER BY meeting_date DESC, person_id ASC;"
        ))?;
        let mut rows = stmt.query(params![group_id])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_attendance_row(row)?);
        }

        Ok(records)
    }
}

fn parse_attendance_row(row: &Row<'_>) -> RepoResult<AttendanceRecord> {
    let date_text: String = row.get("meeting_date")?;
    let meeting_date = NaiveDate::parse_from_str(&date_text, MEETING_DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid meeting_date value `{date_text}` in attendance_records.meeting_date"
        ))
    })?;

    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status value `{status_text}` in attendance_records.status"
        ))
    })?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        meeting_date,
        group_id: row.get("group_id")?,
        person_id: row.get("person_id")?,
        status,
        note: row.get("note")?,
    })
}

fn status_to_db(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Returning => "returning",
        AttendanceStatus::New => "new",
    }
}

fn parse_status(value: &str) -> Option<AttendanceStatus> {
    match value {
        "returning" => Some(AttendanceStatus::Returning),
        "new" => Some(AttendanceStatus::New),
        _ => None,
    }
}
