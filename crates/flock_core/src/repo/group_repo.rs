//! Group repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist group records together with their roster-derived person rows.
//! - Keep the create and delete cascades inside one transaction each.
//!
//! # Invariants
//! - `create_group` inserts the group and every roster member atomically.
//! - `delete_group` removes the group's attendance, detaches its people, and
//!   deletes the row atomically; people rows themselves survive.
//! - `update_group` rewrites the denormalized roster-name columns only and
//!   never touches person rows.

use crate::model::group::{Group, GroupDraft, GroupId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::collections::BTreeMap;

const GROUP_SELECT_SQL: &str = "SELECT
    id,
    name,
    leader1_name,
    leader2_name,
    host1_name,
    host2_name,
    created_at,
    updated_at
FROM groups";

/// Repository interface for group lifecycle operations.
pub trait GroupRepository {
    /// Inserts the group plus one person row per resolved roster member.
    ///
    /// Roster members are stored as church members attached to the new
    /// group, with the leader flag taken from the resolved roster.
    fn create_group(
        &mut self,
        draft: &GroupDraft,
        roster: &BTreeMap<String, bool>,
    ) -> RepoResult<Group>;

    /// Overwrites every descriptive column of an existing group.
    fn update_group(&self, id: GroupId, draft: &GroupDraft) -> RepoResult<Group>;

    /// Deletes the group with its attendance and membership links.
    ///
    /// Returns the record as it was before deletion.
    fn delete_group(&mut self, id: GroupId) -> RepoResult<Group>;

    fn get_group(&self, id: GroupId) -> RepoResult<Option<Group>>;
    fn list_groups(&self) -> RepoResult<Vec<Group>>;
}

/// SQLite-backed group repository.
pub struct SqliteGroupRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteGroupRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl GroupRepository for SqliteGroupRepository<'_> {
    fn create_group(
        &mut self,
        draft: &GroupDraft,
        roster: &BTreeMap<String, bool>,
    ) -> RepoResult<Group> {
        draft.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO groups (
                name,
                leader1_name,
                leader2_name,
                host1_name,
                host2_name
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.name.trim(),
                draft.leader1_name.trim(),
                blank_to_null(draft.leader2_name.as_deref()),
                draft.host1_name.trim(),
                blank_to_null(draft.host2_name.as_deref()),
            ],
        )?;
        let group_id = tx.last_insert_rowid();

        for (name, is_leader) in roster {
            tx.execute(
                "INSERT INTO people (
                    name,
                    is_member_of_church,
                    needs_discipleship,
                    needs_baptism,
                    is_leader,
                    group_id
                ) VALUES (?1, 1, 0, 0, ?2, ?3);",
                params![name.as_str(), bool_to_int(*is_leader), group_id],
            )?;
        }

        let group = match fetch_group(&tx, group_id)? {
            Some(group) => group,
            None => {
                return Err(RepoError::InvalidData(
                    "created group missing in read-back".to_string(),
                ));
            }
        };

        tx.commit()?;
        Ok(group)
    }

    fn update_group(&self, id: GroupId, draft: &GroupDraft) -> RepoResult<Group> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE groups
             SET
                name = ?1,
                leader1_name = ?2,
                leader2_name = ?3,
                host1_name = ?4,
                host2_name = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?6;",
            params![
                draft.name.trim(),
                draft.leader1_name.trim(),
                blank_to_null(draft.leader2_name.as_deref()),
                draft.host1_name.trim(),
                blank_to_null(draft.host2_name.as_deref()),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::GroupNotFound(id));
        }

        fetch_group(self.conn, id)?.ok_or(RepoError::GroupNotFound(id))
    }

    fn delete_group(&mut self, id: GroupId) -> RepoResult<Group> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let prior = match fetch_group(&tx, id)? {
            Some(group) => group,
            None => return Err(RepoError::GroupNotFound(id)),
        };

        tx.execute(
            "DELETE FROM attendance_records WHERE group_id = ?1;",
            params![id],
        )?;
        tx.execute(
            "UPDATE people SET group_id = NULL WHERE group_id = ?1;",
            params![id],
        )?;
        tx.execute("DELETE FROM groups WHERE id = ?1;", params![id])?;

        tx.commit()?;
        Ok(prior)
    }

    fn get_group(&self, id: GroupId) -> RepoResult<Option<Group>> {
        fetch_group(self.conn, id)
    }

    fn list_groups(&self) -> RepoResult<Vec<Group>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GROUP_SELECT_SQL} ORDER BY name ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut groups = Vec::new();

        while let Some(row) = rows.next()? {
            groups.push(parse_group_row(row)?);
        }

        Ok(groups)
    }
}

fn fetch_group(conn: &Connection, id: GroupId) -> RepoResult<Option<Group>> {
    let mut stmt = conn.prepare(&format!("{GROUP_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query(params![id])?;

    if let Some(row) = rows.next()? {
        return Ok(Some(parse_group_row(row)?));
    }

    Ok(None)
}

fn parse_group_row(row: &Row<'_>) -> RepoResult<Group> {
    Ok(Group {
        id: row.get("id")?,
        name: row.get("name")?,
        leader1_name: row.get("leader1_name")?,
        leader2_name: row.get("leader2_name")?,
        host1_name: row.get("host1_name")?,
        host2_name: row.get("host2_name")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn blank_to_null(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
