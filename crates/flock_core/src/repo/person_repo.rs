//! Person repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist person records and their discipleship links.
//! - Keep the person delete cascade inside one transaction.
//!
//! # Invariants
//! - Write paths validate their payload before SQL mutations.
//! - Blank optional text fields are stored as NULL.
//! - The stored password column is never selected back.
//! - Read paths reject invalid persisted flag values instead of masking
//!   them.

use crate::model::group::GroupId;
use crate::model::person::{DiscipleshipStatus, NewPerson, Person, PersonId, PersonPatch};
use crate::repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};

const PERSON_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone,
    is_member_of_church,
    needs_discipleship,
    needs_baptism,
    is_leader,
    group_id,
    discipler_id,
    notes,
    username,
    updated_at
FROM people";

/// Repository interface for person records and discipleship links.
pub trait PersonRepository {
    fn create_person(&self, person: &NewPerson) -> RepoResult<Person>;
    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>>;
    fn list_people_in_group(&self, group_id: GroupId) -> RepoResult<Vec<Person>>;

    /// Applies the present patch fields to an existing row.
    fn update_person(&self, id: PersonId, patch: &PersonPatch) -> RepoResult<Person>;

    /// Deletes the person, their attendance, and any discipleship links
    /// pointing at them, atomically. Returns the record as it was before
    /// deletion.
    fn delete_person(&mut self, id: PersonId) -> RepoResult<Person>;

    /// Returns the person's leader flag, or `None` for an unknown id.
    fn is_leader(&self, id: PersonId) -> RepoResult<Option<bool>>;

    fn set_discipler(
        &self,
        person_id: PersonId,
        leader_id: PersonId,
    ) -> RepoResult<DiscipleshipStatus>;

    /// Clears an active discipler link.
    ///
    /// Returns `None` when the person has no active link (or does not
    /// exist); the row is untouched in that case.
    fn clear_discipler(&self, person_id: PersonId) -> RepoResult<Option<DiscipleshipStatus>>;

    /// Marks discipleship as completed: clears the discipler link and both
    /// follow-up flags. Already-graduated people are updated to the same
    /// values again.
    fn graduate(&self, person_id: PersonId) -> RepoResult<Person>;
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn create_person(&self, person: &NewPerson) -> RepoResult<Person> {
        person.validate()?;

        self.conn.execute(
            "INSERT INTO people (
                name,
                phone,
                is_member_of_church,
                needs_discipleship,
                needs_baptism,
                is_leader,
                group_id,
                notes,
                username,
                password
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                person.name.trim(),
                blank_to_null(person.phone.as_deref()),
                bool_to_int(person.is_member_of_church),
                bool_to_int(person.needs_discipleship),
                bool_to_int(person.needs_baptism),
                bool_to_int(person.is_leader),
                person.group_id,
                blank_to_null(person.notes.as_deref()),
                blank_to_null(person.username.as_deref()),
                person.password.as_deref(),
            ],
        )?;
        let person_id = self.conn.last_insert_rowid();

        fetch_person(self.conn, person_id)?.ok_or_else(|| {
            RepoError::InvalidData("created person missing in read-back".to_string())
        })
    }

    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>> {
        fetch_person(self.conn, id)
    }

    fn list_people_in_group(&self, group_id: GroupId) -> RepoResult<Vec<Person>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PERSON_SELECT_SQL}
             WHERE group_id = ?1
             ORDER BY name ASC;"
        ))?;
        let mut rows = stmt.query(params![group_id])?;
        let mut people = Vec::new();

        while let Some(row) = rows.next()? {
            people.push(parse_person_row(row)?);
        }

        Ok(people)
    }

    fn update_person(&self, id: PersonId, patch: &PersonPatch) -> RepoResult<Person> {
        patch.validate()?;

        let mut assignments: Vec<&'static str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(name) = &patch.name {
            assignments.push("name = ?");
            bind_values.push(Value::Text(name.trim().to_string()));
        }
        if let Some(phone) = &patch.phone {
            assignments.push("phone = ?");
            bind_values.push(optional_text(blank_to_null(phone.as_deref())));
        }
        if let Some(flag) = patch.is_member_of_church {
            assignments.push("is_member_of_church = ?");
            bind_values.push(Value::Integer(bool_to_int(flag)));
        }
        if let Some(flag) = patch.needs_discipleship {
            assignments.push("needs_discipleship = ?");
            bind_values.push(Value::Integer(bool_to_int(flag)));
        }
        if let Some(flag) = patch.needs_baptism {
            assignments.push("needs_baptism = ?");
            bind_values.push(Value::Integer(bool_to_int(flag)));
        }
        if let Some(flag) = patch.is_leader {
            assignments.push("is_leader = ?");
            bind_values.push(Value::Integer(bool_to_int(flag)));
        }
        if let Some(group_id) = &patch.group_id {
            assignments.push("group_id = ?");
            bind_values.push(match group_id {
                Some(value) => Value::Integer(*value),
                None => Value::Null,
            });
        }
        if let Some(notes) = &patch.notes {
            assignments.push("notes = ?");
            bind_values.push(optional_text(blank_to_null(notes.as_deref())));
        }

        let sql = format!(
            "UPDATE people
             SET {}, updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?;",
            assignments.join(", ")
        );
        bind_values.push(Value::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::PersonNotFound(id));
        }

        fetch_person(self.conn, id)?.ok_or(RepoError::PersonNotFound(id))
    }

    fn delete_person(&mut self, id: PersonId) -> RepoResult<Person> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let prior = match fetch_person(&tx, id)? {
            Some(person) => person,
            None => return Err(RepoError::PersonNotFound(id)),
        };

        tx.execute(
            "DELETE FROM attendance_records WHERE person_id = ?1;",
            params![id],
        )?;
        tx.execute(
            "UPDATE people SET discipler_id = NULL WHERE discipler_id = ?1;",
            params![id],
        )?;
        tx.execute("DELETE FROM people WHERE id = ?1;", params![id])?;

        tx.commit()?;
        Ok(prior)
    }

    fn is_leader(&self, id: PersonId) -> RepoResult<Option<bool>> {
        let mut stmt = self
            .conn
            .prepare("SELECT is_leader FROM people WHERE id = ?1;")?;
        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_flag(row, "is_leader")?));
        }

        Ok(None)
    }

    fn set_discipler(
        &self,
        person_id: PersonId,
        leader_id: PersonId,
    ) -> RepoResult<DiscipleshipStatus> {
        let changed = self.conn.execute(
            "UPDATE people
             SET
                discipler_id = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![leader_id, person_id],
        )?;

        if changed == 0 {
            return Err(RepoError::PersonNotFound(person_id));
        }

        discipleship_status(self.conn, person_id)
    }

    fn clear_discipler(&self, person_id: PersonId) -> RepoResult<Option<DiscipleshipStatus>> {
        let changed = self.conn.execute(
            "UPDATE people
             SET
                discipler_id = NULL,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1
               AND discipler_id IS NOT NULL;",
            params![person_id],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(discipleship_status(self.conn, person_id)?))
    }

    fn graduate(&self, person_id: PersonId) -> RepoResult<Person> {
        let changed = self.conn.execute(
            "UPDATE people
             SET
                discipler_id = NULL,
                needs_discipleship = 0,
                needs_baptism = 0,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![person_id],
        )?;

        if changed == 0 {
            return Err(RepoError::PersonNotFound(person_id));
        }

        fetch_person(self.conn, person_id)?.ok_or(RepoError::PersonNotFound(person_id))
    }
}

fn fetch_person(conn: &Connection, id: PersonId) -> RepoResult<Option<Person>> {
    let mut stmt = conn.prepare(&format!("{PERSON_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query(params![id])?;

    if let Some(row) = rows.next()? {
        return Ok(Some(parse_person_row(row)?));
    }

    Ok(None)
}

fn discipleship_status(conn: &Connection, id: PersonId) -> RepoResult<DiscipleshipStatus> {
    let mut stmt = conn.prepare(
        "SELECT id, name, discipler_id, needs_discipleship
         FROM people
         WHERE id = ?1;",
    )?;
    let mut rows = stmt.query(params![id])?;

    if let Some(row) = rows.next()? {
        return Ok(DiscipleshipStatus {
            person_id: row.get("id")?,
            name: row.get("name")?,
            discipler_id: row.get("discipler_id")?,
            needs_discipleship: parse_flag(row, "needs_discipleship")?,
        });
    }

    Err(RepoError::PersonNotFound(id))
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    Ok(Person {
        id: row.get("id")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
        is_member_of_church: parse_flag(row, "is_member_of_church")?,
        needs_discipleship: parse_flag(row, "needs_discipleship")?,
        needs_baptism: parse_flag(row, "needs_baptism")?,
        is_leader: parse_flag(row, "is_leader")?,
        group_id: row.get("group_id")?,
        discipler_id: row.get("discipler_id")?,
        notes: row.get("notes")?,
        username: row.get("username")?,
        updated_at: row.get("updated_at")?,
    })
}

fn parse_flag(row: &Row<'_>, column: &'static str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid {column} value `{other}` in people.{column}"
        ))),
    }
}

fn optional_text(value: Option<&str>) -> Value {
    match value {
        Some(text) => Value::Text(text.to_string()),
        None => Value::Null,
    }
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
