//! Person domain model.
//!
//! # Responsibility
//! - Define the persisted person record plus creation and patch payloads.
//! - Validate person input before it reaches the repository SQL.
//!
//! # Invariants
//! - `name` is never blank once persisted.
//! - `username`, when present, is unique across all people.
//! - `discipler_id` changes only through the discipleship operations, which
//!   check the leader flag at assignment time.

use crate::model::group::GroupId;
use crate::model::ValidationError;
use serde::{Deserialize, Serialize};

/// Stable row id for a person.
pub type PersonId = i64;

/// Persisted person record.
///
/// The stored password is write-only: creation accepts it, reads never
/// return it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub phone: Option<String>,
    pub is_member_of_church: bool,
    pub needs_discipleship: bool,
    pub needs_baptism: bool,
    pub is_leader: bool,
    /// Group this person currently belongs to, if any.
    pub group_id: Option<GroupId>,
    /// Leader currently discipling this person, if any.
    pub discipler_id: Option<PersonId>,
    pub notes: Option<String>,
    pub username: Option<String>,
    /// Unix epoch milliseconds, refreshed on every write.
    pub updated_at: i64,
}

/// Write payload for standalone person creation.
///
/// Roster-driven person rows (created with their group) do not pass through
/// this payload; they are inserted by the group repository with fixed flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub phone: Option<String>,
    pub is_member_of_church: bool,
    pub needs_discipleship: bool,
    pub needs_baptism: bool,
    pub is_leader: bool,
    pub group_id: Option<GroupId>,
    pub notes: Option<String>,
    pub username: Option<String>,
    /// Stored opaque; this crate never reads it back.
    pub password: Option<String>,
}

impl NewPerson {
    /// Creates a minimal payload with every optional field unset and every
    /// flag false.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: None,
            is_member_of_church: false,
            needs_discipleship: false,
            needs_baptism: false,
            is_leader: false,
            group_id: None,
            notes: None,
            username: None,
            password: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankPersonName);
        }
        Ok(())
    }
}

/// Partial update for a person row.
///
/// Outer `None` means "leave unchanged"; for nullable columns the inner
/// `Option` distinguishes "set to a value" from "clear to NULL".
///
/// `discipler_id` is deliberately absent: discipler changes go through the
/// discipleship operations so the leader check cannot be bypassed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
    pub name: Option<String>,
    pub phone: Option<Option<String>>,
    pub is_member_of_church: Option<bool>,
    pub needs_discipleship: Option<bool>,
    pub needs_baptism: Option<bool>,
    pub is_leader: Option<bool>,
    pub group_id: Option<Option<GroupId>>,
    pub notes: Option<Option<String>>,
}

impl PersonPatch {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.is_member_of_church.is_none()
            && self.needs_discipleship.is_none()
            && self.needs_baptism.is_none()
            && self.is_leader.is_none()
            && self.group_id.is_none()
            && self.notes.is_none()
    }

    /// Rejects patches that would do nothing or blank out the name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPersonPatch);
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ValidationError::BlankPersonName);
            }
        }
        Ok(())
    }
}

/// Discipleship-relevant projection of a person row.
///
/// Returned by assignment operations so callers see the resulting link
/// without fetching the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscipleshipStatus {
    pub person_id: PersonId,
    pub name: String,
    pub discipler_id: Option<PersonId>,
    pub needs_discipleship: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_payload_defaults_every_flag_off() {
        let person = NewPerson::named("Rute");
        assert_eq!(person.name, "Rute");
        assert!(!person.is_leader);
        assert!(!person.needs_discipleship);
        assert!(person.group_id.is_none());
        assert!(person.validate().is_ok());
    }

    #[test]
    fn blank_person_name_is_rejected() {
        let person = NewPerson::named("  ");
        assert_eq!(person.validate(), Err(ValidationError::BlankPersonName));
    }

    #[test]
    fn default_patch_is_empty_and_rejected() {
        let patch = PersonPatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.validate(), Err(ValidationError::EmptyPersonPatch));
    }

    #[test]
    fn patch_with_one_field_passes_validation() {
        let patch = PersonPatch {
            needs_baptism: Some(true),
            ..PersonPatch::default()
        };
        assert!(!patch.is_empty());
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn patch_cannot_blank_out_name() {
        let patch = PersonPatch {
            name: Some(" ".to_string()),
            ..PersonPatch::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::BlankPersonName));
    }
}
