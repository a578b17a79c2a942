//! Group domain model.
//!
//! # Responsibility
//! - Define the persisted group record and its write payload.
//! - Validate group input before it reaches the repository SQL.
//!
//! # Invariants
//! - `name`, `leader1_name`, and `host1_name` are never blank once persisted.
//! - The four roster-name columns are denormalized display text; person rows
//!   created from them live their own lifecycle afterwards.

use crate::model::ValidationError;
use serde::{Deserialize, Serialize};

/// Stable row id for a group.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type GroupId = i64;

/// Persisted group record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub leader1_name: String,
    /// Second leader is optional; blank input is stored as `None`.
    pub leader2_name: Option<String>,
    pub host1_name: String,
    pub host2_name: Option<String>,
    /// Unix epoch milliseconds, assigned by the datastore.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every full update.
    pub updated_at: i64,
}

/// Write payload shared by group creation and full group update.
///
/// The same four roster-name fields drive person-row creation at group
/// creation time; see [`crate::model::roster`] for how they are collapsed
/// into distinct members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDraft {
    pub name: String,
    pub leader1_name: String,
    pub leader2_name: Option<String>,
    pub host1_name: String,
    pub host2_name: Option<String>,
}

impl GroupDraft {
    /// Checks the three required fields for blank values.
    ///
    /// Runs in the repository before any SQL statement, so a rejected draft
    /// leaves the datastore untouched.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankGroupName);
        }
        if self.leader1_name.trim().is_empty() {
            return Err(ValidationError::BlankLeaderName);
        }
        if self.host1_name.trim().is_empty() {
            return Err(ValidationError::BlankHostName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> GroupDraft {
        GroupDraft {
            name: "Northside".to_string(),
            leader1_name: "Joana".to_string(),
            leader2_name: None,
            host1_name: "Marcos".to_string(),
            host2_name: None,
        }
    }

    #[test]
    fn validate_accepts_complete_draft() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn validate_rejects_whitespace_only_name() {
        let mut bad = draft();
        bad.name = "   ".to_string();
        assert_eq!(bad.validate(), Err(ValidationError::BlankGroupName));
    }

    #[test]
    fn validate_rejects_missing_first_leader() {
        let mut bad = draft();
        bad.leader1_name = String::new();
        assert_eq!(bad.validate(), Err(ValidationError::BlankLeaderName));
    }

    #[test]
    fn validate_rejects_missing_first_host() {
        let mut bad = draft();
        bad.host1_name = "\t".to_string();
        assert_eq!(bad.validate(), Err(ValidationError::BlankHostName));
    }
}
