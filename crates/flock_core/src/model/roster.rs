//! Roster name resolution.
//!
//! # Responsibility
//! - Collapse the four submitted roster-name fields into the distinct set of
//!   people a new group starts with.
//!
//! # Invariants
//! - Names are trimmed before comparison; blank names never produce members.
//! - Comparison is case-sensitive: "Ana" and "ana" are two members.
//! - A name submitted as both leader and host resolves to a leader.

use crate::model::group::GroupDraft;
use std::collections::BTreeMap;

/// Role a name was submitted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterRole {
    Leader,
    Host,
}

impl RosterRole {
    fn grants_leadership(self) -> bool {
        matches!(self, Self::Leader)
    }
}

/// Resolves raw `(name, role)` pairs into distinct members.
///
/// Returns trimmed names mapped to their leader flag, ordered by name so the
/// resulting person rows are created deterministically.
pub fn resolve_roster<'a, I>(entries: I) -> BTreeMap<String, bool>
where
    I: IntoIterator<Item = (&'a str, RosterRole)>,
{
    let mut members = BTreeMap::new();
    for (raw_name, role) in entries {
        let name = raw_name.trim();
        if name.is_empty() {
            continue;
        }
        let is_leader = members.entry(name.to_string()).or_insert(false);
        *is_leader = *is_leader || role.grants_leadership();
    }
    members
}

/// Resolves the four roster-name fields of a group draft.
pub fn group_roster(draft: &GroupDraft) -> BTreeMap<String, bool> {
    resolve_roster([
        (draft.leader1_name.as_str(), RosterRole::Leader),
        (draft.leader2_name.as_deref().unwrap_or(""), RosterRole::Leader),
        (draft.host1_name.as_str(), RosterRole::Host),
        (draft.host2_name.as_deref().unwrap_or(""), RosterRole::Host),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_names_each_become_members() {
        let members = resolve_roster([
            ("Joana", RosterRole::Leader),
            ("Marcos", RosterRole::Host),
        ]);
        assert_eq!(members.len(), 2);
        assert_eq!(members.get("Joana"), Some(&true));
        assert_eq!(members.get("Marcos"), Some(&false));
    }

    #[test]
    fn duplicate_name_collapses_to_one_member() {
        let members = resolve_roster([
            ("Ana", RosterRole::Leader),
            ("Ana", RosterRole::Leader),
        ]);
        assert_eq!(members.len(), 1);
        assert_eq!(members.get("Ana"), Some(&true));
    }

    #[test]
    fn leader_wins_over_host_in_either_order() {
        let leader_first = resolve_roster([
            ("Ana", RosterRole::Leader),
            ("Ana", RosterRole::Host),
        ]);
        assert_eq!(leader_first.get("Ana"), Some(&true));

        let host_first = resolve_roster([
            ("Ana", RosterRole::Host),
            ("Ana", RosterRole::Leader),
        ]);
        assert_eq!(host_first.get("Ana"), Some(&true));
    }

    #[test]
    fn names_are_trimmed_before_comparison() {
        let members = resolve_roster([
            ("  Ana ", RosterRole::Leader),
            ("Ana", RosterRole::Host),
        ]);
        assert_eq!(members.len(), 1);
        assert_eq!(members.get("Ana"), Some(&true));
    }

    #[test]
    fn comparison_stays_case_sensitive() {
        let members = resolve_roster([
            ("Ana", RosterRole::Leader),
            ("ana", RosterRole::Host),
        ]);
        assert_eq!(members.len(), 2);
        assert_eq!(members.get("Ana"), Some(&true));
        assert_eq!(members.get("ana"), Some(&false));
    }

    #[test]
    fn blank_and_whitespace_names_are_dropped() {
        let members = resolve_roster([
            ("", RosterRole::Leader),
            ("   ", RosterRole::Host),
            ("Rute", RosterRole::Host),
        ]);
        assert_eq!(members.len(), 1);
        assert_eq!(members.get("Rute"), Some(&false));
    }

    #[test]
    fn group_roster_reads_all_four_fields() {
        let draft = GroupDraft {
            name: "Northside".to_string(),
            leader1_name: "Joana".to_string(),
            leader2_name: Some("Pedro".to_string()),
            host1_name: "Marcos".to_string(),
            host2_name: Some("Joana".to_string()),
        };
        let members = group_roster(&draft);
        assert_eq!(members.len(), 3);
        assert_eq!(members.get("Joana"), Some(&true));
        assert_eq!(members.get("Pedro"), Some(&true));
        assert_eq!(members.get("Marcos"), Some(&false));
    }

    #[test]
    fn absent_optional_fields_add_no_members() {
        let draft = GroupDraft {
            name: "Northside".to_string(),
            leader1_name: "Joana".to_string(),
            leader2_name: None,
            host1_name: "Marcos".to_string(),
            host2_name: None,
        };
        assert_eq!(group_roster(&draft).len(), 2);
    }
}
