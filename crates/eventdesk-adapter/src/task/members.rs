/*
[INPUT]:  Groups with their member lists
[OUTPUT]: Deduplicated assignee picker entries
[POS]:    Task domain logic - assignment candidates
[UPDATE]: When assignee labelling or ordering changes
*/

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{Group, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignableMember {
    pub id: UserId,
    pub label: String,
}

/// Flatten groups into picker entries labelled `"<username> (<group>)"`.
///
/// Order follows groups, then members within a group. A member that appears
/// in several groups keeps the first group's label.
pub fn assignable_members_from_groups(groups: &[Group]) -> Vec<AssignableMember> {
    let mut seen = HashSet::new();
    groups
        .iter()
        .flat_map(|group| group.members.iter().map(move |member| (group, member)))
        .filter(|(_, member)| seen.insert(member.id))
        .map(|(group, member)| AssignableMember {
            id: member.id,
            label: format!("{} ({})", member.username, group.name),
        })
        .collect()
}
