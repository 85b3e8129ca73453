/*
[INPUT]:  Task snapshot and acting user id
[OUTPUT]: Caller perspective (assigner or assignee) for lifecycle queries
[POS]:    Task domain logic - role resolution
[UPDATE]: When new task roles are introduced
*/

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Task, UserId};

/// Perspective from which a task is viewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assigner,
    Assignee,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Assigner, Role::Assignee];

    pub fn from_is_assigner(is_assigner: bool) -> Self {
        if is_assigner {
            Role::Assigner
        } else {
            Role::Assignee
        }
    }

    pub fn is_assigner(self) -> bool {
        self == Role::Assigner
    }

    /// Role of `user_id` on `task`, if any. Assigner wins when the user holds both.
    pub fn for_task(task: &Task, user_id: UserId) -> Option<Self> {
        if task.assigner_user_id() == Some(user_id) {
            Some(Role::Assigner)
        } else if task.assigned_user_id() == Some(user_id) {
            Some(Role::Assignee)
        } else {
            None
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Assigner => f.write_str("assigner"),
            Role::Assignee => f.write_str("assignee"),
        }
    }
}
