/*
[INPUT]:  Integer status/action codes used by the backend
[OUTPUT]: Typed Rust enums with code conversion
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the backend adds task statuses or actions
*/

use std::fmt;

use serde::Serialize;

/// Lifecycle state of a task.
///
/// The backend sends the raw integer code. Anything missing or out of range is
/// the Unknown state, which is modelled as `None` rather than a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Delayed,
    Blocked,
    PendingApproval,
    Rejected,
}

impl TaskStatus {
    /// All known statuses, in code order.
    pub const ALL: [TaskStatus; 7] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Delayed,
        TaskStatus::Blocked,
        TaskStatus::PendingApproval,
        TaskStatus::Rejected,
    ];

    /// Resolve a raw (possibly absent) wire code.
    pub fn from_code(code: Option<i64>) -> Option<Self> {
        match code? {
            0 => Some(TaskStatus::Pending),
            1 => Some(TaskStatus::InProgress),
            2 => Some(TaskStatus::Completed),
            3 => Some(TaskStatus::Delayed),
            4 => Some(TaskStatus::Blocked),
            5 => Some(TaskStatus::PendingApproval),
            6 => Some(TaskStatus::Rejected),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            TaskStatus::Pending => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
            TaskStatus::Delayed => 3,
            TaskStatus::Blocked => 4,
            TaskStatus::PendingApproval => 5,
            TaskStatus::Rejected => 6,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::task::status_text(Some(*self)))
    }
}

/// Operation that can be requested against a task.
///
/// Serializes as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "i64")]
pub enum TaskAction {
    Create,
    Assign,
    Delete,
    Update,
    Submit,
    Block,
    Accept,
    Reject,
    Approve,
}

impl From<TaskAction> for i64 {
    fn from(action: TaskAction) -> Self {
        action.code()
    }
}

impl TaskAction {
    pub const ALL: [TaskAction; 9] = [
        TaskAction::Create,
        TaskAction::Assign,
        TaskAction::Delete,
        TaskAction::Update,
        TaskAction::Submit,
        TaskAction::Block,
        TaskAction::Accept,
        TaskAction::Reject,
        TaskAction::Approve,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(TaskAction::Create),
            2 => Some(TaskAction::Assign),
            3 => Some(TaskAction::Delete),
            4 => Some(TaskAction::Update),
            5 => Some(TaskAction::Submit),
            6 => Some(TaskAction::Block),
            7 => Some(TaskAction::Accept),
            8 => Some(TaskAction::Reject),
            9 => Some(TaskAction::Approve),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            TaskAction::Create => 1,
            TaskAction::Assign => 2,
            TaskAction::Delete => 3,
            TaskAction::Update => 4,
            TaskAction::Submit => 5,
            TaskAction::Block => 6,
            TaskAction::Accept => 7,
            TaskAction::Reject => 8,
            TaskAction::Approve => 9,
        }
    }

    /// Parse a case-insensitive action name such as `submit` or `Approve`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.button_label().eq_ignore_ascii_case(name.trim()))
    }

    /// Imperative label used on action buttons ("Submit", "Approve").
    pub fn button_label(self) -> &'static str {
        match self {
            TaskAction::Create => "Create",
            TaskAction::Assign => "Assign",
            TaskAction::Delete => "Delete",
            TaskAction::Update => "Update",
            TaskAction::Submit => "Submit",
            TaskAction::Block => "Block",
            TaskAction::Accept => "Accept",
            TaskAction::Reject => "Reject",
            TaskAction::Approve => "Approve",
        }
    }

    /// Whether a request for this action may carry file attachments.
    pub fn allows_attachment(self) -> bool {
        crate::task::ATTACHMENT_ACTIONS.contains(&self)
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.button_label())
    }
}
