/*
[INPUT]:  Task status (possibly unknown) and caller role
[OUTPUT]: Status text, style tokens, guidance copy, legal actions
[POS]:    Task domain logic - lifecycle state machine
[UPDATE]: When task status transitions or guidance copy change
*/

use serde::Serialize;
use thiserror::Error;

use super::role::Role;
use crate::types::{TaskAction, TaskStatus};

/// Presentation tokens for a status badge.
///
/// Unknown statuses are styled but carry no label, and the `label` key is
/// absent from the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusStyle {
    pub theme_class: &'static str,
    pub indicator_class: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
}

/// An action the caller may take, with its button label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionOption {
    pub value: TaskAction,
    pub label: &'static str,
}

/// Errors occurring when requesting a task transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Action {action} is not allowed for the {role} of a task in status {}", status_text(*status))]
    NotAllowed {
        status: Option<TaskStatus>,
        role: Role,
        action: TaskAction,
    },
}

struct StatusRow {
    text: &'static str,
    theme_class: &'static str,
    indicator_class: &'static str,
    assigner_guidance: &'static str,
    assignee_guidance: &'static str,
    assigner_actions: &'static [TaskAction],
    assignee_actions: &'static [TaskAction],
}

use TaskAction::{Accept, Approve, Assign, Block, Delete, Reject, Submit, Update};

// Indexed by status code.
static STATUS_TABLE: [StatusRow; 7] = [
    StatusRow {
        text: "Pending",
        theme_class: "secondary",
        indicator_class: "indicator-secondary",
        assigner_guidance: "Waiting for the assignee to accept or reject this task.",
        assignee_guidance: "This task has been assigned to you. Accept it to start working or reject it.",
        assigner_actions: &[Update, Delete, Assign],
        assignee_actions: &[Accept, Reject],
    },
    StatusRow {
        text: "In Progress",
        theme_class: "primary",
        indicator_class: "indicator-primary",
        assigner_guidance: "The assignee is working on this task.",
        assignee_guidance: "You are working on this task. Submit it for approval when it is done.",
        assigner_actions: &[Update, Block, Delete, Assign],
        assignee_actions: &[Submit, Block],
    },
    StatusRow {
        text: "Completed",
        theme_class: "success",
        indicator_class: "indicator-success",
        assigner_guidance: "This task has been approved and completed.",
        assignee_guidance: "Your work on this task has been approved.",
        assigner_actions: &[Delete],
        assignee_actions: &[],
    },
    StatusRow {
        text: "Delayed",
        theme_class: "warning",
        indicator_class: "indicator-warning",
        assigner_guidance: "This task is past its end time and has not been submitted.",
        assignee_guidance: "This task is overdue. Submit it as soon as possible.",
        // Assigner actions on delayed tasks are undefined upstream; kept empty.
        assigner_actions: &[],
        assignee_actions: &[Submit, Block],
    },
    StatusRow {
        text: "Blocked",
        theme_class: "danger",
        indicator_class: "indicator-danger",
        assigner_guidance: "The assignee has reported a blocker on this task.",
        assignee_guidance: "You reported this task as blocked. Wait for the assigner to follow up.",
        assigner_actions: &[],
        assignee_actions: &[],
    },
    StatusRow {
        text: "Pending Approval",
        theme_class: "info",
        indicator_class: "indicator-info",
        assigner_guidance: "The assignee has submitted this task. Review and approve it.",
        assignee_guidance: "Your submission is waiting for the assigner's approval.",
        assigner_actions: &[Approve],
        assignee_actions: &[],
    },
    StatusRow {
        text: "Rejected",
        theme_class: "dark",
        indicator_class: "indicator-dark",
        assigner_guidance: "The assignee rejected this task. Reassign or update it.",
        assignee_guidance: "You rejected this task.",
        assigner_actions: &[],
        assignee_actions: &[],
    },
];

pub const UNKNOWN_STATUS_TEXT: &str = "Unknown";

pub const UNKNOWN_STATUS_STYLE: StatusStyle = StatusStyle {
    theme_class: "light",
    indicator_class: "indicator-light",
    label: None,
};

fn row(status: Option<TaskStatus>) -> Option<&'static StatusRow> {
    status.map(|status| &STATUS_TABLE[status.code() as usize])
}

/// Human-readable status label, `"Unknown"` for anything unrecognised.
pub fn status_text(status: Option<TaskStatus>) -> &'static str {
    row(status).map_or(UNKNOWN_STATUS_TEXT, |row| row.text)
}

pub fn status_style(status: Option<TaskStatus>) -> StatusStyle {
    row(status).map_or(UNKNOWN_STATUS_STYLE, |row| StatusStyle {
        theme_class: row.theme_class,
        indicator_class: row.indicator_class,
        label: Some(row.text),
    })
}

/// What the current state means for the caller. `None` for unknown statuses.
pub fn status_guidance(status: Option<TaskStatus>, role: Role) -> Option<&'static str> {
    row(status).map(|row| match role {
        Role::Assigner => row.assigner_guidance,
        Role::Assignee => row.assignee_guidance,
    })
}

fn allowed(status: Option<TaskStatus>, role: Role) -> &'static [TaskAction] {
    match (row(status), role) {
        (Some(row), Role::Assigner) => row.assigner_actions,
        (Some(row), Role::Assignee) => row.assignee_actions,
        (None, _) => &[],
    }
}

/// Ordered list of actions legal in `status` for `role`. Empty, never an
/// error, when nothing is allowed.
pub fn legal_actions(status: Option<TaskStatus>, role: Role) -> Vec<ActionOption> {
    allowed(status, role)
        .iter()
        .map(|&action| ActionOption {
            value: action,
            label: action.button_label(),
        })
        .collect()
}

pub fn is_legal(status: Option<TaskStatus>, role: Role, action: TaskAction) -> bool {
    allowed(status, role).contains(&action)
}

/// Reject an action outside the transition table before it is sent.
pub fn check_action(
    status: Option<TaskStatus>,
    role: Role,
    action: TaskAction,
) -> Result<(), TransitionError> {
    if is_legal(status, role, action) {
        Ok(())
    } else {
        Err(TransitionError::NotAllowed {
            status,
            role,
            action,
        })
    }
}
