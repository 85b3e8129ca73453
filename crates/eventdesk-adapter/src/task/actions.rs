/*
[INPUT]:  Raw task action codes from history/audit records
[OUTPUT]: Display label and theme token per action
[POS]:    Task domain logic - action presentation metadata
[UPDATE]: When new task actions are introduced
*/

use std::borrow::Cow;

use serde::Serialize;

use crate::types::TaskAction;

/// Actions whose requests may carry file attachments
pub const ATTACHMENT_ACTIONS: [TaskAction; 2] = [TaskAction::Submit, TaskAction::Block];

/// Neutral theme used for unrecognised action codes
pub const ACTION_FALLBACK_THEME: &str = "secondary";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMeta {
    pub label: Cow<'static, str>,
    pub theme_class: &'static str,
}

fn known_meta(action: TaskAction) -> (&'static str, &'static str) {
    match action {
        TaskAction::Create => ("Created", "primary"),
        TaskAction::Assign => ("Assigned", "info"),
        TaskAction::Delete => ("Deleted", "danger"),
        TaskAction::Update => ("Updated", "primary"),
        TaskAction::Submit => ("Submitted", "info"),
        TaskAction::Block => ("Blocked", "danger"),
        TaskAction::Accept => ("Accepted", "success"),
        TaskAction::Reject => ("Rejected", "dark"),
        TaskAction::Approve => ("Approved", "success"),
    }
}

/// Past-tense label and theme for an action code. Unknown codes get
/// `"Action <code>"` with the neutral theme.
pub fn action_meta(code: i64) -> ActionMeta {
    match TaskAction::from_code(code) {
        Some(action) => {
            let (label, theme_class) = known_meta(action);
            ActionMeta {
                label: Cow::Borrowed(label),
                theme_class,
            }
        }
        None => ActionMeta {
            label: Cow::Owned(format!("Action {code}")),
            theme_class: ACTION_FALLBACK_THEME,
        },
    }
}
