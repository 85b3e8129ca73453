/*
[INPUT]:  Task snapshots, status/action codes, caller role
[OUTPUT]: Pure lifecycle lookups, board buckets, assignee candidates
[POS]:    Task domain layer - aggregates the lifecycle engine
[UPDATE]: When adding new task-related modules or functionality
*/

pub mod actions;
pub mod board;
pub mod members;
pub mod role;
pub mod status;

pub use actions::{ACTION_FALLBACK_THEME, ATTACHMENT_ACTIONS, ActionMeta, action_meta};
pub use board::{TaskBoard, categorize_for_board, filter_assigned_by, filter_assigned_to};
pub use members::{AssignableMember, assignable_members_from_groups};
pub use role::Role;
pub use status::{
    ActionOption, StatusStyle, TransitionError, UNKNOWN_STATUS_STYLE, UNKNOWN_STATUS_TEXT,
    check_action, is_legal, legal_actions, status_guidance, status_style, status_text,
};
