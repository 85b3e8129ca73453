/*
[INPUT]:  Task snapshots, status/action codes, groups
[OUTPUT]: Test results for the task lifecycle engine public surface
[POS]:    Integration tests - task lifecycle
[UPDATE]: When the transition table or board layout changes
*/

mod common;

use common::task_with_status;
use eventdesk_adapter::task::{
    ACTION_FALLBACK_THEME, action_meta, assignable_members_from_groups, categorize_for_board,
    filter_assigned_by, filter_assigned_to, legal_actions, status_guidance, status_style,
    status_text,
};
use eventdesk_adapter::{Group, Member, Role, TaskAction, TaskStatus};
use rstest::rstest;

fn actions(status: TaskStatus, role: Role) -> Vec<TaskAction> {
    legal_actions(Some(status), role)
        .into_iter()
        .map(|option| option.value)
        .collect()
}

#[rstest]
#[case(-100)]
#[case(-1)]
#[case(0)]
#[case(3)]
#[case(6)]
#[case(7)]
#[case(1_000)]
fn test_lookups_are_total(#[case] code: i64) {
    let status = TaskStatus::from_code(Some(code));
    for role in [Role::from_is_assigner(true), Role::from_is_assigner(false)] {
        let _ = status_text(status);
        let _ = status_style(status);
        let _ = status_guidance(status, role);
        let _ = legal_actions(status, role);
    }
}

#[test]
fn test_role_sensitivity_in_progress() {
    let assigner = actions(TaskStatus::InProgress, Role::Assigner);
    let assignee = actions(TaskStatus::InProgress, Role::Assignee);

    assert_ne!(assigner, assignee);
    assert_eq!(
        assigner,
        vec![
            TaskAction::Update,
            TaskAction::Block,
            TaskAction::Delete,
            TaskAction::Assign
        ]
    );
    assert_eq!(assignee, vec![TaskAction::Submit, TaskAction::Block]);
}

#[test]
fn test_board_partition_seven_of_eight() {
    let mut tasks: Vec<_> = (0..7).map(|code| task_with_status(code, Some(code))).collect();
    tasks.push(task_with_status(8, Some(99)));

    let board = categorize_for_board(&tasks);
    assert_eq!(tasks.len(), 8);
    assert_eq!(board.len(), 7);
    assert_eq!(board.pending.len(), 1);
    assert_eq!(board.progress.len(), 1);
    assert_eq!(board.completed.len(), 1);
    assert_eq!(board.delayed.len(), 1);
    assert_eq!(board.blocked.len(), 1);
    assert_eq!(board.pending_approval.len(), 1);
    assert_eq!(board.rejected.len(), 1);
}

#[test]
fn test_empty_inputs() {
    assert!(categorize_for_board(&[]).is_empty());
    assert!(assignable_members_from_groups(&[]).is_empty());
}

#[test]
fn test_shared_member_labeled_with_first_group() {
    let shared = Member {
        id: 42,
        username: "sam".to_string(),
    };
    let groups = vec![
        Group {
            id: 1,
            name: "Registration".to_string(),
            members: vec![shared.clone()],
        },
        Group {
            id: 2,
            name: "Security".to_string(),
            members: vec![shared],
        },
    ];

    let members = assignable_members_from_groups(&groups);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, 42);
    assert_eq!(members[0].label, "sam (Registration)");
}

#[test]
fn test_completed_round_trip() {
    let status = TaskStatus::from_code(Some(2));
    assert_eq!(status_text(status), "Completed");

    let assigner = legal_actions(status, Role::Assigner);
    assert_eq!(assigner.len(), 1);
    assert_eq!(assigner[0].value, TaskAction::Delete);
    assert_eq!(assigner[0].label, "Delete");
    assert!(legal_actions(status, Role::Assignee).is_empty());
}

#[test]
fn test_action_fallback() {
    let meta = action_meta(999);
    assert_eq!(meta.label, "Action 999");
    assert_eq!(meta.theme_class, ACTION_FALLBACK_THEME);
}

#[test]
fn test_null_users_never_match_filters() {
    let mut orphan = task_with_status(1, Some(0));
    orphan.assigned_user = None;
    orphan.assigner_user = None;
    let owned = task_with_status(2, Some(1));
    let tasks = vec![orphan, owned];

    assert_eq!(filter_assigned_to(&tasks, 2).len(), 1);
    assert_eq!(filter_assigned_by(&tasks, 1).len(), 1);
    assert!(filter_assigned_to(&tasks, 1).is_empty());
}
