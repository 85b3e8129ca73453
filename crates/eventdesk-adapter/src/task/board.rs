/*
[INPUT]:  Task snapshots and user ids
[OUTPUT]: Kanban buckets and role-filtered task lists
[POS]:    Task domain logic - board classification
[UPDATE]: When board columns or filters change
*/

use crate::types::{Task, TaskStatus, UserId};

/// Tasks grouped by exact status. Tasks with an unknown status are not placed
/// in any bucket.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaskBoard<'a> {
    pub pending: Vec<&'a Task>,
    pub progress: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
    pub delayed: Vec<&'a Task>,
    pub blocked: Vec<&'a Task>,
    pub pending_approval: Vec<&'a Task>,
    pub rejected: Vec<&'a Task>,
}

impl<'a> TaskBoard<'a> {
    fn bucket_mut(&mut self, status: TaskStatus) -> &mut Vec<&'a Task> {
        match status {
            TaskStatus::Pending => &mut self.pending,
            TaskStatus::InProgress => &mut self.progress,
            TaskStatus::Completed => &mut self.completed,
            TaskStatus::Delayed => &mut self.delayed,
            TaskStatus::Blocked => &mut self.blocked,
            TaskStatus::PendingApproval => &mut self.pending_approval,
            TaskStatus::Rejected => &mut self.rejected,
        }
    }

    pub fn bucket(&self, status: TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::Pending => &self.pending,
            TaskStatus::InProgress => &self.progress,
            TaskStatus::Completed => &self.completed,
            TaskStatus::Delayed => &self.delayed,
            TaskStatus::Blocked => &self.blocked,
            TaskStatus::PendingApproval => &self.pending_approval,
            TaskStatus::Rejected => &self.rejected,
        }
    }

    /// Columns in status-code order, for rendering.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[&'a Task])> + '_ {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.bucket(status)))
    }

    /// Number of tasks placed on the board.
    pub fn len(&self) -> usize {
        self.columns().map(|(_, tasks)| tasks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn categorize_for_board(tasks: &[Task]) -> TaskBoard<'_> {
    let mut board = TaskBoard::default();
    for task in tasks {
        if let Some(status) = task.status() {
            board.bucket_mut(status).push(task);
        }
    }
    board
}

/// Tasks delegated to `user_id`.
pub fn filter_assigned_to(tasks: &[Task], user_id: UserId) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.assigned_user_id() == Some(user_id))
        .collect()
}

/// Tasks created/owned by `user_id`.
pub fn filter_assigned_by(tasks: &[Task], user_id: UserId) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.assigner_user_id() == Some(user_id))
        .collect()
}
