/*
[INPUT]:  Event/task ids, task payloads, action requests
[OUTPUT]: Task snapshots from the backend
[POS]:    HTTP layer - task endpoints (require session cookie)
[UPDATE]: When adding task endpoints or changing action validation
*/

use reqwest::Method;
use tracing::{debug, info};

use crate::http::{ApiError, EventdeskClient, Result};
use crate::task::{Role, check_action};
use crate::types::{Attachment, NewTask, Task, TaskAction, TaskActionRequest, TaskUpdate, UserId};

/// A validated request to move a task through its lifecycle
#[derive(Debug, Clone, PartialEq)]
pub struct TaskActionCommand {
    pub action: TaskAction,
    pub comment: Option<String>,
    pub attachments: Vec<Attachment>,
    /// New assignee, used by `Assign`
    pub assigned_user_id: Option<UserId>,
}

impl TaskActionCommand {
    pub fn new(action: TaskAction) -> Self {
        Self {
            action,
            comment: None,
            attachments: Vec::new(),
            assigned_user_id: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assigned_user_id = Some(user_id);
        self
    }

    /// Check the command against the task's current status and caller role.
    pub fn validate(&self, task: &Task, role: Role) -> Result<()> {
        check_action(task.status(), role, self.action)?;

        if !self.attachments.is_empty() && !self.action.allows_attachment() {
            return Err(ApiError::Validation(format!(
                "{} requests cannot carry attachments",
                self.action
            )));
        }
        if self.action == TaskAction::Assign && self.assigned_user_id.is_none() {
            return Err(ApiError::Validation(
                "Assign requires an assignee".to_string(),
            ));
        }
        Ok(())
    }

    fn into_request(self) -> TaskActionRequest {
        TaskActionRequest {
            action: self.action.code(),
            comment: self.comment,
            attachments: self.attachments,
            assigned_user_id: self.assigned_user_id,
        }
    }
}

impl EventdeskClient {
    /// List tasks of an event
    ///
    /// GET /api/events/{event_id}/tasks
    pub async fn list_tasks(&self, event_id: i64) -> Result<Vec<Task>> {
        let endpoint = format!("/api/events/{event_id}/tasks");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_envelope(builder).await
    }

    /// GET /api/tasks/{task_id}
    pub async fn get_task(&self, task_id: i64) -> Result<Task> {
        let endpoint = format!("/api/tasks/{task_id}");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_envelope(builder).await
    }

    /// POST /api/events/{event_id}/tasks
    pub async fn create_task(&self, event_id: i64, task: &NewTask) -> Result<Task> {
        let endpoint = format!("/api/events/{event_id}/tasks");
        let builder = self.request(Method::POST, &endpoint)?.json(task);
        self.send_envelope(builder).await
    }

    /// PUT /api/tasks/{task_id}
    pub async fn update_task(&self, task_id: i64, update: &TaskUpdate) -> Result<Task> {
        let endpoint = format!("/api/tasks/{task_id}");
        let builder = self.request(Method::PUT, &endpoint)?.json(update);
        self.send_envelope(builder).await
    }

    /// DELETE /api/tasks/{task_id}
    pub async fn delete_task(&self, task_id: i64) -> Result<()> {
        let endpoint = format!("/api/tasks/{task_id}");
        let builder = self.request(Method::DELETE, &endpoint)?;
        self.send_ack(builder).await
    }

    /// Validate and send a lifecycle action; returns the new snapshot.
    ///
    /// POST /api/tasks/{task_id}/actions
    pub async fn perform_task_action(
        &self,
        task: &Task,
        role: Role,
        command: TaskActionCommand,
    ) -> Result<Task> {
        command.validate(task, role)?;
        debug!(task_id = task.id, action = %command.action, %role, "sending task action");

        let endpoint = format!("/api/tasks/{}/actions", task.id);
        let builder = self
            .request(Method::POST, &endpoint)?
            .json(&command.into_request());
        let updated: Task = self.send_envelope(builder).await?;
        info!(task_id = updated.id, status = ?updated.status(), "task action applied");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ClientConfig;
    use crate::types::{TaskStatus, UserRef};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn task_json(id: i64, status: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": "Stage lighting check",
            "status": status,
            "assignedUser": {"id": 2, "username": "lee"},
            "assignerUser": {"id": 1, "username": "organizer"},
            "eventId": 10,
        })
    }

    fn task(status: i64) -> Task {
        Task {
            id: 5,
            name: "Stage lighting check".to_string(),
            description: None,
            status: Some(status),
            start_time: None,
            end_time: None,
            assigned_user: Some(UserRef {
                id: 2,
                username: "lee".to_string(),
            }),
            assigner_user: Some(UserRef {
                id: 1,
                username: "organizer".to_string(),
            }),
            event_id: Some(10),
        }
    }

    fn attachment() -> Attachment {
        Attachment {
            name: "photo.jpg".to_string(),
            url: "https://files.example.com/photo.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_tasks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/events/10/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": 0,
                "data": [task_json(1, 0), task_json(2, 99)],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            EventdeskClient::with_config(ClientConfig::default(), &server.uri()).expect("client");
        let tasks = client.list_tasks(10).await.expect("list_tasks");

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status(), Some(TaskStatus::Pending));
        assert_eq!(tasks[1].status(), None);
    }

    #[tokio::test]
    async fn test_perform_submit_with_attachment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/5/actions"))
            .and(body_json(serde_json::json!({
                "action": 5,
                "comment": "done",
                "attachments": [{"name": "photo.jpg", "url": "https://files.example.com/photo.jpg"}],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": 0,
                "data": task_json(5, 5),
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            EventdeskClient::with_config(ClientConfig::default(), &server.uri()).expect("client");
        let command = TaskActionCommand::new(TaskAction::Submit)
            .with_comment("done")
            .with_attachments(vec![attachment()]);

        let updated = client
            .perform_task_action(&task(1), Role::Assignee, command)
            .await
            .expect("submit");
        assert_eq!(updated.status(), Some(TaskStatus::PendingApproval));
    }

    #[tokio::test]
    async fn test_illegal_action_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/5/actions"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client =
            EventdeskClient::with_config(ClientConfig::default(), &server.uri()).expect("client");
        let err = client
            .perform_task_action(
                &task(0),
                Role::Assignee,
                TaskActionCommand::new(TaskAction::Approve),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transition(_)));
    }

    #[test]
    fn test_attachments_only_on_submit_and_block() {
        let accept = TaskActionCommand::new(TaskAction::Accept).with_attachments(vec![attachment()]);
        assert!(matches!(
            accept.validate(&task(0), Role::Assignee),
            Err(ApiError::Validation(_))
        ));

        let block = TaskActionCommand::new(TaskAction::Block).with_attachments(vec![attachment()]);
        assert!(block.validate(&task(1), Role::Assignee).is_ok());
    }

    #[test]
    fn test_assign_requires_assignee() {
        let bare = TaskActionCommand::new(TaskAction::Assign);
        assert!(matches!(
            bare.validate(&task(0), Role::Assigner),
            Err(ApiError::Validation(_))
        ));
        let assigned = TaskActionCommand::new(TaskAction::Assign).with_assignee(3);
        assert!(assigned.validate(&task(0), Role::Assigner).is_ok());
    }

    #[tokio::test]
    async fn test_delete_task_envelope_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/tasks/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": 40300,
                "msg": "Only the assigner can delete this task",
            })))
            .mount(&server)
            .await;

        let client =
            EventdeskClient::with_config(ClientConfig::default(), &server.uri()).expect("client");
        match client.delete_task(5).await.unwrap_err() {
            ApiError::Api { code, message } => {
                assert_eq!(code, 40300);
                assert_eq!(message, "Only the assigner can delete this task");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
