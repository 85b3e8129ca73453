/*
[INPUT]:  Parsed subcommands and loaded AppConfig
[OUTPUT]: Backend calls through the session coordinator, rendered output
[POS]:    CLI command layer - wires client, coordinator and session file
[UPDATE]: When adding subcommands or changing session persistence
*/

use std::sync::Arc;

use anyhow::{Context as _, Result, anyhow, bail};
use dialoguer::{Password, theme::ColorfulTheme};
use tracing::{debug, info};

use eventdesk_adapter::task::{
    Role, assignable_members_from_groups, categorize_for_board, filter_assigned_by,
    filter_assigned_to,
};
use eventdesk_adapter::{
    Attachment, EventdeskClient, MemorySessionStore, SessionCoordinator, TaskAction,
    TaskActionCommand, User,
};
use eventdesk_cli::{AppConfig, SessionFile, render};

/// Which subset of an event's tasks to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    AssignedToMe,
    AssignedByMe,
}

/// Arguments of the `act` subcommand
#[derive(Debug, Clone)]
pub struct ActArgs {
    pub task_id: i64,
    pub action: String,
    pub comment: Option<String>,
    pub attachments: Vec<String>,
    pub assignee: Option<i64>,
}

/// Everything a command needs to talk to the backend
pub struct Context {
    client: EventdeskClient,
    coordinator: SessionCoordinator,
    session_file: SessionFile,
    config: AppConfig,
}

impl Context {
    /// Build the client and restore any persisted session cookie.
    pub async fn open(config: AppConfig) -> Result<Self> {
        let client = EventdeskClient::with_config(config.api.client_config(), &config.api.base_url)
            .context("create backend client")?;
        let session_file = SessionFile::new(config.session_path()?);
        if let Some(stored) = session_file.load().await {
            debug!(saved_at = %stored.saved_at, "restoring session cookie");
            client.restore_cookies(&stored.cookie);
        }

        let coordinator = SessionCoordinator::new(
            Arc::new(client.clone()),
            Arc::new(MemorySessionStore::new()),
        );

        Ok(Self {
            client,
            coordinator,
            session_file,
            config,
        })
    }

    /// Save the current cookie so the next run can reuse the session.
    async fn persist(&self) -> Result<()> {
        match self.client.cookie_header() {
            Some(cookie) => self.session_file.save(&cookie).await,
            None => Ok(()),
        }
    }

    /// Current user, refreshing the persisted session if needed.
    async fn require_user(&self) -> Result<User> {
        if let Some(user) = self.coordinator.current_user() {
            return Ok(user);
        }
        if !self.coordinator.refresh().await {
            bail!("not logged in; run `eventdesk login` first");
        }
        self.coordinator
            .current_user()
            .ok_or_else(|| anyhow!("session refresh returned no user"))
    }

    pub async fn login(&self, username: Option<String>, password: Option<String>) -> Result<()> {
        let username = match username.or_else(|| self.config.username.clone()) {
            Some(name) => name,
            None => dialoguer::Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Username")
                .interact_text()?,
        };
        let password = match password {
            Some(password) => password,
            None => Password::with_theme(&ColorfulTheme::default())
                .with_prompt("Password")
                .interact()?,
        };

        let user = self
            .coordinator
            .login(&username, &password)
            .await
            .context("login failed")?;
        self.persist().await.context("save session")?;
        println!("Logged in as {} (#{})", user.username, user.id);
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        let result = self.coordinator.logout().await;
        self.session_file.clear().await.context("remove session file")?;
        result.context("logout request failed")?;
        println!("Logged out");
        Ok(())
    }

    pub async fn whoami(&self) -> Result<()> {
        let user = self.require_user().await?;
        self.persist().await?;
        match &user.email {
            Some(email) => println!("{} (#{}) <{email}>", user.username, user.id),
            None => println!("{} (#{})", user.username, user.id),
        }
        Ok(())
    }

    pub async fn events(&self, page: u32) -> Result<()> {
        self.require_user().await?;
        let page_size = self.config.page_size;
        let events = self
            .coordinator
            .with_reauth(|| self.client.list_events(page, page_size))
            .await
            .context("list events")?;
        self.persist().await?;
        print!("{}", render::events(&events));
        Ok(())
    }

    pub async fn board(&self, event_id: i64) -> Result<()> {
        self.require_user().await?;
        let tasks = self
            .coordinator
            .with_reauth(|| self.client.list_tasks(event_id))
            .await
            .context("list tasks")?;
        self.persist().await?;

        let board = categorize_for_board(&tasks);
        info!(event_id, total = tasks.len(), placed = board.len(), "board loaded");
        print!("{}", render::board(&board, tasks.len()));
        Ok(())
    }

    pub async fn tasks(&self, event_id: i64, filter: TaskFilter) -> Result<()> {
        let user = self.require_user().await?;
        let tasks = self
            .coordinator
            .with_reauth(|| self.client.list_tasks(event_id))
            .await
            .context("list tasks")?;
        self.persist().await?;

        let selected = match filter {
            TaskFilter::All => tasks.iter().collect(),
            TaskFilter::AssignedToMe => filter_assigned_to(&tasks, user.id),
            TaskFilter::AssignedByMe => filter_assigned_by(&tasks, user.id),
        };
        print!("{}", render::task_list(selected));
        Ok(())
    }

    pub async fn task(&self, task_id: i64) -> Result<()> {
        let user = self.require_user().await?;
        let task = self
            .coordinator
            .with_reauth(|| self.client.get_task(task_id))
            .await
            .with_context(|| format!("load task {task_id}"))?;
        self.persist().await?;

        print!("{}", render::task_detail(&task, Role::for_task(&task, user.id)));
        Ok(())
    }

    pub async fn act(&self, args: ActArgs) -> Result<()> {
        let action = TaskAction::from_name(&args.action)
            .ok_or_else(|| anyhow!("unknown action `{}`", args.action))?;
        let user = self.require_user().await?;
        let task = self
            .coordinator
            .with_reauth(|| self.client.get_task(args.task_id))
            .await
            .with_context(|| format!("load task {}", args.task_id))?;
        let role = Role::for_task(&task, user.id)
            .ok_or_else(|| anyhow!("you are not a participant in task {}", task.id))?;

        let mut command = TaskActionCommand::new(action)
            .with_attachments(args.attachments.iter().map(String::as_str).map(attachment).collect());
        if let Some(comment) = args.comment {
            command = command.with_comment(comment);
        }
        if let Some(assignee) = args.assignee {
            command = command.with_assignee(assignee);
        }

        // Delete is acknowledged without a task snapshot.
        if action == TaskAction::Delete {
            command.validate(&task, role)?;
            self.coordinator
                .with_reauth(|| self.client.delete_task(task.id))
                .await
                .with_context(|| format!("delete task {}", task.id))?;
            self.persist().await?;
            println!("{}", render::task_deleted(task.id));
            return Ok(());
        }

        let updated = self
            .coordinator
            .with_reauth(|| self.client.perform_task_action(&task, role, command.clone()))
            .await
            .with_context(|| format!("{action} task {}", task.id))?;
        self.persist().await?;
        println!("{}", render::action_applied(action.code(), &updated));
        Ok(())
    }

    pub async fn assignees(&self, event_id: i64) -> Result<()> {
        self.require_user().await?;
        let groups = self
            .coordinator
            .with_reauth(|| self.client.list_groups(event_id))
            .await
            .context("list groups")?;
        self.persist().await?;
        print!("{}", render::assignees(&assignable_members_from_groups(&groups)));
        Ok(())
    }
}

/// Attachment named after the last path segment of its URL
fn attachment(url: &str) -> Attachment {
    let name = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(url);
    Attachment {
        name: name.to_string(),
        url: url.to_string(),
    }
}
