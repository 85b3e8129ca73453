/*
[INPUT]:  Tasks, events and lifecycle lookups from eventdesk-adapter
[OUTPUT]: Terminal text with console styling
[POS]:    Presentation layer - maps theme tokens to terminal colors
[UPDATE]: When theme tokens or displayed task fields change
*/

use std::fmt::Write as _;

use console::{Style, style};

use eventdesk_adapter::task::{
    self, AssignableMember, Role, TaskBoard, legal_actions, status_guidance, status_style,
    status_text,
};
use eventdesk_adapter::{Event, Page, Task, TaskAction};

/// Terminal style for a theme token
pub fn theme_style(theme_class: &str) -> Style {
    match theme_class {
        "primary" => Style::new().blue(),
        "success" => Style::new().green(),
        "warning" => Style::new().yellow(),
        "danger" => Style::new().red(),
        "info" => Style::new().cyan(),
        "dark" => Style::new().magenta(),
        "light" => Style::new().dim(),
        _ => Style::new(),
    }
}

fn user_label(user: Option<&eventdesk_adapter::UserRef>) -> String {
    user.map(|u| u.username.clone())
        .unwrap_or_else(|| "-".to_string())
}

/// One-line task summary: id, styled status and name
pub fn task_line(task: &Task) -> String {
    let status = task.status();
    let theme = theme_style(status_style(status).theme_class);
    format!(
        "#{:<6} {:<18} {}  ({} -> {})",
        task.id,
        theme.apply_to(status_text(status)),
        task.name,
        user_label(task.assigner_user.as_ref()),
        user_label(task.assigned_user.as_ref()),
    )
}

pub fn task_list<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> String {
    let mut out = String::new();
    let mut count = 0usize;
    for task in tasks {
        let _ = writeln!(out, "{}", task_line(task));
        count += 1;
    }
    if count == 0 {
        let _ = writeln!(out, "{}", style("No tasks").dim());
    }
    out
}

/// Board columns in lifecycle order. Tasks with an unrecognised status are
/// counted separately since they land in no column.
pub fn board(board: &TaskBoard<'_>, total: usize) -> String {
    let mut out = String::new();
    for (status, tasks) in board.columns() {
        let heading = theme_style(status_style(Some(status)).theme_class)
            .bold()
            .apply_to(status_text(Some(status)));
        let _ = writeln!(out, "{heading} ({})", tasks.len());
        for task in tasks {
            let _ = writeln!(out, "  #{} {}", task.id, task.name);
        }
    }
    let unplaced = total.saturating_sub(board.len());
    if unplaced > 0 {
        let _ = writeln!(
            out,
            "{}",
            style(format!("{unplaced} task(s) with unknown status")).dim()
        );
    }
    out
}

/// Task detail for the caller's role: status, guidance and legal actions
pub fn task_detail(task: &Task, role: Option<Role>) -> String {
    let status = task.status();
    let theme = status_style(status);
    let mut out = String::new();

    let _ = writeln!(out, "{} #{}", style(&task.name).bold(), task.id);
    let _ = writeln!(
        out,
        "Status:   {}",
        theme_style(theme.theme_class).apply_to(status_text(status))
    );
    let _ = writeln!(out, "Assigner: {}", user_label(task.assigner_user.as_ref()));
    let _ = writeln!(out, "Assignee: {}", user_label(task.assigned_user.as_ref()));
    if let Some(start) = task.start_time {
        let _ = writeln!(out, "Start:    {}", start.format("%Y-%m-%d %H:%M"));
    }
    if let Some(end) = task.end_time {
        let _ = writeln!(out, "End:      {}", end.format("%Y-%m-%d %H:%M"));
    }
    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "\n{description}");
    }

    let Some(role) = role else {
        let _ = writeln!(out, "\n{}", style("You are not a participant in this task.").dim());
        return out;
    };

    if let Some(guidance) = status_guidance(status, role) {
        let _ = writeln!(out, "\n{}", style(guidance).italic());
    }
    let actions = legal_actions(status, role);
    if actions.is_empty() {
        let _ = writeln!(out, "{}", style(format!("No actions available as {role}")).dim());
    } else {
        let labels: Vec<_> = actions.iter().map(|a| a.label).collect();
        let _ = writeln!(out, "Actions ({role}): {}", labels.join(", "));
    }
    out
}

pub fn events(page: &Page<Event>) -> String {
    let mut out = String::new();
    for event in &page.items {
        let _ = writeln!(out, "#{:<6} {}", event.id, event.name);
    }
    let _ = writeln!(
        out,
        "{}",
        style(format!(
            "page {} ({} of {} events)",
            page.page,
            page.items.len(),
            page.total
        ))
        .dim()
    );
    out
}

pub fn assignees(members: &[AssignableMember]) -> String {
    if members.is_empty() {
        return format!("{}\n", style("No assignable members").dim());
    }
    members
        .iter()
        .map(|m| format!("{:<6} {}\n", m.id, m.label))
        .collect()
}

/// Past-tense summary of an action that was just applied
pub fn action_applied(code: i64, task: &Task) -> String {
    let meta = task::action_meta(code);
    format!(
        "{} #{} is now {}",
        theme_style(meta.theme_class).apply_to(meta.label),
        task.id,
        status_text(task.status())
    )
}

pub fn task_deleted(task_id: i64) -> String {
    let meta = task::action_meta(TaskAction::Delete.code());
    format!(
        "{} #{task_id}",
        theme_style(meta.theme_class).apply_to(meta.label)
    )
}
