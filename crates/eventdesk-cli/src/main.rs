/*
[INPUT]:  CLI arguments, YAML configuration file, EVENTDESK__* environment
[OUTPUT]: Console commands against the EventDesk backend
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or startup flow
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::commands::{ActArgs, Context as CommandContext, TaskFilter};
use eventdesk_cli::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "eventdesk", version, about = "EventDesk admin console")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,
    /// Validate configuration and exit without contacting the backend
    #[arg(long = "dry-run", global = true)]
    dry_run: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactively create a configuration file
    Init {
        #[arg(long, value_name = "PATH", default_value = "eventdesk.yaml")]
        output: PathBuf,
    },
    /// Log in and persist the session cookie
    Login {
        #[arg(long)]
        username: Option<String>,
        #[arg(long, env = "EVENTDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log out and delete the persisted session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List events
    Events {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show an event's tasks grouped by status
    Board {
        #[arg(long = "event", value_name = "ID")]
        event_id: i64,
    },
    /// List an event's tasks
    #[command(group(ArgGroup::new("filter").args(["mine", "assigned_by_me"])))]
    Tasks {
        #[arg(long = "event", value_name = "ID")]
        event_id: i64,
        /// Only tasks assigned to me
        #[arg(long)]
        mine: bool,
        /// Only tasks I assigned
        #[arg(long)]
        assigned_by_me: bool,
    },
    /// Show a task with the actions available to me
    Task { id: i64 },
    /// Apply a lifecycle action to a task
    Act {
        task_id: i64,
        /// Action name, e.g. accept, submit, approve
        action: String,
        #[arg(long)]
        comment: Option<String>,
        /// Attachment URL (submit and block only)
        #[arg(long = "attach", value_name = "URL")]
        attachments: Vec<String>,
        /// New assignee user id (assign only)
        #[arg(long)]
        assignee: Option<i64>,
    },
    /// List members that tasks of an event can be assigned to
    Assignees {
        #[arg(long = "event", value_name = "ID")]
        event_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    // init writes the config file, so it runs before any config is loaded
    if let Command::Init { output } = &args.command {
        return cli::init::run_init(output.clone());
    }

    let config = AppConfig::load(args.config_path.as_deref()).context("load config")?;
    info!(base_url = %config.api.base_url, dry_run = args.dry_run, "configuration loaded");

    if args.dry_run {
        println!("configuration OK ({})", config.api.base_url);
        return Ok(());
    }

    let ctx = CommandContext::open(config).await?;
    match args.command {
        Command::Init { output } => cli::init::run_init(output),
        Command::Login { username, password } => ctx.login(username, password).await,
        Command::Logout => ctx.logout().await,
        Command::Whoami => ctx.whoami().await,
        Command::Events { page } => ctx.events(page).await,
        Command::Board { event_id } => ctx.board(event_id).await,
        Command::Tasks {
            event_id,
            mine,
            assigned_by_me,
        } => {
            let filter = if mine {
                TaskFilter::AssignedToMe
            } else if assigned_by_me {
                TaskFilter::AssignedByMe
            } else {
                TaskFilter::All
            };
            ctx.tasks(event_id, filter).await
        }
        Command::Task { id } => ctx.task(id).await,
        Command::Act {
            task_id,
            action,
            comment,
            attachments,
            assignee,
        } => {
            ctx.act(ActArgs {
                task_id,
                action,
                comment,
                attachments,
                assignee,
            })
            .await
        }
        Command::Assignees { event_id } => ctx.assignees(event_id).await,
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
