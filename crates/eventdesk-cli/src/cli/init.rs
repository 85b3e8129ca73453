/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When AppConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::PathBuf;

use eventdesk_cli::config::{ApiConfig, AppConfig};

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to EventDesk Init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through connecting the console to an EventDesk backend.").dim()
    );

    let theme = ColorfulTheme::default();
    let defaults = ApiConfig::default();

    println!("\n{}", style("--- Backend ---").bold());
    let base_url: String = Input::with_theme(&theme)
        .with_prompt("Backend URL")
        .default(defaults.base_url)
        .interact_text()?;

    let timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Request timeout (seconds)")
        .default(defaults.timeout_secs)
        .interact_text()?;

    println!("\n{}", style("--- Account ---").bold());
    let username: String = Input::with_theme(&theme)
        .with_prompt("Default username (leave empty to skip)")
        .allow_empty(true)
        .interact_text()?;

    let custom_session = Confirm::with_theme(&theme)
        .with_prompt("Store the session somewhere other than the default data directory?")
        .default(false)
        .interact()?;
    let session_file = if custom_session {
        let path: String = Input::with_theme(&theme)
            .with_prompt("Session file path")
            .interact_text()?;
        Some(PathBuf::from(path))
    } else {
        None
    };

    let config = AppConfig {
        api: ApiConfig {
            base_url,
            timeout_secs,
            connect_timeout_secs: defaults.connect_timeout_secs,
        },
        username: Some(username).filter(|name| !name.trim().is_empty()),
        session_file,
        ..AppConfig::default()
    };
    config.validate()?;

    let yaml = serde_yaml::to_string(&config).context("failed to serialize config to YAML")?;

    std::fs::write(&output, yaml)
        .context(format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}
