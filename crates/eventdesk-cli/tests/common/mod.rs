/*
[INPUT]:  Temporary directories and mock server addresses
[OUTPUT]: Config files and binary invocations for CLI tests
[POS]:    Test infrastructure - shared across CLI test modules
[UPDATE]: When config schema or binary flags change
*/

use std::path::{Path, PathBuf};
use std::process::Output;

use tempfile::TempDir;

/// Write a config pointing at `base_url` with the session file kept in `dir`
#[allow(dead_code)]
pub fn write_config(dir: &TempDir, base_url: &str) -> PathBuf {
    let path = dir.path().join("eventdesk.yaml");
    let session = dir.path().join("session.json");
    let yaml = format!(
        "api:\n  base_url: {base_url}\n  timeout_secs: 5\nsession_file: {}\n",
        session.display()
    );
    std::fs::write(&path, yaml).expect("write config");
    path
}

#[allow(dead_code)]
pub fn session_path(dir: &TempDir) -> PathBuf {
    dir.path().join("session.json")
}

/// Run the `eventdesk` binary with `--config` and the given arguments
#[allow(dead_code)]
pub async fn run_eventdesk(config: &Path, args: &[&str]) -> Output {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_eventdesk"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("EVENTDESK_PASSWORD")
        .output()
        .await
        .expect("Failed to start eventdesk binary")
}

#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[allow(dead_code)]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
