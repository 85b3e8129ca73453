/*
[INPUT]:  Cookie header exported from the HTTP client
[OUTPUT]: Session cookie persisted on disk between CLI runs
[POS]:    Persistence layer - session file storage
[UPDATE]: When the persisted session format changes
*/

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Persisted session contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub cookie: String,
    pub saved_at: DateTime<Utc>,
}

/// JSON file holding the backend session cookie
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session. A missing or unreadable file yields `None`.
    pub async fn load(&self) -> Option<StoredSession> {
        if !self.path.exists() {
            return None;
        }
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "read session file failed");
                return None;
            }
        };
        match serde_json::from_str::<StoredSession>(&content) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "parse session file failed");
                None
            }
        }
    }

    pub async fn save(&self, cookie: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let session = StoredSession {
            cookie: cookie.to_string(),
            saved_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&session)?;

        // Write to temp file then rename
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.path).await?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .await
                .with_context(|| format!("remove {}", self.path.display()))?;
        }
        Ok(())
    }
}
