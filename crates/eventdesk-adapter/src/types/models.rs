/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs for backend read models
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::TaskStatus;

pub type UserId = i64;

/// Lightweight user reference embedded in other resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    #[serde(default)]
    pub username: String,
}

/// Authenticated user carried by login/refresh payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Task snapshot as returned by the backend.
///
/// `status` keeps the raw wire code so that missing or unrecognised values
/// survive deserialization and resolve to the Unknown state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_user: Option<UserRef>,
    #[serde(default)]
    pub assigner_user: Option<UserRef>,
    #[serde(default)]
    pub event_id: Option<i64>,
}

impl Task {
    /// Resolved lifecycle status, `None` when unknown.
    pub fn status(&self) -> Option<TaskStatus> {
        TaskStatus::from_code(self.status)
    }

    pub fn assigned_user_id(&self) -> Option<UserId> {
        self.assigned_user.as_ref().map(|user| user.id)
    }

    pub fn assigner_user_id(&self) -> Option<UserId> {
        self.assigner_user.as_ref().map(|user| user.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

/// One page of a paginated list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}
