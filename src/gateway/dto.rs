//! Server-side shapes of users, boards and tasks, and their mapping onto client types.
//!
//! The server is inconsistent about field names and ID types, so everything here is optional
//! and IDs are read as raw JSON values.

use crate::domain::board::Board;
use crate::domain::task::{Task, TaskChanges, TaskPriority, TaskStatus, parse_positive_id};
use crate::domain::user::User;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const UNTITLED_BOARD: &str = "Untitled";

/// Renders a numeric or string ID as the client's string form. Missing IDs become "".
fn id_string(raw: &Value) -> String {
    match raw {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        _ => String::new(),
    }
}

/// Reads an optional counter, ignoring anything that isn't a non-negative integer
fn count(raw: &Value) -> Option<u32> {
    raw.as_u64().and_then(|number| u32::try_from(number).ok())
}

fn first_non_empty<const N: usize>(candidates: [&Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .cloned()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ServerUser {
    #[serde(default)]
    pub id: Value,
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tasks_count: Value,
    #[serde(default)]
    pub team_id: Value,
    pub team_name: Option<String>,
}

impl From<ServerUser> for User {
    fn from(value: ServerUser) -> Self {
        let team_id = Some(id_string(&value.team_id)).filter(|id| !id.is_empty());
        User {
            id: id_string(&value.id),
            name: first_non_empty([&value.full_name, &value.name, &value.username])
                .unwrap_or_default(),
            email: non_empty(value.email),
            avatar_url: non_empty(value.avatar_url),
            description: non_empty(value.description),
            tasks_count: count(&value.tasks_count),
            team_id,
            team_name: non_empty(value.team_name),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ServerBoard {
    #[serde(default)]
    pub id: Value,
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub task_count: Value,
}

impl From<ServerBoard> for Board {
    fn from(value: ServerBoard) -> Self {
        Board {
            id: id_string(&value.id),
            title: first_non_empty([&value.name, &value.title])
                .unwrap_or_else(|| UNTITLED_BOARD.to_owned()),
            description: non_empty(value.description),
            task_count: count(&value.task_count),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ServerTask {
    #[serde(default)]
    pub id: Value,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub assignee_id: Value,
    /// Either a bare ID or an embedded user object
    #[serde(default)]
    pub assignee: Value,
    #[serde(default)]
    pub board_id: Value,
    pub board_name: Option<String>,
}

impl ServerTask {
    fn assignee_ref(&self) -> String {
        let explicit = id_string(&self.assignee_id);
        if !explicit.is_empty() {
            return explicit;
        }

        match &self.assignee {
            Value::Object(user) => user.get("id").map(id_string).unwrap_or_default(),
            other => id_string(other),
        }
    }
}

impl From<ServerTask> for Task {
    fn from(value: ServerTask) -> Self {
        let assignee_id = value.assignee_ref();
        Task {
            id: id_string(&value.id),
            title: value.title.unwrap_or_default(),
            description: value.description.unwrap_or_default(),
            priority: value
                .priority
                .as_deref()
                .map(TaskPriority::from_server)
                .unwrap_or_default(),
            status: value
                .status
                .as_deref()
                .map(TaskStatus::from_server)
                .unwrap_or_default(),
            assignee_id,
            board_id: id_string(&value.board_id),
            board_name: non_empty(value.board_name),
        }
    }
}

/// Body of the create and update task requests
#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload<'task> {
    pub assignee_id: u64,
    pub board_id: u64,
    pub description: &'task str,
    pub priority: &'static str,
    pub status: &'static str,
    pub title: &'task str,
}

impl<'task> TryFrom<&'task TaskChanges> for TaskPayload<'task> {
    type Error = anyhow::Error;

    fn try_from(changes: &'task TaskChanges) -> Result<Self, Self::Error> {
        let assignee_id = parse_positive_id(&changes.assignee_id).ok_or_else(|| {
            anyhow!(
                "assignee \"{}\" is not a positive numeric ID",
                changes.assignee_id
            )
        })?;
        let board_id = parse_positive_id(&changes.board_id).ok_or_else(|| {
            anyhow!("board \"{}\" is not a positive numeric ID", changes.board_id)
        })?;

        Ok(TaskPayload {
            assignee_id,
            board_id,
            description: &changes.description,
            priority: changes.priority.server_name(),
            status: changes.status.server_name(),
            title: &changes.title,
        })
    }
}

/// Body of the status-only update request
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct StatusPayload {
    pub status: &'static str,
}

impl From<TaskStatus> for StatusPayload {
    fn from(status: TaskStatus) -> Self {
        StatusPayload {
            status: status.server_name(),
        }
    }
}
