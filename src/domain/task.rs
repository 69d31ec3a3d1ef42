use crate::domain::task::driven_ports::TaskWriter;
use crate::domain::task::driving_ports::{SubmitTarget, TaskError};
use crate::domain::user::User;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{info, warn};
use validator::{Validate, ValidationError, ValidationErrors};

/// Workflow column a task sits in. Serializes to the lowercase client form.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    #[serde(alias = "todo")]
    #[display("backlog")]
    Backlog,
    #[display("inprogress")]
    InProgress,
    #[display("done")]
    Done,
}

impl TaskStatus {
    /// Every status, in board column order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Backlog, TaskStatus::InProgress, TaskStatus::Done];

    /// Normalizes any casing or separator variant the server sends ("DONE", "InProgress",
    /// "in_progress", "Todo"...). Unrecognized values land in the backlog.
    pub fn from_server(raw: &str) -> Self {
        match comparison_key(raw).as_str() {
            "backlog" | "todo" => Self::Backlog,
            "inprogress" => Self::InProgress,
            "done" => Self::Done,
            _ => {
                warn!(raw_status = raw, "unrecognized task status, defaulting to backlog");
                Self::Backlog
            }
        }
    }

    /// The spelling the server expects in write payloads
    pub fn server_name(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    #[display("low")]
    Low,
    #[default]
    #[display("medium")]
    Medium,
    #[display("high")]
    High,
}

impl TaskPriority {
    /// Normalizes any casing of a priority. Unrecognized values become [TaskPriority::Medium].
    pub fn from_server(raw: &str) -> Self {
        match comparison_key(raw).as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => {
                warn!(raw_priority = raw, "unrecognized task priority, defaulting to medium");
                Self::Medium
            }
        }
    }

    /// The spelling the server expects in write payloads
    pub fn server_name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Lowercases and drops separators so "In_Progress", "in-progress" and "INPROGRESS" compare equal
fn comparison_key(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub assignee_id: String,
    pub board_id: String,
    pub board_name: Option<String>,
}

/// Values of the task editing form. Fields stay empty until the user fills them in, and the
/// whole thing is what gets persisted as the draft.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskForm {
    #[validate(length(min = 1, message = "Enter a title"))]
    pub title: String,
    #[validate(length(min = 1, message = "Enter a description"))]
    pub description: String,
    #[validate(required(message = "Choose a priority"))]
    pub priority: Option<TaskPriority>,
    #[validate(required(message = "Choose a status"))]
    pub status: Option<TaskStatus>,
    #[validate(length(min = 1, message = "Choose an assignee"))]
    pub assignee_id: String,
    #[validate(length(min = 1, message = "Choose a board"))]
    pub board_id: String,
}

/// A single edit to one field of a [TaskForm]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Title(String),
    Description(String),
    Priority(TaskPriority),
    Status(TaskStatus),
    Assignee(String),
    Board(String),
}

impl TaskForm {
    pub fn apply(&mut self, field: FormField) {
        match field {
            FormField::Title(title) => self.title = title,
            FormField::Description(description) => self.description = description,
            FormField::Priority(priority) => self.priority = Some(priority),
            FormField::Status(status) => self.status = Some(status),
            FormField::Assignee(assignee_id) => self.assignee_id = assignee_id,
            FormField::Board(board_id) => self.board_id = board_id,
        }
    }

    /// Runs the submit-time checks, including that the assignee is a positive numeric ID
    /// belonging to one of [known_users]
    pub fn validate_for_submit(&self, known_users: &[User]) -> Result<TaskChanges, ValidationErrors> {
        let mut issues = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(issues) => issues,
        };

        if !self.assignee_id.is_empty() {
            if parse_positive_id(&self.assignee_id).is_none() {
                issues.add(
                    "assignee_id",
                    field_error("invalid_assignee", "Assignee must be a valid user"),
                );
            } else if !known_users.iter().any(|user| user.id == self.assignee_id) {
                issues.add(
                    "assignee_id",
                    field_error("unknown_assignee", "That assignee does not exist"),
                );
            }
        }

        if !issues.errors().is_empty() {
            return Err(issues);
        }

        Ok(TaskChanges {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            assignee_id: self.assignee_id.clone(),
            board_id: self.board_id.clone(),
        })
    }
}

impl From<&Task> for TaskForm {
    fn from(task: &Task) -> Self {
        TaskForm {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: Some(task.priority),
            status: Some(task.status),
            assignee_id: task.assignee_id.clone(),
            board_id: task.board_id.clone(),
        }
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Parses a client-side reference into the numeric ID the server uses, rejecting zero,
/// negatives and anything non-numeric
pub fn parse_positive_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|id| *id > 0)
}

/// Fully populated task content ready to be sent to the server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub assignee_id: String,
    pub board_id: String,
}

pub mod driven_ports {
    use super::*;
    use tokio_util::sync::CancellationToken;

    pub trait TaskReader {
        /// Fetches every task. Never fails: communication problems and cancellation both
        /// produce an empty list.
        async fn all_tasks(
            &self,
            ext_cxn: &impl ExternalConnectivity,
            cancel: &CancellationToken,
        ) -> Vec<Task>;

        /// Fetches the tasks on one board, each stamped with [board_id]. Never fails.
        async fn tasks_on_board(
            &self,
            board_id: &str,
            ext_cxn: &impl ExternalConnectivity,
            cancel: &CancellationToken,
        ) -> Vec<Task>;
    }

    pub trait TaskWriter {
        async fn create_task(
            &self,
            task: &TaskChanges,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;

        async fn update_task(
            &self,
            task_id: &str,
            task: &TaskChanges,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;

        async fn update_task_status(
            &self,
            task_id: &str,
            status: TaskStatus,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TaskError {
        #[error("the task form was invalid: {0}")]
        Invalid(ValidationErrors),
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }

    /// Whether a submitted form creates a new task or replaces an existing one
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum SubmitTarget<'id> {
        Create,
        Update { task_id: &'id str },
    }

    pub trait TaskPort {
        /// Validates [form] and, only if it is valid, sends it to the server
        async fn submit_task(
            &self,
            target: SubmitTarget<'_>,
            form: &TaskForm,
            known_users: &[User],
            ext_cxn: &impl ExternalConnectivity,
            task_write: &impl driven_ports::TaskWriter,
        ) -> Result<TaskChanges, TaskError>;

        async fn change_status(
            &self,
            task_id: &str,
            status: TaskStatus,
            ext_cxn: &impl ExternalConnectivity,
            task_write: &impl driven_ports::TaskWriter,
        ) -> Result<(), anyhow::Error>;
    }
}

pub struct TaskService {}

impl driving_ports::TaskPort for TaskService {
    async fn submit_task(
        &self,
        target: SubmitTarget<'_>,
        form: &TaskForm,
        known_users: &[User],
        ext_cxn: &impl ExternalConnectivity,
        task_write: &impl TaskWriter,
    ) -> Result<TaskChanges, TaskError> {
        let changes = form
            .validate_for_submit(known_users)
            .map_err(TaskError::Invalid)?;

        match target {
            SubmitTarget::Create => {
                info!(board_id = %changes.board_id, "creating task");
                task_write
                    .create_task(&changes, ext_cxn)
                    .await
                    .context("creating a task")?;
            }
            SubmitTarget::Update { task_id } => {
                info!(task_id, "updating task");
                task_write
                    .update_task(task_id, &changes, ext_cxn)
                    .await
                    .context("updating a task")?;
            }
        }

        Ok(changes)
    }

    async fn change_status(
        &self,
        task_id: &str,
        status: TaskStatus,
        ext_cxn: &impl ExternalConnectivity,
        task_write: &impl TaskWriter,
    ) -> Result<(), anyhow::Error> {
        info!(task_id, %status, "changing task status");
        task_write
            .update_task_status(task_id, status, ext_cxn)
            .await
            .context("changing a task's status")?;
        Ok(())
    }
}
