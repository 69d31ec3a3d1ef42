use crate::domain;
use crate::domain::board::Board;
use crate::domain::task::{Task, TaskChanges, TaskStatus};
use crate::domain::user::User;
use crate::external_connections::ExternalConnectivity;
use crate::gateway::dto::{ServerBoard, ServerTask, ServerUser, StatusPayload, TaskPayload};
use crate::gateway::{self, send_write};
use anyhow::Context;
use tokio_util::sync::CancellationToken;

pub struct HttpUserReader;

impl domain::user::driven_ports::UserReader for HttpUserReader {
    #[tracing::instrument(skip_all)]
    async fn all_users(
        &self,
        ext_cxn: &impl ExternalConnectivity,
        cancel: &CancellationToken,
    ) -> Vec<User> {
        let items =
            gateway::fetch_collection(ext_cxn, "/users", gateway::USERS_ENVELOPE, cancel).await;

        gateway::decode_items::<ServerUser>(items, "user")
            .into_iter()
            .map(User::from)
            .collect()
    }
}

pub struct HttpBoardReader;

impl domain::board::driven_ports::BoardReader for HttpBoardReader {
    #[tracing::instrument(skip_all)]
    async fn all_boards(
        &self,
        ext_cxn: &impl ExternalConnectivity,
        cancel: &CancellationToken,
    ) -> Vec<Board> {
        let items =
            gateway::fetch_collection(ext_cxn, "/boards", gateway::BOARDS_ENVELOPE, cancel).await;

        gateway::decode_items::<ServerBoard>(items, "board")
            .into_iter()
            .map(Board::from)
            .collect()
    }
}

pub struct HttpTaskReader;

impl domain::task::driven_ports::TaskReader for HttpTaskReader {
    #[tracing::instrument(skip_all)]
    async fn all_tasks(
        &self,
        ext_cxn: &impl ExternalConnectivity,
        cancel: &CancellationToken,
    ) -> Vec<Task> {
        let items =
            gateway::fetch_collection(ext_cxn, "/tasks", gateway::TASKS_ENVELOPE, cancel).await;

        gateway::decode_items::<ServerTask>(items, "task")
            .into_iter()
            .map(Task::from)
            .collect()
    }

    #[tracing::instrument(skip(self, ext_cxn, cancel))]
    async fn tasks_on_board(
        &self,
        board_id: &str,
        ext_cxn: &impl ExternalConnectivity,
        cancel: &CancellationToken,
    ) -> Vec<Task> {
        let items = gateway::fetch_collection(
            ext_cxn,
            &format!("/boards/{board_id}"),
            gateway::BOARD_TASKS_ENVELOPE,
            cancel,
        )
        .await;

        // The board endpoint omits the board reference on its tasks
        gateway::decode_items::<ServerTask>(items, "task")
            .into_iter()
            .map(|server_task| Task {
                board_id: board_id.to_owned(),
                ..Task::from(server_task)
            })
            .collect()
    }
}

pub struct HttpTaskWriter;

impl domain::task::driven_ports::TaskWriter for HttpTaskWriter {
    #[tracing::instrument(skip_all)]
    async fn create_task(
        &self,
        task: &TaskChanges,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<(), anyhow::Error> {
        let payload = TaskPayload::try_from(task).context("preparing a new task")?;
        let request = ext_cxn
            .http_client()
            .post(ext_cxn.api_url("/tasks/create"))
            .json(&payload);

        send_write(request, "create a task").await
    }

    #[tracing::instrument(skip(self, task, ext_cxn))]
    async fn update_task(
        &self,
        task_id: &str,
        task: &TaskChanges,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<(), anyhow::Error> {
        let payload = TaskPayload::try_from(task).context("preparing a task update")?;
        let request = ext_cxn
            .http_client()
            .put(ext_cxn.api_url(&format!("/tasks/update/{task_id}")))
            .json(&payload);

        send_write(request, "update a task").await
    }

    #[tracing::instrument(skip(self, ext_cxn))]
    async fn update_task_status(
        &self,
        task_id: &str,
        status: TaskStatus,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<(), anyhow::Error> {
        let request = ext_cxn
            .http_client()
            .put(ext_cxn.api_url(&format!("/tasks/updateStatus/{task_id}")))
            .json(&StatusPayload::from(status));

        send_write(request, "update a task's status").await
    }
}
