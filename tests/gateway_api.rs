mod test_util;

use axum::http::{Method, StatusCode};
use serde_json::json;
use speculoos::prelude::*;
use std::time::Duration;
use taskboard_client::domain::board::driven_ports::BoardReader;
use taskboard_client::domain::task::driven_ports::{TaskReader, TaskWriter};
use taskboard_client::domain::task::{TaskChanges, TaskPriority, TaskStatus};
use taskboard_client::domain::user::User;
use taskboard_client::domain::user::driven_ports::UserReader;
use taskboard_client::gateway::ApiConnectivity;
use taskboard_client::gateway::http_driven_ports::{
    HttpBoardReader, HttpTaskReader, HttpTaskWriter, HttpUserReader,
};
use test_util::MockApi;
use tokio_util::sync::CancellationToken;

fn changes(assignee_id: &str, board_id: &str) -> TaskChanges {
    TaskChanges {
        title: "Fix login".to_owned(),
        description: "The login button does nothing".to_owned(),
        priority: TaskPriority::High,
        status: TaskStatus::InProgress,
        assignee_id: assignee_id.to_owned(),
        board_id: board_id.to_owned(),
    }
}

mod reads {
    use super::*;

    #[tokio::test]
    async fn users_are_unwrapped_from_data_envelope() {
        let api = MockApi::start().await;
        api.respond_json(
            Method::GET,
            "/users",
            StatusCode::OK,
            json!({"data": [{"id": 1, "fullName": "User One", "email": "u1@x.com"}]}),
        );

        let users = HttpUserReader
            .all_users(&api.connectivity(), &CancellationToken::new())
            .await;
        assert_eq!(
            vec![User {
                id: "1".to_owned(),
                name: "User One".to_owned(),
                email: Some("u1@x.com".to_owned()),
                ..User::default()
            }],
            users
        );
    }

    #[tokio::test]
    async fn users_are_unwrapped_from_resource_envelope() {
        let api = MockApi::start().await;
        api.respond_json(
            Method::GET,
            "/users",
            StatusCode::OK,
            json!({"users": [{"id": 2, "name": "User Two"}]}),
        );

        let users = HttpUserReader
            .all_users(&api.connectivity(), &CancellationToken::new())
            .await;
        assert_that!(users).has_length(1);
        assert_eq!("2", users[0].id);
        assert_eq!("User Two", users[0].name);
    }

    #[tokio::test]
    async fn boards_accept_bare_arrays() {
        let api = MockApi::start().await;
        api.respond_json(
            Method::GET,
            "/boards",
            StatusCode::OK,
            json!([{"id": 2, "name": "Redesign", "taskCount": 4}, {"id": 3}]),
        );

        let boards = HttpBoardReader
            .all_boards(&api.connectivity(), &CancellationToken::new())
            .await;
        assert_eq!(2, boards.len());
        assert_eq!("Redesign", boards[0].title);
        assert_eq!(Some(4), boards[0].task_count);
        assert_eq!("Untitled", boards[1].title);
    }

    #[tokio::test]
    async fn tasks_are_normalized() {
        let api = MockApi::start().await;
        api.respond_json(
            Method::GET,
            "/tasks",
            StatusCode::OK,
            json!({"tasks": [{
                "id": 7,
                "title": "Ship it",
                "description": "",
                "priority": "High",
                "status": "InProgress",
                "assignee": {"id": 3, "fullName": "User Three"},
                "boardId": 2,
                "boardName": "Redesign"
            }]}),
        );

        let tasks = HttpTaskReader
            .all_tasks(&api.connectivity(), &CancellationToken::new())
            .await;
        assert_that!(tasks).has_length(1);
        let task = &tasks[0];
        assert_eq!("7", task.id);
        assert_eq!(TaskPriority::High, task.priority);
        assert_eq!(TaskStatus::InProgress, task.status);
        assert_eq!("3", task.assignee_id);
        assert_eq!("2", task.board_id);
        assert_eq!(Some("Redesign".to_owned()), task.board_name);
    }

    #[tokio::test]
    async fn board_tasks_carry_their_board() {
        let api = MockApi::start().await;
        api.respond_json(
            Method::GET,
            "/boards/5",
            StatusCode::OK,
            json!({"data": [{"id": 1, "title": "One", "status": "Done", "assigneeId": 2}]}),
        );

        let tasks = HttpTaskReader
            .tasks_on_board("5", &api.connectivity(), &CancellationToken::new())
            .await;
        assert_that!(tasks).has_length(1);
        assert_eq!("5", tasks[0].board_id);
        assert_eq!(TaskStatus::Done, tasks[0].status);
    }

    #[tokio::test]
    async fn server_error_yields_empty_list() {
        let api = MockApi::start().await;
        api.respond_json(
            Method::GET,
            "/tasks",
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"message": "boom"}),
        );

        let tasks = HttpTaskReader
            .all_tasks(&api.connectivity(), &CancellationToken::new())
            .await;
        assert_that!(tasks).is_empty();
    }

    #[tokio::test]
    async fn garbage_body_yields_empty_list() {
        let api = MockApi::start().await;
        api.respond_raw(Method::GET, "/users", StatusCode::OK, "<html>not json</html>");

        let users = HttpUserReader
            .all_users(&api.connectivity(), &CancellationToken::new())
            .await;
        assert_that!(users).is_empty();
    }

    #[tokio::test]
    async fn missing_route_yields_empty_list() {
        let api = MockApi::start().await;

        let boards = HttpBoardReader
            .all_boards(&api.connectivity(), &CancellationToken::new())
            .await;
        assert_that!(boards).is_empty();
    }

    #[tokio::test]
    async fn unreachable_server_yields_empty_list() {
        // Nothing listens on the discard port locally, so the connection is refused
        let connectivity =
            ApiConnectivity::with_base_url("http://127.0.0.1:9/api/v1", Duration::from_secs(5))
                .expect("HTTP client should build");

        let users = HttpUserReader
            .all_users(&connectivity, &CancellationToken::new())
            .await;
        assert_that!(users).is_empty();
    }

    #[tokio::test]
    async fn slow_server_times_out_to_empty_list() {
        let api = MockApi::start().await;
        api.respond_slowly(
            Method::GET,
            "/users",
            Duration::from_secs(3),
            json!([{"id": 1, "fullName": "User One"}]),
        );
        let impatient = ApiConnectivity::with_base_url(api.base_url(), Duration::from_secs(1))
            .expect("HTTP client should build");

        let users = HttpUserReader
            .all_users(&impatient, &CancellationToken::new())
            .await;
        assert_that!(users).is_empty();
        assert_that!(api.requests()).has_length(1);
    }
}

mod writes {
    use super::*;

    #[tokio::test]
    async fn create_sends_server_enum_spellings() {
        let api = MockApi::start().await;
        api.respond_json(Method::POST, "/tasks/create", StatusCode::OK, json!({"id": 9}));

        let result = HttpTaskWriter
            .create_task(&changes("3", "1"), &api.connectivity())
            .await;
        assert_that!(result).is_ok();

        let writes = api.writes();
        assert_that!(writes).has_length(1);
        assert_eq!("/api/v1/tasks/create", writes[0].path);
        assert_eq!(
            json!({
                "assigneeId": 3,
                "boardId": 1,
                "description": "The login button does nothing",
                "priority": "High",
                "status": "InProgress",
                "title": "Fix login"
            }),
            writes[0].body
        );
    }

    #[tokio::test]
    async fn update_targets_task_path() {
        let api = MockApi::start().await;
        api.respond_json(Method::PUT, "/tasks/update/12", StatusCode::OK, json!({}));

        let result = HttpTaskWriter
            .update_task("12", &changes("3", "1"), &api.connectivity())
            .await;
        assert_that!(result).is_ok();
        assert_eq!(Method::PUT, api.writes()[0].method);
    }

    #[tokio::test]
    async fn status_update_sends_only_status() {
        let api = MockApi::start().await;
        api.respond_json(Method::PUT, "/tasks/updateStatus/4", StatusCode::OK, json!({}));

        let result = HttpTaskWriter
            .update_task_status("4", TaskStatus::Done, &api.connectivity())
            .await;
        assert_that!(result).is_ok();
        assert_eq!(json!({"status": "Done"}), api.writes()[0].body);
    }

    #[tokio::test]
    async fn error_status_fails_the_write() {
        let api = MockApi::start().await;
        api.respond_json(
            Method::PUT,
            "/tasks/updateStatus/4",
            StatusCode::BAD_REQUEST,
            json!({"message": "unknown status"}),
        );

        let result = HttpTaskWriter
            .update_task_status("4", TaskStatus::Done, &api.connectivity())
            .await;
        assert_that!(result)
            .is_err()
            .matches(|err| err.to_string().contains("unknown status"));
    }

    #[tokio::test]
    async fn non_numeric_references_never_leave_the_client() {
        let api = MockApi::start().await;
        api.respond_json(Method::POST, "/tasks/create", StatusCode::OK, json!({}));

        let bad_assignee = HttpTaskWriter
            .create_task(&changes("abc", "1"), &api.connectivity())
            .await;
        let bad_board = HttpTaskWriter
            .create_task(&changes("3", "board-1"), &api.connectivity())
            .await;

        assert_that!(bad_assignee).is_err();
        assert_that!(bad_board).is_err();
        assert_that!(api.requests()).is_empty();
    }
}
