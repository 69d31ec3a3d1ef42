#![allow(dead_code)]

use axum::Router;
use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use taskboard_client::gateway::ApiConnectivity;

const API_PREFIX: &str = "/api/v1";

/// A request the mock API received, with its JSON body (or null)
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Value,
}

#[derive(Clone)]
struct CannedResponse {
    status: StatusCode,
    body: String,
    delay: Duration,
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<Mutex<HashMap<(Method, String), CannedResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// In-process stand-in for the task tracker REST API, bound to an ephemeral local port. Every
/// request is recorded; unknown routes answer 404.
pub struct MockApi {
    base_url: String,
    state: MockState,
}

impl MockApi {
    pub async fn start() -> MockApi {
        let state = MockState::default();
        let app = Router::new()
            .fallback(respond)
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock API could not bind a port");
        let address = listener
            .local_addr()
            .expect("mock API listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock API server stopped unexpectedly");
        });

        MockApi {
            base_url: format!("http://{address}{API_PREFIX}"),
            state,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn connectivity(&self) -> ApiConnectivity {
        ApiConnectivity::with_base_url(&self.base_url, Duration::from_secs(5))
            .expect("HTTP client should build")
    }

    /// Answers [method] requests to [path] (relative to the API prefix) with [body]
    pub fn respond_json(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: StatusCode, body: &str) {
        self.add_route(method, path, CannedResponse {
            status,
            body: body.to_owned(),
            delay: Duration::ZERO,
        });
    }

    /// Like [Self::respond_json], but only answers after [delay]
    pub fn respond_slowly(&self, method: Method, path: &str, delay: Duration, body: Value) {
        self.add_route(method, path, CannedResponse {
            status: StatusCode::OK,
            body: body.to_string(),
            delay,
        });
    }

    fn add_route(&self, method: Method, path: &str, response: CannedResponse) {
        self.state
            .routes
            .lock()
            .expect("mock route table poisoned")
            .insert((method, format!("{API_PREFIX}{path}")), response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .expect("mock request log poisoned")
            .clone()
    }

    /// Requests that weren't plain reads
    pub fn writes(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method != Method::GET)
            .collect()
    }
}

async fn respond(State(state): State<MockState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let bytes = to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    state
        .requests
        .lock()
        .expect("mock request log poisoned")
        .push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            body,
        });

    let canned = state
        .routes
        .lock()
        .expect("mock route table poisoned")
        .get(&(method, path))
        .cloned();
    match canned {
        Some(canned) => {
            tokio::time::sleep(canned.delay).await;
            (
                canned.status,
                [(header::CONTENT_TYPE, "application/json")],
                canned.body,
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
