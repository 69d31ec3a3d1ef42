pub mod dto;
pub mod http_driven_ports;

use crate::config::ClientConfig;
use crate::external_connections;
use anyhow::{Context, anyhow};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Owns the HTTP client for the task tracker API. Adapters only see it through
/// [external_connections::ExternalConnectivity], so tests can point them anywhere.
#[derive(Clone)]
pub struct ApiConnectivity {
    base_url: String,
    http_client: ClientWithMiddleware,
}

impl ApiConnectivity {
    pub fn new(config: &ClientConfig) -> Result<Self, anyhow::Error> {
        Self::with_base_url(&config.api_url, config.request_timeout)
    }

    /// Builds a traced HTTP client whose requests all time out after [timeout]
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let base_client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .context("building the HTTP client")?;
        let http_client = ClientBuilder::new(base_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(ApiConnectivity {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client,
        })
    }
}

impl external_connections::ExternalConnectivity for ApiConnectivity {
    fn http_client(&self) -> &ClientWithMiddleware {
        &self.http_client
    }

    fn api_base_url(&self) -> &str {
        &self.base_url
    }
}

/// JSON pointers tried in order when looking for the list inside a response body. The empty
/// pointer is the body itself, for servers that return a bare array.
pub const USERS_ENVELOPE: &[&str] = &["/data", "/users", ""];
pub const BOARDS_ENVELOPE: &[&str] = &["/data", "/boards", ""];
pub const TASKS_ENVELOPE: &[&str] = &["/data", "/tasks", ""];
pub const BOARD_TASKS_ENVELOPE: &[&str] = &["/data/tasks", "/data", "/tasks", ""];

/// Pulls the first array found at one of [envelope]'s pointers out of [body]. Anything else
/// yields an empty list.
pub fn extract_collection(mut body: Value, envelope: &[&str]) -> Vec<Value> {
    for pointer in envelope {
        if let Some(Value::Array(items)) = body.pointer_mut(pointer) {
            return std::mem::take(items);
        }
    }

    Vec::new()
}

/// Decodes each element on its own, dropping (and logging) the ones that don't fit [T]
pub fn decode_items<T: DeserializeOwned>(items: Vec<Value>, resource: &str) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!(resource, error = %err, "skipping malformed item");
                None
            }
        })
        .collect()
}

/// Issues a GET for a collection. Never fails: a cancelled request, a transport failure, an error
/// status or an unreadable body all produce an empty list.
pub async fn fetch_collection(
    ext_cxn: &impl external_connections::ExternalConnectivity,
    path: &str,
    envelope: &[&str],
    cancel: &CancellationToken,
) -> Vec<Value> {
    let request = async {
        let body: Value = ext_cxn
            .http_client()
            .get(ext_cxn.api_url(path))
            .send()
            .await
            .context("sending request")?
            .error_for_status()
            .context("server returned an error status")?
            .json()
            .await
            .context("decoding response body")?;

        Ok::<_, anyhow::Error>(extract_collection(body, envelope))
    };

    tokio::select! {
        biased;

        _ = cancel.cancelled() => {
            debug!(path, "fetch cancelled");
            Vec::new()
        }
        result = request => match result {
            Ok(items) => items,
            Err(err) => {
                warn!(path, error = %format!("{err:#}"), "read failed, falling back to an empty list");
                Vec::new()
            }
        },
    }
}

/// Sends a mutation and turns anything but a 2xx status into an error carrying the response body
pub async fn send_write(request: RequestBuilder, action: &str) -> Result<(), anyhow::Error> {
    let response = request
        .send()
        .await
        .with_context(|| format!("sending request to {action}"))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow!(
            "server responded {status} when trying to {action}: {body}"
        ));
    }

    Ok(())
}
