use crate::app_env;
use anyhow::{Context, anyhow};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api/v1";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration for the client, sourced from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub draft_dir: PathBuf,
    pub request_timeout: Duration,
    pub otel: Option<OtelEndpoints>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtelEndpoints {
    pub spans: String,
    pub metrics: String,
}

impl ClientConfig {
    /// Reads configuration from the process environment. Variables that aren't set fall back to defaults,
    /// but variables that are set with unusable values produce an error.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup so it can be exercised without
    /// mutating the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let api_url = lookup(app_env::API_URL)
            .map(|url| url.trim_end_matches('/').to_owned())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(anyhow!(
                "{} must be an http(s) URL, got \"{api_url}\"",
                app_env::API_URL
            ));
        }

        let draft_dir = lookup(app_env::DRAFT_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let request_timeout = match lookup(app_env::REQUEST_TIMEOUT_SECS) {
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            Some(raw) => {
                let secs: u64 = raw.trim().parse().with_context(|| {
                    format!("{} must be a whole number of seconds", app_env::REQUEST_TIMEOUT_SECS)
                })?;
                if secs == 0 {
                    return Err(anyhow!(
                        "{} must be at least 1 second",
                        app_env::REQUEST_TIMEOUT_SECS
                    ));
                }
                Duration::from_secs(secs)
            }
        };

        let otel = match (
            lookup(app_env::OTEL_SPAN_EXPORT_URL),
            lookup(app_env::OTEL_METRIC_EXPORT_URL),
        ) {
            (Some(spans), Some(metrics)) => Some(OtelEndpoints { spans, metrics }),
            _ => None,
        };

        Ok(ClientConfig {
            api_url,
            draft_dir,
            request_timeout,
            otel,
        })
    }
}
