/// Base URL of the task tracker REST API, including the version prefix (e.g. http://127.0.0.1:8080/api/v1)
pub const API_URL: &str = "TASKBOARD_API_URL";
/// Directory where the unsaved task draft is persisted between runs
pub const DRAFT_DIR: &str = "TASKBOARD_DRAFT_DIR";
/// Per-request timeout for calls to the REST API, in whole seconds
pub const REQUEST_TIMEOUT_SECS: &str = "TASKBOARD_REQUEST_TIMEOUT_SECS";
/// Log level configuration for the application. For formatting info, see [tracing_subscriber's EnvFilter documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL. Spans are only exported when this and [OTEL_METRIC_EXPORT_URL]
/// are both set, typically to a local collector at http://localhost:4317
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. See [OTEL_SPAN_EXPORT_URL]
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";
