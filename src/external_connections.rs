use reqwest_middleware::ClientWithMiddleware;

/// Provides the clients used to reach external systems, so driven adapters stay agnostic of
/// how those clients were configured
pub trait ExternalConnectivity {
    /// HTTP client to use for calls to the task tracker API
    fn http_client(&self) -> &ClientWithMiddleware;

    /// Base URL of the task tracker API, without a trailing slash
    fn api_base_url(&self) -> &str;

    /// Builds the absolute URL for an API path such as "/tasks"
    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url(), path)
    }
}
