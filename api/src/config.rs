//! API client configuration.
//!
//! Configuration values should be provided by the application, not hardcoded.
//! The defaults match the conventional local development setup of the backend.

use std::time::Duration;

/// Environment variable that overrides the default API base URL.
pub const BASE_URL_ENV: &str = "DISPATCH_API_BASE_URL";

/// Configuration for the HTTP access layer.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL all request paths are resolved against
    /// (e.g., `http://localhost:8000/api`).
    pub base_url: String,

    /// Hard bound on how long an outbound request may wait for a response.
    ///
    /// Default: 10 seconds. A request that exceeds this fails with
    /// [`ApiError::Network`](crate::ApiError::Network) rather than hanging.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create a configuration pointing at the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Create a configuration from the environment.
    ///
    /// Reads [`BASE_URL_ENV`], falling back to the default base URL when
    /// the variable is not set.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(base_url) => Self::new(base_url),
            Err(_) => Self::default(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000/api")
    }
}
