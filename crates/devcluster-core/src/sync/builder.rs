//! Builder for creating and configuring Synchronizer instances.

use std::time::Duration;

use super::Synchronizer;
use crate::{
    backend::{Backend, HttpBackend},
    error::Result,
};

/// Backend used when no server URL is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Refresh period of the legacy dashboard.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for creating and configuring Synchronizer instances.
#[derive(Debug, Clone)]
pub struct SynchronizerBuilder {
    server_url: Option<String>,
    token: Option<String>,
    timeout: Duration,
    poll_interval: Duration,
}

impl SynchronizerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            server_url: None,
            token: None,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the backend base URL. Defaults to [`DEFAULT_SERVER_URL`].
    pub fn with_server_url(mut self, url: Option<impl Into<String>>) -> Self {
        if let Some(url) = url {
            self.server_url = Some(url.into());
        }
        self
    }

    /// Sets the bearer token. A builder with a token starts logged in.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Per-request timeout of the HTTP client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Default period used by [`Synchronizer::start_default_polling`].
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Builds a synchronizer talking HTTP to the configured server.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Configuration` if the HTTP client cannot be
    /// created.
    pub fn build(self) -> Result<Synchronizer<HttpBackend>> {
        let url = self
            .server_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let backend = HttpBackend::new(url, self.timeout)?;
        Ok(self.build_with_backend(backend))
    }

    /// Builds a synchronizer over any [`Backend`] implementation.
    pub fn build_with_backend<B: Backend>(self, backend: B) -> Synchronizer<B> {
        Synchronizer::new(backend, self.token, self.poll_interval)
    }
}

impl Default for SynchronizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
