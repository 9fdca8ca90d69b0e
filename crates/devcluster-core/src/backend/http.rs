//! reqwest implementation of [`Backend`].

use std::time::Duration;

use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use super::{Backend, API_PREFIX};
use crate::{
    error::{DashboardError, Result},
    models::{AuthConfig, Cluster, ClusterRequest, User, Zone},
    params::{GenerateUsers, SubmitRequest, ZoneFilter},
};

/// HTTP client for the provisioning backend.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    http: Client,
    server_base_url: String,
    api_base: Url,
}

impl HttpBackend {
    /// Create a client for `server_base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Configuration` if the URL is not an absolute
    /// http(s) base or the TLS backend cannot be initialized.
    pub fn new(server_base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let server_base_url = server_base_url.into().trim_end_matches('/').to_string();
        let api_base = Url::parse(&format!("{server_base_url}{API_PREFIX}"))
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| DashboardError::Configuration {
                message: format!("invalid server URL: {server_base_url}"),
            })?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            server_base_url,
            api_base,
        })
    }

    /// Base URL all endpoint paths are appended to.
    pub fn base_url(&self) -> &str {
        &self.server_base_url
    }

    /// Endpoint URL; each segment is percent-encoded on its own.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str], token: Option<&str>) -> RequestBuilder {
        let url = self.url(segments);
        debug!("{method} {url}");
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and turn any non-2xx status into a classified error.
    async fn send(builder: RequestBuilder, what: &str) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| DashboardError::transport(format!("failed to {what}"), e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("{what} failed with {status}: {body}");
        Err(DashboardError::from_status(status.as_u16(), body))
    }

    async fn json<T: DeserializeOwned>(builder: RequestBuilder, what: &str) -> Result<T> {
        let response = Self::send(builder, what).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| DashboardError::transport(format!("failed to read response to {what}"), e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Backend for HttpBackend {
    async fn auth_config(&self) -> Result<AuthConfig> {
        Self::json(
            self.request(Method::GET, &["authconfig"], None),
            "fetch auth config",
        )
        .await
    }

    async fn zones(&self, token: Option<&str>) -> Result<Vec<Zone>> {
        Self::json(self.request(Method::GET, &["zones"], token), "fetch zones").await
    }

    async fn cluster_requests(&self, token: Option<&str>) -> Result<Vec<ClusterRequest>> {
        let requests: Option<Vec<ClusterRequest>> = Self::json(
            self.request(Method::GET, &["cluster-reqs"], token),
            "fetch cluster requests",
        )
        .await?;
        Ok(requests.unwrap_or_default())
    }

    async fn cluster_request(&self, token: Option<&str>, id: &str) -> Result<ClusterRequest> {
        Self::json(
            self.request(Method::GET, &["cluster-req", id], token),
            "fetch cluster request",
        )
        .await
    }

    async fn submit_request(
        &self,
        token: Option<&str>,
        params: &SubmitRequest,
    ) -> Result<ClusterRequest> {
        Self::json(
            self.request(Method::POST, &["cluster-req"], token).form(params),
            "request clusters",
        )
        .await
    }

    async fn delete_cluster(&self, token: Option<&str>, id: &str) -> Result<()> {
        Self::send(
            self.request(Method::DELETE, &["cluster", id], token),
            "delete cluster",
        )
        .await?;
        Ok(())
    }

    async fn generate_users(
        &self,
        token: Option<&str>,
        params: &GenerateUsers,
    ) -> Result<Vec<User>> {
        let users: Option<Vec<User>> = Self::json(
            self.request(Method::POST, &["users"], token).form(params),
            "request users",
        )
        .await?;
        Ok(users.unwrap_or_default())
    }

    async fn users(&self, token: Option<&str>) -> Result<Vec<User>> {
        let users: Option<Vec<User>> =
            Self::json(self.request(Method::GET, &["users"], token), "fetch users").await?;
        Ok(users.unwrap_or_default())
    }

    async fn zone_clusters(&self, token: Option<&str>, zone: &str) -> Result<Vec<Cluster>> {
        let filter = ZoneFilter {
            zone: zone.to_string(),
        };
        let clusters: Option<Vec<Cluster>> = Self::json(
            self.request(Method::GET, &["clusters"], token).query(&filter),
            "fetch zone clusters",
        )
        .await?;
        Ok(clusters.unwrap_or_default())
    }
}
