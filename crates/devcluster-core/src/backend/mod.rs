//! The REST interface of the provisioning backend.
//!
//! [`Backend`] is the seam between the synchronizer and the network. The
//! production implementation is [`HttpBackend`]; tests substitute an
//! in-memory implementation.
//!
//! Every authenticated method takes the bearer token explicitly. `None`
//! sends the request without an `Authorization` header, which the backend
//! answers with 401.

use std::future::Future;

use crate::{
    error::Result,
    models::{AuthConfig, Cluster, ClusterRequest, User, Zone},
    params::{GenerateUsers, SubmitRequest},
};

pub mod http;

pub use http::HttpBackend;

/// Path prefix shared by all endpoints.
pub const API_PREFIX: &str = "/api/v1";

/// Operations exposed by the provisioning backend.
pub trait Backend: Send + Sync + 'static {
    /// `GET /api/v1/authconfig` (unauthenticated)
    fn auth_config(&self) -> impl Future<Output = Result<AuthConfig>> + Send;

    /// `GET /api/v1/zones`
    fn zones(&self, token: Option<&str>) -> impl Future<Output = Result<Vec<Zone>>> + Send;

    /// `GET /api/v1/cluster-reqs`
    fn cluster_requests(
        &self,
        token: Option<&str>,
    ) -> impl Future<Output = Result<Vec<ClusterRequest>>> + Send;

    /// `GET /api/v1/cluster-req/{id}`
    fn cluster_request(
        &self,
        token: Option<&str>,
        id: &str,
    ) -> impl Future<Output = Result<ClusterRequest>> + Send;

    /// `POST /api/v1/cluster-req`
    fn submit_request(
        &self,
        token: Option<&str>,
        params: &SubmitRequest,
    ) -> impl Future<Output = Result<ClusterRequest>> + Send;

    /// `DELETE /api/v1/cluster/{id}`
    fn delete_cluster(
        &self,
        token: Option<&str>,
        id: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// `POST /api/v1/users`
    fn generate_users(
        &self,
        token: Option<&str>,
        params: &GenerateUsers,
    ) -> impl Future<Output = Result<Vec<User>>> + Send;

    /// `GET /api/v1/users`
    fn users(&self, token: Option<&str>) -> impl Future<Output = Result<Vec<User>>> + Send;

    /// `GET /api/v1/clusters?zone={id}`
    fn zone_clusters(
        &self,
        token: Option<&str>,
        zone: &str,
    ) -> impl Future<Output = Result<Vec<Cluster>>> + Send;
}
