//! Generated user credentials.

use serde::{Deserialize, Serialize};

/// A generated workshop user. Produced by a bulk-generation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct User {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "CloudDirectID")]
    pub cloud_direct_id: String,

    #[serde(rename = "Email")]
    pub email: String,

    #[serde(rename = "Password")]
    pub password: String,

    /// Cluster the user is currently bound to, empty when unassigned
    #[serde(rename = "ClusterID")]
    pub cluster_id: String,

    #[serde(rename = "PolicyID")]
    pub policy_id: String,

    /// Unix seconds of the last recycle
    #[serde(rename = "Recycled")]
    pub recycled: i64,
}
