//! Cluster model definition.

use serde::{Deserialize, Serialize};

use super::User;

/// Statuses for which the backend no longer accepts a delete.
const TERMINAL_STATUSES: [&str; 2] = ["deleted", "deleting"];

/// A single provisioned cluster, owned by its parent request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Cluster {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "URL")]
    pub url: String,

    #[serde(rename = "MasterURL")]
    pub master_url: String,

    /// Backend-owned status, kept opaque
    #[serde(rename = "Status")]
    pub status: String,

    #[serde(rename = "Error")]
    pub error: Option<String>,

    #[serde(rename = "Hostname")]
    pub hostname: String,

    #[serde(rename = "ConsoleURL")]
    pub console_url: String,

    #[serde(rename = "LoginURL")]
    pub login_url: String,

    #[serde(rename = "WorkshopURL")]
    pub workshop_url: String,

    /// Generated user assigned to this cluster, if any
    #[serde(rename = "User")]
    pub user: Option<User>,
}

impl Cluster {
    /// Whether a delete action should be offered for this cluster.
    pub fn is_deletable(&self) -> bool {
        !TERMINAL_STATUSES.contains(&self.status.as_str())
    }

    /// The best URL to reach the cluster: `URL`, falling back to `MasterURL`.
    pub fn endpoint(&self) -> &str {
        if self.url.is_empty() {
            &self.master_url
        } else {
            &self.url
        }
    }
}
