//! Cluster request model definition.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

use super::Cluster;

/// A user's ask for N ephemeral clusters in a zone with a time-to-live.
///
/// The list endpoint returns requests without their clusters; `clusters` is
/// only populated by a detail fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ClusterRequest {
    #[serde(rename = "ID")]
    pub id: String,

    /// Unix seconds
    #[serde(rename = "Created")]
    pub created: i64,

    /// Number of clusters requested
    #[serde(rename = "Requested")]
    pub requested: u32,

    #[serde(rename = "RequestedBy")]
    pub requested_by: String,

    #[serde(rename = "DeleteInHours")]
    pub delete_in_hours: u32,

    /// Backend-owned status, kept opaque
    #[serde(rename = "Status")]
    pub status: String,

    #[serde(rename = "Error")]
    pub error: Option<String>,

    #[serde(rename = "Zone")]
    pub zone: String,

    #[serde(rename = "NoSubnet")]
    pub no_subnet: bool,

    #[serde(rename = "Clusters", deserialize_with = "clusters_seq_or_map")]
    pub clusters: Vec<Cluster>,
}

impl ClusterRequest {
    /// Creation time, if `Created` is a representable timestamp.
    pub fn created_at(&self) -> Option<Timestamp> {
        Timestamp::from_second(self.created).ok()
    }

    /// Look up one of this request's clusters by ID.
    pub fn cluster(&self, id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.id == id)
    }
}

/// Accepts `Clusters` as an array, as an object keyed by cluster ID
/// (ordered by key), or as `null`.
fn clusters_seq_or_map<'de, D>(deserializer: D) -> Result<Vec<Cluster>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Clusters {
        Seq(Vec<Cluster>),
        Map(BTreeMap<String, Cluster>),
    }

    Ok(match Option::<Clusters>::deserialize(deserializer)? {
        Some(Clusters::Seq(clusters)) => clusters,
        Some(Clusters::Map(clusters)) => clusters.into_values().collect(),
        None => Vec::new(),
    })
}
