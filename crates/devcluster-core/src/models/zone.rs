//! Provisioning zones.

use serde::{Deserialize, Serialize};

/// An availability region offered by the backend for cluster placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Zone {
    /// Zone identifier used in requests (e.g. `wdc04`)
    pub id: String,

    /// Human readable name
    #[serde(default)]
    pub display_name: String,
}

/// A zone together with the number of clusters currently placed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSummary {
    pub zone: Zone,
    pub active_clusters: usize,
}
