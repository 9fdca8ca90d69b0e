//! Parameter structures for dashboard operations
//!
//! Interface-neutral request parameters. The CLI wraps these in clap argument
//! structs and converts with `From`, so the core never depends on clap.
//!
//! The mutating parameters serialize straight into the backend's form
//! encoding: field names on the wire are the dashboard form names
//! (`number-of-clusters`, `zone`, `delete-in-hours`, `no-subnet`,
//! `number-of-users`, `start-index`).
//!
//! ```rust
//! use devcluster_core::params::SubmitRequest;
//!
//! let params = SubmitRequest::new(10, "wdc04", 24);
//! params.validate()?;
//! # Result::<(), devcluster_core::DashboardError>::Ok(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Upper bound accepted for a single request, mirroring the dashboard form.
pub const MAX_CLUSTERS_PER_REQUEST: u32 = 500;

/// Parameters for submitting a new cluster request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Number of clusters to provision
    #[serde(rename = "number-of-clusters")]
    pub number_of_clusters: u32,
    /// Zone to provision into
    pub zone: String,
    /// Hours until the backend deletes the clusters
    #[serde(rename = "delete-in-hours")]
    pub delete_in_hours: u32,
    /// Skip creating a dedicated subnet; only sent when set
    #[serde(rename = "no-subnet", skip_serializing_if = "is_false", default)]
    pub no_subnet: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl SubmitRequest {
    pub fn new(number_of_clusters: u32, zone: impl Into<String>, delete_in_hours: u32) -> Self {
        Self {
            number_of_clusters,
            zone: zone.into(),
            delete_in_hours,
            no_subnet: false,
        }
    }

    /// Sets the no-subnet flag.
    pub fn with_no_subnet(mut self, no_subnet: bool) -> Self {
        self.no_subnet = no_subnet;
        self
    }

    /// Validate the request before it is sent.
    ///
    /// # Errors
    ///
    /// * `DashboardError::InvalidInput` - zero or too many clusters, an empty
    ///   zone, or a zero TTL
    pub fn validate(&self) -> Result<()> {
        if self.number_of_clusters == 0 {
            return Err(DashboardError::invalid_input("number-of-clusters")
                .with_reason("at least one cluster must be requested"));
        }
        if self.number_of_clusters > MAX_CLUSTERS_PER_REQUEST {
            return Err(DashboardError::invalid_input("number-of-clusters").with_reason(
                format!("at most {MAX_CLUSTERS_PER_REQUEST} clusters per request"),
            ));
        }
        if self.zone.trim().is_empty() {
            return Err(DashboardError::invalid_input("zone").with_reason("zone must not be empty"));
        }
        if self.delete_in_hours == 0 {
            return Err(DashboardError::invalid_input("delete-in-hours")
                .with_reason("time to live must be at least one hour"));
        }
        Ok(())
    }
}

/// Parameters for bulk-generating workshop users.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateUsers {
    #[serde(rename = "number-of-users")]
    pub number_of_users: u32,
    /// Index the generated user names start counting from
    #[serde(rename = "start-index")]
    pub start_index: u32,
}

impl GenerateUsers {
    /// # Errors
    ///
    /// * `DashboardError::InvalidInput` - when no users are requested
    pub fn validate(&self) -> Result<()> {
        if self.number_of_users == 0 {
            return Err(DashboardError::invalid_input("number-of-users")
                .with_reason("at least one user must be requested"));
        }
        Ok(())
    }
}

/// Query for listing the clusters placed in one zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZoneFilter {
    pub zone: String,
}
