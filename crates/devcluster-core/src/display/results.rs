//! Wrappers for the outcome of submit and delete operations.

use std::fmt;

use crate::{models::ClusterRequest, sync::BatchDelete};

/// Outcome of a successful submit.
///
/// ```rust
/// use devcluster_core::{display::SubmitResult, models::ClusterRequest};
///
/// let request = ClusterRequest {
///     id: "r-42".to_string(),
///     requested: 10,
///     zone: "wdc04".to_string(),
///     ..Default::default()
/// };
/// let output = SubmitResult(request).to_string();
/// assert!(output.starts_with("Requested 10 clusters in wdc04 (request r-42)"));
/// ```
pub struct SubmitResult(pub ClusterRequest);

impl fmt::Display for SubmitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Requested {} clusters in {} (request {})",
            self.0.requested, self.0.zone, self.0.id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.0)
    }
}

/// Outcome of deleting one or more clusters.
pub struct DeleteResult<'a>(pub &'a BatchDelete);

impl fmt::Display for DeleteResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in &self.0.deleted {
            writeln!(f, "Cluster {id} is being deleted")?;
        }
        for (id, err) in &self.0.failed {
            writeln!(f, "Failed to delete cluster {id}: {}", err.notice())?;
        }
        if self.0.deleted.is_empty() && self.0.failed.is_empty() {
            writeln!(f, "No clusters deleted.")?;
        }
        Ok(())
    }
}
