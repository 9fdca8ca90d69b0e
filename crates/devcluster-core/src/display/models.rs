//! Display implementations for domain models.
//!
//! Requests render as a markdown section with a metadata list; clusters,
//! zones and users render as list items so they nest under a request or a
//! collection heading.

use std::fmt;

use super::datetime::UnixTime;
use crate::models::{Cluster, ClusterRequest, User, Zone, ZoneSummary};

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.display_name.is_empty() || self.display_name == self.id {
            writeln!(f, "- **{}**", self.id)
        } else {
            writeln!(f, "- **{}**: {}", self.id, self.display_name)
        }
    }
}

impl fmt::Display for ZoneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- **{}**: {} active clusters",
            self.zone.id, self.active_clusters
        )
    }
}

impl fmt::Display for ClusterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Request {}", self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Status**: {}", self.status)?;
        writeln!(f, "- **Zone**: {}", self.zone)?;
        writeln!(f, "- **Clusters**: {}", self.requested)?;
        writeln!(f, "- **Requested by**: {}", self.requested_by)?;
        writeln!(f, "- **Created**: {}", UnixTime(self.created))?;
        writeln!(f, "- **Delete in**: {} hours", self.delete_in_hours)?;
        if self.no_subnet {
            writeln!(f, "- **No subnet**: yes")?;
        }
        if let Some(error) = self.error.as_deref().filter(|e| !e.is_empty()) {
            writeln!(f, "- **Error**: {error}")?;
        }
        writeln!(f)?;

        if !self.clusters.is_empty() {
            writeln!(f, "### Clusters")?;
            writeln!(f)?;
            for cluster in &self.clusters {
                write!(f, "{cluster}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- **{}** ({}): {}", self.name, self.id, self.status)?;
        if let Some(error) = self.error.as_deref().filter(|e| !e.is_empty()) {
            writeln!(f, "  - Error: {error}")?;
        }
        if !self.endpoint().is_empty() {
            writeln!(f, "  - Endpoint: {}", self.endpoint())?;
        }
        if !self.login_url.is_empty() {
            writeln!(f, "  - Login: {}", self.login_url)?;
        }
        if !self.workshop_url.is_empty() {
            writeln!(f, "  - Workshop: {}", self.workshop_url)?;
        }
        if let Some(user) = &self.user {
            writeln!(f, "  - User: {} / {}", user.id, user.password)?;
        }
        Ok(())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}**", self.id)?;
        if !self.email.is_empty() {
            write!(f, " <{}>", self.email)?;
        }
        if !self.cluster_id.is_empty() {
            write!(f, " on cluster {}", self.cluster_id)?;
        }
        writeln!(f)?;
        if self.recycled != 0 {
            writeln!(f, "  - Recycled: {}", UnixTime(self.recycled))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ClusterRequest {
        ClusterRequest {
            id: "r-1".to_string(),
            created: 1640995200,
            requested: 2,
            requested_by: "dev".to_string(),
            delete_in_hours: 24,
            status: "provisioning".to_string(),
            zone: "wdc04".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_request_display_without_clusters() {
        let output = request().to_string();
        assert!(output.starts_with("## Request r-1\n"));
        assert!(output.contains("- **Status**: provisioning"));
        assert!(output.contains("- **Delete in**: 24 hours"));
        assert!(!output.contains("### Clusters"));
        assert!(!output.contains("Error"));
    }

    #[test]
    fn test_request_display_with_clusters() {
        let mut request = request();
        request.clusters = vec![Cluster {
            id: "c-1".to_string(),
            name: "dev-one".to_string(),
            status: "running".to_string(),
            login_url: "https://login/c-1".to_string(),
            user: Some(User {
                id: "dev-1".to_string(),
                password: "secret".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }];
        let output = request.to_string();
        assert!(output.contains("### Clusters"));
        assert!(output.contains("- **dev-one** (c-1): running"));
        assert!(output.contains("  - Login: https://login/c-1"));
        assert!(output.contains("  - User: dev-1 / secret"));
    }

    #[test]
    fn test_zone_display() {
        let named = Zone {
            id: "wdc04".to_string(),
            display_name: "Washington".to_string(),
        };
        assert_eq!(named.to_string(), "- **wdc04**: Washington\n");

        let bare = Zone {
            id: "lon06".to_string(),
            display_name: String::new(),
        };
        assert_eq!(bare.to_string(), "- **lon06**\n");
    }
}
