//! Collection wrapper types with consistent empty-list handling.

use std::fmt;

use crate::models::{Cluster, ClusterRequest, User, Zone, ZoneSummary};

macro_rules! collection {
    ($(#[$meta:meta])* $name:ident, $item:ty, $empty:literal) => {
        $(#[$meta])*
        pub struct $name(pub Vec<$item>);

        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    writeln!(f, $empty)
                } else {
                    for item in &self.0 {
                        write!(f, "{item}")?;
                    }
                    Ok(())
                }
            }
        }
    };
}

collection!(
    /// The request list, newest first as returned by the backend.
    ClusterRequests,
    ClusterRequest,
    "No cluster requests found."
);

collection!(
    /// Clusters of one request or one zone.
    Clusters,
    Cluster,
    "No clusters found."
);

collection!(Zones, Zone, "No zones found.");

collection!(ZoneSummaries, ZoneSummary, "No zones found.");

collection!(
    /// Generated users.
    Users,
    User,
    "No users found."
);
