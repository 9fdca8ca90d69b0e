//! Data models mirrored from the provisioning backend.
//!
//! Every type here is read-only from the client's point of view: values are
//! produced by the backend, deserialized, held in the synchronizer state and
//! rendered. Field names on the wire follow the backend (`ID`, `Created`,
//! `DeleteInHours`, ...), so each model carries explicit serde renames.
//!
//! Display implementations live in [`crate::display::models`].
//!
//! # Status values
//!
//! Request and cluster statuses are kept as plain strings. The backend owns
//! every transition and may introduce new values at any time; the client only
//! learns about progress by fetching again.
//!
//! ```rust
//! use devcluster_core::models::ClusterRequest;
//!
//! let json = r#"{"ID":"r1","Created":1600000000,"Requested":2,
//!     "RequestedBy":"dev","DeleteInHours":24,"Status":"provisioning"}"#;
//! let request: ClusterRequest = serde_json::from_str(json).unwrap();
//! assert_eq!(request.status, "provisioning");
//! assert!(request.clusters.is_empty());
//! ```

pub mod auth;
pub mod cluster;
pub mod request;
pub mod user;
pub mod zone;


pub use auth::{AuthConfig, UserInfo};
pub use cluster::Cluster;
pub use request::ClusterRequest;
pub use user::User;
pub use zone::{Zone, ZoneSummary};
