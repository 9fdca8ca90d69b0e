//! Display formatting for the dashboard's data.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes go through newtype wrappers so that empty lists
//! and results read the same everywhere. All output is markdown, rendered by
//! the CLI through termimad.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (Request, User) │───▶│ (Zones, Result) │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: wrappers for lists (ClusterRequests, Clusters, ...)
//! - [`results`]: outcomes of submit and delete
//! - [`status`]: the transient [`Notice`]
//! - [`datetime`]: timestamp formatting
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use devcluster_core::{display::Zones, models::Zone};
//!
//! let zones = Zones(vec![Zone {
//!     id: "wdc04".to_string(),
//!     display_name: "Washington 04".to_string(),
//! }]);
//! assert!(zones.to_string().contains("wdc04"));
//! assert_eq!(Zones(vec![]).to_string(), "No zones found.\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{ClusterRequests, Clusters, Users, ZoneSummaries, Zones};
pub use datetime::LocalDateTime;
pub use results::{DeleteResult, SubmitResult};
pub use status::Notice;
