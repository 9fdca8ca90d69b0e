//! Core library for the devcluster provisioning client.
//!
//! The provisioning backend hands out short-lived development clusters in
//! batches called cluster requests. This crate holds everything a client
//! needs to drive it: the REST [`backend`], the [`auth`] seam and
//! [`session`], the polling [`sync::Synchronizer`] that keeps a local view
//! consistent with the backend, CSV [`export`] and markdown [`display`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use devcluster_core::{params::SubmitRequest, SynchronizerBuilder, TokenAuth};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sync = SynchronizerBuilder::new()
//!     .with_server_url(Some("https://devcluster.example.com"))
//!     .build()?;
//!
//! let auth = TokenAuth::with_token("eyJ...").with_username(Some("dev".into()));
//! sync.initialize(&auth).await?;
//!
//! let request = sync
//!     .submit_request(&SubmitRequest::new(10, "wdc04", 24))
//!     .await?;
//! println!("{}", sync.select_request(&request.id).await?);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod backend;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod params;
pub mod session;
pub mod sync;

// Re-export commonly used types
pub use auth::{AuthProvider, TokenAuth};
pub use backend::{Backend, HttpBackend};
pub use display::{ClusterRequests, Clusters, DeleteResult, Notice, SubmitResult, Users, Zones};
pub use error::{DashboardError, ErrorKind, Result};
pub use export::CsvOptions;
pub use models::{Cluster, ClusterRequest, User, Zone, ZoneSummary};
pub use params::{GenerateUsers, SubmitRequest};
pub use session::Session;
pub use sync::{BatchDelete, SyncEvent, SyncState, Synchronizer, SynchronizerBuilder, View};
