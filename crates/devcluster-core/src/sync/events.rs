//! Change notifications emitted by the synchronizer.

use crate::{
    display::Notice,
    models::{ClusterRequest, User, Zone},
};

/// Something in the synchronizer state changed.
///
/// Events are only sent for changes that were actually applied; a stale
/// response discarded by sequencing produces no event.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    ZonesUpdated(Vec<Zone>),
    RequestsUpdated(Vec<ClusterRequest>),
    SelectionUpdated(ClusterRequest),
    UsersUpdated(Vec<User>),
    /// The backend rejected the bearer token; sent once per session
    SessionExpired,
    Notice(Notice),
}
