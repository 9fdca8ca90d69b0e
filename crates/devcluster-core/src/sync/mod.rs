//! Polling synchronizer between the client and the provisioning backend.
//!
//! [`Synchronizer`] keeps an in-memory snapshot ([`SyncState`]) of the
//! zones, the cluster-request list, the selected request with its clusters
//! and the generated users consistent with the backend. Three triggers
//! refresh it: the initial load, explicit user actions (submit, delete) and
//! an optional polling task.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  CLI / caller   │    │  Synchronizer   │    │     Backend     │
//! │ (actions, poll) │───▶│ (state, session │───▶│  (REST, bearer  │
//! │                 │◀───│  sequencing)    │◀───│   token)        │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!       SyncEvent             SyncState              JSON
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: configuration and construction
//! - [`requests`]: request list, detail, submit and delete operations
//! - [`directory`]: zones, users and CSV export
//! - [`lifecycle`]: auth bootstrap, login and logout
//! - [`polling`]: timer-driven refresh
//! - [`events`]: change notifications
//!
//! ## Error handling
//!
//! Every operation returns [`Result`]. Before an error is returned it has
//! already been surfaced: an HTTP 401 tears the session down (token, user
//! and polling task cleared together) and switches the view to
//! [`View::NotLoggedIn`] exactly once; any other failure becomes the current
//! [`Notice`] and leaves the rest of the state untouched. Nothing is retried.
//!
//! ## Ordering
//!
//! List refreshes are single-flight: explicit triggers wait for an in-flight
//! refresh, polling ticks skip while one is running. Each list and detail
//! fetch also takes a sequence number when issued, and a response is only
//! applied if it is newer than the last applied one. Stale responses are
//! dropped.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use devcluster_core::{params::SubmitRequest, SynchronizerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sync = SynchronizerBuilder::new()
//!     .with_server_url(Some("https://devcluster.example.com"))
//!     .with_token(Some("eyJ...".to_string()))
//!     .build()?;
//!
//! sync.load_zones().await?;
//! let created = sync.submit_request(&SubmitRequest::new(10, "wdc04", 24)).await?;
//! sync.select_request(&created.id).await?;
//! sync.start_polling(Duration::from_secs(1));
//! # Ok(())
//! # }
//! ```

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::Duration,
};

use log::{debug, error, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    backend::Backend,
    display::Notice,
    error::{DashboardError, ErrorKind, Result},
    models::{ClusterRequest, User, Zone},
    session::Session,
};

pub mod builder;
pub mod directory;
pub mod events;
pub mod lifecycle;
pub mod polling;
pub mod requests;

#[cfg(test)]
mod tests;

pub use builder::SynchronizerBuilder;
pub use events::SyncEvent;
pub use requests::BatchDelete;

/// Which top-level view the client is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// No valid session; only login is possible
    #[default]
    NotLoggedIn,
    /// Authenticated, data views available
    LoggedIn,
    /// Auth bootstrap failed; every operation is refused
    AuthFailed,
}

/// Snapshot of everything the client currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncState {
    pub view: View,
    pub zones: Vec<Zone>,
    pub requests: Vec<ClusterRequest>,
    /// Detail of the selected request, including its clusters
    pub selected: Option<ClusterRequest>,
    pub users: Vec<User>,
    /// Last transient message
    pub notice: Option<Notice>,
}

/// State plus the bookkeeping that must change under the same lock.
#[derive(Default)]
struct Shared {
    state: SyncState,
    list_applied: u64,
    detail_applied: u64,
}

/// Hands out increasing sequence numbers at request issue time.
#[derive(Default)]
struct Sequencer(AtomicU64);

impl Sequencer {
    fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Last number handed out.
    fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

struct Inner<B> {
    backend: B,
    session: Session,
    shared: Mutex<Shared>,
    refresh_lock: tokio::sync::Mutex<()>,
    list_seq: Sequencer,
    detail_seq: Sequencer,
    subscribers: Mutex<Vec<UnboundedSender<SyncEvent>>>,
    poll_interval: Duration,
}

/// Keeps a local view of cluster requests consistent with the backend.
///
/// Cloning is cheap and every clone shares the same state and session.
pub struct Synchronizer<B> {
    inner: Arc<Inner<B>>,
}

impl<B> Clone for Synchronizer<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: Backend> Synchronizer<B> {
    pub(crate) fn new(backend: B, token: Option<String>, poll_interval: Duration) -> Self {
        let view = if token.is_some() {
            View::LoggedIn
        } else {
            View::NotLoggedIn
        };
        let shared = Shared {
            state: SyncState {
                view,
                ..Default::default()
            },
            ..Default::default()
        };
        Self {
            inner: Arc::new(Inner {
                backend,
                session: Session::new(token),
                shared: Mutex::new(shared),
                refresh_lock: tokio::sync::Mutex::new(()),
                list_seq: Sequencer::default(),
                detail_seq: Sequencer::default(),
                subscribers: Mutex::new(Vec::new()),
                poll_interval,
            }),
        }
    }

    /// The backend this synchronizer talks to.
    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    /// The session holding token, user name and poll handle.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// A copy of the current state.
    pub fn state(&self) -> SyncState {
        self.shared().state.clone()
    }

    pub fn view(&self) -> View {
        self.shared().state.view
    }

    pub fn zones(&self) -> Vec<Zone> {
        self.shared().state.zones.clone()
    }

    pub fn requests(&self) -> Vec<ClusterRequest> {
        self.shared().state.requests.clone()
    }

    pub fn selected(&self) -> Option<ClusterRequest> {
        self.shared().state.selected.clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.shared().state.users.clone()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.shared().state.notice.clone()
    }

    /// Receive every applied change from now on.
    pub fn subscribe(&self) -> UnboundedReceiver<SyncEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.inner.subscribers).push(tx);
        rx
    }

    fn shared(&self) -> MutexGuard<'_, Shared> {
        lock(&self.inner.shared)
    }

    /// Mark every list and detail fetch issued so far as stale.
    ///
    /// Called with the shared lock held while tearing a session down, so a
    /// response from the old session cannot repopulate the cleared state.
    fn discard_in_flight(&self, shared: &mut Shared) {
        shared.list_applied = shared.list_applied.max(self.inner.list_seq.current());
        shared.detail_applied = shared.detail_applied.max(self.inner.detail_seq.current());
    }

    fn emit(&self, event: SyncEvent) {
        lock(&self.inner.subscribers).retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn token(&self) -> Option<String> {
        self.inner.session.token()
    }

    /// Refuse to talk to the backend after a failed auth bootstrap.
    fn ensure_usable(&self) -> Result<()> {
        if self.view() == View::AuthFailed {
            return Err(DashboardError::AuthInit {
                message: "authorization is not initialized".to_string(),
            });
        }
        Ok(())
    }

    /// Replace the notice and tell subscribers.
    fn set_notice(&self, notice: Notice) {
        self.shared().state.notice = Some(notice.clone());
        self.emit(SyncEvent::Notice(notice));
    }

    /// Report a failed operation and hand the error back to the caller.
    fn surface(&self, context: &str, err: DashboardError) -> DashboardError {
        if err.is_unauthorized() {
            self.expire_session(&err);
        } else {
            error!("error {context}: {err}");
            self.set_notice(Notice::failure(
                format!("Error {context}: {}", err.notice()),
                err.kind(),
            ));
        }
        err
    }

    /// Session-expired handling: cancel polling, clear the user and force
    /// the logged-out view. Only the first call per session has an effect.
    fn expire_session(&self, err: &DashboardError) {
        self.inner.session.teardown();
        let transitioned = {
            let mut shared = self.shared();
            self.discard_in_flight(&mut shared);
            let was_logged_in = shared.state.view == View::LoggedIn;
            if was_logged_in {
                shared.state.view = View::NotLoggedIn;
                shared.state.notice = Some(Notice::failure(err.notice(), ErrorKind::SessionExpired));
            }
            was_logged_in
        };
        if transitioned {
            warn!("session expired: {}", err.notice());
            self.emit(SyncEvent::SessionExpired);
        } else {
            debug!("ignoring repeated unauthorized response");
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
