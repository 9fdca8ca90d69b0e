//! Explicit session context.
//!
//! A [`Session`] holds the current bearer token, the name of the logged in
//! user and the handle of the active polling task. Every backend call reads
//! the token from here, and teardown clears all three fields under a single
//! lock so no caller ever observes a half-cleared session.

use std::sync::{Mutex, MutexGuard};

use log::debug;
use tokio::task::JoinHandle;

#[derive(Default)]
struct SessionInner {
    token: Option<String>,
    username: Option<String>,
    poll: Option<JoinHandle<()>>,
}

/// Shared authentication and polling context.
#[derive(Default)]
pub struct Session {
    inner: Mutex<SessionInner>,
}

impl Session {
    /// Create a session, optionally already holding a token.
    pub fn new(token: Option<String>) -> Self {
        Self {
            inner: Mutex::new(SessionInner {
                token,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        self.lock().token = token;
    }

    /// Name of the authenticated user, if known.
    pub fn username(&self) -> Option<String> {
        self.lock().username.clone()
    }

    pub fn set_username(&self, username: Option<String>) {
        self.lock().username = username;
    }

    /// Install a polling task, aborting any previous one.
    pub fn replace_poll(&self, handle: JoinHandle<()>) {
        if let Some(previous) = self.lock().poll.replace(handle) {
            debug!("replacing active poll task");
            previous.abort();
        }
    }

    /// Abort the polling task. Returns whether one was running.
    pub fn cancel_poll(&self) -> bool {
        match self.lock().poll.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Whether a polling task is installed and still running.
    pub fn is_polling(&self) -> bool {
        self.lock()
            .poll
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Clear token, user and poll task atomically.
    ///
    /// Returns `true` if anything was cleared, so repeated teardowns can be
    /// told apart from the first one.
    pub fn teardown(&self) -> bool {
        let mut inner = self.lock();
        let had_state = inner.token.is_some() || inner.username.is_some() || inner.poll.is_some();
        inner.token = None;
        inner.username = None;
        if let Some(handle) = inner.poll.take() {
            handle.abort();
        }
        had_state
    }
}
