//! Timer-driven refresh of the request list.
//!
//! At most one polling task exists per session. Starting a new one aborts
//! the previous task, and session teardown aborts it as well, so no tick
//! fires after a 401 or a logout. The task only holds a weak reference to
//! the synchronizer and ends on its own once every handle is dropped.

use std::{sync::Arc, time::Duration};

use log::{debug, info, trace};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::Synchronizer;
use crate::backend::Backend;

impl<B: Backend> Synchronizer<B> {
    /// Refresh the request list every `interval`, replacing any running
    /// polling task.
    ///
    /// The first tick fires one `interval` from now. Ticks that find a
    /// refresh already in flight are skipped. Must be called from within a
    /// tokio runtime.
    pub fn start_polling(&self, interval: Duration) {
        let weak = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    debug!("synchronizer dropped, polling ends");
                    break;
                };
                Synchronizer { inner }.poll_tick().await;
            }
        });
        info!("polling cluster requests every {interval:?}");
        self.inner.session.replace_poll(handle);
    }

    /// [`start_polling`](Self::start_polling) with the configured interval.
    pub fn start_default_polling(&self) {
        self.start_polling(self.inner.poll_interval);
    }

    /// Stop polling. Returns whether a task was running.
    pub fn stop_polling(&self) -> bool {
        let stopped = self.inner.session.cancel_poll();
        if stopped {
            info!("polling stopped");
        }
        stopped
    }

    pub fn is_polling(&self) -> bool {
        self.inner.session.is_polling()
    }

    /// One polling step. Errors are surfaced by the fetch itself.
    async fn poll_tick(&self) {
        let Ok(_guard) = self.inner.refresh_lock.try_lock() else {
            trace!("refresh in flight, skipping tick");
            return;
        };
        if let Err(e) = self.fetch_requests().await {
            debug!("poll refresh failed: {e}");
        }
    }
}
