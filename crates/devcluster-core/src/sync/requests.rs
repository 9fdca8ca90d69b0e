//! Cluster-request operations: list, detail, submit and delete.

use log::{debug, info};

use super::{SyncEvent, Synchronizer};
use crate::{
    backend::Backend,
    display::Notice,
    error::{DashboardError, Result},
    models::ClusterRequest,
    params::SubmitRequest,
};

/// Outcome of deleting several clusters in one go.
#[derive(Debug, Default)]
pub struct BatchDelete {
    /// IDs the backend accepted for deletion, in request order
    pub deleted: Vec<String>,
    /// IDs that failed, with the error for each
    pub failed: Vec<(String, DashboardError)>,
}

impl BatchDelete {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl<B: Backend> Synchronizer<B> {
    /// Fetch the full request list and replace the local one.
    ///
    /// Waits for an in-flight refresh to finish first, so at most one list
    /// fetch is outstanding. On success the local list equals the returned
    /// array exactly.
    ///
    /// # Errors
    ///
    /// Any backend error; it has already been surfaced (see module docs).
    pub async fn load_requests(&self) -> Result<Vec<ClusterRequest>> {
        self.ensure_usable()?;
        let _guard = self.inner.refresh_lock.lock().await;
        self.fetch_requests().await
    }

    /// The list fetch itself; callers hold the refresh lock.
    pub(crate) async fn fetch_requests(&self) -> Result<Vec<ClusterRequest>> {
        let seq = self.inner.list_seq.issue();
        let token = self.token();
        let requests = self
            .inner
            .backend
            .cluster_requests(token.as_deref())
            .await
            .map_err(|e| self.surface("fetching cluster requests", e))?;

        let applied = {
            let mut shared = self.shared();
            if seq > shared.list_applied {
                shared.list_applied = seq;
                shared.state.requests = requests.clone();
                true
            } else {
                false
            }
        };
        if applied {
            debug!("applied {} cluster requests (seq {seq})", requests.len());
            self.emit(SyncEvent::RequestsUpdated(requests.clone()));
        } else {
            debug!("discarding stale cluster request list (seq {seq})");
        }
        Ok(requests)
    }

    /// Fetch one request with its clusters and make it the selection.
    ///
    /// # Errors
    ///
    /// Any backend error; the previous selection is kept.
    pub async fn select_request(&self, id: &str) -> Result<ClusterRequest> {
        self.ensure_usable()?;
        let seq = self.inner.detail_seq.issue();
        let token = self.token();
        let request = self
            .inner
            .backend
            .cluster_request(token.as_deref(), id)
            .await
            .map_err(|e| self.surface("fetching clusters", e))?;

        let applied = {
            let mut shared = self.shared();
            if seq > shared.detail_applied {
                shared.detail_applied = seq;
                shared.state.selected = Some(request.clone());
                true
            } else {
                false
            }
        };
        if applied {
            self.emit(SyncEvent::SelectionUpdated(request.clone()));
        } else {
            debug!("discarding stale detail for request {id} (seq {seq})");
        }
        Ok(request)
    }

    /// Submit a new provisioning request, then refresh the list.
    ///
    /// Returns the request as echoed by the backend. A failed submit is
    /// surfaced with its raw payload and not retried; a failed refresh after
    /// a successful submit is surfaced on its own and does not turn the
    /// submit into an error.
    ///
    /// # Errors
    ///
    /// * `DashboardError::InvalidInput` - parameters rejected locally
    /// * any backend error from the POST
    pub async fn submit_request(&self, params: &SubmitRequest) -> Result<ClusterRequest> {
        self.ensure_usable()?;
        params
            .validate()
            .map_err(|e| self.surface("requesting clusters", e))?;

        info!(
            "requesting {} clusters in {} with ttl of {} hours",
            params.number_of_clusters, params.zone, params.delete_in_hours
        );
        let token = self.token();
        let created = self
            .inner
            .backend
            .submit_request(token.as_deref(), params)
            .await
            .map_err(|e| self.surface("requesting clusters", e))?;

        self.set_notice(Notice::success(format!(
            "Requested {} clusters (request {})",
            params.number_of_clusters, created.id
        )));
        if let Err(e) = self.load_requests().await {
            debug!("refresh after submit failed: {e}");
        }
        Ok(created)
    }

    /// Delete one cluster, then re-fetch the selected request.
    ///
    /// The refresh happens whether or not the delete succeeded.
    ///
    /// # Errors
    ///
    /// The delete's backend error, already surfaced.
    pub async fn delete_cluster(&self, id: &str) -> Result<()> {
        self.ensure_usable()?;
        let outcome = self.send_delete(id).await;
        if outcome.is_ok() {
            self.set_notice(Notice::success(format!("Cluster {id} is being deleted")));
        }
        self.refresh_selection().await;
        outcome
    }

    /// Delete several clusters in order, then refresh the selection once.
    ///
    /// # Errors
    ///
    /// Only the auth-bootstrap guard fails the whole batch; per-cluster
    /// failures are collected in the returned [`BatchDelete`].
    pub async fn delete_clusters(&self, ids: &[String]) -> Result<BatchDelete> {
        self.ensure_usable()?;
        let mut outcome = BatchDelete::default();
        for id in ids {
            match self.send_delete(id).await {
                Ok(()) => outcome.deleted.push(id.clone()),
                Err(e) => {
                    let expired = e.is_unauthorized();
                    outcome.failed.push((id.clone(), e));
                    if expired {
                        break;
                    }
                }
            }
        }
        if outcome.is_success() && !outcome.deleted.is_empty() {
            self.set_notice(Notice::success(format!(
                "{} clusters deleted",
                outcome.deleted.len()
            )));
        }
        self.refresh_selection().await;
        Ok(outcome)
    }

    async fn send_delete(&self, id: &str) -> Result<()> {
        info!("deleting cluster {id}");
        let token = self.token();
        self.inner
            .backend
            .delete_cluster(token.as_deref(), id)
            .await
            .map_err(|e| self.surface("deleting cluster", e))
    }

    /// Best-effort re-fetch of the selected request, if any.
    async fn refresh_selection(&self) {
        let Some(id) = self.selected().map(|r| r.id) else {
            return;
        };
        if let Err(e) = self.select_request(&id).await {
            debug!("refresh of request {id} failed: {e}");
        }
    }
}
