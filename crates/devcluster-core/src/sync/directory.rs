//! Zones, generated users and CSV export.

use std::io::Write;

use log::{debug, info};

use super::{SyncEvent, Synchronizer};
use crate::{
    backend::Backend,
    display::Notice,
    error::Result,
    export::{self, CsvOptions},
    models::{Cluster, ClusterRequest, User, Zone, ZoneSummary},
    params::GenerateUsers,
};

impl<B: Backend> Synchronizer<B> {
    /// Fetch the zone list and replace the local one.
    ///
    /// # Errors
    ///
    /// Any backend error, already surfaced; other state is untouched.
    pub async fn load_zones(&self) -> Result<Vec<Zone>> {
        self.ensure_usable()?;
        let token = self.token();
        let zones = self
            .inner
            .backend
            .zones(token.as_deref())
            .await
            .map_err(|e| self.surface("fetching zones", e))?;
        self.shared().state.zones = zones.clone();
        self.emit(SyncEvent::ZonesUpdated(zones.clone()));
        Ok(zones)
    }

    /// Clusters currently placed in `zone`.
    ///
    /// # Errors
    ///
    /// Any backend error, already surfaced.
    pub async fn zone_clusters(&self, zone: &str) -> Result<Vec<Cluster>> {
        self.ensure_usable()?;
        let token = self.token();
        self.inner
            .backend
            .zone_clusters(token.as_deref(), zone)
            .await
            .map_err(|e| self.surface("fetching zone clusters", e))
    }

    /// Every zone with its number of active clusters.
    ///
    /// Uses the loaded zones, loading them first if none are known yet.
    ///
    /// # Errors
    ///
    /// The first backend error, already surfaced.
    pub async fn zone_summaries(&self) -> Result<Vec<ZoneSummary>> {
        let mut zones = self.zones();
        if zones.is_empty() {
            zones = self.load_zones().await?;
        }
        let mut summaries = Vec::with_capacity(zones.len());
        for zone in zones {
            let active_clusters = self.zone_clusters(&zone.id).await?.len();
            summaries.push(ZoneSummary {
                zone,
                active_clusters,
            });
        }
        Ok(summaries)
    }

    /// Fetch the generated users and replace the local list.
    ///
    /// # Errors
    ///
    /// Any backend error, already surfaced.
    pub async fn load_users(&self) -> Result<Vec<User>> {
        self.ensure_usable()?;
        let token = self.token();
        let users = self
            .inner
            .backend
            .users(token.as_deref())
            .await
            .map_err(|e| self.surface("fetching users", e))?;
        self.shared().state.users = users.clone();
        self.emit(SyncEvent::UsersUpdated(users.clone()));
        Ok(users)
    }

    /// Ask the backend to generate users, then refresh the user list.
    ///
    /// Returns the users created by this call.
    ///
    /// # Errors
    ///
    /// * `DashboardError::InvalidInput` - no users requested
    /// * any backend error from the POST
    pub async fn generate_users(&self, params: &GenerateUsers) -> Result<Vec<User>> {
        self.ensure_usable()?;
        params
            .validate()
            .map_err(|e| self.surface("requesting users", e))?;

        info!(
            "requesting {} users starting at index {}",
            params.number_of_users, params.start_index
        );
        let token = self.token();
        let created = self
            .inner
            .backend
            .generate_users(token.as_deref(), params)
            .await
            .map_err(|e| self.surface("requesting users", e))?;

        self.set_notice(Notice::success(format!("{} users created", created.len())));
        if let Err(e) = self.load_users().await {
            debug!("refresh after user generation failed: {e}");
        }
        Ok(created)
    }

    /// Fetch request `id` and write its clusters as CSV.
    ///
    /// The selection is not changed. Returns the exported request.
    ///
    /// # Errors
    ///
    /// Backend errors (surfaced) or write failures.
    pub async fn export_request<W: Write>(
        &self,
        id: &str,
        writer: W,
        options: CsvOptions,
    ) -> Result<ClusterRequest> {
        self.ensure_usable()?;
        let token = self.token();
        let request = self
            .inner
            .backend
            .cluster_request(token.as_deref(), id)
            .await
            .map_err(|e| self.surface("exporting clusters", e))?;
        export::write_clusters(writer, &request.clusters, options)
            .map_err(|e| self.surface("exporting clusters", e))?;
        info!("exported {} clusters of request {id}", request.clusters.len());
        Ok(request)
    }

    /// Fetch the generated users and write them as CSV.
    ///
    /// # Errors
    ///
    /// Backend errors (surfaced) or write failures.
    pub async fn export_users<W: Write>(&self, writer: W, options: CsvOptions) -> Result<Vec<User>> {
        let users = self.load_users().await?;
        export::write_users(writer, &users, options)
            .map_err(|e| self.surface("exporting users", e))?;
        info!("exported {} users", users.len());
        Ok(users)
    }
}
