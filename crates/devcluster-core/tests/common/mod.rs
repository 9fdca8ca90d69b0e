//! Shared helpers for the synchronizer integration tests.

#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use devcluster_core::{
    models::{AuthConfig, UserInfo},
    AuthProvider, Backend, Cluster, ClusterRequest, DashboardError, GenerateUsers, Result,
    SubmitRequest, Synchronizer, SynchronizerBuilder, User, Zone,
};

pub const TEST_TOKEN: &str = "test-token";

/// In-memory provisioning backend.
///
/// Requests are kept newest first, the way the real list endpoint returns
/// them. Failures are scripted per call with [`StubBackend::fail_next`] or
/// for every authenticated call with [`StubBackend::expire_token`].
#[derive(Default)]
pub struct StubBackend {
    zones: Mutex<Vec<Zone>>,
    requests: Mutex<Vec<ClusterRequest>>,
    users: Mutex<Vec<User>>,
    failures: Mutex<VecDeque<(u16, String)>>,
    expired: AtomicBool,
    auth_config_broken: AtomicBool,
    next_id: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub submit_calls: AtomicUsize,
    pub tokens_seen: Mutex<Vec<Option<String>>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zones(self, ids: &[&str]) -> Self {
        *self.zones.lock().unwrap() = ids
            .iter()
            .map(|id| Zone {
                id: id.to_string(),
                display_name: id.to_uppercase(),
            })
            .collect();
        self
    }

    pub fn with_requests(self, requests: Vec<ClusterRequest>) -> Self {
        *self.requests.lock().unwrap() = requests;
        self
    }

    /// Insert a request as if another client had submitted it.
    pub fn push_request(&self, request: ClusterRequest) {
        self.requests.lock().unwrap().insert(0, request);
    }

    pub fn set_status(&self, request_id: &str, status: &str) {
        if let Some(r) = self
            .requests
            .lock()
            .unwrap()
            .iter_mut()
            .find(|r| r.id == request_id)
        {
            r.status = status.to_string();
        }
    }

    /// Fail the next authenticated call with `status` and `body`.
    pub fn fail_next(&self, status: u16, body: &str) {
        self.failures
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
    }

    /// Answer every authenticated call with 401 from now on.
    pub fn expire_token(&self) {
        self.expired.store(true, Ordering::SeqCst);
    }

    pub fn break_auth_config(&self) {
        self.auth_config_broken.store(true, Ordering::SeqCst);
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn check(&self, token: Option<&str>) -> Result<()> {
        self.tokens_seen
            .lock()
            .unwrap()
            .push(token.map(str::to_string));
        if self.expired.load(Ordering::SeqCst) || token.is_none() {
            return Err(DashboardError::from_status(
                401,
                r#"{"error":"token expired"}"#.to_string(),
            ));
        }
        if let Some((status, body)) = self.failures.lock().unwrap().pop_front() {
            return Err(DashboardError::from_status(status, body));
        }
        Ok(())
    }

    fn find_cluster_mut<'a>(
        requests: &'a mut [ClusterRequest],
        id: &str,
    ) -> Option<&'a mut Cluster> {
        requests
            .iter_mut()
            .flat_map(|r| r.clusters.iter_mut())
            .find(|c| c.id == id)
    }
}

impl Backend for StubBackend {
    async fn auth_config(&self) -> Result<AuthConfig> {
        if self.auth_config_broken.load(Ordering::SeqCst) {
            return Err(DashboardError::from_status(503, "unavailable".to_string()));
        }
        Ok(AuthConfig {
            client_library_url: "https://auth.example.com/auth.js".to_string(),
            client_config: r#"{"realm":"dev"}"#.to_string(),
        })
    }

    async fn zones(&self, token: Option<&str>) -> Result<Vec<Zone>> {
        self.check(token)?;
        Ok(self.zones.lock().unwrap().clone())
    }

    async fn cluster_requests(&self, token: Option<&str>) -> Result<Vec<ClusterRequest>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check(token)?;
        // The list endpoint omits clusters.
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| ClusterRequest {
                clusters: vec![],
                ..r.clone()
            })
            .collect())
    }

    async fn cluster_request(&self, token: Option<&str>, id: &str) -> Result<ClusterRequest> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.check(token)?;
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| DashboardError::from_status(404, format!("request {id} not found")))
    }

    async fn submit_request(
        &self,
        token: Option<&str>,
        params: &SubmitRequest,
    ) -> Result<ClusterRequest> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.check(token)?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("req-{n}");
        let clusters = (1..=params.number_of_clusters)
            .map(|i| Cluster {
                id: format!("{id}-c{i}"),
                name: format!("dev-{n}-{i}"),
                status: "provisioning".to_string(),
                ..Default::default()
            })
            .collect();
        let request = ClusterRequest {
            id,
            created: 1_700_000_000 + n as i64,
            requested: params.number_of_clusters,
            requested_by: "dev".to_string(),
            delete_in_hours: params.delete_in_hours,
            status: "provisioning".to_string(),
            zone: params.zone.clone(),
            no_subnet: params.no_subnet,
            clusters,
            ..Default::default()
        };
        self.push_request(request.clone());
        Ok(request)
    }

    async fn delete_cluster(&self, token: Option<&str>, id: &str) -> Result<()> {
        self.check(token)?;
        let mut requests = self.requests.lock().unwrap();
        match Self::find_cluster_mut(&mut requests, id) {
            Some(cluster) => {
                cluster.status = "deleting".to_string();
                Ok(())
            }
            None => Err(DashboardError::from_status(404, format!("cluster {id} not found"))),
        }
    }

    async fn generate_users(
        &self,
        token: Option<&str>,
        params: &GenerateUsers,
    ) -> Result<Vec<User>> {
        self.check(token)?;
        let created: Vec<User> = (0..params.number_of_users)
            .map(|i| {
                let index = params.start_index + i;
                User {
                    id: format!("dev-{index}"),
                    email: format!("dev-{index}@example.com"),
                    password: format!("pw-{index}"),
                    ..Default::default()
                }
            })
            .collect();
        self.users.lock().unwrap().extend(created.clone());
        Ok(created)
    }

    async fn users(&self, token: Option<&str>) -> Result<Vec<User>> {
        self.check(token)?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn zone_clusters(&self, token: Option<&str>, zone: &str) -> Result<Vec<Cluster>> {
        self.check(token)?;
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.zone == zone)
            .flat_map(|r| r.clusters.iter())
            .filter(|c| c.is_deletable())
            .cloned()
            .collect())
    }
}

/// Auth provider with a fixed identity and no persistence.
pub struct StaticAuth {
    pub token: Option<String>,
    pub logged_out: AtomicBool,
}

impl StaticAuth {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: token.map(str::to_string),
            logged_out: AtomicBool::new(false),
        }
    }
}

impl AuthProvider for StaticAuth {
    fn login(&self, _token: &str) -> Result<()> {
        Ok(())
    }

    fn logout(&self) -> Result<()> {
        self.logged_out.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn user_info(&self) -> Result<UserInfo> {
        Ok(UserInfo {
            preferred_username: "dev".to_string(),
        })
    }
}

pub fn request(id: &str, zone: &str, clusters: &[(&str, &str)]) -> ClusterRequest {
    ClusterRequest {
        id: id.to_string(),
        created: 1_600_000_000,
        requested: clusters.len() as u32,
        requested_by: "dev".to_string(),
        delete_in_hours: 24,
        status: "ready".to_string(),
        zone: zone.to_string(),
        clusters: clusters
            .iter()
            .map(|(id, user)| Cluster {
                id: id.to_string(),
                name: format!("name-{id}"),
                status: "running".to_string(),
                login_url: format!("https://login.example.com/{id}"),
                user: Some(User {
                    id: user.to_string(),
                    password: format!("{user}-pw"),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

/// Synchronizer over `backend`, logged in with [`TEST_TOKEN`].
pub fn create_test_sync(backend: StubBackend) -> Synchronizer<StubBackend> {
    SynchronizerBuilder::new()
        .with_token(Some(TEST_TOKEN.to_string()))
        .with_poll_interval(Duration::from_millis(1000))
        .build_with_backend(backend)
}
