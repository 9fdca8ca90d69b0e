//! Tests for the synchronizer internals: sequencing and session expiry.

use std::{
    collections::VecDeque,
    sync::atomic::{AtomicUsize, Ordering as AtomicOrdering},
};

use tokio::sync::oneshot;

use super::*;
use crate::{
    auth::{AuthProvider, TokenAuth},
    models::{AuthConfig, Cluster, UserInfo},
    params::{GenerateUsers, SubmitRequest},
};

type Reply<T> = oneshot::Receiver<Result<T>>;

/// Backend whose list and detail responses are released by the test.
#[derive(Default)]
struct GatedBackend {
    lists: Mutex<VecDeque<Reply<Vec<ClusterRequest>>>>,
    details: Mutex<VecDeque<Reply<ClusterRequest>>>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl GatedBackend {
    fn gate_list(&self) -> oneshot::Sender<Result<Vec<ClusterRequest>>> {
        let (tx, rx) = oneshot::channel();
        lock(&self.lists).push_back(rx);
        tx
    }

    fn gate_detail(&self) -> oneshot::Sender<Result<ClusterRequest>> {
        let (tx, rx) = oneshot::channel();
        lock(&self.details).push_back(rx);
        tx
    }
}

async fn released<T>(reply: Option<Reply<T>>) -> Result<T> {
    match reply {
        Some(rx) => rx.await.unwrap_or_else(|_| Err(DashboardError::from_status(500, String::new()))),
        None => Err(DashboardError::from_status(500, "no reply scripted".to_string())),
    }
}

impl Backend for GatedBackend {
    async fn auth_config(&self) -> Result<AuthConfig> {
        Ok(AuthConfig::default())
    }

    async fn zones(&self, _token: Option<&str>) -> Result<Vec<Zone>> {
        Ok(vec![])
    }

    async fn cluster_requests(&self, _token: Option<&str>) -> Result<Vec<ClusterRequest>> {
        self.list_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let reply = lock(&self.lists).pop_front();
        released(reply).await
    }

    async fn cluster_request(&self, _token: Option<&str>, _id: &str) -> Result<ClusterRequest> {
        self.detail_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let reply = lock(&self.details).pop_front();
        released(reply).await
    }

    async fn submit_request(
        &self,
        _token: Option<&str>,
        _params: &SubmitRequest,
    ) -> Result<ClusterRequest> {
        Ok(ClusterRequest::default())
    }

    async fn delete_cluster(&self, _token: Option<&str>, _id: &str) -> Result<()> {
        Ok(())
    }

    async fn generate_users(
        &self,
        _token: Option<&str>,
        _params: &GenerateUsers,
    ) -> Result<Vec<User>> {
        Ok(vec![])
    }

    async fn users(&self, _token: Option<&str>) -> Result<Vec<User>> {
        Ok(vec![])
    }

    async fn zone_clusters(&self, _token: Option<&str>, _zone: &str) -> Result<Vec<Cluster>> {
        Ok(vec![])
    }
}

fn request(id: &str, status: &str) -> ClusterRequest {
    ClusterRequest {
        id: id.to_string(),
        status: status.to_string(),
        ..Default::default()
    }
}

fn create_test_sync() -> Synchronizer<GatedBackend> {
    Synchronizer::new(
        GatedBackend::default(),
        Some("token".to_string()),
        Duration::from_millis(1000),
    )
}

/// Provider holding a token but unable to resolve the user.
struct BrokenUserAuth;

impl AuthProvider for BrokenUserAuth {
    fn login(&self, _token: &str) -> Result<()> {
        Ok(())
    }

    fn logout(&self) -> Result<()> {
        Ok(())
    }

    fn token(&self) -> Option<String> {
        Some("token".to_string())
    }

    fn user_info(&self) -> Result<UserInfo> {
        Err(DashboardError::Configuration {
            message: "identity unavailable".to_string(),
        })
    }
}

async fn wait_for(counter: &AtomicUsize, n: usize) {
    while counter.load(AtomicOrdering::SeqCst) < n {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_stale_list_response_is_discarded() {
    let sync = create_test_sync();
    let first = sync.backend().gate_list();
    let second = sync.backend().gate_list();

    let older = tokio::spawn({
        let sync = sync.clone();
        async move { sync.fetch_requests().await }
    });
    wait_for(&sync.backend().list_calls, 1).await;
    let newer = tokio::spawn({
        let sync = sync.clone();
        async move { sync.fetch_requests().await }
    });
    wait_for(&sync.backend().list_calls, 2).await;

    second.send(Ok(vec![request("r-1", "ready")])).unwrap();
    newer.await.unwrap().unwrap();
    first.send(Ok(vec![request("r-1", "provisioning")])).unwrap();
    older.await.unwrap().unwrap();

    assert_eq!(sync.requests(), vec![request("r-1", "ready")]);
}

#[tokio::test]
async fn test_stale_detail_response_is_discarded() {
    let sync = create_test_sync();
    let first = sync.backend().gate_detail();
    let second = sync.backend().gate_detail();

    let older = tokio::spawn({
        let sync = sync.clone();
        async move { sync.select_request("a").await }
    });
    wait_for(&sync.backend().detail_calls, 1).await;
    let newer = tokio::spawn({
        let sync = sync.clone();
        async move { sync.select_request("b").await }
    });
    wait_for(&sync.backend().detail_calls, 2).await;

    second.send(Ok(request("b", "ready"))).unwrap();
    newer.await.unwrap().unwrap();
    first.send(Ok(request("a", "ready"))).unwrap();
    older.await.unwrap().unwrap();

    assert_eq!(sync.selected().map(|r| r.id), Some("b".to_string()));
}

#[tokio::test]
async fn test_stale_response_emits_no_event() {
    let sync = create_test_sync();
    let mut events = sync.subscribe();
    let first = sync.backend().gate_list();
    let second = sync.backend().gate_list();

    let older = tokio::spawn({
        let sync = sync.clone();
        async move { sync.fetch_requests().await }
    });
    wait_for(&sync.backend().list_calls, 1).await;
    let newer = tokio::spawn({
        let sync = sync.clone();
        async move { sync.fetch_requests().await }
    });
    wait_for(&sync.backend().list_calls, 2).await;

    second.send(Ok(vec![])).unwrap();
    newer.await.unwrap().unwrap();
    first.send(Ok(vec![request("old", "x")])).unwrap();
    older.await.unwrap().unwrap();

    assert_eq!(events.try_recv().unwrap(), SyncEvent::RequestsUpdated(vec![]));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_expire_session_transitions_once() {
    let sync = create_test_sync();
    let mut events = sync.subscribe();
    let err = DashboardError::from_status(401, String::new());

    sync.expire_session(&err);
    sync.expire_session(&err);

    assert_eq!(sync.view(), View::NotLoggedIn);
    assert_eq!(sync.session().token(), None);
    assert_eq!(events.try_recv().unwrap(), SyncEvent::SessionExpired);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_surface_sets_failure_notice() {
    let sync = create_test_sync();
    let err = sync.surface("fetching zones", DashboardError::from_status(500, "boom".into()));

    assert_eq!(err.kind(), ErrorKind::Server);
    let notice = sync.notice().unwrap();
    assert_eq!(notice.message, "Error fetching zones: boom");
    assert!(notice.is_failure());
    assert_eq!(sync.view(), View::LoggedIn);
}

#[tokio::test]
async fn test_auth_failed_view_refuses_operations() {
    let sync = create_test_sync();
    sync.shared().state.view = View::AuthFailed;

    let err = sync.load_requests().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthInit);
    assert_eq!(sync.backend().list_calls.load(AtomicOrdering::SeqCst), 0);
}

#[test]
fn test_sequencer_is_monotonic() {
    let seq = Sequencer::default();
    let a = seq.issue();
    let b = seq.issue();
    assert!(b > a);
    assert_eq!(a, 1);
}

#[test]
fn test_new_without_token_starts_logged_out() {
    let sync = Synchronizer::new(GatedBackend::default(), None, Duration::from_secs(1));
    assert_eq!(sync.view(), View::NotLoggedIn);
    assert_eq!(sync.state(), SyncState::default());
}

#[tokio::test]
async fn test_logout_discards_in_flight_list() {
    let sync = create_test_sync();
    let gate = sync.backend().gate_list();

    let pending = tokio::spawn({
        let sync = sync.clone();
        async move { sync.load_requests().await }
    });
    wait_for(&sync.backend().list_calls, 1).await;

    sync.logout(&TokenAuth::with_token("token")).unwrap();
    gate.send(Ok(vec![request("secret", "ready")])).unwrap();
    pending.await.unwrap().unwrap();

    assert_eq!(sync.view(), View::NotLoggedIn);
    assert!(sync.requests().is_empty());
}

#[tokio::test]
async fn test_logout_discards_in_flight_detail() {
    let sync = create_test_sync();
    let gate = sync.backend().gate_detail();

    let pending = tokio::spawn({
        let sync = sync.clone();
        async move { sync.select_request("secret").await }
    });
    wait_for(&sync.backend().detail_calls, 1).await;

    sync.logout(&TokenAuth::with_token("token")).unwrap();
    gate.send(Ok(request("secret", "ready"))).unwrap();
    pending.await.unwrap().unwrap();

    assert_eq!(sync.selected(), None);
}

#[tokio::test]
async fn test_expired_session_discards_in_flight_list() {
    let sync = create_test_sync();
    let gate = sync.backend().gate_list();

    let pending = tokio::spawn({
        let sync = sync.clone();
        async move { sync.fetch_requests().await }
    });
    wait_for(&sync.backend().list_calls, 1).await;

    sync.expire_session(&DashboardError::from_status(401, String::new()));
    gate.send(Ok(vec![request("secret", "ready")])).unwrap();
    pending.await.unwrap().unwrap();

    assert!(sync.requests().is_empty());
}

#[tokio::test]
async fn test_fetch_after_logout_is_applied() {
    let sync = create_test_sync();
    sync.logout(&TokenAuth::with_token("token")).unwrap();

    let gate = sync.backend().gate_list();
    gate.send(Ok(vec![request("r-1", "ready")])).unwrap();
    sync.load_requests().await.unwrap();

    assert_eq!(sync.requests(), vec![request("r-1", "ready")]);
}

#[tokio::test]
async fn test_initialize_surfaces_user_info_failure() {
    let sync = create_test_sync();

    let err = sync.initialize(&BrokenUserAuth).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Local);
    let notice = sync.notice().unwrap();
    assert_eq!(
        notice.message,
        "Error loading user info: Configuration error: identity unavailable"
    );
    assert!(notice.is_failure());
    assert_eq!(sync.backend().list_calls.load(AtomicOrdering::SeqCst), 0);
}
