//! Auth bootstrap, login and logout.

use log::{debug, error, info};

use super::{SyncEvent, Synchronizer, View};
use crate::{
    auth::AuthProvider,
    backend::Backend,
    display::Notice,
    error::{DashboardError, ErrorKind, Result, AUTH_INIT_FAILED},
};

impl<B: Backend> Synchronizer<B> {
    /// Bootstrap authentication and load the initial data.
    ///
    /// Fetches the auth configuration first. If that fails the view becomes
    /// [`View::AuthFailed`] and every later operation is refused. Otherwise
    /// the session takes the provider's token and user name and, when a
    /// token is present, zones and requests are loaded.
    ///
    /// # Errors
    ///
    /// * `DashboardError::AuthInit` - the auth configuration is unavailable
    ///   or malformed
    /// * `DashboardError::Unauthorized` - the provider has no user (the
    ///   session is expired like any other 401)
    pub async fn initialize<A: AuthProvider + ?Sized>(&self, auth: &A) -> Result<View> {
        let config = match self.inner.backend.auth_config().await {
            Ok(config) => config,
            Err(e) => return Err(self.fail_auth_init(e.to_string())),
        };
        if !config.client_config.trim().is_empty() {
            if let Err(e) = config.client_config_json() {
                return Err(self.fail_auth_init(e.to_string()));
            }
        }
        debug!("auth client library at {}", config.client_library_url);

        let Some(token) = auth.token() else {
            self.set_view(View::NotLoggedIn);
            return Ok(View::NotLoggedIn);
        };
        let user = auth
            .user_info()
            .map_err(|e| self.surface("loading user info", e))?;
        info!("logged in as {}", user.preferred_username);

        self.inner.session.set_token(Some(token));
        self.inner.session.set_username(Some(user.preferred_username));
        self.set_view(View::LoggedIn);

        if let Err(e) = self.load_zones().await {
            debug!("initial zone load failed: {e}");
        }
        if let Err(e) = self.load_requests().await {
            debug!("initial request load failed: {e}");
        }
        Ok(self.view())
    }

    /// Store `token` with the provider and start a fresh session with it.
    ///
    /// # Errors
    ///
    /// Provider failures, or `DashboardError::AuthInit` after a failed
    /// bootstrap.
    pub async fn login<A: AuthProvider + ?Sized>(&self, auth: &A, token: &str) -> Result<View> {
        self.ensure_usable()?;
        auth.login(token)?;
        self.inner.session.set_token(Some(token.to_string()));
        if let Ok(user) = auth.user_info() {
            self.inner.session.set_username(Some(user.preferred_username));
        }
        self.set_view(View::LoggedIn);
        Ok(View::LoggedIn)
    }

    /// Log out with the provider and tear the local session down.
    ///
    /// # Errors
    ///
    /// Provider failures; the local session is cleared regardless.
    pub fn logout<A: AuthProvider + ?Sized>(&self, auth: &A) -> Result<()> {
        let outcome = auth.logout();
        self.inner.session.teardown();
        {
            let mut shared = self.shared();
            self.discard_in_flight(&mut shared);
            shared.state.selected = None;
            shared.state.requests.clear();
            shared.state.users.clear();
        }
        self.set_view(View::NotLoggedIn);
        outcome
    }

    fn set_view(&self, view: View) {
        if self.view() == View::AuthFailed {
            return;
        }
        self.shared().state.view = view;
    }

    fn fail_auth_init(&self, message: String) -> DashboardError {
        error!("{AUTH_INIT_FAILED}: {message}");
        let notice = Notice::failure(format!("{AUTH_INIT_FAILED}."), ErrorKind::AuthInit);
        {
            let mut shared = self.shared();
            shared.state.view = View::AuthFailed;
            shared.state.notice = Some(notice.clone());
        }
        self.emit(SyncEvent::Notice(notice));
        DashboardError::AuthInit { message }
    }
}
