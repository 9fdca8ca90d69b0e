//! Authentication provider seam.
//!
//! The dashboard delegates identity to an external auth widget. The client
//! only consumes four operations from it: `login`, `logout`, the current
//! bearer token and the user info. [`TokenAuth`] provides them from a token
//! supplied on the command line, from the environment, or from a token file
//! under the XDG config directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    error::{DashboardError, Result},
    models::UserInfo,
};

/// Operations consumed from the external auth widget.
pub trait AuthProvider: Send + Sync {
    /// Establish a session with the given credential.
    fn login(&self, token: &str) -> Result<()>;

    /// Drop any stored credential.
    fn logout(&self) -> Result<()>;

    /// Bearer token for authenticated calls; `None` means unauthenticated.
    fn token(&self) -> Option<String>;

    /// Identity of the authenticated user.
    fn user_info(&self) -> Result<UserInfo>;
}

/// Token-based provider backed by an explicit token and/or a token file.
#[derive(Debug, Clone)]
pub struct TokenAuth {
    token: Option<String>,
    token_file: Option<PathBuf>,
    username: Option<String>,
}

impl TokenAuth {
    /// Provider with a fixed token and no persistence.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            token_file: None,
            username: None,
        }
    }

    /// Provider reading and writing the given token file.
    ///
    /// An explicit token, when present, takes precedence over the file.
    pub fn new(token: Option<String>, token_file: Option<PathBuf>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            token_file,
            username: None,
        }
    }

    /// Sets the name reported by [`AuthProvider::user_info`].
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    /// Default token file: `$XDG_CONFIG_HOME/devcluster/token`.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::XdgDirectory` if the directory cannot be
    /// determined or created.
    pub fn default_token_file() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("devcluster")
            .place_config_file("token")
            .map_err(|e| DashboardError::XdgDirectory(e.to_string()))
    }

    /// Path of the token file, if one is configured.
    pub fn token_file(&self) -> Option<&Path> {
        self.token_file.as_deref()
    }

    fn read_token_file(path: &Path) -> Option<String> {
        let content = fs::read_to_string(path).ok()?;
        let token = content.trim();
        if token.is_empty() {
            None
        } else {
            debug!("using token from {}", path.display());
            Some(token.to_string())
        }
    }
}

impl AuthProvider for TokenAuth {
    fn login(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DashboardError::invalid_input("token").with_reason("token must not be empty"));
        }
        let path = self.token_file.as_ref().ok_or_else(|| DashboardError::Configuration {
            message: "no token file configured".to_string(),
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| DashboardError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(path, token).map_err(|e| DashboardError::FileSystem {
            path: path.clone(),
            source: e,
        })?;
        info!("stored token in {}", path.display());
        Ok(())
    }

    fn logout(&self) -> Result<()> {
        let Some(path) = self.token_file.as_ref() else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Ok(()) => {
                info!("removed token file {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DashboardError::FileSystem {
                path: path.clone(),
                source: e,
            }),
        }
    }

    fn token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| self.token_file.as_deref().and_then(Self::read_token_file))
    }

    fn user_info(&self) -> Result<UserInfo> {
        if self.token().is_none() {
            return Err(DashboardError::Unauthorized {
                message: "not logged in".to_string(),
            });
        }
        Ok(UserInfo {
            preferred_username: self.username.clone().unwrap_or_default(),
        })
    }
}
