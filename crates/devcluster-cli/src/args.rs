use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    ClusterCommands, LoginArgs, RequestCommands, UserCommands, WatchArgs, ZonesArgs,
};

/// Command-line client for the dev cluster provisioning dashboard
///
/// Request batches of short-lived development clusters, follow their
/// provisioning, hand out credentials as CSV and delete clusters again. With
/// no subcommand the current cluster requests are listed.
#[derive(Parser)]
#[command(version, about, name = "devcluster")]
pub struct Args {
    /// Base URL of the provisioning backend
    #[arg(
        long,
        global = true,
        env = "DEVCLUSTER_SERVER_URL",
        default_value = "http://localhost:8080"
    )]
    pub server_url: String,

    /// Bearer token. Overrides the stored token file
    #[arg(long, global = true, env = "DEVCLUSTER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Token file. Defaults to $XDG_CONFIG_HOME/devcluster/token
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,

    /// Name to report as the logged in user
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the backend's auth configuration
    AuthConfig,
    /// Store a bearer token for later commands
    Login(LoginArgs),
    /// Remove the stored token
    Logout,
    /// List provisioning zones
    #[command(alias = "z")]
    Zones(ZonesArgs),
    /// Manage cluster requests
    #[command(aliases = ["r", "req"])]
    Request {
        #[command(subcommand)]
        command: RequestCommands,
    },
    /// Manage individual clusters
    #[command(alias = "c")]
    Cluster {
        #[command(subcommand)]
        command: ClusterCommands,
    },
    /// Manage generated users
    #[command(alias = "u")]
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Follow the request list, refreshing periodically
    #[command(alias = "w")]
    Watch(WatchArgs),
}
