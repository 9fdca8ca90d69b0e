//! devcluster CLI
//!
//! Command-line client for the dev cluster provisioning dashboard.

mod args;
mod cli;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use devcluster_core::{AuthProvider, SynchronizerBuilder, TokenAuth};
use log::{info, warn};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        server_url,
        token,
        token_file,
        user,
        timeout_secs,
        no_color,
        command,
    } = Args::parse();

    let token_file = match token_file {
        Some(path) => Some(path),
        None => TokenAuth::default_token_file()
            .map_err(|e| warn!("no default token file: {e}"))
            .ok(),
    };
    let auth = TokenAuth::new(token, token_file).with_username(user);

    let sync = SynchronizerBuilder::new()
        .with_server_url(Some(server_url))
        .with_token(auth.token())
        .with_timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("Failed to initialize client")?;

    let cli = Cli::new(sync, auth, TerminalRenderer::new(!no_color));

    info!("devcluster started");

    match command {
        Some(AuthConfig) => cli.auth_config().await,
        Some(Login(args)) => cli.login(args).await,
        Some(Logout) => cli.logout(),
        Some(Zones(args)) => cli.zones(args).await,
        Some(Request { command }) => cli.handle_request_command(command).await,
        Some(Cluster { command }) => cli.handle_cluster_command(command).await,
        Some(User { command }) => cli.handle_user_command(command).await,
        Some(Watch(args)) => cli.watch(args).await,
        None => cli.list_requests().await,
    }
}
