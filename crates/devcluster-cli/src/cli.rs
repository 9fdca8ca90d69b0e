//! Subcommand arguments and their handlers.
//!
//! Argument structs carry the clap attributes and convert into the core's
//! interface-neutral parameter types with `From`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Synchronizer
//! ```
//!
//! [`Cli`] runs one command against a [`Synchronizer`] and renders the
//! outcome as markdown.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use devcluster_core::{
    display::{SubmitResult, ZoneSummaries},
    export::{self, CsvOptions},
    params::{GenerateUsers, SubmitRequest},
    Backend, ClusterRequests, Clusters, DashboardError, DeleteResult, HttpBackend,
    SyncEvent, Synchronizer, TokenAuth, Users, View, Zones,
};
use log::{debug, info};

use crate::renderer::TerminalRenderer;

/// Store a bearer token
#[derive(Args)]
pub struct LoginArgs {
    /// Token issued by the identity provider
    pub token: String,
}

/// List provisioning zones
#[derive(Args)]
pub struct ZonesArgs {
    /// Include the number of active clusters per zone
    #[arg(short, long)]
    pub summary: bool,
}

/// Request a batch of clusters
#[derive(Args)]
pub struct SubmitArgs {
    /// Number of clusters to provision
    #[arg(short = 'n', long = "number-of-clusters")]
    pub number_of_clusters: u32,
    /// Zone to provision into
    #[arg(short, long)]
    pub zone: String,
    /// Hours until the clusters are deleted automatically
    #[arg(short, long)]
    pub delete_in_hours: u32,
    /// Do not create a dedicated subnet
    #[arg(long)]
    pub no_subnet: bool,
}

impl From<SubmitArgs> for SubmitRequest {
    fn from(val: SubmitArgs) -> Self {
        SubmitRequest::new(val.number_of_clusters, val.zone, val.delete_in_hours)
            .with_no_subnet(val.no_subnet)
    }
}

/// Show one request with its clusters
#[derive(Args)]
pub struct ShowRequestArgs {
    /// ID of the cluster request
    pub id: String,
}

/// Options shared by the CSV exports.
#[derive(Args)]
pub struct CsvArgs {
    /// Output file, `-` for stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Omit the UTF-8 byte order mark
    #[arg(long)]
    pub no_bom: bool,
}

impl From<&CsvArgs> for CsvOptions {
    fn from(val: &CsvArgs) -> Self {
        CsvOptions { bom: !val.no_bom }
    }
}

/// Export a request's cluster credentials as CSV
#[derive(Args)]
pub struct ExportRequestArgs {
    /// ID of the cluster request
    pub id: String,
    #[command(flatten)]
    pub csv: CsvArgs,
}

#[derive(Subcommand)]
pub enum RequestCommands {
    /// List cluster requests
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a request and its clusters
    #[command(alias = "s")]
    Show(ShowRequestArgs),
    /// Request new clusters
    #[command(alias = "new")]
    Submit(SubmitArgs),
    /// Export a request's clusters as CSV
    #[command(alias = "e")]
    Export(ExportRequestArgs),
}

/// Delete clusters
#[derive(Args)]
pub struct DeleteClustersArgs {
    /// IDs of the clusters to delete
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// List the clusters of a zone
#[derive(Args)]
pub struct ZoneClustersArgs {
    /// Zone ID
    pub zone: String,
}

#[derive(Subcommand)]
pub enum ClusterCommands {
    /// Delete one or more clusters
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteClustersArgs),
    /// List active clusters in a zone
    ByZone(ZoneClustersArgs),
}

/// Generate workshop users
#[derive(Args)]
pub struct GenerateUsersArgs {
    /// Number of users to create
    #[arg(short = 'n', long = "number-of-users")]
    pub number_of_users: u32,
    /// Index the user names start counting from
    #[arg(short, long, default_value_t = 0)]
    pub start_index: u32,
}

impl From<GenerateUsersArgs> for GenerateUsers {
    fn from(val: GenerateUsersArgs) -> Self {
        GenerateUsers {
            number_of_users: val.number_of_users,
            start_index: val.start_index,
        }
    }
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List generated users
    #[command(aliases = ["l", "ls"])]
    List,
    /// Generate users
    #[command(alias = "g")]
    Generate(GenerateUsersArgs),
    /// Export users as CSV
    #[command(alias = "e")]
    Export(CsvArgs),
}

/// Follow the request list
#[derive(Args)]
pub struct WatchArgs {
    /// Refresh period in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub interval_ms: u64,
    /// Stop after this many list updates
    #[arg(long)]
    pub iterations: Option<usize>,
}

const USERS_FILE_NAME: &str = "users.csv";

/// Runs commands against the backend and renders the results.
pub struct Cli<B = HttpBackend> {
    sync: Synchronizer<B>,
    auth: TokenAuth,
    renderer: TerminalRenderer,
}

impl<B: Backend> Cli<B> {
    pub fn new(sync: Synchronizer<B>, auth: TokenAuth, renderer: TerminalRenderer) -> Self {
        Self {
            sync,
            auth,
            renderer,
        }
    }

    pub async fn auth_config(&self) -> Result<()> {
        let config = self
            .sync
            .backend()
            .auth_config()
            .await
            .map_err(session_error)?;
        self.renderer.render(&format!(
            "# Auth configuration\n\n- **Client library**: {}\n- **Client config**: {}\n",
            config.client_library_url, config.client_config
        ))
    }

    pub async fn login(&self, args: LoginArgs) -> Result<()> {
        self.sync
            .login(&self.auth, &args.token)
            .await
            .context("Failed to store token")?;
        let path = self
            .auth
            .token_file()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.renderer
            .render(&format!("Success: Token stored in {path}\n"))
    }

    pub fn logout(&self) -> Result<()> {
        self.sync
            .logout(&self.auth)
            .context("Failed to remove token")?;
        self.renderer.render("Success: Logged out\n")
    }

    pub async fn zones(&self, args: ZonesArgs) -> Result<()> {
        self.require_login()?;
        if args.summary {
            let summaries = self.sync.zone_summaries().await.map_err(session_error)?;
            self.renderer
                .render(&format!("# Zones\n\n{}", ZoneSummaries(summaries)))
        } else {
            let zones = self.sync.load_zones().await.map_err(session_error)?;
            self.renderer.render(&format!("# Zones\n\n{}", Zones(zones)))
        }
    }

    pub async fn handle_request_command(&self, command: RequestCommands) -> Result<()> {
        self.require_login()?;
        match command {
            RequestCommands::List => self.list_requests().await,
            RequestCommands::Show(args) => {
                let request = self
                    .sync
                    .select_request(&args.id)
                    .await
                    .map_err(session_error)?;
                self.renderer.render(&request.to_string())
            }
            RequestCommands::Submit(args) => {
                let created = self
                    .sync
                    .submit_request(&args.into())
                    .await
                    .map_err(session_error)?;
                self.renderer.render(&SubmitResult(created).to_string())
            }
            RequestCommands::Export(args) => {
                let path = args
                    .csv
                    .output
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(export::request_file_name(&args.id)));
                let options = CsvOptions::from(&args.csv);
                let mut buffer = Vec::new();
                let request = self
                    .sync
                    .export_request(&args.id, &mut buffer, options)
                    .await
                    .map_err(session_error)?;
                write_output(&path, &buffer)?;
                self.report_export(request.clusters.len(), "clusters", &path)
            }
        }
    }

    pub async fn list_requests(&self) -> Result<()> {
        self.require_login()?;
        let requests = self.sync.load_requests().await.map_err(session_error)?;
        self.renderer.render(&format!(
            "# Cluster requests\n\n{}",
            ClusterRequests(requests)
        ))
    }

    pub async fn handle_cluster_command(&self, command: ClusterCommands) -> Result<()> {
        self.require_login()?;
        match command {
            ClusterCommands::Delete(args) => {
                let outcome = self
                    .sync
                    .delete_clusters(&args.ids)
                    .await
                    .map_err(session_error)?;
                self.renderer.render(&DeleteResult(&outcome).to_string())?;
                if let Some((_, err)) = outcome.failed.into_iter().next() {
                    return Err(session_error(err));
                }
                Ok(())
            }
            ClusterCommands::ByZone(args) => {
                let clusters = self
                    .sync
                    .zone_clusters(&args.zone)
                    .await
                    .map_err(session_error)?;
                self.renderer.render(&format!(
                    "# Clusters in {}\n\n{}",
                    args.zone,
                    Clusters(clusters)
                ))
            }
        }
    }

    pub async fn handle_user_command(&self, command: UserCommands) -> Result<()> {
        self.require_login()?;
        match command {
            UserCommands::List => {
                let users = self.sync.load_users().await.map_err(session_error)?;
                self.renderer.render(&format!("# Users\n\n{}", Users(users)))
            }
            UserCommands::Generate(args) => {
                let created = self
                    .sync
                    .generate_users(&args.into())
                    .await
                    .map_err(session_error)?;
                self.renderer.render(&format!(
                    "Created {} users\n\n{}",
                    created.len(),
                    Users(created)
                ))
            }
            UserCommands::Export(args) => {
                let path = args
                    .output
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(USERS_FILE_NAME));
                let mut buffer = Vec::new();
                let users = self
                    .sync
                    .export_users(&mut buffer, CsvOptions::from(&args))
                    .await
                    .map_err(session_error)?;
                write_output(&path, &buffer)?;
                self.report_export(users.len(), "users", &path)
            }
        }
    }

    /// Poll the request list and render each applied update until
    /// interrupted, the session expires or `iterations` updates were shown.
    pub async fn watch(&self, args: WatchArgs) -> Result<()> {
        let mut events = self.sync.subscribe();
        let view = self
            .sync
            .initialize(&self.auth)
            .await
            .map_err(session_error)?;
        if view != View::LoggedIn {
            bail!("Not logged in");
        }
        self.sync
            .start_polling(Duration::from_millis(args.interval_ms));

        let mut shown = 0;
        let outcome = loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(SyncEvent::RequestsUpdated(requests)) => {
                        self.renderer.render(&format!(
                            "# Cluster requests\n\n{}",
                            ClusterRequests(requests)
                        ))?;
                        shown += 1;
                        if args.iterations.is_some_and(|n| shown >= n) {
                            break Ok(());
                        }
                    }
                    Some(SyncEvent::Notice(notice)) => self.renderer.render(&notice.to_string())?,
                    Some(SyncEvent::SessionExpired) => break Err(anyhow!("Not logged in")),
                    Some(other) => debug!("ignoring {other:?}"),
                    None => break Ok(()),
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted");
                    break Ok(());
                }
            }
        };
        self.sync.stop_polling();
        outcome
    }

    fn require_login(&self) -> Result<()> {
        if self.sync.session().token().is_none() {
            bail!("Not logged in. Run `devcluster login <token>` or pass --token");
        }
        Ok(())
    }

    fn report_export(&self, count: usize, what: &str, path: &Path) -> Result<()> {
        if is_stdout(path) {
            return Ok(());
        }
        self.renderer.render(&format!(
            "Success: Exported {count} {what} to {}\n",
            path.display()
        ))
    }
}

/// Map a core error to the CLI's message; an expired session reads
/// "Not logged in".
fn session_error(err: DashboardError) -> anyhow::Error {
    if err.is_unauthorized() {
        anyhow!("Not logged in: {}", err.notice())
    } else {
        anyhow::Error::new(err)
    }
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Write a finished export. Nothing is created until the export succeeded.
fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    if is_stdout(path) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(contents)?;
        stdout.flush()?;
        return Ok(());
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
