//! CSV export of cluster credentials and generated users.
//!
//! The cluster export is what workshop organizers hand out: one row per
//! cluster with the assigned user's name and password. Files start with a
//! UTF-8 byte order mark by default so spreadsheet tools pick the right
//! encoding; [`read_cluster_rows`] accepts files with or without it.

use std::io::{Read, Write};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{Cluster, User},
};

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Header of the cluster export, in column order.
pub const CLUSTER_COLUMNS: [&str; 7] = [
    "Cluster ID",
    "Cluster Name",
    "Status",
    "Username",
    "User Password",
    "Login URL",
    "Workshop URL",
];

/// Header of the user export, in column order.
pub const USER_COLUMNS: [&str; 7] = [
    "User Id",
    "User E-Mail",
    "User Password",
    "User Policy Id",
    "User CloudDirect Id",
    "Cluster",
    "Recycled",
];

/// Output options.
#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    /// Prefix the file with a UTF-8 byte order mark
    pub bom: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { bom: true }
    }
}

/// One row of the cluster export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRow {
    #[serde(rename = "Cluster ID")]
    pub cluster_id: String,
    #[serde(rename = "Cluster Name")]
    pub cluster_name: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "User Password")]
    pub user_password: String,
    #[serde(rename = "Login URL")]
    pub login_url: String,
    #[serde(rename = "Workshop URL")]
    pub workshop_url: String,
}

impl From<&Cluster> for ClusterRow {
    fn from(cluster: &Cluster) -> Self {
        let (username, user_password) = cluster
            .user
            .as_ref()
            .map(|u| (u.id.clone(), u.password.clone()))
            .unwrap_or_default();
        Self {
            cluster_id: cluster.id.clone(),
            cluster_name: cluster.name.clone(),
            status: cluster.status.clone(),
            username,
            user_password,
            login_url: cluster.login_url.clone(),
            workshop_url: cluster.workshop_url.clone(),
        }
    }
}

/// One row of the user export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    #[serde(rename = "User Id")]
    pub id: String,
    #[serde(rename = "User E-Mail")]
    pub email: String,
    #[serde(rename = "User Password")]
    pub password: String,
    #[serde(rename = "User Policy Id")]
    pub policy_id: String,
    #[serde(rename = "User CloudDirect Id")]
    pub cloud_direct_id: String,
    #[serde(rename = "Cluster")]
    pub cluster_id: String,
    /// RFC 3339 time of the last recycle, or the raw value if out of range
    #[serde(rename = "Recycled")]
    pub recycled: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        let recycled = match user.recycled {
            0 => String::new(),
            secs => Timestamp::from_second(secs)
                .map(|t| t.to_string())
                .unwrap_or_else(|_| secs.to_string()),
        };
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            policy_id: user.policy_id.clone(),
            cloud_direct_id: user.cloud_direct_id.clone(),
            cluster_id: user.cluster_id.clone(),
            recycled,
        }
    }
}

fn write_rows<W, R>(mut writer: W, header: &[&str], rows: R, options: CsvOptions) -> Result<()>
where
    W: Write,
    R: IntoIterator,
    R::Item: Serialize,
{
    if options.bom {
        writer.write_all(BOM).map_err(csv::Error::from)?;
    }
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(header)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the clusters of a request as CSV.
pub fn write_clusters<W: Write>(writer: W, clusters: &[Cluster], options: CsvOptions) -> Result<()> {
    write_rows(
        writer,
        &CLUSTER_COLUMNS,
        clusters.iter().map(ClusterRow::from),
        options,
    )
}

/// Write generated users as CSV.
pub fn write_users<W: Write>(writer: W, users: &[User], options: CsvOptions) -> Result<()> {
    write_rows(writer, &USER_COLUMNS, users.iter().map(UserRow::from), options)
}

/// Parse a cluster export back into rows.
pub fn read_cluster_rows<R: Read>(mut reader: R) -> Result<Vec<ClusterRow>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(csv::Error::from)?;
    let body = bytes.strip_prefix(BOM).unwrap_or(&bytes);
    let mut csv = csv::Reader::from_reader(body);
    let rows = csv.deserialize().collect::<std::result::Result<Vec<ClusterRow>, _>>()?;
    Ok(rows)
}

/// Default file name for the export of request `id`.
pub fn request_file_name(id: &str) -> String {
    format!("request-{id}.csv")
}
