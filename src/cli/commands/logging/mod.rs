//! Handlers for `fastly logging <provider> *`.
//!
//! Providers differ only in their flags. The create/list/describe/update/
//! delete flow is shared and generic over [`LoggingSettings`].

pub mod gcs;
pub mod papertrail;
pub mod s3;
pub mod syslog;

use super::{require_non_empty, Context, VersionTarget};
use crate::api::logging::{Endpoint, LoggingSettings};
use crate::error::Error;
use clap::{Args, Subcommand};
use std::io::Write;
use tabled::Tabled;

/// Accepted `--message-type` values.
pub const MESSAGE_TYPES: [&str; 4] = ["classic", "loggly", "logplex", "blank"];
/// Accepted `--placement` values.
pub const PLACEMENTS: [&str; 2] = ["none", "waf_debug"];

#[derive(Subcommand, Debug)]
pub enum LoggingCommands {
    /// Manipulate Google Cloud Storage logging endpoints
    Gcs {
        #[command(subcommand)]
        command: gcs::GcsCommands,
    },
    /// Manipulate Amazon S3 logging endpoints
    S3 {
        #[command(subcommand)]
        command: s3::S3Commands,
    },
    /// Manipulate Syslog logging endpoints
    Syslog {
        #[command(subcommand)]
        command: syslog::SyslogCommands,
    },
    /// Manipulate Papertrail logging endpoints
    Papertrail {
        #[command(subcommand)]
        command: papertrail::PapertrailCommands,
    },
}

pub async fn execute(
    command: LoggingCommands,
    ctx: &Context,
    out: &mut dyn Write,
) -> Result<(), Error> {
    match command {
        LoggingCommands::Gcs { command } => gcs::execute(command, ctx, out).await,
        LoggingCommands::S3 { command } => s3::execute(command, ctx, out).await,
        LoggingCommands::Syslog { command } => syslog::execute(command, ctx, out).await,
        LoggingCommands::Papertrail { command } => papertrail::execute(command, ctx, out).await,
    }
}

/// Identifies a single endpoint on a service version.
#[derive(Args, Debug, Clone, Default)]
pub struct EndpointTarget {
    #[command(flatten)]
    pub version: VersionTarget,
    /// The name of the logging endpoint
    #[arg(long, short = 'n')]
    pub name: String,
}

impl EndpointTarget {
    /// Resolves service ID and version and checks the name is not blank.
    pub fn resolve(&self, ctx: &Context) -> Result<(String, u32), Error> {
        let resolved = self.version.resolve(ctx)?;
        require_non_empty("name", &self.name)?;
        Ok(resolved)
    }
}

/// Replaces `slot` when the user supplied a value; an absent flag keeps
/// whatever the endpoint currently has.
pub fn merge<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

#[derive(Tabled)]
struct EndpointRow {
    #[tabled(rename = "SERVICE")]
    service_id: String,
    #[tabled(rename = "VERSION")]
    version: u32,
    #[tabled(rename = "NAME")]
    name: String,
}

/// Service ID and version for a confirmation message, preferring the values
/// the API echoed back.
fn reported<S: LoggingSettings>(
    endpoint: &Endpoint<S>,
    service_id: &str,
    version: u32,
) -> (String, u32) {
    let sid = if endpoint.service_id.is_empty() {
        service_id.to_string()
    } else {
        endpoint.service_id.clone()
    };
    let ver = if endpoint.version == 0 {
        version
    } else {
        endpoint.version
    };
    (sid, ver)
}

pub async fn create<S: LoggingSettings>(
    ctx: &Context,
    target: &EndpointTarget,
    settings: S,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let (service_id, version) = target.resolve(ctx)?;
    let client = ctx.client()?;
    let endpoint = client
        .create_logging(&service_id, version, &settings)
        .await?;

    let (sid, ver) = reported(&endpoint, &service_id, version);
    ctx.output.success(
        out,
        format!(
            "Created {} logging endpoint {} (service {sid} version {ver})",
            S::DISPLAY_NAME,
            endpoint.name()
        ),
    )
}

pub async fn list<S: LoggingSettings>(
    ctx: &Context,
    target: &VersionTarget,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let (service_id, version) = target.resolve(ctx)?;
    let client = ctx.client()?;
    let endpoints = client.list_logging::<S>(&service_id, version).await?;

    let rows = endpoints
        .iter()
        .map(|e| EndpointRow {
            service_id: e.service_id.clone(),
            version: e.version,
            name: e.name().to_string(),
        })
        .collect();
    ctx.output.list(out, &endpoints, rows)
}

pub async fn describe<S: LoggingSettings>(
    ctx: &Context,
    target: &EndpointTarget,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let (service_id, version) = target.resolve(ctx)?;
    let client = ctx.client()?;
    let endpoint = client
        .get_logging::<S>(&service_id, version, &target.name)
        .await?;
    ctx.output.record(out, &endpoint, &endpoint.describe())
}

/// Read-modify-write: fetches the endpoint, lets `apply` overlay the
/// user-supplied flags (and validate the result), then sends the merged
/// settings back under the current name.
pub async fn update<S: LoggingSettings>(
    ctx: &Context,
    target: &EndpointTarget,
    apply: impl FnOnce(S) -> Result<S, Error> + Send,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let (service_id, version) = target.resolve(ctx)?;
    let client = ctx.client()?;
    let current = client
        .get_logging::<S>(&service_id, version, &target.name)
        .await?;

    let settings = apply(current.settings)?;
    require_non_empty("new-name", settings.name())?;
    tracing::debug!(
        kind = S::KIND,
        from = %target.name,
        to = %settings.name(),
        "updating logging endpoint"
    );

    let endpoint = client
        .update_logging(&service_id, version, &target.name, &settings)
        .await?;

    let (sid, ver) = reported(&endpoint, &service_id, version);
    ctx.output.success(
        out,
        format!(
            "Updated {} logging endpoint {} (service {sid} version {ver})",
            S::DISPLAY_NAME,
            endpoint.name()
        ),
    )
}

pub async fn delete<S: LoggingSettings>(
    ctx: &Context,
    target: &EndpointTarget,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let (service_id, version) = target.resolve(ctx)?;
    let client = ctx.client()?;
    client
        .delete_logging::<S>(&service_id, version, &target.name)
        .await?;

    ctx.output.success(
        out,
        format!(
            "Deleted {} logging endpoint {} (service {service_id} version {version})",
            S::DISPLAY_NAME,
            target.name
        ),
    )
}
