//! Handlers for `fastly service-version *`.

use super::{require_non_empty, Context, VersionTarget};
use crate::api::models::{UpdateVersionInput, Version};
use crate::error::Error;
use crate::output::display_opt;
use clap::Subcommand;
use std::io::Write;
use tabled::Tabled;

#[derive(Subcommand, Debug)]
pub enum ServiceVersionCommands {
    /// List Fastly service versions
    List {
        /// Service ID (defaults to FASTLY_SERVICE_ID or fastly.toml)
        #[arg(long, short = 's', value_name = "ID")]
        service_id: Option<String>,
    },
    /// Update a Fastly service version
    Update {
        #[command(flatten)]
        target: VersionTarget,
        /// Human-readable comment
        #[arg(long)]
        comment: String,
    },
    /// Clone a Fastly service version
    Clone {
        #[command(flatten)]
        target: VersionTarget,
    },
    /// Activate a Fastly service version
    Activate {
        #[command(flatten)]
        target: VersionTarget,
    },
    /// Deactivate a Fastly service version
    Deactivate {
        #[command(flatten)]
        target: VersionTarget,
    },
    /// Lock a Fastly service version
    Lock {
        #[command(flatten)]
        target: VersionTarget,
    },
}

#[derive(Tabled)]
struct VersionRow {
    #[tabled(rename = "NUMBER")]
    number: u32,
    #[tabled(rename = "ACTIVE")]
    active: bool,
    #[tabled(rename = "LOCKED")]
    locked: bool,
    #[tabled(rename = "LAST EDITED (UTC)")]
    updated_at: String,
}

impl From<&Version> for VersionRow {
    fn from(v: &Version) -> Self {
        Self {
            number: v.number,
            active: v.active,
            locked: v.locked,
            updated_at: display_opt(
                v.updated_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .as_ref(),
            ),
        }
    }
}

pub async fn execute(
    command: ServiceVersionCommands,
    ctx: &Context,
    out: &mut dyn Write,
) -> Result<(), Error> {
    match command {
        ServiceVersionCommands::List { service_id } => {
            let service_id = ctx.service_id(service_id.as_deref())?;
            let client = ctx.client()?;
            let versions = client.list_versions(&service_id).await?;
            let rows = versions.iter().map(VersionRow::from).collect();
            ctx.output.list(out, &versions, rows)
        }
        ServiceVersionCommands::Update { target, comment } => {
            let (service_id, version) = target.resolve(ctx)?;
            require_non_empty("comment", &comment)?;
            let client = ctx.client()?;
            let input = UpdateVersionInput { comment };
            client.update_version(&service_id, version, &input).await?;
            ctx.output.success(
                out,
                format!("Updated service {service_id} version {version}"),
            )
        }
        ServiceVersionCommands::Clone { target } => {
            let (service_id, version) = target.resolve(ctx)?;
            let client = ctx.client()?;
            let cloned = client.clone_version(&service_id, version).await?;
            ctx.output.success(
                out,
                format!(
                    "Cloned service {service_id} version {version} to version {}",
                    cloned.number
                ),
            )
        }
        ServiceVersionCommands::Activate { target } => {
            let (service_id, version) = target.resolve(ctx)?;
            let client = ctx.client()?;
            client.activate_version(&service_id, version).await?;
            ctx.output.success(
                out,
                format!("Activated service {service_id} version {version}"),
            )
        }
        ServiceVersionCommands::Deactivate { target } => {
            let (service_id, version) = target.resolve(ctx)?;
            let client = ctx.client()?;
            client.deactivate_version(&service_id, version).await?;
            ctx.output.success(
                out,
                format!("Deactivated service {service_id} version {version}"),
            )
        }
        ServiceVersionCommands::Lock { target } => {
            let (service_id, version) = target.resolve(ctx)?;
            let client = ctx.client()?;
            client.lock_version(&service_id, version).await?;
            ctx.output.success(
                out,
                format!("Locked service {service_id} version {version}"),
            )
        }
    }
}
