//! Handlers for `fastly service *`.

use super::{require_non_empty, Context};
use crate::api::models::{CreateServiceInput, Service, ServiceDetail};
use crate::error::Error;
use crate::output::display_opt;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use indexmap::IndexMap;
use std::io::Write;
use tabled::Tabled;

#[derive(Subcommand, Debug)]
pub enum ServiceCommands {
    /// List services
    List,
    /// Show detailed information about a service
    Describe {
        /// Service ID (defaults to FASTLY_SERVICE_ID or fastly.toml)
        #[arg(long, short = 's', value_name = "ID")]
        service_id: Option<String>,
    },
    /// Create a service
    Create {
        /// Service name
        #[arg(long, short = 'n')]
        name: String,
        /// Human-readable comment
        #[arg(long)]
        comment: Option<String>,
        /// Service type
        #[arg(long = "type", value_parser = ["vcl", "wasm"])]
        service_type: Option<String>,
    },
    /// Delete a service
    Delete {
        /// Service ID (defaults to FASTLY_SERVICE_ID or fastly.toml)
        #[arg(long, short = 's', value_name = "ID")]
        service_id: Option<String>,
        /// Deactivate the active version first, if there is one
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Search for a service by name
    Search {
        /// Service name
        #[arg(long, short = 'n')]
        name: String,
    },
}

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "TYPE")]
    service_type: String,
    #[tabled(rename = "ACTIVE VERSION")]
    active_version: String,
    #[tabled(rename = "LAST EDITED (UTC)")]
    updated_at: String,
}

impl From<&Service> for ServiceRow {
    fn from(s: &Service) -> Self {
        Self {
            name: s.name.clone(),
            id: s.id.clone(),
            service_type: display_opt(s.service_type.as_ref()),
            active_version: display_opt(s.active_version.as_ref()),
            updated_at: timestamp(s.updated_at.as_ref()),
        }
    }
}

fn timestamp(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn service_fields(s: &Service) -> IndexMap<&'static str, String> {
    let mut fields = IndexMap::new();
    fields.insert("ID", s.id.clone());
    fields.insert("Name", s.name.clone());
    fields.insert("Type", display_opt(s.service_type.as_ref()));
    fields.insert("Comment", display_opt(s.comment.as_ref()));
    fields.insert("Customer ID", display_opt(s.customer_id.as_ref()));
    fields.insert("Created (UTC)", timestamp(s.created_at.as_ref()));
    fields.insert("Last edited (UTC)", timestamp(s.updated_at.as_ref()));
    fields.insert("Active version", display_opt(s.active_version.as_ref()));
    fields.insert("Versions", s.versions.len().to_string());
    fields
}

fn detail_fields(s: &ServiceDetail) -> IndexMap<&'static str, String> {
    let mut fields = IndexMap::new();
    fields.insert("ID", s.id.clone());
    fields.insert("Name", s.name.clone());
    fields.insert("Type", display_opt(s.service_type.as_ref()));
    fields.insert("Comment", display_opt(s.comment.as_ref()));
    fields.insert("Customer ID", display_opt(s.customer_id.as_ref()));
    fields.insert("Created (UTC)", timestamp(s.created_at.as_ref()));
    fields.insert("Last edited (UTC)", timestamp(s.updated_at.as_ref()));
    fields.insert(
        "Active version",
        display_opt(s.active_version.as_ref().map(|v| v.number).as_ref()),
    );
    fields.insert("Versions", s.versions.len().to_string());
    fields
}

pub async fn execute(
    command: ServiceCommands,
    ctx: &Context,
    out: &mut dyn Write,
) -> Result<(), Error> {
    match command {
        ServiceCommands::List => {
            let client = ctx.client()?;
            let services = client.list_services().await?;
            let rows = services.iter().map(ServiceRow::from).collect();
            ctx.output.list(out, &services, rows)
        }
        ServiceCommands::Describe { service_id } => {
            let service_id = ctx.service_id(service_id.as_deref())?;
            let client = ctx.client()?;
            let detail = client.get_service_details(&service_id).await?;
            ctx.output.record(out, &detail, &detail_fields(&detail))
        }
        ServiceCommands::Create {
            name,
            comment,
            service_type,
        } => {
            require_non_empty("name", &name)?;
            let client = ctx.client()?;
            let input = CreateServiceInput {
                name,
                comment,
                service_type,
            };
            let service = client.create_service(&input).await?;
            ctx.output.success(
                out,
                format!("Created service {} ({})", service.id, service.name),
            )
        }
        ServiceCommands::Delete { service_id, force } => {
            let service_id = ctx.service_id(service_id.as_deref())?;
            let client = ctx.client()?;
            if force {
                let detail = client.get_service_details(&service_id).await?;
                if let Some(active) = detail.active_version {
                    tracing::info!(
                        service_id = %service_id,
                        version = active.number,
                        "deactivating active version before delete"
                    );
                    client
                        .deactivate_version(&service_id, active.number)
                        .await?;
                }
            }
            client.delete_service(&service_id).await?;
            ctx.output
                .success(out, format!("Deleted service ID {service_id}"))
        }
        ServiceCommands::Search { name } => {
            require_non_empty("name", &name)?;
            let client = ctx.client()?;
            let service = client.search_service(&name).await?;
            ctx.output.record(out, &service, &service_fields(&service))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_row_formats_missing_fields_blank() {
        let service: Service =
            serde_json::from_str(r#"{"id": "abc", "name": "www", "version": "3"}"#).unwrap();
        let row = ServiceRow::from(&service);
        assert_eq!(row.active_version, "3");
        assert_eq!(row.service_type, "");
        assert_eq!(row.updated_at, "");
    }

    #[test]
    fn test_service_fields_order() {
        let service: Service = serde_json::from_str(
            r#"{"id": "abc", "name": "www", "type": "wasm", "updated_at": "2024-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        let fields = service_fields(&service);
        let keys: Vec<_> = fields.keys().copied().collect();
        assert_eq!(keys[..3], ["ID", "Name", "Type"]);
        assert_eq!(fields["Last edited (UTC)"], "2024-01-02 03:04");
    }
}
