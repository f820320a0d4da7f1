//! CLI command handlers.
//!
//! Each submodule handles a top-level command variant from
//! [`Commands`](crate::cli::Commands). Handlers write to a caller-supplied
//! writer and share a [`Context`] carrying the resolved configuration.

#![allow(clippy::missing_errors_doc, clippy::future_not_send)]

pub mod compute;
pub mod configure;
pub mod logging;
pub mod service;
pub mod service_version;
pub mod whoami;

use crate::api::Client;
use crate::cli::{Cli, Commands};
use crate::config::models::GlobalConfig;
use crate::config::resolver::{ApiSettingsResolver, TokenSource};
use crate::config::manager::ConfigManager;
use crate::constants;
use crate::error::Error;
use crate::fs::FileSystem;
use crate::manifest::{resolve_service_id, Manifest, ServiceIdSource};
use crate::output::Output;
use clap::Args;
use std::io::Write;

/// Everything a handler needs besides its own flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub output: Output,
    pub config: GlobalConfig,
    pub manifest: Manifest,
    /// Why `fastly.toml` could not be read, reported only if a command
    /// needs the service ID from it.
    pub manifest_error: Option<String>,
    pub token_flag: Option<String>,
    pub endpoint_flag: Option<String>,
    pub env_token: Option<String>,
    pub env_endpoint: Option<String>,
    pub env_service_id: Option<String>,
}

impl Context {
    /// Builds a context from parsed global flags and the process environment.
    ///
    /// A manifest that failed to load is kept as an error and only surfaces
    /// when [`Context::service_id`] falls through to it.
    #[must_use]
    pub fn from_cli(
        cli: &Cli,
        config: GlobalConfig,
        manifest: Result<Manifest, Error>,
    ) -> Self {
        let (manifest, manifest_error) = match manifest {
            Ok(manifest) => (manifest, None),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable {}", constants::MANIFEST_FILENAME);
                (Manifest::default(), Some(e.to_string()))
            }
        };
        Self {
            output: Output::new(cli.quiet, cli.json_errors, cli.output),
            config,
            manifest,
            manifest_error,
            token_flag: cli.token.clone(),
            endpoint_flag: cli.endpoint.clone(),
            env_token: std::env::var(constants::ENV_API_TOKEN).ok(),
            env_endpoint: std::env::var(constants::ENV_API_ENDPOINT).ok(),
            env_service_id: std::env::var(constants::ENV_SERVICE_ID).ok(),
        }
    }

    fn resolver(&self) -> ApiSettingsResolver<'_> {
        ApiSettingsResolver::new(Some(&self.config))
            .with_environment(self.env_token.clone(), self.env_endpoint.clone())
    }

    /// Resolves the token and source without requiring one.
    #[must_use]
    pub fn token(&self) -> (Option<String>, TokenSource) {
        self.resolver().resolve_token(self.token_flag.as_deref())
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        self.resolver().resolve_endpoint(self.endpoint_flag.as_deref())
    }

    /// API client for the resolved endpoint and token.
    pub fn client(&self) -> Result<Client, Error> {
        let (token, source) = self.token();
        let token = token.ok_or(Error::NoToken)?;
        tracing::debug!(?source, endpoint = %self.endpoint(), "using API token");
        Client::new(&self.endpoint(), &token, self.resolver().timeout())
    }

    /// Resolves the service ID from flag, environment or manifest.
    pub fn service_id(&self, flag: Option<&str>) -> Result<String, Error> {
        let (id, source) =
            resolve_service_id(flag, self.env_service_id.as_deref(), &self.manifest);
        if source == ServiceIdSource::Undefined {
            return Err(self.manifest_error.as_ref().map_or(Error::NoServiceId, |e| {
                Error::Config(format!(
                    "could not read {}: {e}",
                    constants::MANIFEST_FILENAME
                ))
            }));
        }
        let id = id.ok_or(Error::NoServiceId)?;
        tracing::debug!(service_id = %id, ?source, "resolved service ID");
        Ok(id)
    }
}

/// `--service-id` plus `--version`, shared by version-scoped commands.
#[derive(Args, Debug, Clone, Default)]
pub struct VersionTarget {
    /// Service ID (defaults to FASTLY_SERVICE_ID or fastly.toml)
    #[arg(long, short = 's', value_name = "ID")]
    pub service_id: Option<String>,
    /// Number of service version
    #[arg(long = "version", value_name = "VERSION")]
    pub service_version: u32,
}

impl VersionTarget {
    /// Resolves the service ID; the version number must be positive.
    pub fn resolve(&self, ctx: &Context) -> Result<(String, u32), Error> {
        let service_id = ctx.service_id(self.service_id.as_deref())?;
        if self.service_version == 0 {
            return Err(Error::Validation(
                "--version must be a positive version number".to_string(),
            ));
        }
        Ok((service_id, self.service_version))
    }
}

/// Returns an error naming `flag` when `value` is blank.
pub fn require_non_empty(flag: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        Err(Error::empty_flag(flag))
    } else {
        Ok(())
    }
}

/// Runs the selected command against `out`.
pub async fn dispatch<F: FileSystem>(
    command: Commands,
    ctx: &Context,
    manager: &ConfigManager<F>,
    out: &mut dyn Write,
) -> Result<(), Error> {
    match command {
        Commands::Configure {
            api_endpoint,
            no_verify,
        } => {
            configure::execute_configure(ctx, manager, api_endpoint.as_deref(), no_verify, out)
                .await
        }
        Commands::Whoami => whoami::execute_whoami(ctx, out).await,
        Commands::Service { command } => service::execute(command, ctx, out).await,
        Commands::ServiceVersion { command } => {
            service_version::execute(command, ctx, out).await
        }
        Commands::Logging { command } => logging::execute(command, ctx, out).await,
        Commands::Compute { command } => compute::execute(command, ctx, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_id_missing() {
        let ctx = Context::default();
        assert!(matches!(ctx.service_id(None), Err(Error::NoServiceId)));
    }

    #[test]
    fn test_service_id_from_manifest() {
        let mut ctx = Context::default();
        ctx.manifest.service_id = Some("from-manifest".to_string());
        assert_eq!(ctx.service_id(None).unwrap(), "from-manifest");
        assert_eq!(ctx.service_id(Some("from-flag")).unwrap(), "from-flag");
    }

    #[test]
    fn test_broken_manifest_only_matters_without_flag_or_env() {
        let ctx = Context {
            manifest_error: Some("TOML parsing error: expected value".to_string()),
            ..Context::default()
        };
        assert_eq!(ctx.service_id(Some("from-flag")).unwrap(), "from-flag");
        assert!(matches!(
            ctx.service_id(None),
            Err(Error::Config(msg)) if msg.contains("fastly.toml")
        ));

        let ctx = Context {
            env_service_id: Some("from-env".to_string()),
            ..ctx
        };
        assert_eq!(ctx.service_id(None).unwrap(), "from-env");
    }

    #[test]
    fn test_client_requires_token() {
        let ctx = Context::default();
        assert!(matches!(ctx.client(), Err(Error::NoToken)));
    }

    #[test]
    fn test_version_target_rejects_zero() {
        let mut ctx = Context::default();
        ctx.token_flag = Some("t".to_string());
        let target = VersionTarget {
            service_id: Some("abc".to_string()),
            service_version: 0,
        };
        assert!(matches!(target.resolve(&ctx), Err(Error::Validation(_))));
    }
}
