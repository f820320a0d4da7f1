//! Handler for `fastly configure`.

use super::Context;
use crate::api::Client;
use crate::config::manager::ConfigManager;
use crate::error::Error;
use crate::fs::FileSystem;
use std::io::Write;
use std::time::Duration;

/// Validates the token (unless `no_verify`) and stores it, together with an
/// optional endpoint override.
pub async fn execute_configure<F: FileSystem>(
    ctx: &Context,
    manager: &ConfigManager<F>,
    api_endpoint: Option<&str>,
    no_verify: bool,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let token = ctx
        .token_flag
        .as_deref()
        .or(ctx.env_token.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            Error::Validation("--token (or FASTLY_API_TOKEN) is required".to_string())
        })?;

    let endpoint = api_endpoint.map_or_else(
        || ctx.endpoint(),
        |e| e.trim_end_matches('/').to_string(),
    );

    let email = if no_verify {
        None
    } else {
        let timeout = Duration::from_secs(ctx.config.default_timeout_secs);
        let client = Client::new(&endpoint, token, timeout)?;
        let who = client.verify().await.map_err(|e| match e {
            Error::Api { status: 401, .. } => {
                Error::Validation("The API rejected the token".to_string())
            }
            other => other,
        })?;
        ctx.output.info(
            out,
            format!("Token belongs to {} ({})", who.user.name, who.customer.name),
        )?;
        who.user.login
    };

    manager.set_token(token, email.as_deref())?;
    if let Some(endpoint) = api_endpoint {
        manager.set_endpoint(endpoint.trim_end_matches('/'))?;
    }

    ctx.output.success(
        out,
        format!(
            "Configured the Fastly CLI (config: {})",
            manager.config_path().display()
        ),
    )
}
