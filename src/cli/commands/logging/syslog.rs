use super::{merge, EndpointTarget, MESSAGE_TYPES, PLACEMENTS};
use crate::api::logging::Syslog;
use crate::cli::commands::{Context, VersionTarget};
use crate::error::Error;
use clap::{Args, Subcommand};
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum SyslogCommands {
    /// Create a Syslog logging endpoint on a service version
    Create(CreateArgs),
    /// List Syslog endpoints on a service version
    List(VersionTarget),
    /// Show detailed information about a Syslog logging endpoint
    Describe(EndpointTarget),
    /// Update a Syslog logging endpoint
    Update(UpdateArgs),
    /// Delete a Syslog logging endpoint
    Delete(EndpointTarget),
}

#[derive(Args, Debug, Clone, Default)]
pub struct SyslogOptions {
    /// The port number
    #[arg(long)]
    pub port: Option<u16>,
    /// Whether to use TLS for secure logging
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub use_tls: Option<bool>,
    /// Used during the TLS handshake to validate the certificate
    #[arg(long)]
    pub tls_hostname: Option<String>,
    /// A secure certificate to authenticate the server with. Must be in PEM format
    #[arg(long)]
    pub tls_ca_cert: Option<String>,
    /// Whether to prepend each message with a specific token
    #[arg(long = "auth-token")]
    pub token: Option<String>,
    /// Apache style log formatting
    #[arg(long)]
    pub format: Option<String>,
    /// The version of the custom logging format used for the configured endpoint
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=2))]
    pub format_version: Option<u32>,
    /// How the message should be formatted
    #[arg(long, value_parser = MESSAGE_TYPES)]
    pub message_type: Option<String>,
    /// The name of an existing condition in the configured endpoint
    #[arg(long)]
    pub response_condition: Option<String>,
    /// Where in the generated VCL the logging call should be placed
    #[arg(long, value_parser = PLACEMENTS)]
    pub placement: Option<String>,
}

impl SyslogOptions {
    fn apply(self, settings: &mut Syslog) {
        merge(&mut settings.port, self.port);
        merge(&mut settings.use_tls, self.use_tls);
        merge(&mut settings.tls_hostname, self.tls_hostname);
        merge(&mut settings.tls_ca_cert, self.tls_ca_cert);
        merge(&mut settings.token, self.token);
        merge(&mut settings.format, self.format);
        merge(&mut settings.format_version, self.format_version);
        merge(&mut settings.message_type, self.message_type);
        merge(&mut settings.response_condition, self.response_condition);
        merge(&mut settings.placement, self.placement);
    }
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    #[command(flatten)]
    pub target: EndpointTarget,
    /// A hostname or IPv4 address
    #[arg(long)]
    pub address: String,
    #[command(flatten)]
    pub options: SyslogOptions,
}

impl CreateArgs {
    #[must_use]
    pub fn settings(&self) -> Syslog {
        let mut settings = Syslog {
            name: self.target.name.clone(),
            address: Some(self.address.clone()),
            ..Syslog::default()
        };
        self.options.clone().apply(&mut settings);
        settings
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct SyslogChanges {
    /// New name of the Syslog logging object
    #[arg(long)]
    pub new_name: Option<String>,
    /// A hostname or IPv4 address
    #[arg(long)]
    pub address: Option<String>,
    #[command(flatten)]
    pub options: SyslogOptions,
}

impl SyslogChanges {
    #[must_use]
    pub fn apply(self, mut current: Syslog) -> Syslog {
        if let Some(name) = self.new_name {
            current.name = name;
        }
        merge(&mut current.address, self.address);
        self.options.apply(&mut current);
        current
    }
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub target: EndpointTarget,
    #[command(flatten)]
    pub changes: SyslogChanges,
}

pub async fn execute(
    command: SyslogCommands,
    ctx: &Context,
    out: &mut dyn Write,
) -> Result<(), Error> {
    match command {
        SyslogCommands::Create(args) => {
            super::require_non_empty("address", &args.address)?;
            super::create(ctx, &args.target, args.settings(), out).await
        }
        SyslogCommands::List(target) => super::list::<Syslog>(ctx, &target, out).await,
        SyslogCommands::Describe(target) => super::describe::<Syslog>(ctx, &target, out).await,
        SyslogCommands::Update(UpdateArgs { target, changes }) => {
            super::update(ctx, &target, |current: Syslog| Ok(changes.apply(current)), out).await
        }
        SyslogCommands::Delete(target) => super::delete::<Syslog>(ctx, &target, out).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        changes: SyslogChanges,
    }

    fn current() -> Syslog {
        Syslog {
            name: "syslog".to_string(),
            address: Some("logs.example.com".to_string()),
            port: Some(514),
            use_tls: Some(true),
            token: Some("prefix".to_string()),
            ..Syslog::default()
        }
    }

    #[test]
    fn test_update_without_flags_is_identity() {
        assert_eq!(SyslogChanges::default().apply(current()), current());
    }

    #[test]
    fn test_use_tls_can_be_switched_off() {
        let harness = Harness::parse_from(["test", "--use-tls=false"]);
        let updated = harness.changes.apply(current());
        assert_eq!(updated.use_tls, Some(false));
        assert_eq!(updated.port, Some(514));
    }

    #[test]
    fn test_bare_use_tls_means_true() {
        let harness = Harness::parse_from(["test", "--use-tls", "--port", "6514"]);
        assert_eq!(harness.changes.options.use_tls, Some(true));
        assert_eq!(harness.changes.options.port, Some(6514));
    }

    #[test]
    fn test_auth_token_flag_sets_prefix() {
        let harness = Harness::parse_from(["test", "--auth-token", "abc"]);
        let updated = harness.changes.apply(current());
        assert_eq!(updated.token.as_deref(), Some("abc"));
        assert_eq!(updated.address.as_deref(), Some("logs.example.com"));
    }
}
