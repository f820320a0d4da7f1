use super::{merge, EndpointTarget, PLACEMENTS};
use crate::api::logging::Papertrail;
use crate::cli::commands::{Context, VersionTarget};
use crate::error::Error;
use clap::{Args, Subcommand};
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum PapertrailCommands {
    /// Create a Papertrail logging endpoint on a service version
    Create(CreateArgs),
    /// List Papertrail endpoints on a service version
    List(VersionTarget),
    /// Show detailed information about a Papertrail logging endpoint
    Describe(EndpointTarget),
    /// Update a Papertrail logging endpoint
    Update(UpdateArgs),
    /// Delete a Papertrail logging endpoint
    Delete(EndpointTarget),
}

#[derive(Args, Debug, Clone, Default)]
pub struct PapertrailOptions {
    /// The port number
    #[arg(long)]
    pub port: Option<u16>,
    /// Apache style log formatting
    #[arg(long)]
    pub format: Option<String>,
    /// The version of the custom logging format used for the configured endpoint
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=2))]
    pub format_version: Option<u32>,
    /// The name of an existing condition in the configured endpoint
    #[arg(long)]
    pub response_condition: Option<String>,
    /// Where in the generated VCL the logging call should be placed
    #[arg(long, value_parser = PLACEMENTS)]
    pub placement: Option<String>,
}

impl PapertrailOptions {
    fn apply(self, settings: &mut Papertrail) {
        merge(&mut settings.port, self.port);
        merge(&mut settings.format, self.format);
        merge(&mut settings.format_version, self.format_version);
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
    pub options: PapertrailOptions,
}

impl CreateArgs {
    #[must_use]
    pub fn settings(&self) -> Papertrail {
        let mut settings = Papertrail {
            name: self.target.name.clone(),
            address: Some(self.address.clone()),
            ..Papertrail::default()
        };
        self.options.clone().apply(&mut settings);
        settings
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct PapertrailChanges {
    /// New name of the Papertrail logging object
    #[arg(long)]
    pub new_name: Option<String>,
    /// A hostname or IPv4 address
    #[arg(long)]
    pub address: Option<String>,
    #[command(flatten)]
    pub options: PapertrailOptions,
}

impl PapertrailChanges {
    #[must_use]
    pub fn apply(self, mut current: Papertrail) -> Papertrail {
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
    pub changes: PapertrailChanges,
}

pub async fn execute(
    command: PapertrailCommands,
    ctx: &Context,
    out: &mut dyn Write,
) -> Result<(), Error> {
    match command {
        PapertrailCommands::Create(args) => {
            super::require_non_empty("address", &args.address)?;
            super::create(ctx, &args.target, args.settings(), out).await
        }
        PapertrailCommands::List(target) => super::list::<Papertrail>(ctx, &target, out).await,
        PapertrailCommands::Describe(target) => {
            super::describe::<Papertrail>(ctx, &target, out).await
        }
        PapertrailCommands::Update(UpdateArgs { target, changes }) => {
            let apply = |current: Papertrail| -> Result<Papertrail, Error> {
                Ok(changes.apply(current))
            };
            super::update(ctx, &target, apply, out).await
        }
        PapertrailCommands::Delete(target) => {
            super::delete::<Papertrail>(ctx, &target, out).await
        }
    }
}
