use super::{merge, EndpointTarget, MESSAGE_TYPES, PLACEMENTS};
use crate::api::logging::Gcs;
use crate::cli::commands::{Context, VersionTarget};
use crate::error::Error;
use clap::{Args, Subcommand};
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum GcsCommands {
    /// Create a GCS logging endpoint on a service version
    Create(CreateArgs),
    /// List GCS endpoints on a service version
    List(VersionTarget),
    /// Show detailed information about a GCS logging endpoint
    Describe(EndpointTarget),
    /// Update a GCS logging endpoint
    Update(UpdateArgs),
    /// Delete a GCS logging endpoint
    Delete(EndpointTarget),
}

/// Flags that are optional on both create and update.
#[derive(Args, Debug, Clone, Default)]
pub struct GcsOptions {
    /// The path to upload logs to (default '/')
    #[arg(long)]
    pub path: Option<String>,
    /// How frequently log files are finalized so they can be available for reading (in seconds, default 3600)
    #[arg(long)]
    pub period: Option<u32>,
    /// What level of GZIP encoding to have when dumping logs (default 0, no compression)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub gzip_level: Option<u8>,
    /// Apache style log formatting
    #[arg(long)]
    pub format: Option<String>,
    /// The version of the custom logging format used for the configured endpoint
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=2))]
    pub format_version: Option<u32>,
    /// The name of an existing condition in the configured endpoint
    #[arg(long)]
    pub response_condition: Option<String>,
    /// How the message should be formatted
    #[arg(long, value_parser = MESSAGE_TYPES)]
    pub message_type: Option<String>,
    /// strftime specified timestamp formatting (default "%Y-%m-%dT%H:%M:%S.000")
    #[arg(long)]
    pub timestamp_format: Option<String>,
    /// Where in the generated VCL the logging call should be placed
    #[arg(long, value_parser = PLACEMENTS)]
    pub placement: Option<String>,
}

impl GcsOptions {
    fn apply(self, settings: &mut Gcs) {
        merge(&mut settings.path, self.path);
        merge(&mut settings.period, self.period);
        merge(&mut settings.gzip_level, self.gzip_level);
        merge(&mut settings.format, self.format);
        merge(&mut settings.format_version, self.format_version);
        merge(&mut settings.response_condition, self.response_condition);
        merge(&mut settings.message_type, self.message_type);
        merge(&mut settings.timestamp_format, self.timestamp_format);
        merge(&mut settings.placement, self.placement);
    }
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    #[command(flatten)]
    pub target: EndpointTarget,
    /// The bucket of the GCS bucket
    #[arg(long)]
    pub bucket: String,
    /// Your GCS service account email address. The client_email field in your service account authentication JSON
    #[arg(long)]
    pub user: String,
    /// Your GCS account secret key. The private_key field in your service account authentication JSON
    #[arg(long)]
    pub secret_key: String,
    #[command(flatten)]
    pub options: GcsOptions,
}

impl CreateArgs {
    #[must_use]
    pub fn settings(&self) -> Gcs {
        let mut settings = Gcs {
            name: self.target.name.clone(),
            bucket_name: Some(self.bucket.clone()),
            user: Some(self.user.clone()),
            secret_key: Some(self.secret_key.clone()),
            ..Gcs::default()
        };
        self.options.clone().apply(&mut settings);
        settings
    }
}

/// Fields an update may change. Anything left `None` keeps its current value.
#[derive(Args, Debug, Clone, Default)]
pub struct GcsChanges {
    /// New name of the GCS logging object
    #[arg(long)]
    pub new_name: Option<String>,
    /// The bucket of the GCS bucket
    #[arg(long)]
    pub bucket: Option<String>,
    /// Your GCS service account email address
    #[arg(long)]
    pub user: Option<String>,
    /// Your GCS account secret key
    #[arg(long)]
    pub secret_key: Option<String>,
    #[command(flatten)]
    pub options: GcsOptions,
}

impl GcsChanges {
    /// Overlays the supplied flags on the endpoint's current settings.
    #[must_use]
    pub fn apply(self, mut current: Gcs) -> Gcs {
        if let Some(name) = self.new_name {
            current.name = name;
        }
        merge(&mut current.bucket_name, self.bucket);
        merge(&mut current.user, self.user);
        merge(&mut current.secret_key, self.secret_key);
        self.options.apply(&mut current);
        current
    }
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub target: EndpointTarget,
    #[command(flatten)]
    pub changes: GcsChanges,
}

pub async fn execute(command: GcsCommands, ctx: &Context, out: &mut dyn Write) -> Result<(), Error> {
    match command {
        GcsCommands::Create(args) => {
            super::require_non_empty("bucket", &args.bucket)?;
            super::create(ctx, &args.target, args.settings(), out).await
        }
        GcsCommands::List(target) => super::list::<Gcs>(ctx, &target, out).await,
        GcsCommands::Describe(target) => super::describe::<Gcs>(ctx, &target, out).await,
        GcsCommands::Update(UpdateArgs { target, changes }) => {
            super::update(ctx, &target, |current: Gcs| Ok(changes.apply(current)), out).await
        }
        GcsCommands::Delete(target) => super::delete::<Gcs>(ctx, &target, out).await,
    }
}
