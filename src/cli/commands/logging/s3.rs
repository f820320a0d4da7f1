use super::{merge, EndpointTarget, MESSAGE_TYPES, PLACEMENTS};
use crate::api::logging::S3;
use crate::cli::commands::{Context, VersionTarget};
use crate::error::Error;
use clap::{Args, Subcommand};
use std::io::Write;

const REDUNDANCY: [&str; 2] = ["standard", "reduced_redundancy"];
const ENCRYPTION: [&str; 2] = ["AES256", "aws:kms"];

#[derive(Subcommand, Debug)]
pub enum S3Commands {
    /// Create an Amazon S3 logging endpoint on a service version
    Create(CreateArgs),
    /// List S3 endpoints on a service version
    List(VersionTarget),
    /// Show detailed information about an S3 logging endpoint
    Describe(EndpointTarget),
    /// Update an S3 logging endpoint
    Update(UpdateArgs),
    /// Delete an S3 logging endpoint
    Delete(EndpointTarget),
}

#[derive(Args, Debug, Clone, Default)]
pub struct S3Options {
    /// The domain of the S3 endpoint
    #[arg(long)]
    pub domain: Option<String>,
    /// The path to upload logs to
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
    /// How the message should be formatted
    #[arg(long, value_parser = MESSAGE_TYPES)]
    pub message_type: Option<String>,
    /// The name of an existing condition in the configured endpoint
    #[arg(long)]
    pub response_condition: Option<String>,
    /// strftime specified timestamp formatting
    #[arg(long)]
    pub timestamp_format: Option<String>,
    /// The S3 redundancy level
    #[arg(long, value_parser = REDUNDANCY)]
    pub redundancy: Option<String>,
    /// Where in the generated VCL the logging call should be placed
    #[arg(long, value_parser = PLACEMENTS)]
    pub placement: Option<String>,
    /// Set the server-side encryption algorithm
    #[arg(long, value_parser = ENCRYPTION)]
    pub server_side_encryption: Option<String>,
    /// Server-side KMS Key ID. Must be set if server-side-encryption is set to 'aws:kms'
    #[arg(long)]
    pub server_side_encryption_kms_key_id: Option<String>,
}

impl S3Options {
    fn apply(self, settings: &mut S3) {
        merge(&mut settings.domain, self.domain);
        merge(&mut settings.path, self.path);
        merge(&mut settings.period, self.period);
        merge(&mut settings.gzip_level, self.gzip_level);
        merge(&mut settings.format, self.format);
        merge(&mut settings.format_version, self.format_version);
        merge(&mut settings.message_type, self.message_type);
        merge(&mut settings.response_condition, self.response_condition);
        merge(&mut settings.timestamp_format, self.timestamp_format);
        merge(&mut settings.redundancy, self.redundancy);
        merge(&mut settings.placement, self.placement);
        merge(&mut settings.server_side_encryption, self.server_side_encryption);
        merge(
            &mut settings.server_side_encryption_kms_key_id,
            self.server_side_encryption_kms_key_id,
        );
    }
}

/// `aws:kms` encryption is unusable without a key ID.
fn check_encryption(settings: &S3) -> Result<(), Error> {
    let kms = settings.server_side_encryption.as_deref() == Some("aws:kms");
    let key_missing = settings
        .server_side_encryption_kms_key_id
        .as_deref()
        .is_none_or(|k| k.trim().is_empty());
    if kms && key_missing {
        return Err(Error::Validation(
            "--server-side-encryption-kms-key-id is required when --server-side-encryption is 'aws:kms'"
                .to_string(),
        ));
    }
    Ok(())
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    #[command(flatten)]
    pub target: EndpointTarget,
    /// Your S3 bucket name
    #[arg(long)]
    pub bucket: String,
    /// Your S3 account access key
    #[arg(long)]
    pub access_key: String,
    /// Your S3 account secret key
    #[arg(long)]
    pub secret_key: String,
    #[command(flatten)]
    pub options: S3Options,
}

impl CreateArgs {
    #[must_use]
    pub fn settings(&self) -> S3 {
        let mut settings = S3 {
            name: self.target.name.clone(),
            bucket_name: Some(self.bucket.clone()),
            access_key: Some(self.access_key.clone()),
            secret_key: Some(self.secret_key.clone()),
            ..S3::default()
        };
        self.options.clone().apply(&mut settings);
        settings
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct S3Changes {
    /// New name of the S3 logging object
    #[arg(long)]
    pub new_name: Option<String>,
    /// Your S3 bucket name
    #[arg(long)]
    pub bucket: Option<String>,
    /// Your S3 account access key
    #[arg(long)]
    pub access_key: Option<String>,
    /// Your S3 account secret key
    #[arg(long)]
    pub secret_key: Option<String>,
    #[command(flatten)]
    pub options: S3Options,
}

impl S3Changes {
    #[must_use]
    pub fn apply(self, mut current: S3) -> S3 {
        if let Some(name) = self.new_name {
            current.name = name;
        }
        merge(&mut current.bucket_name, self.bucket);
        merge(&mut current.access_key, self.access_key);
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
    pub changes: S3Changes,
}

pub async fn execute(command: S3Commands, ctx: &Context, out: &mut dyn Write) -> Result<(), Error> {
    match command {
        S3Commands::Create(args) => {
            super::require_non_empty("bucket", &args.bucket)?;
            let settings = args.settings();
            check_encryption(&settings)?;
            super::create(ctx, &args.target, settings, out).await
        }
        S3Commands::List(target) => super::list::<S3>(ctx, &target, out).await,
        S3Commands::Describe(target) => super::describe::<S3>(ctx, &target, out).await,
        S3Commands::Update(UpdateArgs { target, changes }) => {
            let apply = |current: S3| -> Result<S3, Error> {
                let merged = changes.apply(current);
                check_encryption(&merged)?;
                Ok(merged)
            };
            super::update(ctx, &target, apply, out).await
        }
        S3Commands::Delete(target) => super::delete::<S3>(ctx, &target, out).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> S3 {
        S3 {
            name: "s3-logs".to_string(),
            bucket_name: Some("bucket".to_string()),
            access_key: Some("AKIA".to_string()),
            secret_key: Some("secret".to_string()),
            redundancy: Some("standard".to_string()),
            period: Some(3600),
            ..S3::default()
        }
    }

    #[test]
    fn test_update_without_flags_is_identity() {
        assert_eq!(S3Changes::default().apply(current()), current());
    }

    #[test]
    fn test_update_merges_nested_options() {
        let changes = S3Changes {
            secret_key: Some("rotated".to_string()),
            options: S3Options {
                redundancy: Some("reduced_redundancy".to_string()),
                ..S3Options::default()
            },
            ..S3Changes::default()
        };
        let updated = changes.apply(current());
        assert_eq!(updated.name, "s3-logs");
        assert_eq!(updated.secret_key.as_deref(), Some("rotated"));
        assert_eq!(updated.redundancy.as_deref(), Some("reduced_redundancy"));
        assert_eq!(updated.access_key.as_deref(), Some("AKIA"));
        assert_eq!(updated.period, Some(3600));
    }

    #[test]
    fn test_kms_requires_key_id() {
        let mut settings = current();
        settings.server_side_encryption = Some("aws:kms".to_string());
        assert!(check_encryption(&settings).is_err());

        settings.server_side_encryption_kms_key_id = Some("key-1".to_string());
        assert!(check_encryption(&settings).is_ok());

        settings.server_side_encryption = Some("AES256".to_string());
        settings.server_side_encryption_kms_key_id = None;
        assert!(check_encryption(&settings).is_ok());
    }
}
