use super::{describe_opt, LoggingSettings};
use crate::api::de;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Amazon S3 (and S3-compatible) logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3 {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_number"
    )]
    pub period: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_number"
    )]
    pub gzip_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_number"
    )]
    pub format_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_format: Option<String>,
    /// `standard` or `reduced_redundancy`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redundancy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    /// `AES256` or `aws:kms`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_side_encryption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_side_encryption_kms_key_id: Option<String>,
}

impl LoggingSettings for S3 {
    const KIND: &'static str = "s3";
    const DISPLAY_NAME: &'static str = "S3";

    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> IndexMap<&'static str, String> {
        let mut fields = IndexMap::new();
        fields.insert("Name", self.name.clone());
        describe_opt(&mut fields, "Bucket", self.bucket_name.as_ref());
        describe_opt(&mut fields, "Access key", self.access_key.as_ref());
        describe_opt(&mut fields, "Secret key", self.secret_key.as_ref());
        describe_opt(&mut fields, "Domain", self.domain.as_ref());
        describe_opt(&mut fields, "Path", self.path.as_ref());
        describe_opt(&mut fields, "Period", self.period.as_ref());
        describe_opt(&mut fields, "GZip level", self.gzip_level.as_ref());
        describe_opt(&mut fields, "Format", self.format.as_ref());
        describe_opt(&mut fields, "Format version", self.format_version.as_ref());
        describe_opt(&mut fields, "Response condition", self.response_condition.as_ref());
        describe_opt(&mut fields, "Message type", self.message_type.as_ref());
        describe_opt(&mut fields, "Timestamp format", self.timestamp_format.as_ref());
        describe_opt(&mut fields, "Redundancy", self.redundancy.as_ref());
        describe_opt(&mut fields, "Placement", self.placement.as_ref());
        describe_opt(
            &mut fields,
            "Server-side encryption",
            self.server_side_encryption.as_ref(),
        );
        describe_opt(
            &mut fields,
            "Server-side encryption KMS key ID",
            self.server_side_encryption_kms_key_id.as_ref(),
        );
        fields
    }
}
