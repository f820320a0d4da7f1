//! Logging endpoints attached to a service version.
//!
//! Every provider shares the same resource shape: identity fields owned by
//! the service version plus provider settings. [`Endpoint`] carries the
//! former and flattens a provider's [`LoggingSettings`] for the latter, so
//! one set of client calls serves every provider.

pub mod gcs;
pub mod papertrail;
pub mod s3;
pub mod syslog;

use crate::api::de;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use gcs::Gcs;
pub use papertrail::Papertrail;
pub use s3::S3;
pub use syslog::Syslog;

/// Provider-specific settings of a logging endpoint.
///
/// The serialized form is exactly the form body sent on create and update:
/// `name` plus every settings field that is present.
pub trait LoggingSettings: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Path segment under `/logging/`.
    const KIND: &'static str;
    /// Human-readable provider name used in messages.
    const DISPLAY_NAME: &'static str;

    fn name(&self) -> &str;

    /// Ordered label/value pairs for text output.
    fn describe(&self) -> IndexMap<&'static str, String>;
}

/// A logging endpoint as stored on a service version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint<S> {
    #[serde(default)]
    pub service_id: String,
    #[serde(default, deserialize_with = "de::number")]
    pub version: u32,
    #[serde(flatten)]
    pub settings: S,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl<S: LoggingSettings> Endpoint<S> {
    #[must_use]
    pub fn name(&self) -> &str {
        self.settings.name()
    }

    /// Identity fields followed by the provider settings.
    #[must_use]
    pub fn describe(&self) -> IndexMap<&'static str, String> {
        let mut fields = IndexMap::new();
        fields.insert("Service ID", self.service_id.clone());
        fields.insert("Version", self.version.to_string());
        fields.extend(self.settings.describe());
        fields
    }
}

/// Inserts `value` under `label` when present.
pub(crate) fn describe_opt<T: std::fmt::Display>(
    fields: &mut IndexMap<&'static str, String>,
    label: &'static str,
    value: Option<&T>,
) {
    if let Some(v) = value {
        fields.insert(label, v.to_string());
    }
}
