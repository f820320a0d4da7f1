use super::{describe_opt, LoggingSettings};
use crate::api::de;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Remote syslog logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syslog {
    pub name: String,
    /// Hostname or IPv4 address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_number"
    )]
    pub port: Option<u16>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_boolean",
        serialize_with = "de::compat_bool"
    )]
    pub use_tls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_hostname: Option<String>,
    /// Prefix prepended to each message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
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
    pub placement: Option<String>,
}

impl LoggingSettings for Syslog {
    const KIND: &'static str = "syslog";
    const DISPLAY_NAME: &'static str = "Syslog";

    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> IndexMap<&'static str, String> {
        let mut fields = IndexMap::new();
        fields.insert("Name", self.name.clone());
        describe_opt(&mut fields, "Address", self.address.as_ref());
        describe_opt(&mut fields, "Port", self.port.as_ref());
        describe_opt(&mut fields, "Use TLS", self.use_tls.as_ref());
        describe_opt(&mut fields, "TLS CA certificate", self.tls_ca_cert.as_ref());
        describe_opt(&mut fields, "TLS hostname", self.tls_hostname.as_ref());
        describe_opt(&mut fields, "Token", self.token.as_ref());
        describe_opt(&mut fields, "Format", self.format.as_ref());
        describe_opt(&mut fields, "Format version", self.format_version.as_ref());
        describe_opt(&mut fields, "Message type", self.message_type.as_ref());
        describe_opt(&mut fields, "Response condition", self.response_condition.as_ref());
        describe_opt(&mut fields, "Placement", self.placement.as_ref());
        fields
    }
}
