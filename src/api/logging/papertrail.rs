use super::{describe_opt, LoggingSettings};
use crate::api::de;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Papertrail logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Papertrail {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_number"
    )]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_number"
    )]
    pub format_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
}

impl LoggingSettings for Papertrail {
    const KIND: &'static str = "papertrail";
    const DISPLAY_NAME: &'static str = "Papertrail";

    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> IndexMap<&'static str, String> {
        let mut fields = IndexMap::new();
        fields.insert("Name", self.name.clone());
        describe_opt(&mut fields, "Address", self.address.as_ref());
        describe_opt(&mut fields, "Port", self.port.as_ref());
        describe_opt(&mut fields, "Format", self.format.as_ref());
        describe_opt(&mut fields, "Format version", self.format_version.as_ref());
        describe_opt(&mut fields, "Response condition", self.response_condition.as_ref());
        describe_opt(&mut fields, "Placement", self.placement.as_ref());
        fields
    }
}
