use crate::api::de;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A service as returned by `GET /service`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(rename = "type", default)]
    pub service_type: Option<String>,
    /// Number of the active version, if any.
    #[serde(rename = "version", default, deserialize_with = "de::opt_number")]
    pub active_version: Option<u32>,
    #[serde(default)]
    pub versions: Vec<Version>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A service as returned by `GET /service/{id}/details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(rename = "type", default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub active_version: Option<Version>,
    #[serde(default)]
    pub versions: Vec<Version>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A versioned configuration snapshot of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    #[serde(deserialize_with = "de::number")]
    pub number: u32,
    #[serde(default)]
    pub service_id: String,
    #[serde(default, deserialize_with = "de::boolean")]
    pub active: bool,
    #[serde(default, deserialize_with = "de::boolean")]
    pub locked: bool,
    #[serde(default, deserialize_with = "de::boolean")]
    pub deployed: bool,
    #[serde(default, deserialize_with = "de::boolean")]
    pub staging: bool,
    #[serde(default, deserialize_with = "de::boolean")]
    pub testing: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Form body for `POST /service`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateServiceInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

/// Form body for `PUT /service/{id}/version/{n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateVersionInput {
    pub comment: String,
}

/// Reply of `GET /verify`: who the token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub customer: Customer,
    pub user: User,
    /// Service ID to service name.
    #[serde(default)]
    pub services: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub login: Option<String>,
}

/// `{"status": "ok"}` reply of delete and state-change calls.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusReply {
    pub status: String,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}
