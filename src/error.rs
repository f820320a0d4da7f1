use crate::constants;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("error reading service: no service ID found")]
    NoServiceId,
    #[error("no API token found")]
    NoToken,
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        detail: Option<String>,
    },
    #[error("{tool}: {message}")]
    Toolchain { tool: String, message: String },
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// JSON representation of an error for structured output
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonError {
    pub error_type: String,
    pub message: String,
    pub context: Option<String>,
}

impl Error {
    /// Creates a validation error for a required flag given an empty value.
    #[must_use]
    pub fn empty_flag(flag: &str) -> Self {
        Self::Validation(format!("--{flag} must not be empty"))
    }

    /// Creates a toolchain error.
    #[must_use]
    pub fn toolchain(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Toolchain {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Remediation hint shown below the error message, if any.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Io(io_err) => match io_err.kind() {
                std::io::ErrorKind::NotFound => Some(constants::ERR_FILE_NOT_FOUND),
                std::io::ErrorKind::PermissionDenied => Some(constants::ERR_PERMISSION),
                _ => None,
            },
            Self::Network(req_err) => {
                if req_err.is_connect() {
                    Some(constants::ERR_CONNECTION)
                } else if req_err.is_timeout() {
                    Some(constants::ERR_TIMEOUT)
                } else {
                    None
                }
            }
            Self::Api { status, .. } => match status {
                401 => Some(constants::ERR_API_CREDENTIALS),
                403 => Some(constants::ERR_PERMISSION_DENIED),
                404 => Some(constants::ERR_RESOURCE_NOT_FOUND),
                429 => Some(constants::ERR_RATE_LIMITED),
                500..=599 => Some(constants::ERR_SERVER_ERROR),
                _ => None,
            },
            Self::Yaml(_) => Some(constants::ERR_YAML_SYNTAX),
            Self::Json(_) => Some(constants::ERR_JSON_SYNTAX),
            Self::Toml(_) => Some(constants::ERR_TOML_SYNTAX),
            Self::NoServiceId => Some(constants::ERR_NO_SERVICE_ID),
            Self::NoToken => Some(constants::ERR_NO_TOKEN),
            Self::Config(_) | Self::Validation(_) | Self::Toolchain { .. } | Self::Anyhow(_) => {
                None
            }
        }
    }

    /// Convert error to JSON representation for structured output
    #[must_use]
    pub fn to_json(&self) -> JsonError {
        let error_type = match self {
            Self::Io(_) => "FileSystem",
            Self::Network(_) => "Network",
            Self::Yaml(_) => "YAMLParsing",
            Self::Json(_) => "JSONParsing",
            Self::Toml(_) => "TOMLParsing",
            Self::Config(_) => "Configuration",
            Self::Validation(_) => "Validation",
            Self::NoServiceId => "NoServiceId",
            Self::NoToken => "NoToken",
            Self::Api { .. } => "Api",
            Self::Toolchain { .. } => "Toolchain",
            Self::Anyhow(_) => "Unexpected",
        };

        let context = match self {
            Self::Api {
                detail: Some(detail),
                ..
            } => Some(detail.clone()),
            _ => self.hint().map(str::to_string),
        };

        JsonError {
            error_type: error_type.to_string(),
            message: self.to_string(),
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_hint_by_status() {
        let err = Error::Api {
            status: 401,
            message: "Provided credentials are missing or invalid".to_string(),
            detail: None,
        };
        assert_eq!(err.hint(), Some(constants::ERR_API_CREDENTIALS));

        let err = Error::Api {
            status: 503,
            message: "unavailable".to_string(),
            detail: None,
        };
        assert_eq!(err.hint(), Some(constants::ERR_SERVER_ERROR));
    }

    #[test]
    fn test_api_error_json_prefers_detail() {
        let err = Error::Api {
            status: 400,
            message: "Bad request".to_string(),
            detail: Some("Invalid bucket_name".to_string()),
        };
        let json = err.to_json();
        assert_eq!(json.error_type, "Api");
        assert_eq!(json.message, "API error (400): Bad request");
        assert_eq!(json.context.as_deref(), Some("Invalid bucket_name"));
    }

    #[test]
    fn test_no_service_id_json() {
        let json = Error::NoServiceId.to_json();
        assert_eq!(json.error_type, "NoServiceId");
        assert_eq!(json.context.as_deref(), Some(constants::ERR_NO_SERVICE_ID));
    }
}
