use crate::constants;
use serde::{Deserialize, Serialize};

/// Contents of `~/.config/fastly/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GlobalConfig {
    #[serde(default = "default_timeout_secs_value")]
    pub default_timeout_secs: u64,
    #[serde(default)]
    pub fastly: ApiSection,
    #[serde(default)]
    pub user: UserSection,
}

const fn default_timeout_secs_value() -> u64 {
    constants::DEFAULT_TIMEOUT_SECS
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
            fastly: ApiSection::default(),
            user: UserSection::default(),
        }
    }
}

/// `[fastly]` table: where the API lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
}

/// `[user]` table: stored credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
