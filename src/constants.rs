//! Centralized string constants for the Fastly CLI
//!
//! This module contains commonly used string literals to:
//! - Reduce string duplication
//! - Keep wire names and user-facing messages consistent

// HTTP Headers
pub const HEADER_API_KEY: &str = "Fastly-Key";

// Content Types
pub const CONTENT_TYPE_JSON: &str = "application/json";

// Environment Variables
pub const ENV_API_TOKEN: &str = "FASTLY_API_TOKEN";
pub const ENV_API_ENDPOINT: &str = "FASTLY_API_ENDPOINT";
pub const ENV_SERVICE_ID: &str = "FASTLY_SERVICE_ID";
pub const ENV_CONFIG_DIR: &str = "FASTLY_CONFIG_DIR";
pub const ENV_LOG: &str = "FASTLY_LOG";
pub const ENV_LOG_FORMAT: &str = "FASTLY_LOG_FORMAT";
pub const ENV_LOG_FILE: &str = "FASTLY_LOG_FILE";
pub const ENV_LOG_MAX_BODY: &str = "FASTLY_LOG_MAX_BODY";

// Default Values
pub const DEFAULT_API_ENDPOINT: &str = "https://api.fastly.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_MAX_BODY: usize = 1000;
pub const USER_AGENT: &str = concat!("fastly-cli/", env!("CARGO_PKG_VERSION"));

// File names
pub const CONFIG_FILENAME: &str = "config.toml";
pub const MANIFEST_FILENAME: &str = "fastly.toml";
pub const MANIFEST_VERSION: u32 = 1;
pub const WASM_ARTIFACT: &str = "main.wasm";

// Directory names
pub const DIR_CONFIG: &str = "fastly";
pub const DIR_BIN: &str = "bin";

// Compute toolchains
pub const WASM_TARGET: &str = "wasm32-wasi";
pub const TOOL_CARGO: &str = "cargo";
pub const TOOL_TINYGO: &str = "tinygo";

// Common Response Messages
pub const EMPTY_LIST: &str = "(none)";
pub const SUCCESS_PREFIX: &str = "SUCCESS:";

// Error Context Messages
pub const ERR_API_CREDENTIALS: &str =
    "Check your API token with 'fastly whoami' or run 'fastly configure'.";
pub const ERR_PERMISSION_DENIED: &str =
    "Your token may be valid but lack permission for this operation.";
pub const ERR_RESOURCE_NOT_FOUND: &str =
    "Check that the service ID, version and resource name are correct.";
pub const ERR_RATE_LIMITED: &str = "You're making requests too quickly. Wait before trying again.";
pub const ERR_SERVER_ERROR: &str = "The API server is experiencing issues. Try again later.";
pub const ERR_CONNECTION: &str = "Check your network connection and the --endpoint value.";
pub const ERR_TIMEOUT: &str = "The API server may be slow or unresponsive. Try again later.";
pub const ERR_NO_SERVICE_ID: &str =
    "Pass --service-id, set FASTLY_SERVICE_ID, or add service_id to fastly.toml.";
pub const ERR_NO_TOKEN: &str =
    "Pass --token, set FASTLY_API_TOKEN, or run 'fastly configure --token <TOKEN>'.";

// File System Messages
pub const ERR_FILE_NOT_FOUND: &str = "Check that the file path is correct and the file exists.";
pub const ERR_PERMISSION: &str = "Check file permissions or run with appropriate privileges.";

// Parsing Messages
pub const ERR_YAML_SYNTAX: &str = "The data could not be rendered as YAML.";
pub const ERR_JSON_SYNTAX: &str = "The API returned a response that is not valid JSON.";
pub const ERR_TOML_SYNTAX: &str = "Check that the TOML file has valid syntax.";
