use crate::config::models::GlobalConfig;
use crate::constants;
use std::time::Duration;

/// Where a resolved API token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Flag,
    Environment,
    ConfigFile,
    Undefined,
}

/// Resolves API token and endpoint based on a priority hierarchy:
/// 1. Command-line flag
/// 2. Environment variable (`FASTLY_API_TOKEN`, `FASTLY_API_ENDPOINT`)
/// 3. `config.toml`
/// 4. Built-in default (endpoint only)
#[derive(Debug, Clone)]
pub struct ApiSettingsResolver<'a> {
    global_config: Option<&'a GlobalConfig>,
    env_token: Option<String>,
    env_endpoint: Option<String>,
}

impl<'a> ApiSettingsResolver<'a> {
    /// Creates a resolver reading the process environment.
    #[must_use]
    pub fn new(global_config: Option<&'a GlobalConfig>) -> Self {
        Self {
            global_config,
            env_token: std::env::var(constants::ENV_API_TOKEN).ok(),
            env_endpoint: std::env::var(constants::ENV_API_ENDPOINT).ok(),
        }
    }

    /// Sets the environment values explicitly (overrides the process environment)
    #[must_use]
    pub fn with_environment(mut self, token: Option<String>, endpoint: Option<String>) -> Self {
        self.env_token = token;
        self.env_endpoint = endpoint;
        self
    }

    #[must_use]
    pub fn resolve_token(&self, flag: Option<&str>) -> (Option<String>, TokenSource) {
        let config_token = self
            .global_config
            .and_then(|c| c.user.token.as_deref());

        [
            (flag, TokenSource::Flag),
            (self.env_token.as_deref(), TokenSource::Environment),
            (config_token, TokenSource::ConfigFile),
        ]
        .into_iter()
        .find_map(|(value, source)| non_blank(value).map(|v| (Some(v), source)))
        .unwrap_or((None, TokenSource::Undefined))
    }

    #[must_use]
    pub fn resolve_endpoint(&self, flag: Option<&str>) -> String {
        let config_endpoint = self
            .global_config
            .and_then(|c| c.fastly.api_endpoint.as_deref());

        [flag, self.env_endpoint.as_deref(), config_endpoint]
            .into_iter()
            .find_map(non_blank)
            .map_or_else(
                || constants::DEFAULT_API_ENDPOINT.to_string(),
                |url| url.trim_end_matches('/').to_string(),
            )
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.global_config
                .map_or(constants::DEFAULT_TIMEOUT_SECS, |c| c.default_timeout_secs),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>, endpoint: Option<&str>) -> GlobalConfig {
        let mut config = GlobalConfig::default();
        config.user.token = token.map(str::to_string);
        config.fastly.api_endpoint = endpoint.map(str::to_string);
        config
    }

    #[test]
    fn test_token_priority() {
        let config = config(Some("file-token"), None);
        let resolver = ApiSettingsResolver::new(Some(&config))
            .with_environment(Some("env-token".to_string()), None);

        assert_eq!(
            resolver.resolve_token(Some("flag-token")),
            (Some("flag-token".to_string()), TokenSource::Flag)
        );
        assert_eq!(
            resolver.resolve_token(None),
            (Some("env-token".to_string()), TokenSource::Environment)
        );

        let resolver = resolver.with_environment(None, None);
        assert_eq!(
            resolver.resolve_token(Some("")),
            (Some("file-token".to_string()), TokenSource::ConfigFile)
        );
    }

    #[test]
    fn test_token_undefined() {
        let resolver = ApiSettingsResolver::new(None).with_environment(None, None);
        assert_eq!(resolver.resolve_token(None), (None, TokenSource::Undefined));
    }

    #[test]
    fn test_endpoint_priority_and_default() {
        let config = config(None, Some("https://config.example.test/"));
        let resolver = ApiSettingsResolver::new(Some(&config))
            .with_environment(None, Some("https://env.example.test".to_string()));
        assert_eq!(
            resolver.resolve_endpoint(Some("http://127.0.0.1:8080")),
            "http://127.0.0.1:8080"
        );
        assert_eq!(resolver.resolve_endpoint(None), "https://env.example.test");

        let resolver = resolver.with_environment(None, None);
        assert_eq!(resolver.resolve_endpoint(None), "https://config.example.test");

        let resolver = ApiSettingsResolver::new(None).with_environment(None, None);
        assert_eq!(resolver.resolve_endpoint(None), "https://api.fastly.com");
    }

    #[test]
    fn test_timeout_from_config() {
        let mut config = GlobalConfig::default();
        config.default_timeout_secs = 5;
        let resolver = ApiSettingsResolver::new(Some(&config));
        assert_eq!(resolver.timeout(), Duration::from_secs(5));
    }
}
