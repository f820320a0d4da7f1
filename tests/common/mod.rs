//! Shared test utilities

use std::path::PathBuf;

/// Cached binary path for the fastly CLI to avoid repeated lookups
#[allow(deprecated)]
pub static FASTLY_BIN: std::sync::LazyLock<PathBuf> =
    std::sync::LazyLock::new(|| assert_cmd::cargo::cargo_bin("fastly"));

/// Command for the CLI binary with the environment isolated from the host:
/// no ambient token, endpoint or service ID, and config under `config_dir`.
pub fn fastly_cmd(config_dir: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(&*FASTLY_BIN);
    cmd.env("FASTLY_CONFIG_DIR", config_dir)
        .env_remove("FASTLY_API_TOKEN")
        .env_remove("FASTLY_API_ENDPOINT")
        .env_remove("FASTLY_SERVICE_ID")
        .env_remove("FASTLY_LOG");
    cmd
}
