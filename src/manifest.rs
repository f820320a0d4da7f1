//! Project manifest (`fastly.toml`)
//!
//! The manifest describes a compute package and, for every other command,
//! supplies the default service ID when `--service-id` is not given.

use crate::constants;
use crate::error::Error;
use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Source language of a compute package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Rust,
    Go,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rust => f.write_str("rust"),
            Self::Go => f.write_str("go"),
        }
    }
}

/// Project manifest loaded from `fastly.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub manifest_version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
}

impl Manifest {
    /// Create a new manifest for a package.
    #[must_use]
    pub fn new(name: impl Into<String>, language: Language) -> Self {
        Self {
            manifest_version: constants::MANIFEST_VERSION,
            name: name.into(),
            language: Some(language),
            ..Self::default()
        }
    }

    /// Load a manifest from a file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<F: FileSystem>(fs: &F, path: &Path) -> Result<Self, Error> {
        let content = fs.read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Reads `fastly.toml` from `dir`. A missing file yields an empty
    /// manifest; a malformed one is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read_from<F: FileSystem>(fs: &F, dir: &Path) -> Result<Self, Error> {
        let path = dir.join(constants::MANIFEST_FILENAME);
        if !fs.exists(&path) {
            tracing::debug!(path = %path.display(), "no manifest found");
            return Ok(Self::default());
        }
        Self::load(fs, &path)
    }

    /// Save a manifest to a file path
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save<F: FileSystem>(&self, fs: &F, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize manifest: {e}")))?;
        fs.write_all(path, content.as_bytes())?;
        Ok(())
    }
}

/// Where a resolved service ID came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceIdSource {
    Flag,
    Environment,
    Manifest,
    Undefined,
}

/// Resolves the service ID: `--service-id` first, then `FASTLY_SERVICE_ID`,
/// then `service_id` in the manifest. Blank values count as absent.
#[must_use]
pub fn resolve_service_id(
    flag: Option<&str>,
    env: Option<&str>,
    manifest: &Manifest,
) -> (Option<String>, ServiceIdSource) {
    let candidates = [
        (flag, ServiceIdSource::Flag),
        (env, ServiceIdSource::Environment),
        (manifest.service_id.as_deref(), ServiceIdSource::Manifest),
    ];

    candidates
        .into_iter()
        .find_map(|(value, source)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (Some(v.to_string()), source))
        })
        .unwrap_or((None, ServiceIdSource::Undefined))
}
