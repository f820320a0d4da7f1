use crate::config::models::GlobalConfig;
use crate::constants;
use crate::error::Error;
use crate::fs::{FileSystem, OsFileSystem};
use std::path::PathBuf;
use toml_edit::{value, DocumentMut};

pub struct ConfigManager<F: FileSystem> {
    fs: F,
    config_dir: PathBuf,
}

impl ConfigManager<OsFileSystem> {
    /// Creates a new `ConfigManager` with the default filesystem and config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, Error> {
        let config_dir = get_config_dir()?;
        Ok(Self {
            fs: OsFileSystem,
            config_dir,
        })
    }
}

impl<F: FileSystem> ConfigManager<F> {
    pub const fn with_fs(fs: F, config_dir: PathBuf) -> Self {
        Self { fs, config_dir }
    }

    /// Path of `config.toml` inside the configuration directory.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILENAME)
    }

    /// Loads the global configuration, or defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_global_config(&self) -> Result<GlobalConfig, Error> {
        let config_path = self.config_path();
        if !self.fs.exists(&config_path) {
            return Ok(GlobalConfig::default());
        }
        let content = self.fs.read_to_string(&config_path)?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Invalid configuration file {}: {e}",
                config_path.display()
            ))
        })
    }

    /// Stores the API token (and optionally the account email).
    ///
    /// # Errors
    ///
    /// Returns an error if the existing file is malformed or cannot be written.
    pub fn set_token(&self, token: &str, email: Option<&str>) -> Result<(), Error> {
        self.edit(|doc| {
            doc["user"]["token"] = value(token);
            if let Some(email) = email {
                doc["user"]["email"] = value(email);
            }
        })
    }

    /// Stores the API endpoint override.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing file is malformed or cannot be written.
    pub fn set_endpoint(&self, endpoint: &str) -> Result<(), Error> {
        self.edit(|doc| {
            doc["fastly"]["api_endpoint"] = value(endpoint);
        })
    }

    /// Applies `f` to the parsed document, keeping comments and unrelated
    /// keys intact, then writes it back.
    fn edit(&self, f: impl FnOnce(&mut DocumentMut)) -> Result<(), Error> {
        let config_path = self.config_path();
        let mut doc = if self.fs.exists(&config_path) {
            self.fs
                .read_to_string(&config_path)?
                .parse::<DocumentMut>()
                .map_err(|e| {
                    Error::Config(format!(
                        "Invalid configuration file {}: {e}",
                        config_path.display()
                    ))
                })?
        } else {
            DocumentMut::new()
        };

        f(&mut doc);

        self.fs.create_dir_all(&self.config_dir)?;
        self.fs.write_private(&config_path, doc.to_string().as_bytes())?;
        tracing::debug!(path = %config_path.display(), "configuration saved");
        Ok(())
    }
}

/// Gets the default configuration directory, `~/.config/fastly`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn get_config_dir() -> Result<PathBuf, Error> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;
    Ok(home_dir.join(".config").join(constants::DIR_CONFIG))
}
