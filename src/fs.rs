//! Filesystem abstraction used by the config manager and compute scaffolding.
//!
//! Writes go through a temp-file + rename so a reader never sees a partially
//! written `config.toml` or `fastly.toml`.

use std::io;
use std::path::{Path, PathBuf};

pub trait FileSystem {
    /// Reads the entire contents of a file into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or contains invalid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Reads the entire contents of a file as bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Writes `contents` to `path`, replacing any existing file atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written to or created.
    fn write_all(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Like [`FileSystem::write_all`], but on unix the file is readable by
    /// its owner only. Used for files holding credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written to or created.
    fn write_private(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Creates a directory and all of its parent components if they are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Copies a file, returning the number of bytes copied.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the destination written.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Returns `true` if the path points to an existing entity.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists and is pointing at a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns a vector of all entries in a directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist or cannot be read.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write_all(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        atomic_write_sync(path, contents)
    }

    fn write_private(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        atomic_write_private(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        std::fs::copy(from, to)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        Ok(std::fs::read_dir(path)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .collect())
    }
}

/// Write `data` to `path` by writing a temporary sibling file and renaming
/// it into place.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or the rename fails.
pub fn atomic_write_sync(path: &Path, data: &[u8]) -> io::Result<()> {
    let temp_path = temp_sibling(path);

    std::fs::write(&temp_path, data)?;

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

/// [`atomic_write_sync`] for secrets: the temp file is created with mode
/// `0600` on unix, so the renamed file never exists with wider permissions.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or the rename fails.
pub fn atomic_write_private(path: &Path, data: &[u8]) -> io::Result<()> {
    use std::io::Write as _;

    let temp_path = temp_sibling(path);
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let result = options
        .open(&temp_path)
        .and_then(|mut file| file.write_all(data))
        .and_then(|()| std::fs::rename(&temp_path, path));
    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    result
}

/// Temp path next to `path` with a random suffix, so the rename stays on
/// the same filesystem.
fn temp_sibling(path: &Path) -> PathBuf {
    let random_suffix = fastrand::u64(..);
    let file_name = path
        .file_name()
        .map_or_else(|| "file".to_string(), |n| n.to_string_lossy().to_string());

    let temp_name = format!(".{file_name}.{random_suffix:016x}.tmp");

    path.with_file_name(temp_name)
}
