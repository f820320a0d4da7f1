//! Compute package scaffolding and builds.
//!
//! Toolchains are external programs reached through [`runner::CommandRunner`],
//! so everything here can be tested without cargo or tinygo installed.

pub mod build;
pub mod runner;
pub mod scaffold;

use std::path::PathBuf;

/// Resolves a `--path` argument, expanding a leading `~`. Absent means the
/// current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_dir(path: Option<&str>) -> std::io::Result<PathBuf> {
    match path {
        Some(p) if !p.trim().is_empty() => Ok(PathBuf::from(shellexpand::tilde(p).as_ref())),
        _ => std::env::current_dir(),
    }
}
