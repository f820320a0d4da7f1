//! External process execution for compute toolchains.

use crate::error::Error;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A program invocation: what to run and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub dir: PathBuf,
}

impl Invocation {
    #[must_use]
    pub fn new<I, S>(program: &str, args: I, dir: &Path) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            dir: dir.to_path_buf(),
        }
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Trait abstraction for spawning toolchain processes to enable mocking
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Returns `true` if `program` can be found on `PATH`.
    fn is_installed(&self, program: &str) -> bool;

    /// Runs the invocation to completion with inherited stdio.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started or exits unsuccessfully.
    fn run(&self, invocation: &Invocation) -> Result<(), Error>;
}

/// Runs processes on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn is_installed(&self, program: &str) -> bool {
        find_in_path(program, std::env::var_os("PATH").as_deref()).is_some()
    }

    fn run(&self, invocation: &Invocation) -> Result<(), Error> {
        tracing::info!(command = %invocation, dir = %invocation.dir.display(), "running toolchain");

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.dir)
            .status()
            .map_err(|e| Error::toolchain(&invocation.program, format!("failed to start: {e}")))?;

        status.success().then_some(()).ok_or_else(|| {
            Error::toolchain(
                &invocation.program,
                format!("`{invocation}` exited with {status}"),
            )
        })
    }
}

/// Looks `program` up in a `PATH`-style list of directories.
#[must_use]
pub fn find_in_path(program: &str, path: Option<&OsStr>) -> Option<PathBuf> {
    let path = path?;
    std::env::split_paths(path).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = candidate.with_extension("exe");
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}
