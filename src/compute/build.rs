//! `compute build`: compiles a package to WebAssembly via the language toolchain.

use super::runner::{CommandRunner, Invocation};
use crate::constants;
use crate::error::Error;
use crate::fs::FileSystem;
use crate::manifest::{Language, Manifest};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub package: String,
    pub language: Language,
    pub artifact: PathBuf,
    pub sha256: String,
}

/// Reads `package.name` from a Cargo manifest.
///
/// # Errors
///
/// Returns an error if the file is not valid TOML or has no package name.
pub fn cargo_package_name(cargo_toml: &str) -> Result<String, Error> {
    let value: toml::Value = toml::from_str(cargo_toml)?;
    value
        .get("package")
        .and_then(|p| p.get("name"))
        .and_then(toml::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::Config("Cargo.toml has no [package] name".to_string()))
}

/// The toolchain command for `language` and where its output lands.
#[must_use]
pub fn plan(language: Language, package: &str, dir: &Path) -> (Invocation, PathBuf) {
    match language {
        Language::Rust => {
            let invocation = Invocation::new(
                constants::TOOL_CARGO,
                [
                    "build",
                    "--bin",
                    package,
                    "--release",
                    "--target",
                    constants::WASM_TARGET,
                ],
                dir,
            );
            let output = dir
                .join("target")
                .join(constants::WASM_TARGET)
                .join("release")
                .join(format!("{package}.wasm"));
            (invocation, output)
        }
        Language::Go => {
            let output = Path::new(constants::DIR_BIN).join(constants::WASM_ARTIFACT);
            let invocation = Invocation::new(
                constants::TOOL_TINYGO,
                [
                    "build".to_string(),
                    "-target=wasi".to_string(),
                    "-o".to_string(),
                    output.to_string_lossy().into_owned(),
                    ".".to_string(),
                ],
                dir,
            );
            (invocation, dir.join(output))
        }
    }
}

fn tool_for(language: Language) -> &'static str {
    match language {
        Language::Rust => constants::TOOL_CARGO,
        Language::Go => constants::TOOL_TINYGO,
    }
}

/// Hex-encoded SHA-256 of `data`.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Builds the package rooted at `dir` and leaves the module at
/// `bin/main.wasm`.
///
/// # Errors
///
/// Returns an error if the manifest is missing or incomplete, the toolchain
/// is not installed or fails, or the artefact cannot be found.
pub fn build<F: FileSystem, R: CommandRunner>(
    fs: &F,
    runner: &R,
    dir: &Path,
) -> Result<BuildOutcome, Error> {
    let manifest_path = dir.join(constants::MANIFEST_FILENAME);
    if !fs.exists(&manifest_path) {
        return Err(Error::Config(format!(
            "no {} found in {}; run `fastly compute init` first",
            constants::MANIFEST_FILENAME,
            dir.display()
        )));
    }
    let manifest = Manifest::load(fs, &manifest_path)?;
    let language = manifest.language.ok_or_else(|| {
        Error::Config(format!(
            "{} does not declare a language",
            constants::MANIFEST_FILENAME
        ))
    })?;

    let tool = tool_for(language);
    if !runner.is_installed(tool) {
        return Err(Error::toolchain(tool, "not found in PATH"));
    }

    let package = match language {
        Language::Rust => cargo_package_name(&fs.read_to_string(&dir.join("Cargo.toml"))?)?,
        Language::Go => manifest.name.clone(),
    };

    let bin_dir = dir.join(constants::DIR_BIN);
    fs.create_dir_all(&bin_dir)?;

    let (invocation, output) = plan(language, &package, dir);
    runner.run(&invocation)?;

    if !fs.exists(&output) {
        return Err(Error::toolchain(
            tool,
            format!("expected build output {} was not produced", output.display()),
        ));
    }

    let artifact = bin_dir.join(constants::WASM_ARTIFACT);
    if output != artifact {
        fs.copy(&output, &artifact)?;
    }

    let sha256 = sha256_hex(&fs.read(&artifact)?);
    tracing::info!(package = %package, artifact = %artifact.display(), %sha256, "build complete");

    Ok(BuildOutcome {
        package,
        language,
        artifact,
        sha256,
    })
}
