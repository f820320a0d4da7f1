//! `compute init`: lays out a new compute package on disk.

use crate::constants;
use crate::error::Error;
use crate::fs::FileSystem;
use crate::manifest::{Language, Manifest};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("Regex pattern is hardcoded and valid")
});

const RUST_MAIN: &str = r#"use fastly::http::StatusCode;
use fastly::{Error, Request, Response};

#[fastly::main]
fn main(req: Request) -> Result<Response, Error> {
    match req.get_path() {
        "/" => Ok(Response::from_status(StatusCode::OK)
            .with_body_text_plain("Welcome to Compute\n")),
        _ => Ok(Response::from_status(StatusCode::NOT_FOUND)
            .with_body_text_plain("The page you requested could not be found\n")),
    }
}
"#;

const GO_MAIN: &str = r#"package main

import (
	"context"
	"fmt"

	"github.com/fastly/compute-sdk-go/fsthttp"
)

func main() {
	fsthttp.ServeFunc(func(ctx context.Context, w fsthttp.ResponseWriter, r *fsthttp.Request) {
		if r.URL.Path != "/" {
			w.WriteHeader(fsthttp.StatusNotFound)
			fmt.Fprintln(w, "The page you requested could not be found")
			return
		}
		fmt.Fprintln(w, "Welcome to Compute")
	})
}
"#;

/// What `compute init` should create.
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub name: String,
    pub description: String,
    pub authors: Vec<String>,
    pub language: Language,
    pub service_id: Option<String>,
    pub dir: PathBuf,
    pub force: bool,
}

/// Checks a package name against the accepted pattern.
///
/// # Errors
///
/// Returns a validation error naming the offending value.
pub fn validate_package_name(name: &str) -> Result<(), Error> {
    if PACKAGE_NAME.is_match(name) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "invalid package name '{name}': must start with a letter or digit and contain only letters, digits, '-' and '_'"
        )))
    }
}

/// Derives a default package name from the target directory.
#[must_use]
pub fn default_package_name(dir: &Path) -> Option<String> {
    let name = dir.file_name()?.to_str()?;
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    let cleaned = cleaned.trim_start_matches(['-', '_']).to_string();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Source files for a language, relative to the package root.
fn templates(options: &InitOptions) -> Vec<(PathBuf, String)> {
    match options.language {
        Language::Rust => {
            let authors = options
                .authors
                .iter()
                .map(|a| toml::Value::String(a.clone()).to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let cargo_toml = format!(
                "[package]\nname = \"{name}\"\nversion = \"0.1.0\"\nauthors = [{authors}]\nedition = \"2021\"\npublish = false\n\n[profile.release]\ndebug = 1\n\n[dependencies]\nfastly = \"0.11\"\n",
                name = options.name,
            );
            vec![
                (PathBuf::from("Cargo.toml"), cargo_toml),
                (PathBuf::from("src").join("main.rs"), RUST_MAIN.to_string()),
                (
                    PathBuf::from(".gitignore"),
                    "/target\n/bin\n/pkg\n".to_string(),
                ),
            ]
        }
        Language::Go => {
            let go_mod = format!(
                "module {}\n\ngo 1.21\n\nrequire github.com/fastly/compute-sdk-go v1.3.0\n",
                options.name
            );
            vec![
                (PathBuf::from("go.mod"), go_mod),
                (PathBuf::from("main.go"), GO_MAIN.to_string()),
                (PathBuf::from(".gitignore"), "/bin\n/pkg\n".to_string()),
            ]
        }
    }
}

/// Writes the manifest and language sources into `options.dir`.
///
/// Returns the paths written, manifest first.
///
/// # Errors
///
/// Returns an error if the name is invalid, the directory is not empty and
/// `force` is unset, or any file cannot be written.
pub fn init<F: FileSystem>(fs: &F, options: &InitOptions) -> Result<Vec<PathBuf>, Error> {
    validate_package_name(&options.name)?;

    if fs.is_dir(&options.dir) {
        let entries = fs.read_dir(&options.dir)?;
        if !entries.is_empty() && !options.force {
            return Err(Error::Validation(format!(
                "directory {} is not empty; use --force to initialize anyway",
                options.dir.display()
            )));
        }
    } else if fs.exists(&options.dir) {
        return Err(Error::Validation(format!(
            "{} exists and is not a directory",
            options.dir.display()
        )));
    }
    fs.create_dir_all(&options.dir)?;

    let mut manifest = Manifest::new(&options.name, options.language);
    manifest.description.clone_from(&options.description);
    manifest.authors.clone_from(&options.authors);
    manifest.service_id = options
        .service_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let manifest_path = options.dir.join(constants::MANIFEST_FILENAME);
    manifest.save(fs, &manifest_path)?;
    let mut written = vec![manifest_path];

    for (relative, content) in templates(options) {
        let path = options.dir.join(relative);
        if let Some(parent) = path.parent() {
            fs.create_dir_all(parent)?;
        }
        fs.write_all(&path, content.as_bytes())?;
        tracing::debug!(path = %path.display(), "wrote scaffold file");
        written.push(path);
    }

    Ok(written)
}
