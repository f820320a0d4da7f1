//! Tracing subscriber setup for the CLI.
//!
//! Diagnostics go to stderr (or `FASTLY_LOG_FILE`) so stdout stays reserved
//! for command output.

use crate::constants;
use std::fs::{File, OpenOptions};
use std::sync::Arc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match std::env::var(constants::ENV_LOG_FORMAT) {
            Err(_) => Self::Text,
            Ok(value) => match value.to_lowercase().as_str() {
                "json" => Self::Json,
                "text" => Self::Text,
                other => {
                    // No subscriber yet, so this can only go to stderr directly.
                    eprintln!(
                        "Warning: Unrecognized {} '{other}'. Valid values: 'json', 'text'. Using 'text'.",
                        constants::ENV_LOG_FORMAT
                    );
                    Self::Text
                }
            },
        }
    }
}

/// Maps `-v` occurrences to a filter directive, falling back to `FASTLY_LOG`.
#[must_use]
pub fn log_level(verbosity: u8) -> String {
    match verbosity {
        0 => std::env::var(constants::ENV_LOG).unwrap_or_else(|_| "error".to_string()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn open_log_file(path: &str) -> Option<File> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: Could not open log file '{path}': {e}. Using stderr.");
            None
        }
    }
}

fn make_writer() -> BoxMakeWriter {
    std::env::var(constants::ENV_LOG_FILE)
        .ok()
        .and_then(|path| open_log_file(&path))
        .map_or_else(
            || BoxMakeWriter::new(std::io::stderr),
            |file| BoxMakeWriter::new(Arc::new(file)),
        )
}

/// Installs the global subscriber. Call once, before any command runs.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_new(log_level(verbosity)).unwrap_or_else(|_| EnvFilter::new("error"));
    let registry = tracing_subscriber::registry().with(filter);

    match LogFormat::from_env() {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_span_list(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(make_writer()),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(make_writer()),
            )
            .init(),
    }
}
