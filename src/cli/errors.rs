//! Error display formatting for the CLI.

use crate::error::Error;
use std::fmt::Write as _;

/// Prints an error message, either as JSON or user-friendly format.
pub fn print_error_with_json(error: &Error, json_format: bool) {
    if !json_format {
        print_error(error);
        return;
    }
    let json_error = error.to_json();
    let Ok(json_output) = serde_json::to_string_pretty(&json_error) else {
        print_error(error);
        return;
    };
    eprintln!("{json_output}");
}

/// Prints a user-friendly error message with context and suggestions.
pub fn print_error(error: &Error) {
    eprintln!("{}", format_error(error));
}

/// Heading line for an error kind.
fn heading(error: &Error) -> &'static str {
    match error {
        Error::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => "File Not Found",
            std::io::ErrorKind::PermissionDenied => "Permission Denied",
            _ => "File System Error",
        },
        Error::Network(req_err) if req_err.is_connect() => "Connection Error",
        Error::Network(req_err) if req_err.is_timeout() => "Timeout Error",
        Error::Network(_) => "Network Error",
        Error::Api { status, .. } => match status {
            401 => "Authentication Error",
            403 => "Permission Error",
            404 => "Not Found Error",
            429 => "Rate Limited",
            500..=599 => "Server Error",
            _ => "API Error",
        },
        Error::Yaml(_) => "YAML Parsing Error",
        Error::Json(_) => "JSON Parsing Error",
        Error::Toml(_) => "TOML Parsing Error",
        Error::Config(_) | Error::NoToken => "Configuration Error",
        Error::Validation(_) | Error::NoServiceId => "Validation Error",
        Error::Toolchain { .. } => "Toolchain Error",
        Error::Anyhow(_) => "Error",
    }
}

/// Renders the message block printed to stderr.
#[must_use]
pub fn format_error(error: &Error) -> String {
    let mut text = format!("{}\n{error}", heading(error));
    if let Error::Api {
        detail: Some(detail),
        ..
    } = error
    {
        let _ = write!(text, "\n{detail}");
    }
    if let Some(hint) = error.hint() {
        let _ = write!(text, "\n\nHint: {hint}");
    }
    text
}
