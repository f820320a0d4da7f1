//! Output abstraction for quiet mode and structured rendering.
//!
//! This module distinguishes between:
//! - Informational messages (suppressed in quiet mode)
//! - Success messages (suppressed in quiet mode)
//! - Data output (never suppressed), rendered as text, JSON or YAML
//!
//! Everything is written to a caller-supplied [`Write`] so command handlers
//! can be exercised against an in-memory buffer.

use crate::cli::OutputFormat;
use crate::constants;
use crate::error::Error;
use indexmap::IndexMap;
use serde::Serialize;
use std::io::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output handler that respects quiet mode and the selected data format.
///
/// Quiet mode is enabled if either `--quiet` is passed or `--json-errors` is used.
#[derive(Debug, Clone)]
pub struct Output {
    quiet: bool,
    format: OutputFormat,
}

impl Default for Output {
    fn default() -> Self {
        Self::new(false, false, OutputFormat::Text)
    }
}

impl Output {
    /// Create new Output handler.
    #[must_use]
    pub const fn new(quiet: bool, json_errors: bool, format: OutputFormat) -> Self {
        Self {
            quiet: quiet || json_errors,
            format,
        }
    }

    /// Print informational message (suppressed in quiet mode).
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn info(&self, w: &mut dyn Write, msg: impl std::fmt::Display) -> Result<(), Error> {
        if !self.quiet {
            writeln!(w, "{msg}")?;
        }
        Ok(())
    }

    /// Print a `SUCCESS:` confirmation line (suppressed in quiet mode).
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn success(&self, w: &mut dyn Write, msg: impl std::fmt::Display) -> Result<(), Error> {
        if !self.quiet {
            writeln!(w, "{} {msg}", constants::SUCCESS_PREFIX)?;
        }
        Ok(())
    }

    /// Render a single resource. Text mode prints aligned `Key: value` lines.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the writer fails.
    pub fn record<T: Serialize>(
        &self,
        w: &mut dyn Write,
        value: &T,
        fields: &IndexMap<&'static str, String>,
    ) -> Result<(), Error> {
        match self.format {
            OutputFormat::Json => writeln!(w, "{}", serde_json::to_string_pretty(value)?)?,
            OutputFormat::Yaml => write!(w, "{}", serde_yaml::to_string(value)?)?,
            OutputFormat::Text => {
                let width = fields.keys().map(|k| k.len()).max().unwrap_or(0);
                for (key, val) in fields {
                    writeln!(w, "{:<width$} {val}", format!("{key}:"), width = width + 1)?;
                }
            }
        }
        Ok(())
    }

    /// Render a collection. Text mode prints a table built from `rows`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the writer fails.
    pub fn list<T: Serialize, R: Tabled>(
        &self,
        w: &mut dyn Write,
        values: &[T],
        rows: Vec<R>,
    ) -> Result<(), Error> {
        match self.format {
            OutputFormat::Json => writeln!(w, "{}", serde_json::to_string_pretty(values)?)?,
            OutputFormat::Yaml => write!(w, "{}", serde_yaml::to_string(values)?)?,
            OutputFormat::Text => {
                if rows.is_empty() {
                    writeln!(w, "{}", constants::EMPTY_LIST)?;
                } else {
                    let mut table = Table::new(rows);
                    table.with(Style::blank());
                    writeln!(w, "{table}")?;
                }
            }
        }
        Ok(())
    }

    /// The selected data format.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Check if quiet mode is enabled.
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }
}

/// Formats an optional value for text output.
#[must_use]
pub fn display_opt<T: std::fmt::Display>(value: Option<&T>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled, Serialize)]
    struct Row {
        #[tabled(rename = "NAME")]
        name: String,
    }

    fn render(output: &Output, f: impl FnOnce(&Output, &mut Vec<u8>)) -> String {
        let mut buf = Vec::new();
        f(output, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_quiet_mode_from_quiet_flag() {
        let output = Output::new(true, false, OutputFormat::Text);
        assert!(output.is_quiet());
    }

    #[test]
    fn test_quiet_mode_from_json_errors() {
        let output = Output::new(false, true, OutputFormat::Text);
        assert!(output.is_quiet());
    }

    #[test]
    fn test_success_prefix_and_quiet_suppression() {
        let loud = render(&Output::default(), |o, buf| {
            o.success(buf, "Deleted service abc").unwrap();
        });
        assert_eq!(loud, "SUCCESS: Deleted service abc\n");

        let quiet = render(&Output::new(true, false, OutputFormat::Text), |o, buf| {
            o.success(buf, "Deleted service abc").unwrap();
        });
        assert!(quiet.is_empty());
    }

    #[test]
    fn test_record_text_aligns_keys() {
        let mut fields = IndexMap::new();
        fields.insert("Name", "logs".to_string());
        fields.insert("Bucket", "my-bucket".to_string());
        let text = render(&Output::default(), |o, buf| {
            o.record(buf, &serde_json::json!({}), &fields).unwrap();
        });
        assert_eq!(text, "Name:   logs\nBucket: my-bucket\n");
    }

    #[test]
    fn test_list_json_ignores_rows() {
        let output = Output::new(false, false, OutputFormat::Json);
        let text = render(&output, |o, buf| {
            o.list(buf, &[serde_json::json!({"name": "a"})], Vec::<Row>::new())
                .unwrap();
        });
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["name"], "a");
    }

    #[test]
    fn test_list_text_empty() {
        let text = render(&Output::default(), |o, buf| {
            o.list::<serde_json::Value, Row>(buf, &[], vec![]).unwrap();
        });
        assert_eq!(text, "(none)\n");
    }
}
