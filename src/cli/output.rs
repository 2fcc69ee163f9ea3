//! Output formatting for multiple formats
//!
//! This module provides formatters for the conversion report: JSON for
//! machine consumers, a human-readable text report, and GitHub Actions
//! `key=value` output lines for workflow steps.
//!
//! # Example
//!
//! ```ignore
//! use packmorph::cli::output::{OutputFormat, OutputFormatter};
//!
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! let output = formatter.format(&report)?;
//! println!("{}", output);
//! ```

use anyhow::{Context, Result};

use crate::output::ConversionReport;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable formatted text
    Human,
    /// GitHub Actions key=value output lines
    Github,
}

/// Output formatter for conversion reports
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Creates a new output formatter with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a conversion report according to the configured format
    pub fn format(&self, report: &ConversionReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_json(report),
            OutputFormat::Human => self.format_human(report),
            OutputFormat::Github => Ok(self.format_github(report)),
        }
    }

    fn format_json(&self, report: &ConversionReport) -> Result<String> {
        serde_json::to_string_pretty(report)
            .context("Failed to serialize conversion report to JSON")
    }

    fn format_github(&self, report: &ConversionReport) -> String {
        report
            .ci_outputs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("\n")
            + "\n"
    }

    fn format_human(&self, report: &ConversionReport) -> Result<String> {
        let mut output = String::new();

        if let Some(ref message) = report.error_message {
            output.push_str("\u{2717} Package Conversion Failed\n");
            output.push_str(&"\u{2501}".repeat(42));
            output.push_str("\n\n");
            output.push_str(&format!("Error: {}\n", message));
            return Ok(output);
        }

        if report.is_boilerplate {
            output.push_str("\u{2713} Boilerplate Package Detected\n");
        } else {
            output.push_str("\u{2717} Not a Boilerplate Package\n");
        }
        output.push_str(&"\u{2501}".repeat(42));
        output.push_str("\n\n");

        if let Some(ref path) = report.content_package_path {
            output.push_str(&format!("Package:  {}\n", path.display()));
        }

        if !report.page_paths.is_empty() {
            output.push_str("\nDeclared Paths:\n");
            for (i, path) in report.page_paths.iter().enumerate() {
                let is_last = i == report.page_paths.len() - 1;
                let connector = if is_last { "\u{2514}" } else { "\u{251C}" };
                output.push_str(&format!("{}\u{2500} {}\n", connector, path));
            }
        }

        if let Some(ref archive) = report.converted_package_path {
            output.push_str("\nConversion:\n");
            output.push_str(&format!("\u{251C}\u{2500} Archive: {}\n", archive.display()));
            for (i, path) in report.converted_page_paths.iter().enumerate() {
                let is_last = i == report.converted_page_paths.len() - 1;
                let connector = if is_last { "\u{2514}" } else { "\u{251C}" };
                output.push_str(&format!("{}\u{2500} {}\n", connector, path));
            }
        }

        output.push_str(&format!(
            "\nProcessed in {}ms\n",
            report.processing_time_ms
        ));

        Ok(output)
    }
}
