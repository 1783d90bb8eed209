// crates/yieldlens-cli/src/output.rs
//
// Output formatting utilities for the yieldlens CLI.
// Supports table and JSON output modes.

use clap::ValueEnum;
use serde::Serialize;
use tabled::{Table, Tabled};
use yieldlens_rewards::write_csv;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
    /// Comma-separated values with a header row, for spreadsheets.
    Csv,
}

impl OutputFormat {
    /// Parse a format name from the config file, falling back to tables.
    pub fn from_config(name: &str) -> Self {
        match OutputFormat::from_str(name, true) {
            Ok(format) => format,
            Err(_) => {
                tracing::warn!("Unknown output format {:?} in config, using table", name);
                OutputFormat::Table
            }
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data)
        .unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Format a slice of Tabled items as CSV, using the table headers as the
/// header row.
pub fn format_csv<T: Tabled>(data: &[T]) -> String {
    let header: Vec<String> = T::headers().into_iter().map(|h| h.into_owned()).collect();
    let rows = data.iter().map(|item| {
        item.fields()
            .into_iter()
            .map(|f| f.into_owned())
            .collect::<Vec<String>>()
    });
    write_csv(std::iter::once(header).chain(rows))
}

/// Format a fraction as a percentage with two decimals.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Format a fiat amount with two decimals.
pub fn format_fiat(amount: f64) -> String {
    format!("{:.2}", amount)
}
