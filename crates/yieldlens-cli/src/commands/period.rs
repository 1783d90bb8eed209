// crates/yieldlens-cli/src/commands/period.rs
//
// `yieldlens period <name>`: show the timestamp range of a reporting period.

use chrono::{DateTime, Utc};
use clap::Args;
use tabled::Tabled;

use yieldlens_rewards::{period_to_date_range_timestamps, DateRange};

use crate::output::{format_csv, format_json, format_table, OutputFormat};

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Arguments of the period command.
#[derive(Debug, Args)]
pub struct PeriodCmd {
    /// Period name: all, year-to-date, or last-year.
    name: String,
}

#[derive(Tabled)]
struct BoundRow {
    bound: &'static str,
    nanos: String,
    date: String,
}

fn bound_row(bound: &'static str, nanos: Option<u64>) -> BoundRow {
    match nanos {
        Some(ns) => {
            let date = i64::try_from(ns / NANOS_PER_SECOND)
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, (ns % NANOS_PER_SECOND) as u32))
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default();
            BoundRow {
                bound,
                nanos: ns.to_string(),
                date,
            }
        }
        None => BoundRow {
            bound,
            nanos: "-".to_string(),
            date: "open".to_string(),
        },
    }
}

fn rows(range: &DateRange) -> Vec<BoundRow> {
    vec![bound_row("from", range.from), bound_row("to", range.to)]
}

/// Run the period command.
pub fn run(cmd: &PeriodCmd, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let range = period_to_date_range_timestamps(&cmd.name, Utc::now())?;
    match format {
        OutputFormat::Json => println!("{}", format_json(&range)),
        OutputFormat::Table => println!("{}", format_table(&rows(&range))),
        OutputFormat::Csv => print!("{}", format_csv(&rows(&range))),
    }
    Ok(())
}
