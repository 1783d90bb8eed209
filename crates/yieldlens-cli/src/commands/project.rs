// crates/yieldlens-cli/src/commands/project.rs
//
// `yieldlens project`: run the staking reward projection on a JSON snapshot
// of all upstream inputs.

use std::fs;

use chrono::NaiveDate;
use clap::Args;
use tabled::Tabled;

use yieldlens_core::NNS_GOVERNANCE_ID;
use yieldlens_rewards::{
    staking_reward_data, StakingRewardData, StakingRewardInputs, StakingRewardResult,
};

use crate::output::{
    format_csv, format_fiat, format_json, format_percent, format_table, OutputFormat,
};

/// Arguments of the project command.
#[derive(Debug, Args)]
pub struct ProjectCmd {
    /// Path to a JSON file with the input snapshot.
    #[arg(long)]
    input: String,
    /// First simulated day (YYYY-MM-DD). Defaults to the snapshot's date, then today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Tabled)]
struct SummaryRow {
    metric: &'static str,
    value: String,
}

#[derive(Tabled)]
struct ApyRow {
    network: String,
    current: String,
    maximum: String,
}

fn summary_rows(data: &StakingRewardData) -> Vec<SummaryRow> {
    vec![
        SummaryRow {
            metric: "Reward balance",
            value: format_fiat(data.reward_balance_fiat),
        },
        SummaryRow {
            metric: "Estimated rewards (7 days)",
            value: format_fiat(data.reward_estimate_week_fiat),
        },
        SummaryRow {
            metric: "Staked value",
            value: format_fiat(data.staking_power_fiat),
        },
        SummaryRow {
            metric: "Staking power",
            value: format_percent(data.staking_power),
        },
    ]
}

fn apy_rows(data: &StakingRewardData) -> Vec<ApyRow> {
    data.apy
        .iter()
        .map(|(key, apy)| ApyRow {
            network: if key == NNS_GOVERNANCE_ID {
                "NNS".to_string()
            } else {
                key.clone()
            },
            current: format_percent(apy.cur),
            maximum: format_percent(apy.max),
        })
        .collect()
}

/// Run the project command.
pub fn run(cmd: &ProjectCmd, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(&cmd.input)?;
    let mut inputs: StakingRewardInputs = serde_json::from_str(&contents)?;
    if cmd.date.is_some() {
        inputs.force_initial_date = cmd.date;
    }
    tracing::info!("Loaded snapshot from {}", cmd.input);

    let result = staking_reward_data(&inputs);
    if result.is_loading() {
        tracing::warn!("Snapshot {} is missing inputs; no figures computed", cmd.input);
    }

    if format == OutputFormat::Json {
        println!("{}", format_json(&result));
        return Ok(());
    }

    match &result {
        StakingRewardResult::Loading => {
            println!("Snapshot is incomplete; the projection is still loading.");
        }
        StakingRewardResult::Error { error } => {
            println!("Error: {}", error);
        }
        StakingRewardResult::Ready(data) if format == OutputFormat::Csv => {
            print!("{}", format_csv(&summary_rows(data)));
            println!();
            print!("{}", format_csv(&apy_rows(data)));
        }
        StakingRewardResult::Ready(data) => {
            println!("{}", format_table(&summary_rows(data)));
            println!();
            println!("{}", format_table(&apy_rows(data)));
        }
    }

    Ok(())
}
