// crates/yieldlens-rewards/src/lib.rs
//
// yieldlens-rewards: staking reward and APY projection for the primary
// network (NNS) and its sub-networks (SNS), plus reporting helpers.
//
// The engine is a pure function of in-memory snapshots: it never fetches
// anything and never mutates its inputs. All token amounts are integer e8s;
// only fiat values and ratios are floats.

pub mod aggregation;
pub mod calculator;
pub mod decimal;
pub mod params;
pub mod reporting;
pub mod reward_rate;
pub mod simulation;
pub mod token;
pub mod voting_power;

// Re-export key types for ergonomic access from downstream crates.
pub use aggregation::Apy;
pub use calculator::{
    staking_reward_data, StakingRewardData, StakingRewardInputs, StakingRewardResult,
    CALCULATION_ERROR, NOT_AUTHORIZED,
};
pub use decimal::{div_ratio, mul_ratio};
pub use params::RewardParams;
pub use reporting::{
    fetch_all_transactions, fetch_all_transactions_with, period_to_date_range_timestamps,
    report_lines, transactions_to_csv, write_csv, AccountTransaction, DateRange, Direction,
    FetchOptions, ReportLine, ReportingPeriod, TransactionPage, TransactionSource,
    REPORT_COLUMNS,
};
pub use reward_rate::{daily_pool_reward, reward_rate, DAYS_PER_AVERAGE_YEAR};
pub use simulation::{simulate_rewards, Simulation, SimulationOutcome};
pub use token::Tokens;
pub use voting_power::{bonus_ratio, is_eligible, BonusParams};
