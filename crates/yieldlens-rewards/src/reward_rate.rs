// crates/yieldlens-rewards/src/reward_rate.rs
//
// Pool reward rate curve.
//
// The yearly reward rate, as a fraction of total supply, decays quadratically
// from the initial rate at genesis to the final rate at the end of the
// transition window and stays there afterwards:
//
//   elapsed   = round((t - genesis) / 1 day)
//   remaining = (transition_days - elapsed) / transition_days
//   rate(t)   = final + (initial - final) * remaining^2     if elapsed <= transition_days
//             = final                                       otherwise
//
// The daily pool reward is total_supply * rate / 365.25.

use crate::params::{RewardParams, SECONDS_PER_DAY};

/// Days in an average year (leap years included).
pub const DAYS_PER_AVERAGE_YEAR: f64 = 365.25;

/// Whole days between genesis and `reference_ts`, rounded to the nearest day.
///
/// Dates before genesis count as day zero.
pub fn elapsed_days(genesis_timestamp_seconds: u64, reference_ts: u64) -> f64 {
    let elapsed_seconds = reference_ts as f64 - genesis_timestamp_seconds as f64;
    (elapsed_seconds / SECONDS_PER_DAY as f64).round().max(0.0)
}

/// Yearly reward rate at `reference_ts`.
///
/// A zero-length transition window means the final rate applies from genesis.
pub fn reward_rate(params: &RewardParams, reference_ts: u64) -> f64 {
    let transition_days =
        params.reward_rate_transition_duration_seconds as f64 / SECONDS_PER_DAY as f64;
    let elapsed = elapsed_days(params.genesis_timestamp_seconds, reference_ts);

    if transition_days <= 0.0 || elapsed > transition_days {
        return params.final_reward_rate;
    }

    let remaining = (transition_days - elapsed) / transition_days;
    params.final_reward_rate
        + (params.initial_reward_rate - params.final_reward_rate) * remaining * remaining
}

/// Reward (in e8s, fractional) distributed to the whole pool on the day of
/// `reference_ts`.
pub fn daily_pool_reward(params: &RewardParams, reference_ts: u64) -> f64 {
    params.total_supply_e8s as f64 * reward_rate(params, reference_ts) / DAYS_PER_AVERAGE_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: u64 = 1_600_000_000;

    fn params(transition_days: u64) -> RewardParams {
        RewardParams {
            minimum_stake_e8s: 0,
            minimum_dissolve_delay_seconds: 0,
            max_dissolve_delay_seconds: 0,
            max_dissolve_delay_bonus: 0.0,
            max_age_seconds: 0,
            max_age_bonus: 0.0,
            initial_reward_rate: 0.10,
            final_reward_rate: 0.05,
            reward_rate_transition_duration_seconds: transition_days * SECONDS_PER_DAY,
            genesis_timestamp_seconds: GENESIS,
            total_supply_e8s: 1_000_000_000_000,
        }
    }

    fn day(n: u64) -> u64 {
        GENESIS + n * SECONDS_PER_DAY
    }

    #[test]
    fn test_rate_at_genesis_is_initial() {
        assert_eq!(reward_rate(&params(100), GENESIS), 0.10);
    }

    #[test]
    fn test_rate_at_transition_end_is_final() {
        assert_eq!(reward_rate(&params(100), day(100)), 0.05);
    }

    #[test]
    fn test_rate_after_transition_is_final() {
        assert_eq!(reward_rate(&params(100), day(101)), 0.05);
        assert_eq!(reward_rate(&params(100), day(10_000)), 0.05);
    }

    #[test]
    fn test_rate_halfway_is_quadratic() {
        // remaining = 0.5 -> 0.05 + 0.05 * 0.25
        let rate = reward_rate(&params(100), day(50));
        assert!((rate - 0.0625).abs() < 1e-15);
    }

    #[test]
    fn test_elapsed_days_rounds() {
        assert_eq!(elapsed_days(GENESIS, day(3) + SECONDS_PER_DAY / 2), 4.0);
        assert_eq!(elapsed_days(GENESIS, day(3) + SECONDS_PER_DAY / 2 - 1), 3.0);
    }

    #[test]
    fn test_before_genesis_uses_initial_rate() {
        assert_eq!(elapsed_days(GENESIS, GENESIS - 10 * SECONDS_PER_DAY), 0.0);
        assert_eq!(reward_rate(&params(100), GENESIS - 10 * SECONDS_PER_DAY), 0.10);
    }

    #[test]
    fn test_zero_transition_uses_final_rate() {
        assert_eq!(reward_rate(&params(0), GENESIS), 0.05);
        assert_eq!(reward_rate(&params(0), day(5)), 0.05);
    }

    #[test]
    fn test_missing_genesis_means_fully_transitioned() {
        let mut p = params(365);
        p.genesis_timestamp_seconds = 0;
        assert_eq!(reward_rate(&p, GENESIS), 0.05);
    }

    #[test]
    fn test_daily_pool_reward() {
        let reward = daily_pool_reward(&params(100), day(100));
        let expected = 1_000_000_000_000f64 * 0.05 / 365.25;
        assert_eq!(reward, expected);
    }
}
