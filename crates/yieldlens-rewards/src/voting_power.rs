// crates/yieldlens-rewards/src/voting_power.rs
//
// Voting power bonus and reward eligibility of a single neuron.
//
// Voting power = stake * (1 + dissolve_bonus) * (1 + age_bonus), where each
// bonus ramps linearly from 0 to its cap as the dissolve delay (or age)
// approaches its maximum:
//   dissolve_bonus = min(delay, delay_max) / delay_max * delay_bonus_cap
//   age_bonus      = min(age, age_max) / age_max * age_bonus_cap
//
// Both are evaluated at a reference date so that a neuron which keeps
// dissolving (or aging) during a simulation is scored as of each day.

use serde::{Deserialize, Serialize};
use yieldlens_core::Neuron;

use crate::decimal::mul_ratio;

/// Fixed-point precision used when applying the voting power multiplier.
pub const VOTING_POWER_PRECISION: u32 = 20;

/// Bonus caps of one network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusParams {
    pub dissolve_max_seconds: u64,
    pub dissolve_bonus: f64,
    pub age_max_seconds: u64,
    pub age_bonus: f64,
}

fn linear_bonus(value: u64, max: u64, cap: f64) -> f64 {
    if max == 0 {
        return 0.0;
    }
    value.min(max) as f64 / max as f64 * cap
}

/// Combined bonus of `neuron` at `reference_ts`, i.e. voting power / stake - 1.
pub fn bonus_ratio(neuron: &Neuron, params: &BonusParams, reference_ts: u64) -> f64 {
    let dissolve = linear_bonus(
        neuron.dissolve_delay_at(reference_ts),
        params.dissolve_max_seconds,
        params.dissolve_bonus,
    );
    let age = linear_bonus(
        neuron.age_at(reference_ts),
        params.age_max_seconds,
        params.age_bonus,
    );
    (1.0 + dissolve) * (1.0 + age) - 1.0
}

/// Voting power of `neuron` at `reference_ts`, in e8s.
pub fn voting_power_e8s(neuron: &Neuron, params: &BonusParams, reference_ts: u64) -> u64 {
    let ratio = 1.0 + bonus_ratio(neuron, params, reference_ts);
    mul_ratio(neuron.stake_after_fees_e8s(), ratio, VOTING_POWER_PRECISION)
}

/// Whether `neuron` earns rewards on the day of `reference_ts`.
///
/// Both thresholds are inclusive.
pub fn is_eligible(
    neuron: &Neuron,
    min_stake_e8s: u64,
    min_dissolve_delay_seconds: u64,
    reference_ts: u64,
) -> bool {
    neuron.stake_after_fees_e8s() >= min_stake_e8s
        && neuron.dissolve_delay_at(reference_ts) >= min_dissolve_delay_seconds
}

#[cfg(test)]
mod tests {
    use super::*;
    use yieldlens_core::DissolveState;

    const DAY: u64 = 86_400;

    fn params() -> BonusParams {
        BonusParams {
            dissolve_max_seconds: 800 * DAY,
            dissolve_bonus: 1.0,
            age_max_seconds: 400 * DAY,
            age_bonus: 0.25,
        }
    }

    fn neuron(stake: u64, state: DissolveState, aging_since: u64) -> Neuron {
        Neuron {
            id: "n".to_string(),
            cached_stake_e8s: stake,
            fees_e8s: 0,
            maturity_e8s: 0,
            staked_maturity_e8s: 0,
            dissolve_state: state,
            aging_since_timestamp_seconds: aging_since,
        }
    }

    fn locked(delay: u64) -> DissolveState {
        DissolveState::NotDissolving {
            dissolve_delay_seconds: delay,
        }
    }

    #[test]
    fn test_no_bonus() {
        let n = neuron(100, locked(0), 1_000 * DAY);
        assert_eq!(bonus_ratio(&n, &params(), 1_000 * DAY), 0.0);
        assert_eq!(voting_power_e8s(&n, &params(), 1_000 * DAY), 100);
    }

    #[test]
    fn test_max_dissolve_bonus() {
        let n = neuron(100_000_000, locked(800 * DAY), 1_000 * DAY);
        assert_eq!(bonus_ratio(&n, &params(), 1_000 * DAY), 1.0);
        assert_eq!(voting_power_e8s(&n, &params(), 1_000 * DAY), 200_000_000);
    }

    #[test]
    fn test_dissolve_bonus_is_capped() {
        let n = neuron(100, locked(5_000 * DAY), 1_000 * DAY);
        assert_eq!(bonus_ratio(&n, &params(), 1_000 * DAY), 1.0);
    }

    #[test]
    fn test_half_dissolve_bonus() {
        let n = neuron(100, locked(400 * DAY), 0);
        assert_eq!(bonus_ratio(&n, &params(), 0), 0.5);
    }

    #[test]
    fn test_bonuses_multiply() {
        // Full dissolve bonus and full age bonus: 2.0 * 1.25 = 2.5
        let n = neuron(100_000_000, locked(800 * DAY), 0);
        let ratio = bonus_ratio(&n, &params(), 400 * DAY);
        assert!((ratio - 1.5).abs() < 1e-12);
        assert_eq!(voting_power_e8s(&n, &params(), 400 * DAY), 250_000_000);
    }

    #[test]
    fn test_dissolving_neuron_loses_bonus_over_time() {
        let n = neuron(
            100,
            DissolveState::Dissolving {
                when_dissolved_timestamp_seconds: 800 * DAY,
            },
            0,
        );
        let early = bonus_ratio(&n, &params(), 0);
        let late = bonus_ratio(&n, &params(), 600 * DAY);
        assert_eq!(early, 1.0);
        assert_eq!(late, 0.25);
    }

    #[test]
    fn test_zero_maximums_give_zero_bonus() {
        let zero = BonusParams {
            dissolve_max_seconds: 0,
            dissolve_bonus: 1.0,
            age_max_seconds: 0,
            age_bonus: 0.25,
        };
        let n = neuron(100, locked(800 * DAY), 0);
        assert_eq!(bonus_ratio(&n, &zero, 400 * DAY), 0.0);
    }

    #[test]
    fn test_eligibility_boundary() {
        let n = neuron(1_000, locked(500), 0);
        assert!(is_eligible(&n, 1_000, 500, 0));
        assert!(!is_eligible(&n, 1_001, 500, 0));
        assert!(!is_eligible(&n, 1_000, 501, 0));
    }

    #[test]
    fn test_eligibility_tracks_dissolving_delay() {
        let n = neuron(
            1_000,
            DissolveState::Dissolving {
                when_dissolved_timestamp_seconds: 10 * DAY,
            },
            0,
        );
        assert!(is_eligible(&n, 0, 5 * DAY, 5 * DAY));
        assert!(!is_eligible(&n, 0, 5 * DAY, 5 * DAY + 1));
    }
}
