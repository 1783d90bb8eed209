// crates/yieldlens-rewards/src/params.rs
//
// Reward parameter resolution.
//
// Every simulation runs against one normalized `RewardParams` value. For the
// primary network (NNS) most values are compiled-in governance policy; only the
// minimum stake, the minimum dissolve delay and the total supply come from
// live snapshots. For a sub-network (SNS) everything comes from the project's
// own system parameters and metrics:
//   - basis-point fields are divided by 10_000,
//   - whole-percent fields are divided by 100,
//   - missing optional fields become zero.

use serde::{Deserialize, Serialize};
use yieldlens_core::{GovernanceMetrics, NetworkEconomics, SnsProject, YieldError, E8S_PER_TOKEN};

use crate::voting_power::BonusParams;

/// Seconds in a day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Seconds in an average (365.25 day) year.
pub const SECONDS_PER_YEAR: u64 = 31_557_600;

/// NNS maximum dissolve delay: 8 years.
pub const NNS_MAX_DISSOLVE_DELAY_SECONDS: u64 = 8 * SECONDS_PER_YEAR;

/// NNS dissolve delay bonus at the maximum delay (+100%).
pub const NNS_MAX_DISSOLVE_DELAY_BONUS: f64 = 1.0;

/// NNS age at which the age bonus stops growing: 4 years.
pub const NNS_MAX_AGE_SECONDS: u64 = 4 * SECONDS_PER_YEAR;

/// NNS age bonus at the maximum age (+25%).
pub const NNS_MAX_AGE_BONUS: f64 = 0.25;

/// NNS reward rate at genesis (10% of supply per year).
pub const NNS_INITIAL_REWARD_RATE: f64 = 0.10;

/// NNS reward rate after the transition (5% of supply per year).
pub const NNS_FINAL_REWARD_RATE: f64 = 0.05;

/// NNS reward rate transition: 8 years.
pub const NNS_REWARD_RATE_TRANSITION_SECONDS: u64 = 8 * SECONDS_PER_YEAR;

/// NNS genesis: 2021-05-10T00:00:00Z.
pub const NNS_GENESIS_TIMESTAMP_SECONDS: u64 = 1_620_604_800;

/// Minimum dissolve delay to vote when the economics snapshot does not say: six months.
pub const NNS_DEFAULT_MIN_DISSOLVE_DELAY_SECONDS: u64 = SECONDS_PER_YEAR / 2;

/// Normalized reward parameters for one network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardParams {
    pub minimum_stake_e8s: u64,
    pub minimum_dissolve_delay_seconds: u64,
    pub max_dissolve_delay_seconds: u64,
    /// Fraction, e.g. 1.0 for +100% at the maximum delay.
    pub max_dissolve_delay_bonus: f64,
    pub max_age_seconds: u64,
    /// Fraction.
    pub max_age_bonus: f64,
    /// Fraction of total supply per year.
    pub initial_reward_rate: f64,
    /// Fraction of total supply per year.
    pub final_reward_rate: f64,
    pub reward_rate_transition_duration_seconds: u64,
    pub genesis_timestamp_seconds: u64,
    pub total_supply_e8s: u64,
}

impl RewardParams {
    /// Parameters for the primary network.
    pub fn for_nns(economics: &NetworkEconomics, metrics: &GovernanceMetrics) -> Self {
        Self {
            minimum_stake_e8s: economics.neuron_minimum_stake_e8s,
            minimum_dissolve_delay_seconds: economics
                .neuron_minimum_dissolve_delay_to_vote_seconds
                .unwrap_or(NNS_DEFAULT_MIN_DISSOLVE_DELAY_SECONDS),
            max_dissolve_delay_seconds: NNS_MAX_DISSOLVE_DELAY_SECONDS,
            max_dissolve_delay_bonus: NNS_MAX_DISSOLVE_DELAY_BONUS,
            max_age_seconds: NNS_MAX_AGE_SECONDS,
            max_age_bonus: NNS_MAX_AGE_BONUS,
            initial_reward_rate: NNS_INITIAL_REWARD_RATE,
            final_reward_rate: NNS_FINAL_REWARD_RATE,
            reward_rate_transition_duration_seconds: NNS_REWARD_RATE_TRANSITION_SECONDS,
            genesis_timestamp_seconds: NNS_GENESIS_TIMESTAMP_SECONDS,
            total_supply_e8s: metrics.total_supply_icp.saturating_mul(E8S_PER_TOKEN),
        }
    }

    /// Parameters for a sub-network.
    ///
    /// # Errors
    /// Returns `YieldError::MissingData` if the project has no metrics at all.
    /// A missing genesis timestamp is only logged and treated as zero.
    pub fn for_sns(project: &SnsProject) -> Result<Self, YieldError> {
        let metrics = project.metrics.as_ref().ok_or_else(|| {
            YieldError::MissingData(format!(
                "metrics for SNS {}",
                project.root_canister_id
            ))
        })?;

        let genesis_timestamp_seconds = match metrics.genesis_timestamp_seconds {
            Some(ts) => ts,
            None => {
                tracing::warn!(
                    "SNS {} has no genesis timestamp, assuming 0",
                    project.root_canister_id
                );
                0
            }
        };

        let p = &project.parameters;
        let rewards = p.voting_rewards_parameters.clone().unwrap_or_default();

        Ok(Self {
            minimum_stake_e8s: p.neuron_minimum_stake_e8s.unwrap_or(0),
            minimum_dissolve_delay_seconds: p
                .neuron_minimum_dissolve_delay_to_vote_seconds
                .unwrap_or(0),
            max_dissolve_delay_seconds: p.max_dissolve_delay_seconds.unwrap_or(0),
            max_dissolve_delay_bonus: percent(p.max_dissolve_delay_bonus_percentage),
            max_age_seconds: p.max_neuron_age_for_age_bonus.unwrap_or(0),
            max_age_bonus: percent(p.max_age_bonus_percentage),
            initial_reward_rate: basis_points(rewards.initial_reward_rate_basis_points),
            final_reward_rate: basis_points(rewards.final_reward_rate_basis_points),
            reward_rate_transition_duration_seconds: rewards
                .reward_rate_transition_duration_seconds
                .unwrap_or(0),
            genesis_timestamp_seconds,
            total_supply_e8s: metrics.total_supply_e8s,
        })
    }

    /// The subset of parameters the voting power bonus depends on.
    pub fn bonus(&self) -> BonusParams {
        BonusParams {
            dissolve_max_seconds: self.max_dissolve_delay_seconds,
            dissolve_bonus: self.max_dissolve_delay_bonus,
            age_max_seconds: self.max_age_seconds,
            age_bonus: self.max_age_bonus,
        }
    }
}

fn basis_points(value: Option<u64>) -> f64 {
    value.unwrap_or(0) as f64 / 10_000.0
}

fn percent(value: Option<u64>) -> f64 {
    value.unwrap_or(0) as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use yieldlens_core::{SnsMetrics, SnsSystemParameters, VotingRewardsParameters};

    fn project(metrics: Option<SnsMetrics>) -> SnsProject {
        SnsProject {
            root_canister_id: "root-1".to_string(),
            ledger_canister_id: "ledger-1".to_string(),
            parameters: SnsSystemParameters {
                neuron_minimum_stake_e8s: Some(100_000_000),
                neuron_minimum_dissolve_delay_to_vote_seconds: Some(2_629_800),
                max_dissolve_delay_seconds: Some(252_460_800),
                max_dissolve_delay_bonus_percentage: Some(100),
                max_neuron_age_for_age_bonus: Some(15_778_800),
                max_age_bonus_percentage: Some(25),
                voting_rewards_parameters: Some(VotingRewardsParameters {
                    initial_reward_rate_basis_points: Some(250),
                    final_reward_rate_basis_points: Some(125),
                    reward_rate_transition_duration_seconds: Some(SECONDS_PER_YEAR),
                }),
            },
            metrics,
        }
    }

    fn metrics() -> SnsMetrics {
        SnsMetrics {
            genesis_timestamp_seconds: Some(1_700_000_000),
            total_supply_e8s: 1_000_000 * E8S_PER_TOKEN,
            voting_power_total_e8s: Some(500_000 * E8S_PER_TOKEN),
        }
    }

    #[test]
    fn test_nns_constants() {
        assert_eq!(NNS_MAX_DISSOLVE_DELAY_SECONDS, 252_460_800);
        assert_eq!(NNS_MAX_AGE_SECONDS, 126_230_400);
        assert_eq!(NNS_DEFAULT_MIN_DISSOLVE_DELAY_SECONDS, 15_778_800);
    }

    #[test]
    fn test_nns_params() {
        let economics = NetworkEconomics {
            neuron_minimum_stake_e8s: E8S_PER_TOKEN,
            neuron_minimum_dissolve_delay_to_vote_seconds: Some(1_000),
        };
        let metrics = GovernanceMetrics {
            total_supply_icp: 500_000_000,
        };
        let params = RewardParams::for_nns(&economics, &metrics);
        assert_eq!(params.minimum_stake_e8s, E8S_PER_TOKEN);
        assert_eq!(params.minimum_dissolve_delay_seconds, 1_000);
        assert_eq!(params.total_supply_e8s, 500_000_000 * E8S_PER_TOKEN);
        assert_eq!(params.initial_reward_rate, 0.10);
        assert_eq!(params.final_reward_rate, 0.05);
        assert_eq!(params.genesis_timestamp_seconds, NNS_GENESIS_TIMESTAMP_SECONDS);
    }

    #[test]
    fn test_nns_min_dissolve_fallback() {
        let economics = NetworkEconomics {
            neuron_minimum_stake_e8s: 0,
            neuron_minimum_dissolve_delay_to_vote_seconds: None,
        };
        let params = RewardParams::for_nns(&economics, &GovernanceMetrics { total_supply_icp: 1 });
        assert_eq!(
            params.minimum_dissolve_delay_seconds,
            NNS_DEFAULT_MIN_DISSOLVE_DELAY_SECONDS
        );
    }

    #[test]
    fn test_sns_conversions() {
        let params = RewardParams::for_sns(&project(Some(metrics()))).unwrap();
        assert_eq!(params.minimum_stake_e8s, 100_000_000);
        assert_eq!(params.minimum_dissolve_delay_seconds, 2_629_800);
        assert_eq!(params.max_dissolve_delay_bonus, 1.0);
        assert_eq!(params.max_age_bonus, 0.25);
        assert_eq!(params.initial_reward_rate, 0.025);
        assert_eq!(params.final_reward_rate, 0.0125);
        assert_eq!(params.reward_rate_transition_duration_seconds, SECONDS_PER_YEAR);
        assert_eq!(params.genesis_timestamp_seconds, 1_700_000_000);
        assert_eq!(params.total_supply_e8s, 1_000_000 * E8S_PER_TOKEN);
    }

    #[test]
    fn test_sns_missing_fields_default_to_zero() {
        let mut p = project(Some(metrics()));
        p.parameters = SnsSystemParameters::default();
        let params = RewardParams::for_sns(&p).unwrap();
        assert_eq!(params.minimum_stake_e8s, 0);
        assert_eq!(params.max_dissolve_delay_seconds, 0);
        assert_eq!(params.max_dissolve_delay_bonus, 0.0);
        assert_eq!(params.initial_reward_rate, 0.0);
        assert_eq!(params.reward_rate_transition_duration_seconds, 0);
    }

    #[test]
    fn test_sns_missing_genesis_defaults_to_zero() {
        let mut m = metrics();
        m.genesis_timestamp_seconds = None;
        let params = RewardParams::for_sns(&project(Some(m))).unwrap();
        assert_eq!(params.genesis_timestamp_seconds, 0);
    }

    #[test]
    fn test_sns_missing_metrics_is_an_error() {
        let result = RewardParams::for_sns(&project(None));
        assert!(matches!(result, Err(YieldError::MissingData(_))));
    }

    #[test]
    fn test_bonus_subset() {
        let params = RewardParams::for_sns(&project(Some(metrics()))).unwrap();
        let bonus = params.bonus();
        assert_eq!(bonus.dissolve_max_seconds, 252_460_800);
        assert_eq!(bonus.age_max_seconds, 15_778_800);
        assert_eq!(bonus.age_bonus, 0.25);
    }
}
