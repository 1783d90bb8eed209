// crates/yieldlens-core/src/sns.rs
//
// Sub-network (SNS) snapshots. Field names follow the SNS governance
// canister's `NervousSystemParameters`; every field is optional there, so it
// is optional here too.

use serde::{Deserialize, Serialize};

/// Voting reward configuration of an SNS.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VotingRewardsParameters {
    /// Reward rate at genesis, in basis points.
    pub initial_reward_rate_basis_points: Option<u64>,
    /// Reward rate after the transition, in basis points.
    pub final_reward_rate_basis_points: Option<u64>,
    /// Length of the initial-to-final transition.
    pub reward_rate_transition_duration_seconds: Option<u64>,
}

/// System parameters of an SNS governance canister.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SnsSystemParameters {
    pub neuron_minimum_stake_e8s: Option<u64>,
    pub neuron_minimum_dissolve_delay_to_vote_seconds: Option<u64>,
    pub max_dissolve_delay_seconds: Option<u64>,
    /// Whole percent, e.g. 100 for a 2x multiplier.
    pub max_dissolve_delay_bonus_percentage: Option<u64>,
    pub max_neuron_age_for_age_bonus: Option<u64>,
    /// Whole percent.
    pub max_age_bonus_percentage: Option<u64>,
    pub voting_rewards_parameters: Option<VotingRewardsParameters>,
}

/// Aggregate metrics reported for an SNS.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnsMetrics {
    #[serde(default)]
    pub genesis_timestamp_seconds: Option<u64>,
    /// Total token supply in e8s.
    pub total_supply_e8s: u64,
    /// Sum of the voting power of all neurons, in e8s.
    #[serde(default)]
    pub voting_power_total_e8s: Option<u64>,
}

/// One SNS as listed by the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnsProject {
    pub root_canister_id: String,
    pub ledger_canister_id: String,
    #[serde(default)]
    pub parameters: SnsSystemParameters,
    /// `None` when the aggregator has not produced metrics for the project.
    #[serde(default)]
    pub metrics: Option<SnsMetrics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_with_sparse_parameters() {
        let json = r#"{
            "root_canister_id": "root",
            "ledger_canister_id": "ledger",
            "parameters": { "max_dissolve_delay_seconds": 100 }
        }"#;
        let project: SnsProject = serde_json::from_str(json).unwrap();
        assert_eq!(project.parameters.max_dissolve_delay_seconds, Some(100));
        assert_eq!(project.parameters.max_age_bonus_percentage, None);
        assert!(project.parameters.voting_rewards_parameters.is_none());
        assert!(project.metrics.is_none());
    }
}
