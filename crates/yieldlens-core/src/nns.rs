// crates/yieldlens-core/src/nns.rs
//
// Primary-network (NNS) governance snapshots.

use serde::{Deserialize, Serialize};

/// Canister id of the NNS governance canister. Used as the APY key for the
/// primary network.
pub const NNS_GOVERNANCE_ID: &str = "rrkah-fqaaa-aaaaa-aaaaq-cai";

/// Network economics as configured on NNS governance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkEconomics {
    /// Minimum stake a neuron needs, in e8s.
    pub neuron_minimum_stake_e8s: u64,
    /// Minimum dissolve delay a neuron needs to vote. Older governance
    /// versions do not report it.
    #[serde(default)]
    pub neuron_minimum_dissolve_delay_to_vote_seconds: Option<u64>,
}

/// Aggregate governance metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GovernanceMetrics {
    /// Total token supply in whole tokens.
    pub total_supply_icp: u64,
}
