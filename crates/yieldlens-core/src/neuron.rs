// crates/yieldlens-core/src/neuron.rs

use serde::{Deserialize, Serialize};

/// Lock-up state of a neuron.
///
///   NotDissolving { delay } --start dissolving--> Dissolving { when }
///                                                     |
///                                                     v (when <= now)
///                                                  dissolved (delay == 0)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DissolveState {
    /// Locked: the dissolve delay stays fixed and the neuron keeps aging.
    NotDissolving { dissolve_delay_seconds: u64 },
    /// Counting down towards `when_dissolved_timestamp_seconds`. Age is zero.
    Dissolving { when_dissolved_timestamp_seconds: u64 },
}

/// A stake position (neuron) as reported by a governance canister.
///
/// All amounts are in e8s (10^-8 of a token). The engine never mutates a
/// caller's neuron; it clones the list and accrues rewards on the copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Neuron {
    /// Neuron identifier (decimal id on the NNS, hex subaccount on an SNS).
    pub id: String,
    /// Stake as last cached by governance, before fees.
    pub cached_stake_e8s: u64,
    /// Fees charged against the stake (rejected proposals etc.).
    #[serde(default)]
    pub fees_e8s: u64,
    /// Free (unstaked) maturity. Simulated rewards accrue here.
    #[serde(default)]
    pub maturity_e8s: u64,
    /// Maturity that has been staked and counts towards voting power.
    #[serde(default)]
    pub staked_maturity_e8s: u64,
    /// Current lock-up state.
    pub dissolve_state: DissolveState,
    /// Timestamp the age bonus is measured from. Ignored while dissolving.
    #[serde(default)]
    pub aging_since_timestamp_seconds: u64,
}

impl Neuron {
    /// Locked stake used for eligibility and voting power:
    /// `cached_stake - fees + staked_maturity`.
    pub fn stake_after_fees_e8s(&self) -> u64 {
        self.cached_stake_e8s
            .saturating_sub(self.fees_e8s)
            .saturating_add(self.staked_maturity_e8s)
    }

    /// Free plus staked maturity.
    pub fn total_maturity_e8s(&self) -> u64 {
        self.maturity_e8s.saturating_add(self.staked_maturity_e8s)
    }

    /// Dissolve delay as it will be at `timestamp_seconds`.
    ///
    /// A dissolving neuron loses one second of delay per second; once
    /// dissolved the delay is zero.
    pub fn dissolve_delay_at(&self, timestamp_seconds: u64) -> u64 {
        match self.dissolve_state {
            DissolveState::NotDissolving {
                dissolve_delay_seconds,
            } => dissolve_delay_seconds,
            DissolveState::Dissolving {
                when_dissolved_timestamp_seconds,
            } => when_dissolved_timestamp_seconds.saturating_sub(timestamp_seconds),
        }
    }

    /// Age as it will be at `timestamp_seconds`. Dissolving neurons do not age.
    pub fn age_at(&self, timestamp_seconds: u64) -> u64 {
        if self.is_dissolving() {
            return 0;
        }
        timestamp_seconds.saturating_sub(self.aging_since_timestamp_seconds)
    }

    /// Whether the neuron is counting down.
    pub fn is_dissolving(&self) -> bool {
        matches!(self.dissolve_state, DissolveState::Dissolving { .. })
    }

    /// A copy of this neuron locked (not dissolving) with a dissolve delay of
    /// at least `max_dissolve_delay_seconds` and an age of at least
    /// `max_age_seconds` as of `timestamp_seconds`.
    ///
    /// Delay and age never go below their current values, so a network whose
    /// maximums are unset (zero) leaves the neuron's terms as they are.
    /// Stake and maturity are left untouched.
    pub fn maximized(
        &self,
        timestamp_seconds: u64,
        max_dissolve_delay_seconds: u64,
        max_age_seconds: u64,
    ) -> Neuron {
        let dissolve_delay_seconds = self
            .dissolve_delay_at(timestamp_seconds)
            .max(max_dissolve_delay_seconds);
        let age = self.age_at(timestamp_seconds).max(max_age_seconds);
        Neuron {
            dissolve_state: DissolveState::NotDissolving {
                dissolve_delay_seconds,
            },
            aging_since_timestamp_seconds: timestamp_seconds.saturating_sub(age),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked(delay: u64, aging_since: u64) -> Neuron {
        Neuron {
            id: "1".to_string(),
            cached_stake_e8s: 1_000,
            fees_e8s: 100,
            maturity_e8s: 50,
            staked_maturity_e8s: 25,
            dissolve_state: DissolveState::NotDissolving {
                dissolve_delay_seconds: delay,
            },
            aging_since_timestamp_seconds: aging_since,
        }
    }

    #[test]
    fn test_stake_after_fees() {
        let n = locked(0, 0);
        assert_eq!(n.stake_after_fees_e8s(), 925);
        assert_eq!(n.total_maturity_e8s(), 75);
    }

    #[test]
    fn test_fees_above_stake_saturate() {
        let mut n = locked(0, 0);
        n.fees_e8s = 5_000;
        assert_eq!(n.stake_after_fees_e8s(), 25);
    }

    #[test]
    fn test_locked_neuron_ages() {
        let n = locked(100, 1_000);
        assert_eq!(n.dissolve_delay_at(5_000), 100);
        assert_eq!(n.age_at(5_000), 4_000);
        assert_eq!(n.age_at(500), 0);
    }

    #[test]
    fn test_dissolving_neuron_counts_down() {
        let mut n = locked(0, 1_000);
        n.dissolve_state = DissolveState::Dissolving {
            when_dissolved_timestamp_seconds: 10_000,
        };
        assert!(n.is_dissolving());
        assert_eq!(n.dissolve_delay_at(4_000), 6_000);
        assert_eq!(n.dissolve_delay_at(12_000), 0);
        assert_eq!(n.age_at(4_000), 0);
    }

    #[test]
    fn test_maximized_keeps_stake() {
        let mut n = locked(10, 0);
        n.dissolve_state = DissolveState::Dissolving {
            when_dissolved_timestamp_seconds: 10,
        };
        let m = n.maximized(10_000, 800, 400);
        assert_eq!(m.dissolve_delay_at(10_000), 800);
        assert_eq!(m.age_at(10_000), 400);
        assert_eq!(m.stake_after_fees_e8s(), n.stake_after_fees_e8s());
        assert_eq!(m.maturity_e8s, n.maturity_e8s);
    }

    #[test]
    fn test_maximized_never_shortens_terms() {
        let n = locked(1_000, 0);
        let m = n.maximized(10_000, 0, 0);
        assert_eq!(m.dissolve_delay_at(10_000), 1_000);
        assert_eq!(m.age_at(10_000), 10_000);

        let m = n.maximized(10_000, 500, 4_000);
        assert_eq!(m.dissolve_delay_at(10_000), 1_000);
        assert_eq!(m.age_at(10_000), 10_000);
    }

    #[test]
    fn test_maximized_dissolving_keeps_remaining_delay() {
        let mut n = locked(0, 0);
        n.dissolve_state = DissolveState::Dissolving {
            when_dissolved_timestamp_seconds: 12_000,
        };
        let m = n.maximized(10_000, 0, 0);
        assert!(!m.is_dissolving());
        assert_eq!(m.dissolve_delay_at(20_000), 2_000);
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "id": "42",
            "cached_stake_e8s": 100,
            "dissolve_state": { "dissolving": { "when_dissolved_timestamp_seconds": 7 } }
        }"#;
        let n: Neuron = serde_json::from_str(json).unwrap();
        assert_eq!(n.fees_e8s, 0);
        assert_eq!(n.maturity_e8s, 0);
        assert!(n.is_dissolving());
    }
}
