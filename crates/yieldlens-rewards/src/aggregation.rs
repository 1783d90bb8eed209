// crates/yieldlens-rewards/src/aggregation.rs
//
// Fiat aggregation over neuron sets and wallet balances, and APY.

use serde::{Deserialize, Serialize};
use yieldlens_core::{ExchangeRates, Neuron, TokenBalance};

use crate::token::{e8s_to_fiat, Tokens};

/// Current and maximum achievable APY of one network, as fractions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Apy {
    /// APY with every neuron's actual dissolve delay and age.
    pub cur: f64,
    /// APY if every neuron were locked at the maximum delay and age.
    pub max: f64,
}

impl Apy {
    /// APY from a year of simulated rewards and the staked value they were
    /// earned on.
    ///
    /// If either staked value is zero (or not finite) both APYs are zero.
    pub fn from_rewards(
        cur_year_reward_fiat: f64,
        cur_staked_fiat: f64,
        max_year_reward_fiat: f64,
        max_staked_fiat: f64,
    ) -> Self {
        if !is_positive(cur_staked_fiat) || !is_positive(max_staked_fiat) {
            return Self::default();
        }
        Self {
            cur: cur_year_reward_fiat / cur_staked_fiat,
            max: max_year_reward_fiat / max_staked_fiat,
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Fiat price of a ledger's token. Unknown ledgers are worth nothing.
pub fn fx_rate(rates: &ExchangeRates, ledger_id: &str) -> f64 {
    match rates.rate(ledger_id) {
        Some(rate) => rate,
        None => {
            tracing::debug!("No exchange rate for ledger {}, valuing at 0", ledger_id);
            0.0
        }
    }
}

/// Fiat value of all maturity (free and staked) held by `neurons`.
pub fn maturity_fiat(neurons: &[Neuron], fx_rate: f64) -> f64 {
    Tokens::total(neurons.iter().map(Neuron::total_maturity_e8s)).to_fiat(fx_rate)
}

/// Fiat value of the stake locked in `neurons`.
pub fn staked_fiat(neurons: &[Neuron], fx_rate: f64) -> f64 {
    Tokens::total(neurons.iter().map(Neuron::stake_after_fees_e8s)).to_fiat(fx_rate)
}

/// Fiat value of all resolved wallet balances.
pub fn balances_fiat(balances: &[TokenBalance], rates: &ExchangeRates) -> f64 {
    balances
        .iter()
        .filter_map(|b| b.balance_e8s.map(|e8s| e8s_to_fiat(e8s, fx_rate(rates, &b.ledger_id))))
        .sum()
}

/// Share of total value that is staked. Zero when there is no value at all.
pub fn staking_power(staked_fiat: f64, total_fiat: f64) -> f64 {
    if !is_positive(total_fiat) {
        return 0.0;
    }
    staked_fiat / total_fiat
}
