// crates/yieldlens-rewards/src/calculator.rs
//
// Top-level staking reward calculation.
//
// The calculator takes one snapshot of every upstream input and returns one
// of three results:
//   - Error("Not authorized.") when the caller is not signed in,
//   - Loading while any input is still missing,
//   - Ready with the aggregated figures once everything is present.
// A failure while computing the Ready figures is logged and reported as a
// generic error; the underlying cause is not returned.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use yieldlens_core::{
    ExchangeRates, GovernanceMetrics, NetworkEconomics, Neuron, SnsProject, TokenBalance,
    YieldError, NNS_GOVERNANCE_ID, NNS_LEDGER_ID,
};

use crate::aggregation::{balances_fiat, fx_rate, maturity_fiat, staked_fiat, staking_power, Apy};
use crate::params::RewardParams;
use crate::simulation::{simulate_rewards, Simulation};

/// Error message for unauthenticated callers.
pub const NOT_AUTHORIZED: &str = "Not authorized.";

/// Error message for any failure during the calculation itself.
pub const CALCULATION_ERROR: &str = "Error during calculation.";

/// Days covered by the weekly reward estimate.
pub const WEEK_DAYS: u32 = 7;

/// Days covered by an APY projection.
pub const YEAR_DAYS: u32 = 365;

/// Every upstream snapshot the calculation reads. `None` means "not loaded yet".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingRewardInputs {
    pub authenticated: bool,
    pub token_balances: Option<Vec<TokenBalance>>,
    pub sns_projects: Option<Vec<SnsProject>>,
    /// Neurons per SNS, keyed by root canister id.
    pub sns_neurons: Option<HashMap<String, Vec<Neuron>>>,
    pub nns_neurons: Option<Vec<Neuron>>,
    pub nns_economics: Option<NetworkEconomics>,
    pub exchange_rates: Option<ExchangeRates>,
    pub governance_metrics: Option<GovernanceMetrics>,
    pub total_voting_power_e8s: Option<u64>,
    /// Overrides "today" as the first simulated day.
    pub force_initial_date: Option<NaiveDate>,
}

/// Figures shown once every input is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingRewardData {
    /// Fiat value of all maturity held by the user's neurons.
    pub reward_balance_fiat: f64,
    /// Fiat value of the rewards expected over the next seven days.
    pub reward_estimate_week_fiat: f64,
    /// Staked value / (staked value + wallet balances).
    pub staking_power: f64,
    /// Staked value in fiat.
    pub staking_power_fiat: f64,
    /// APY per network: SNS root canister id, or the NNS governance id.
    pub apy: BTreeMap<String, Apy>,
}

/// Result of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StakingRewardResult {
    Loading,
    Error { error: String },
    Ready(StakingRewardData),
}

impl StakingRewardResult {
    pub fn is_loading(&self) -> bool {
        matches!(self, StakingRewardResult::Loading)
    }
}

/// Inputs once the readiness check has passed.
struct ReadyInputs<'a> {
    token_balances: &'a [TokenBalance],
    sns_projects: &'a [SnsProject],
    sns_neurons: &'a HashMap<String, Vec<Neuron>>,
    nns_neurons: &'a [Neuron],
    nns_economics: &'a NetworkEconomics,
    exchange_rates: &'a ExchangeRates,
    governance_metrics: &'a GovernanceMetrics,
    total_voting_power_e8s: u64,
}

impl<'a> ReadyInputs<'a> {
    /// Borrow every input, or name the first one that is not ready.
    fn from_inputs(inputs: &'a StakingRewardInputs) -> Result<Self, &'static str> {
        let token_balances = inputs.token_balances.as_deref().ok_or("token balances")?;
        if !token_balances.iter().all(TokenBalance::is_resolved) {
            return Err("token balances");
        }
        let sns_projects = inputs.sns_projects.as_deref().ok_or("sns projects")?;
        let sns_neurons = inputs.sns_neurons.as_ref().ok_or("sns neurons")?;
        if !sns_projects.is_empty() && sns_neurons.is_empty() {
            return Err("sns neurons");
        }
        let nns_neurons = inputs.nns_neurons.as_deref().ok_or("nns neurons")?;
        let nns_economics = inputs.nns_economics.as_ref().ok_or("network economics")?;
        let exchange_rates = inputs.exchange_rates.as_ref().ok_or("exchange rates")?;
        if exchange_rates.is_error() {
            return Err("exchange rates");
        }
        let governance_metrics = inputs
            .governance_metrics
            .as_ref()
            .ok_or("governance metrics")?;
        let total_voting_power_e8s = inputs.total_voting_power_e8s.ok_or("total voting power")?;

        Ok(Self {
            token_balances,
            sns_projects,
            sns_neurons,
            nns_neurons,
            nns_economics,
            exchange_rates,
            governance_metrics,
            total_voting_power_e8s,
        })
    }
}

/// One network's neurons together with everything needed to simulate them.
struct Network<'a> {
    key: &'a str,
    neurons: &'a [Neuron],
    params: RewardParams,
    total_voting_power_e8s: Option<u64>,
    fx_rate: f64,
}

impl Network<'_> {
    fn simulate(&self, days: u32, maximise: bool, start_date: NaiveDate) -> f64 {
        simulate_rewards(&Simulation {
            neurons: self.neurons,
            days,
            maximise,
            params: &self.params,
            total_voting_power_e8s: self.total_voting_power_e8s,
            fx_rate: self.fx_rate,
            start_date,
        })
        .fiat_reward
    }

    fn apy(&self, start_date: NaiveDate) -> Apy {
        let staked = staked_fiat(self.neurons, self.fx_rate);
        if staked <= 0.0 {
            return Apy::default();
        }
        let cur = self.simulate(YEAR_DAYS, false, start_date);
        let max = self.simulate(YEAR_DAYS, true, start_date);
        Apy::from_rewards(cur, staked, max, staked)
    }
}

fn networks<'a>(ready: &ReadyInputs<'a>) -> Result<Vec<Network<'a>>, YieldError> {
    let mut networks = Vec::with_capacity(ready.sns_projects.len() + 1);

    networks.push(Network {
        key: NNS_GOVERNANCE_ID,
        neurons: ready.nns_neurons,
        params: RewardParams::for_nns(ready.nns_economics, ready.governance_metrics),
        total_voting_power_e8s: Some(ready.total_voting_power_e8s),
        fx_rate: fx_rate(ready.exchange_rates, NNS_LEDGER_ID),
    });

    for project in ready.sns_projects {
        let params = RewardParams::for_sns(project)?;
        let total_voting_power_e8s = project
            .metrics
            .as_ref()
            .and_then(|m| m.voting_power_total_e8s);
        let neurons = ready
            .sns_neurons
            .get(&project.root_canister_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        networks.push(Network {
            key: &project.root_canister_id,
            neurons,
            params,
            total_voting_power_e8s,
            fx_rate: fx_rate(ready.exchange_rates, &project.ledger_canister_id),
        });
    }

    Ok(networks)
}

fn compute(
    ready: &ReadyInputs<'_>,
    start_date: NaiveDate,
) -> Result<StakingRewardData, YieldError> {
    let networks = networks(ready)?;

    let reward_balance_fiat = networks
        .iter()
        .map(|n| maturity_fiat(n.neurons, n.fx_rate))
        .sum();

    let reward_estimate_week_fiat = networks
        .iter()
        .map(|n| n.simulate(WEEK_DAYS, false, start_date))
        .sum();

    let staked: f64 = networks
        .iter()
        .map(|n| staked_fiat(n.neurons, n.fx_rate))
        .sum();
    let total = staked + balances_fiat(ready.token_balances, ready.exchange_rates);

    let apy = networks
        .iter()
        .map(|n| (n.key.to_string(), n.apy(start_date)))
        .collect();

    Ok(StakingRewardData {
        reward_balance_fiat,
        reward_estimate_week_fiat,
        staking_power: staking_power(staked, total),
        staking_power_fiat: staked,
        apy,
    })
}

/// Compute staking reward figures from a snapshot of all inputs.
pub fn staking_reward_data(inputs: &StakingRewardInputs) -> StakingRewardResult {
    if !inputs.authenticated {
        return StakingRewardResult::Error {
            error: NOT_AUTHORIZED.to_string(),
        };
    }

    let ready = match ReadyInputs::from_inputs(inputs) {
        Ok(ready) => ready,
        Err(missing) => {
            tracing::debug!("Staking rewards waiting for {}", missing);
            return StakingRewardResult::Loading;
        }
    };

    let start_date = inputs
        .force_initial_date
        .unwrap_or_else(|| Utc::now().date_naive());

    match compute(&ready, start_date) {
        Ok(data) => StakingRewardResult::Ready(data),
        Err(e) => {
            tracing::error!(
                "[{}] Staking reward calculation failed: {}",
                Utc::now().to_rfc3339(),
                e
            );
            StakingRewardResult::Error {
                error: CALCULATION_ERROR.to_string(),
            }
        }
    }
}
