// crates/yieldlens-rewards/src/simulation.rs
//
// Day-by-day reward simulation for one network.
//
// For each simulated day (UTC midnights starting at `start_date`):
//   1. The day's pool reward is taken from the reward rate curve.
//   2. Every neuron that is eligible on that day receives
//      floor(pool * voting_power / total_voting_power) e8s.
//   3. The reward is converted to fiat and added to the day's total, and it
//      is credited to the working copy's free maturity.
//
// Free maturity does not count towards stake, so rewards do not compound
// into voting power. The caller's neurons are never touched; the outcome
// carries the working copies.

use chrono::{Days, NaiveDate, NaiveTime};
use yieldlens_core::Neuron;

use crate::decimal::div_ratio;
use crate::params::RewardParams;
use crate::reward_rate::daily_pool_reward;
use crate::token::{e8s_to_fiat, Tokens};
use crate::voting_power::{is_eligible, voting_power_e8s};

/// Precision of a neuron's share of the total voting power.
pub const SHARE_PRECISION: u32 = 18;

/// One simulation run.
#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    /// Neurons of a single network.
    pub neurons: &'a [Neuron],
    /// Number of days to simulate, starting with `start_date` itself.
    pub days: u32,
    /// Lock every neuron at the maximum dissolve delay and age first.
    pub maximise: bool,
    pub params: &'a RewardParams,
    /// Voting power of the whole network. `None` or zero disables rewards.
    pub total_voting_power_e8s: Option<u64>,
    /// Fiat price of one whole token.
    pub fx_rate: f64,
    pub start_date: NaiveDate,
}

/// Result of a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Total fiat value of all rewards.
    pub fiat_reward: f64,
    /// Total rewards in e8s.
    pub token_reward_e8s: u64,
    /// Fiat rewards per simulated day.
    pub daily_fiat: Vec<f64>,
    /// Working copies after the last day, maturity included.
    pub neurons: Vec<Neuron>,
}

/// Seconds since the epoch at UTC midnight of `date`. Dates before 1970 map to 0.
pub fn date_to_timestamp(date: NaiveDate) -> u64 {
    let ts = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    u64::try_from(ts).unwrap_or(0)
}

/// Run a simulation.
pub fn simulate_rewards(sim: &Simulation<'_>) -> SimulationOutcome {
    let start_ts = date_to_timestamp(sim.start_date);
    let bonus = sim.params.bonus();

    let mut neurons: Vec<Neuron> = if sim.maximise {
        sim.neurons
            .iter()
            .map(|n| {
                n.maximized(
                    start_ts,
                    sim.params.max_dissolve_delay_seconds,
                    sim.params.max_age_seconds,
                )
            })
            .collect()
    } else {
        sim.neurons.to_vec()
    };

    let total_voting_power = match sim.total_voting_power_e8s {
        Some(vp) if vp > 0 => Some(vp),
        _ => {
            if !neurons.is_empty() {
                tracing::warn!(
                    "No total voting power available, skipping rewards for {} days",
                    sim.days
                );
            }
            None
        }
    };

    let mut daily_fiat = Vec::with_capacity(sim.days as usize);
    let mut token_reward = Tokens::default();

    for day in 0..sim.days {
        let Some(total_voting_power) = total_voting_power else {
            daily_fiat.push(0.0);
            continue;
        };
        let Some(date) = sim.start_date.checked_add_days(Days::new(u64::from(day))) else {
            tracing::warn!("Simulation date out of range after {} days", day);
            break;
        };
        let reference_ts = date_to_timestamp(date);
        let pool_reward = daily_pool_reward(sim.params, reference_ts);

        let mut day_fiat = 0.0;
        for neuron in neurons.iter_mut() {
            if !is_eligible(
                neuron,
                sim.params.minimum_stake_e8s,
                sim.params.minimum_dissolve_delay_seconds,
                reference_ts,
            ) {
                continue;
            }

            let voting_power = voting_power_e8s(neuron, &bonus, reference_ts);
            let share = div_ratio(voting_power, total_voting_power, SHARE_PRECISION);
            // Float-to-int casts saturate and map NaN to 0.
            let reward = (pool_reward * share).floor() as u64;

            day_fiat += e8s_to_fiat(reward, sim.fx_rate);
            neuron.maturity_e8s = neuron.maturity_e8s.saturating_add(reward);
            token_reward = token_reward + Tokens::from_e8s(reward);
        }
        daily_fiat.push(day_fiat);
    }

    let fiat_reward = daily_fiat.iter().sum();
    tracing::debug!(
        "Simulated {} days for {} neurons (maximise: {}): {} tokens",
        sim.days,
        neurons.len(),
        sim.maximise,
        token_reward
    );

    SimulationOutcome {
        fiat_reward,
        token_reward_e8s: token_reward.e8s,
        daily_fiat,
        neurons,
    }
}
