// crates/yieldlens-rewards/src/token.rs
//
// Token amounts and fiat conversion.
//
// Every ledger handled here has 8 decimals. Sums stay in integer e8s and
// saturate; only the final fiat figures are floats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use yieldlens_core::E8S_PER_TOKEN;

/// An amount on an 8-decimal ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tokens {
    pub e8s: u64,
}

impl Tokens {
    pub fn from_e8s(e8s: u64) -> Self {
        Self { e8s }
    }

    /// Whole tokens, fractional part included.
    pub fn to_tokens(self) -> f64 {
        self.e8s as f64 / E8S_PER_TOKEN as f64
    }

    /// Fiat value at `rate` per whole token.
    pub fn to_fiat(self, rate: f64) -> f64 {
        self.to_tokens() * rate
    }

    /// Saturating sum of `amounts`.
    pub fn total<I: IntoIterator<Item = u64>>(amounts: I) -> Self {
        amounts
            .into_iter()
            .fold(Tokens::default(), |acc, e8s| acc + Tokens::from_e8s(e8s))
    }
}

impl Add for Tokens {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_e8s(self.e8s.saturating_add(rhs.e8s))
    }
}

/// Fiat value of `e8s` at `rate` per whole token.
pub fn e8s_to_fiat(e8s: u64, rate: f64) -> f64 {
    Tokens::from_e8s(e8s).to_fiat(rate)
}

/// Decimal token amount without trailing zeros, e.g. `1.5` or `42`.
impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let padded = format!("{}.{:08}", self.e8s / E8S_PER_TOKEN, self.e8s % E8S_PER_TOKEN);
        f.write_str(padded.trim_end_matches('0').trim_end_matches('.'))
    }
}
