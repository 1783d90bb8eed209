// crates/yieldlens-core/src/ledger.rs
//
// Token balances and exchange-rate snapshots, keyed by ledger canister id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number of e8s in one token. Every ledger handled here uses 8 decimals.
pub const E8S_PER_TOKEN: u64 = 100_000_000;

/// Ledger canister id of the primary network's token.
pub const NNS_LEDGER_ID: &str = "ryjl3-tyaaa-aaaaa-aaaba-cai";

/// A wallet balance on one ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenBalance {
    /// Ledger canister id (textual principal).
    pub ledger_id: String,
    /// Balance in e8s, or `None` while the balance has not been fetched yet.
    #[serde(default)]
    pub balance_e8s: Option<u64>,
}

impl TokenBalance {
    /// Whether the balance has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.balance_e8s.is_some()
    }
}

/// Exchange-rate snapshot: ledger id -> fiat price of one whole token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeRates {
    /// Rates were fetched.
    Rates(HashMap<String, f64>),
    /// The price feed reported an error; nothing can be converted.
    Error,
}

impl ExchangeRates {
    /// Fiat price for `ledger_id`. `None` when the feed is in the error state
    /// or the ledger is not listed.
    pub fn rate(&self, ledger_id: &str) -> Option<f64> {
        match self {
            ExchangeRates::Rates(rates) => rates.get(ledger_id).copied(),
            ExchangeRates::Error => None,
        }
    }

    /// Whether this is the error sentinel.
    pub fn is_error(&self) -> bool {
        matches!(self, ExchangeRates::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_lookup() {
        let mut map = HashMap::new();
        map.insert(NNS_LEDGER_ID.to_string(), 10.5);
        let rates = ExchangeRates::Rates(map);
        assert_eq!(rates.rate(NNS_LEDGER_ID), Some(10.5));
        assert_eq!(rates.rate("unknown"), None);
        assert!(!rates.is_error());
    }

    #[test]
    fn test_error_sentinel_has_no_rates() {
        let rates = ExchangeRates::Error;
        assert!(rates.is_error());
        assert_eq!(rates.rate(NNS_LEDGER_ID), None);
    }

    #[test]
    fn test_error_sentinel_json() {
        let rates: ExchangeRates = serde_json::from_str("\"error\"").unwrap();
        assert!(rates.is_error());
    }

    #[test]
    fn test_unresolved_balance() {
        let balance = TokenBalance {
            ledger_id: NNS_LEDGER_ID.to_string(),
            balance_e8s: None,
        };
        assert!(!balance.is_resolved());
    }
}
