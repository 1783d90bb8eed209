// crates/yieldlens-core/src/lib.rs
//
// yieldlens-core: Core snapshot types and the error type shared by the
// yieldlens workspace.
//
// This is the leaf crate that the projection engine and the CLI depend on.
// It defines the stake positions (neurons), the primary-network and
// sub-network parameter snapshots, token balances, and exchange rates that
// the engine consumes. Nothing here performs I/O; every type is a plain
// in-memory snapshot supplied by whoever fetched the data.

pub mod error;
pub mod ledger;
pub mod neuron;
pub mod nns;
pub mod sns;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use yieldlens_core::Neuron;`

// Stake positions
pub use neuron::{DissolveState, Neuron};

// Ledger types
pub use ledger::{ExchangeRates, TokenBalance, E8S_PER_TOKEN, NNS_LEDGER_ID};

// Network snapshots
pub use nns::{GovernanceMetrics, NetworkEconomics, NNS_GOVERNANCE_ID};
pub use sns::{SnsMetrics, SnsProject, SnsSystemParameters, VotingRewardsParameters};

// Error type
pub use error::YieldError;
