// crates/yieldlens-cli/src/commands/mod.rs
//
// Command module declarations for the yieldlens CLI.

pub mod period;
pub mod project;
pub mod report;
