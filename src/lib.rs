//! Proof-of-work cost benchmark.
//!
//! Mines one block per (difficulty, trial) pair on a toy chain, appends the
//! search time to a CSV log and keeps a JSON pointer to the next pair so an
//! interrupted sweep picks up where it stopped.

pub mod blockchain;
pub mod config;
pub mod error;
pub mod results;
pub mod runner;
pub mod state;

pub use config::BenchConfig;
pub use error::{Error, Result};
pub use runner::{BenchmarkRunner, RunSummary};
