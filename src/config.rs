use log::warn;
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::blockchain::hasher::DIGEST_HEX_LEN;
use crate::error::{Error, Result};

pub const DEFAULT_MAX_DIFFICULTY: usize = 10;
pub const DEFAULT_TRIALS: u32 = 1;
pub const DEFAULT_RESULTS_PATH: &str = "mining_results.csv";
pub const DEFAULT_STATE_PATH: &str = "mining_state.json";
pub const DEFAULT_WORKERS: usize = 1;

/// Parameters of one benchmark sweep, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Number of difficulty levels; level `i` requires `i + 1` zeros.
    pub max_difficulty: usize,
    pub trials_per_difficulty: u32,
    pub results_path: PathBuf,
    pub state_path: PathBuf,
    /// Nonce search threads; 0 means one per CPU.
    pub workers: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            max_difficulty: DEFAULT_MAX_DIFFICULTY,
            trials_per_difficulty: DEFAULT_TRIALS,
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl BenchConfig {
    /// Read `MAX_DIFFICULTY`, `TRIALS`, `RESULTS_PATH`, `STATE_PATH` and
    /// `MINING_WORKERS`, falling back to the defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            max_difficulty: env_or("MAX_DIFFICULTY", defaults.max_difficulty),
            trials_per_difficulty: env_or("TRIALS", defaults.trials_per_difficulty),
            results_path: env::var("RESULTS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.results_path),
            state_path: env::var("STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_path),
            workers: env_or("MINING_WORKERS", defaults.workers),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.trials_per_difficulty == 0 {
            return Err(Error::config("trials per difficulty must be at least 1"));
        }
        if self.max_difficulty > DIGEST_HEX_LEN {
            return Err(Error::config(format!(
                "max difficulty {} exceeds the {DIGEST_HEX_LEN}-character digest",
                self.max_difficulty
            )));
        }
        if self.results_path == self.state_path {
            return Err(Error::config("results and state must be different files"));
        }
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring {key}={raw:?}, using {default}");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::BenchConfig;
    use crate::error::Error;
    use std::path::PathBuf;

    #[test]
    fn defaults_match_the_documented_sweep() {
        let c = BenchConfig::default();
        assert_eq!(c.max_difficulty, 10);
        assert_eq!(c.trials_per_difficulty, 1);
        assert_eq!(c.results_path, PathBuf::from("mining_results.csv"));
        assert_eq!(c.state_path, PathBuf::from("mining_state.json"));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_trials_is_rejected() {
        let c = BenchConfig {
            trials_per_difficulty: 0,
            ..BenchConfig::default()
        };
        assert!(matches!(c.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn difficulty_longer_than_digest_is_rejected() {
        let mut c = BenchConfig {
            max_difficulty: 64,
            ..BenchConfig::default()
        };
        assert!(c.validate().is_ok());
        c.max_difficulty = 65;
        assert!(matches!(c.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn shared_path_is_rejected() {
        let c = BenchConfig {
            state_path: PathBuf::from("mining_results.csv"),
            ..BenchConfig::default()
        };
        assert!(c.validate().is_err());
    }
}
