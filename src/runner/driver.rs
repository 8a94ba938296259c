use log::info;
use tokio_util::sync::CancellationToken;

use super::work_plan;
use crate::blockchain::{Block, Blockchain, Miner};
use crate::config::BenchConfig;
use crate::error::Result;
use crate::results::{ResultRecord, ResultsLog};
use crate::state::{RunState, StateStore};

/// What a call to [`BenchmarkRunner::run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub start: RunState,
    pub units_mined: usize,
    pub chain_height: usize,
}

/// Drives the difficulty x trial sweep, resuming from the persisted state.
#[derive(Debug)]
pub struct BenchmarkRunner {
    config: BenchConfig,
    chain: Blockchain,
    state: StateStore,
    results: ResultsLog,
    miner: Miner,
}

impl BenchmarkRunner {
    pub fn new(config: BenchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            chain: Blockchain::new(),
            state: StateStore::new(&config.state_path),
            results: ResultsLog::new(&config.results_path),
            miner: Miner::new(config.workers),
            config,
        })
    }

    /// Token that aborts the unit being mined. The aborted unit is not
    /// recorded and is mined again on the next run.
    pub fn cancel_token(&self) -> CancellationToken {
        self.miner.cancel_token()
    }

    pub fn chain(&self) -> &Blockchain {
        &self.chain
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Mine every unit left in the sweep. After each unit the result row is
    /// appended before the state moves forward, so a crash can repeat a unit
    /// but never lose one. A finished sweep resets the state to `(0, 1)`.
    pub fn run(&mut self) -> Result<RunSummary> {
        let start = self.state.load()?;
        if start != RunState::default() {
            info!(
                "resuming at difficulty index {} trial {}",
                start.difficulty_index, start.trial
            );
        }
        self.results.ensure_header()?;

        let mut units_mined = 0;
        let mut current_index = None;
        for unit in work_plan(
            start,
            self.config.max_difficulty,
            self.config.trials_per_difficulty,
        ) {
            let difficulty = unit.difficulty();
            if current_index != Some(unit.difficulty_index) {
                info!("difficulty level {difficulty}");
                current_index = Some(unit.difficulty_index);
            }

            let block = Block::new(format!("Block {}", unit.trial), "");
            let elapsed = self.chain.add_block_with(block, &difficulty, &self.miner)?;

            self.results
                .append(&[ResultRecord::new(&difficulty, unit.trial, elapsed)])?;
            self.state.save(&unit.next_state())?;
            units_mined += 1;

            info!(
                "mined difficulty {} trial {}/{} nonce={} in {:.6}s",
                difficulty,
                unit.trial,
                self.config.trials_per_difficulty,
                self.chain.last_block().nonce(),
                elapsed.as_secs_f64()
            );
        }

        self.state.reset()?;
        info!(
            "sweep complete: {} units, results saved to {}",
            units_mined,
            self.results.path().display()
        );

        Ok(RunSummary {
            start,
            units_mined,
            chain_height: self.chain.len(),
        })
    }
}
