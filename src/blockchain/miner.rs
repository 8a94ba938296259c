//! Cancellable, optionally parallel nonce search.
//!
//! With one worker this is [`Block::mine_cancellable`]. With `k` workers,
//! worker `w` scans `start + w, start + w + k, ...` and the smallest
//! satisfying nonce wins, so the result never depends on thread scheduling.

use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use super::{Block, CANCEL_CHECK_INTERVAL, Difficulty, hasher};
use crate::error::{Error, Result};

const NOT_FOUND: u64 = u64::MAX;

#[derive(Debug, Clone)]
pub struct Miner {
    workers: usize,
    cancel: CancellationToken,
}

impl Miner {
    /// `workers == 0` means one worker per logical CPU.
    pub fn new(workers: usize) -> Self {
        let workers = if workers == 0 {
            num_cpus::get()
        } else {
            workers
        };
        Self {
            workers,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Search for the smallest nonce at or above `block.nonce()` whose hash
    /// meets `difficulty`, store it in the block and return the elapsed time.
    /// On cancellation the block is left on its starting nonce.
    pub fn mine(&self, block: &mut Block, difficulty: &Difficulty) -> Result<Duration> {
        if self.workers == 1 {
            return block.mine_cancellable(difficulty, &self.cancel);
        }

        let start_nonce = block.nonce();
        let stride = self.workers as u64;
        let best = AtomicU64::new(NOT_FOUND);
        let start = Instant::now();
        {
            let shared: &Block = block;
            thread::scope(|s| {
                for w in 0..stride {
                    let Some(first) = start_nonce.checked_add(w) else {
                        break;
                    };
                    let best = &best;
                    let cancel = &self.cancel;
                    s.spawn(move || scan(shared, difficulty, first, stride, best, cancel));
                }
            });
        }
        let elapsed = start.elapsed();

        // a worker stopped by the token may have skipped a smaller match
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let found = best.load(Ordering::Acquire);
        if found == NOT_FOUND {
            return Err(Error::NonceSpaceExhausted {
                difficulty: difficulty.to_string(),
            });
        }
        block.set_nonce(found);
        debug!(
            "nonce {} meets difficulty {} ({} workers, {:?})",
            found, difficulty, self.workers, elapsed
        );
        Ok(elapsed)
    }
}

/// Scan `first, first + stride, ...` until a match, until the next nonce is
/// above the best match found by any worker, or until cancelled.
fn scan(
    block: &Block,
    difficulty: &Difficulty,
    first: u64,
    stride: u64,
    best: &AtomicU64,
    cancel: &CancellationToken,
) {
    let mut nonce = first;
    let mut attempts: u64 = 0;
    loop {
        if nonce >= best.load(Ordering::Acquire) {
            return;
        }
        let hash = hasher::digest(nonce, block.data(), block.previous_hash());
        if difficulty.is_met_by(&hash) {
            best.fetch_min(nonce, Ordering::AcqRel);
            return;
        }
        attempts += 1;
        if attempts % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            return;
        }
        nonce = match nonce.checked_add(stride) {
            Some(next) => next,
            None => return,
        };
    }
}
