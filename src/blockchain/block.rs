use chrono::Utc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use super::{CANCEL_CHECK_INTERVAL, Difficulty, GENESIS_DATA, GENESIS_PREVIOUS_HASH, hasher};
use crate::error::{Error, Result};

/// A single block holding an opaque payload.
///
/// Fields are private so the cached `hash` can never go stale: every
/// mutation of `nonce` or `previous_hash` recomputes it.
#[derive(Debug, Clone)]
pub struct Block {
    timestamp: i64, // Unix timestamp (UTC), informational only
    data: String,
    previous_hash: String,
    nonce: u64,
    hash: String,
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis() -> Self {
        Self::new(GENESIS_DATA, GENESIS_PREVIOUS_HASH)
    }

    /// Create a new block (not mined yet). Call `mine()` to perform PoW.
    pub fn new(data: impl Into<String>, previous_hash: impl Into<String>) -> Self {
        let mut block = Self {
            timestamp: Utc::now().timestamp(),
            data: data.into(),
            previous_hash: previous_hash.into(),
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Hash of `(nonce, data, previous_hash)`. The timestamp is not part of it.
    pub fn compute_hash(&self) -> String {
        hasher::digest(self.nonce, &self.data, &self.previous_hash)
    }

    /// Perform Proof-of-Work by scanning nonces upwards from the current one
    /// until the hash starts with `difficulty`. Returns the wall-clock time
    /// of the search.
    pub fn mine(&mut self, difficulty: &Difficulty) -> Duration {
        let start = Instant::now();
        self.scan(difficulty, || false);
        start.elapsed()
    }

    /// [`Block::mine`] that gives up once `cancel` fires. A cancelled block
    /// is put back on the nonce it started from.
    pub fn mine_cancellable(
        &mut self,
        difficulty: &Difficulty,
        cancel: &CancellationToken,
    ) -> Result<Duration> {
        let start_nonce = self.nonce;
        let start = Instant::now();
        if self.scan(difficulty, || cancel.is_cancelled()) {
            return Ok(start.elapsed());
        }
        self.set_nonce(start_nonce);
        Err(Error::Cancelled)
    }

    /// The one linear search loop. `stop` is polled every
    /// `CANCEL_CHECK_INTERVAL` attempts; returns false when it stopped the scan.
    fn scan(&mut self, difficulty: &Difficulty, stop: impl Fn() -> bool) -> bool {
        let mut attempts: u64 = 0;
        while !difficulty.is_met_by(&self.hash) {
            attempts += 1;
            if attempts % CANCEL_CHECK_INTERVAL == 0 && stop() {
                return false;
            }
            self.nonce = self.nonce.wrapping_add(1);
            self.hash = self.compute_hash();
        }
        true
    }

    /// Cached hash matches the content and satisfies `difficulty`.
    /// (Does NOT validate chain linkage.)
    pub fn is_valid(&self, difficulty: &Difficulty) -> bool {
        self.hash == self.compute_hash() && difficulty.is_met_by(&self.hash)
    }

    pub(crate) fn set_previous_hash(&mut self, previous_hash: String) {
        self.previous_hash = previous_hash;
        self.hash = self.compute_hash();
    }

    pub(crate) fn set_nonce(&mut self, nonce: u64) {
        self.nonce = nonce;
        self.hash = self.compute_hash();
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::Block;
    use crate::blockchain::{Difficulty, hasher};
    use crate::error::Error;
    use tokio_util::sync::CancellationToken;

    #[test]
    fn genesis_has_valid_hash() {
        let b = Block::genesis();
        assert_eq!(b.hash(), b.compute_hash());
        assert_eq!(b.previous_hash(), "0");
        assert_eq!(b.data(), "Genesis Block");
        assert_eq!(b.nonce(), 0);
    }

    #[test]
    fn mining_produces_leading_zeros() {
        let mut b = Block::new("Block 1", "prev");
        let difficulty = Difficulty::with_len(2);
        b.mine(&difficulty);
        assert!(b.hash().starts_with("00"));
        assert!(b.is_valid(&difficulty));
    }

    #[test]
    fn mining_is_a_linear_scan_from_zero() {
        let mut b = Block::new("Block 7", "prev");
        let difficulty = Difficulty::with_len(3);
        b.mine(&difficulty);

        let found = b.nonce();
        for nonce in 0..found {
            let hash = hasher::digest(nonce, "Block 7", "prev");
            assert!(!difficulty.is_met_by(&hash), "nonce {nonce} already satisfied");
        }
        assert_eq!(b.hash(), hasher::digest(found, "Block 7", "prev"));
    }

    #[test]
    fn already_satisfied_block_keeps_its_nonce() {
        let mut b = Block::new("Block 1", "prev");
        // every hex digest starts with the empty prefix
        b.mine(&Difficulty::with_len(0));
        assert_eq!(b.nonce(), 0);

        let mut b = Block::new("Block 1", "prev");
        b.mine(&Difficulty::with_len(1));
        let nonce = b.nonce();
        b.mine(&Difficulty::with_len(1));
        assert_eq!(b.nonce(), nonce);
    }

    #[test]
    fn relinking_refreshes_the_hash() {
        let mut b = Block::new("Block 1", "prev");
        let old_hash = b.hash().to_string();
        b.set_previous_hash("other".into());
        assert_ne!(old_hash, b.hash());
        assert_eq!(b.hash(), b.compute_hash());
    }

    #[test]
    fn cancellable_mine_finds_the_same_nonce() {
        let difficulty = Difficulty::with_len(3);
        let mut plain = Block::new("Block 4", "prev");
        plain.mine(&difficulty);

        let mut block = Block::new("Block 4", "prev");
        block
            .mine_cancellable(&difficulty, &CancellationToken::new())
            .unwrap();
        assert_eq!(block.nonce(), plain.nonce());
        assert_eq!(block.hash(), plain.hash());
    }

    #[test]
    fn cancelled_mine_restores_the_start_nonce() {
        let token = CancellationToken::new();
        token.cancel();

        let mut block = Block::new("Block 1", "prev");
        let before = block.hash().to_string();
        let err = block
            .mine_cancellable(&Difficulty::with_len(64), &token)
            .unwrap_err();

        assert!(matches!(err, Error::Cancelled));
        assert_eq!(block.nonce(), 0);
        assert_eq!(block.hash(), before);
    }
}
