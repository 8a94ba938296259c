use std::time::Duration;

use super::{Block, Difficulty, GENESIS_DATA, GENESIS_PREVIOUS_HASH, Miner};
use crate::error::Result;

/// Simple in-memory, append-only blockchain with Proof-of-Work.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
}

impl Blockchain {
    /// Initialize a new blockchain with a genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
        }
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        // `new` always seeds the genesis block and nothing ever removes one
        &self.chain[self.chain.len() - 1]
    }

    /// Link `block` to the current tail (overwriting its previous hash),
    /// mine it with a plain linear scan and append it.
    pub fn add_block(&mut self, mut block: Block, difficulty: &Difficulty) -> Duration {
        block.set_previous_hash(self.last_block().hash().to_string());
        let elapsed = block.mine(difficulty);
        self.chain.push(block);
        elapsed
    }

    /// Same as [`Blockchain::add_block`] but searches with `miner`, which
    /// may run in parallel or be cancelled. A cancelled block is dropped.
    pub fn add_block_with(
        &mut self,
        mut block: Block,
        difficulty: &Difficulty,
        miner: &Miner,
    ) -> Result<Duration> {
        block.set_previous_hash(self.last_block().hash().to_string());
        let elapsed = miner.mine(&mut block, difficulty)?;
        self.chain.push(block);
        Ok(elapsed)
    }

    /// Validate the entire chain: genesis, cached hashes and linkage.
    /// Blocks may be mined at different difficulties, so PoW is not rechecked.
    pub fn is_valid_chain(&self) -> bool {
        let genesis = &self.chain[0];
        if genesis.previous_hash() != GENESIS_PREVIOUS_HASH
            || genesis.data() != GENESIS_DATA
            || genesis.hash() != genesis.compute_hash()
        {
            return false;
        }

        self.chain.windows(2).all(|pair| {
            let (prev, current) = (&pair[0], &pair[1]);
            current.previous_hash() == prev.hash() && current.hash() == current.compute_hash()
        })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Never true; the genesis block is always present.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}
