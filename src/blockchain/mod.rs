pub mod block;
pub mod difficulty;
pub mod hasher;
pub mod miner;
pub mod model;

pub use block::Block;
pub use difficulty::Difficulty;
pub use miner::Miner;
pub use model::Blockchain;

/// Character a mined hash must start with, repeated per difficulty level.
pub const DIFFICULTY_CHAR: char = '0';

/// Payload of the genesis block.
pub const GENESIS_DATA: &str = "Genesis Block";

/// Previous-hash sentinel of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Nonce attempts between two looks at a cancellation token.
pub const CANCEL_CHECK_INTERVAL: u64 = 4096;
