use serde::{Deserialize, Serialize};

/// Pointer to the next unit of work: difficulty index and 1-based trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub difficulty_index: usize,
    pub trial: u32,
}

impl RunState {
    pub fn new(difficulty_index: usize, trial: u32) -> Self {
        Self {
            difficulty_index,
            trial,
        }
    }

    /// State persisted after finishing `trial` at `difficulty_index`.
    pub fn after(difficulty_index: usize, trial: u32) -> Self {
        Self::new(difficulty_index, trial + 1)
    }
}

impl Default for RunState {
    /// Start of a fresh sweep: `(0, 1)`.
    fn default() -> Self {
        Self::new(0, 1)
    }
}
