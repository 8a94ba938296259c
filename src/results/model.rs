use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::blockchain::Difficulty;

/// Column names of the results log, in order.
pub const HEADER: [&str; 3] = ["Difficulty Level", "Trial", "Mining Time (s)"];

/// One completed mining unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "Difficulty Level")]
    pub difficulty: String,
    #[serde(rename = "Trial")]
    pub trial: u32,
    #[serde(rename = "Mining Time (s)")]
    pub elapsed_secs: f64,
}

impl ResultRecord {
    pub fn new(difficulty: &Difficulty, trial: u32, elapsed: Duration) -> Self {
        Self {
            difficulty: difficulty.to_string(),
            trial,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }
}
