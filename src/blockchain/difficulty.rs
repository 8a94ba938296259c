use std::fmt;

use super::DIFFICULTY_CHAR;

/// Required digest prefix: `DIFFICULTY_CHAR` repeated `index + 1` times.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Difficulty(String);

impl Difficulty {
    /// Difficulty for sweep position `index` (0 -> "0", 2 -> "000").
    pub fn from_index(index: usize) -> Self {
        Self::with_len(index + 1)
    }

    pub fn with_len(len: usize) -> Self {
        Self(DIFFICULTY_CHAR.to_string().repeat(len))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the first `len()` characters of `hash` equal the prefix.
    pub fn is_met_by(&self, hash: &str) -> bool {
        hash.starts_with(&self.0)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
