use serde::{Deserialize, Serialize};
use std::fmt;

/// Distinct symbol universes. Processed identically, stored separately.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Universe {
    Indices,
    Stocks,
}

impl Universe {
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Universe::Indices => "indices",
            Universe::Stocks => "stocks",
        }
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_prefix())
    }
}
