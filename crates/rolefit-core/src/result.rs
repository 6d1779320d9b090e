use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which scoring strategy produced (or should produce) a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Lexical,
    Vector,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Lexical => "lexical",
            StrategyKind::Vector => "vector",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lexical" => Ok(StrategyKind::Lexical),
            "vector" => Ok(StrategyKind::Vector),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Outcome of one scoring call. Holds no reference to the source documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 0 – 100
    pub score: u8,
    /// Sorted, deduplicated, capped at `top_n_terms`. Always empty for the
    /// vector strategy.
    pub matched_terms: Vec<String>,
    pub explanation: String,
    pub strategy: StrategyKind,
}
