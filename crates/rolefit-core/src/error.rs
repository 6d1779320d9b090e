use thiserror::Error;

/// Which side of a CV/role pair an input belongs to. Used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Cv,
    Role,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Cv => f.write_str("cv"),
            Side::Role => f.write_str("role"),
        }
    }
}

/// Caller contract violations raised by a scoring call.
///
/// Degenerate inputs (empty text, empty role vocabulary, absent or zero
/// vectors) are not errors; they produce defined fallback scores.
#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("{side} embedding has dimension {actual}, expected {expected}")]
    UnexpectedDimension {
        side: Side,
        expected: usize,
        actual: usize,
    },

    #[error("{side} embedding contains non-finite values")]
    NonFiniteEmbedding { side: Side },
}

/// Malformed scoring configuration. Raised once, at load time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("score curve has no steps")]
    EmptyCurve,

    #[error("score curve must start with a 0-match step, found {first}")]
    MissingZeroBucket { first: usize },

    #[error("score curve thresholds must strictly increase ({previous} then {next})")]
    NonIncreasingThreshold { previous: usize, next: usize },

    #[error("score curve must not decrease: {previous} at {previous_count} matches, {next} at {next_count}")]
    DecreasingScore {
        previous_count: usize,
        previous: u8,
        next_count: usize,
        next: u8,
    },

    #[error("score {score} at {count} matches exceeds ceiling {ceiling}")]
    ScoreAboveCeiling { count: usize, score: u8, ceiling: u8 },

    #[error("invalid tie-breaker: {reason}")]
    InvalidTieBreaker { reason: String },

    #[error("unknown score curve preset '{0}'")]
    UnknownPreset(String),

    #[error("unknown scoring strategy '{0}'")]
    UnknownStrategy(String),

    #[error("top_n_terms must be at least 1")]
    InvalidTopN,

    #[error("embedding_dimension must be at least 1")]
    InvalidDimension,

    #[error("failed to parse scoring config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read scoring config: {0}")]
    Io(#[from] std::io::Error),
}
