//! Scoring configuration: stoplist, score curve, result size and embedding
//! dimension.
//!
//! Built once (usually at startup), validated on load, then shared read-only
//! by every scoring call.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::curve::{CurvePreset, ScoreCurve};
use crate::error::ConfigError;
use crate::stopwords::Stoplist;

pub const DEFAULT_TOP_N_TERMS: usize = 10;
/// Output size of the MiniLM family of sentence encoders.
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 384;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScoringConfig")]
pub struct ScoringConfig {
    pub stopwords: Stoplist,
    pub score_curve: ScoreCurve,
    pub top_n_terms: usize,
    pub embedding_dimension: usize,
}

/// Unvalidated wire form. Every field is optional.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScoringConfig {
    #[serde(default = "Stoplist::standard")]
    stopwords: Stoplist,
    #[serde(default)]
    score_curve: ScoreCurve,
    #[serde(default = "default_top_n")]
    top_n_terms: usize,
    #[serde(default = "default_dimension")]
    embedding_dimension: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N_TERMS
}

fn default_dimension() -> usize {
    DEFAULT_EMBEDDING_DIMENSION
}

impl TryFrom<RawScoringConfig> for ScoringConfig {
    type Error = ConfigError;

    fn try_from(raw: RawScoringConfig) -> Result<Self, Self::Error> {
        ScoringConfig::new(
            raw.stopwords,
            raw.score_curve,
            raw.top_n_terms,
            raw.embedding_dimension,
        )
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            stopwords: Stoplist::standard(),
            score_curve: ScoreCurve::default(),
            top_n_terms: DEFAULT_TOP_N_TERMS,
            embedding_dimension: DEFAULT_EMBEDDING_DIMENSION,
        }
    }
}

impl ScoringConfig {
    /// Builds a validated config. The curve is already valid by construction;
    /// this checks the remaining fields.
    pub fn new(
        stopwords: Stoplist,
        score_curve: ScoreCurve,
        top_n_terms: usize,
        embedding_dimension: usize,
    ) -> Result<Self, ConfigError> {
        if top_n_terms == 0 {
            return Err(ConfigError::InvalidTopN);
        }
        if embedding_dimension == 0 {
            return Err(ConfigError::InvalidDimension);
        }
        Ok(Self {
            stopwords,
            score_curve,
            top_n_terms,
            embedding_dimension,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        tracing::info!(
            path = %path.as_ref().display(),
            stopwords = config.stopwords.len(),
            curve_steps = config.score_curve.steps().len(),
            "scoring config loaded"
        );
        Ok(config)
    }

    /// Replaces the score curve with a preset, keeping everything else.
    pub fn with_preset(mut self, preset: CurvePreset) -> Self {
        self.score_curve = preset.curve();
        self
    }
}
