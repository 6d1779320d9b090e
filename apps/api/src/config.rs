use std::path::PathBuf;

use anyhow::{Context, Result};
use rolefit_core::{CurvePreset, ScoringConfig, StrategyKind};

/// Service configuration loaded from environment variables.
/// Every variable is optional; startup fails only on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Strategy used when a request does not name one.
    pub default_strategy: StrategyKind,
    /// JSON scoring config (stopwords, curve, top-N, dimension).
    pub scoring_config_path: Option<PathBuf>,
    /// Curve preset that overrides whatever curve the file sets.
    pub score_curve: Option<CurvePreset>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            default_strategy: StrategyKind::Lexical,
            scoring_config_path: None,
            score_curve: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            port: match lookup("PORT") {
                Some(port) => port
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            default_strategy: match lookup("DEFAULT_STRATEGY") {
                Some(s) => s
                    .parse::<StrategyKind>()
                    .context("DEFAULT_STRATEGY must be 'lexical' or 'vector'")?,
                None => defaults.default_strategy,
            },
            scoring_config_path: lookup("SCORING_CONFIG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            score_curve: lookup("SCORE_CURVE")
                .map(|s| s.parse::<CurvePreset>())
                .transpose()
                .context("SCORE_CURVE must be one of: standard, lenient, strict, linear")?,
        })
    }

    /// Loads and validates the scoring config once, for the process lifetime.
    pub fn load_scoring(&self) -> Result<ScoringConfig> {
        let scoring = match &self.scoring_config_path {
            Some(path) => ScoringConfig::from_path(path).with_context(|| {
                format!("Invalid scoring config at '{}'", path.display())
            })?,
            None => ScoringConfig::default(),
        };

        Ok(match self.score_curve {
            Some(preset) => scoring.with_preset(preset),
            None => scoring,
        })
    }
}
