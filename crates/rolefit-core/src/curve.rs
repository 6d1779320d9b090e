//! Score curves: map a match count to a bounded percentage.
//!
//! A curve is an ordered table of `(min_match_count, score)` steps. Counts at
//! or past the last threshold saturate into the last band, where an optional
//! tie-breaker may add a small content-derived bonus.
//!
//! Every `ScoreCurve` value is validated on construction (including serde
//! deserialization), so scoring never sees a malformed curve.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Highest score a curve may produce. 100 is reserved: no overlap count proves
/// a perfect match.
pub const SCORE_CEILING: u8 = 99;

/// Bounded bonus applied in the saturated band so high scores are not all the
/// same round number.
///
/// `bonus = min(total_matched_chars / prime, max_bonus)`. Adding a matched term
/// strictly grows the total length, so the bonus never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TieBreaker {
    pub prime: u32,
    pub max_bonus: u8,
}

impl TieBreaker {
    pub fn bonus<S: AsRef<str>>(&self, matched: &[S]) -> u8 {
        let total_chars: usize = matched.iter().map(|t| t.as_ref().chars().count()).sum();
        let steps = total_chars / self.prime.max(1) as usize;
        steps.min(self.max_bonus as usize) as u8
    }
}

/// Ready-made curve policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurvePreset {
    /// Fast early climb, saturates at 6 matches with a tie-breaker.
    #[default]
    Standard,
    /// Generous: two matches already reach the upper half.
    Lenient,
    /// Needs broad coverage before scoring high; no tie-breaker.
    Strict,
    /// Even 9-point steps up to 10 matches.
    Linear,
}

impl CurvePreset {
    pub fn curve(self) -> ScoreCurve {
        let (steps, tie_breaker): (&[(usize, u8)], Option<TieBreaker>) = match self {
            CurvePreset::Standard => (
                &[(0, 10), (1, 35), (2, 50), (3, 62), (4, 72), (5, 80), (6, 86)],
                Some(TieBreaker {
                    prime: 7,
                    max_bonus: 6,
                }),
            ),
            CurvePreset::Lenient => (
                &[(0, 15), (1, 45), (2, 60), (3, 72), (4, 82), (5, 90)],
                Some(TieBreaker {
                    prime: 5,
                    max_bonus: 5,
                }),
            ),
            CurvePreset::Strict => (
                &[(0, 5), (2, 25), (4, 45), (6, 60), (8, 75), (10, 90)],
                None,
            ),
            CurvePreset::Linear => (
                &[
                    (0, 5),
                    (1, 14),
                    (2, 23),
                    (3, 32),
                    (4, 41),
                    (5, 50),
                    (6, 59),
                    (7, 68),
                    (8, 77),
                    (9, 86),
                    (10, 95),
                ],
                None,
            ),
        };
        ScoreCurve {
            steps: steps.to_vec(),
            tie_breaker,
        }
    }
}

impl std::str::FromStr for CurvePreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(CurvePreset::Standard),
            "lenient" => Ok(CurvePreset::Lenient),
            "strict" => Ok(CurvePreset::Strict),
            "linear" => Ok(CurvePreset::Linear),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

/// Monotonic step function from match count to score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CurveSpec")]
pub struct ScoreCurve {
    steps: Vec<(usize, u8)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tie_breaker: Option<TieBreaker>,
}

/// Wire form of a curve: either a preset name or an explicit table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CurveSpec {
    Preset(String),
    Table(CurveTable),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CurveTable {
    steps: Vec<(usize, u8)>,
    #[serde(default)]
    tie_breaker: Option<TieBreaker>,
}

impl TryFrom<CurveSpec> for ScoreCurve {
    type Error = ConfigError;

    fn try_from(spec: CurveSpec) -> Result<Self, Self::Error> {
        match spec {
            CurveSpec::Preset(name) => Ok(name.parse::<CurvePreset>()?.curve()),
            CurveSpec::Table(table) => ScoreCurve::new(table.steps, table.tie_breaker),
        }
    }
}

impl Default for ScoreCurve {
    fn default() -> Self {
        CurvePreset::default().curve()
    }
}

impl ScoreCurve {
    /// Validates and builds a curve.
    ///
    /// Rejects: no steps, a first step other than 0 matches, thresholds that do
    /// not strictly increase, decreasing scores, scores above `SCORE_CEILING`,
    /// and tie-breakers that could push the saturated band past the ceiling.
    pub fn new(
        steps: Vec<(usize, u8)>,
        tie_breaker: Option<TieBreaker>,
    ) -> Result<Self, ConfigError> {
        let (first_count, _) = *steps.first().ok_or(ConfigError::EmptyCurve)?;
        if first_count != 0 {
            return Err(ConfigError::MissingZeroBucket { first: first_count });
        }

        for &(count, score) in &steps {
            if score > SCORE_CEILING {
                return Err(ConfigError::ScoreAboveCeiling {
                    count,
                    score,
                    ceiling: SCORE_CEILING,
                });
            }
        }

        for pair in steps.windows(2) {
            let (prev_count, prev_score) = pair[0];
            let (next_count, next_score) = pair[1];
            if next_count <= prev_count {
                return Err(ConfigError::NonIncreasingThreshold {
                    previous: prev_count,
                    next: next_count,
                });
            }
            if next_score < prev_score {
                return Err(ConfigError::DecreasingScore {
                    previous_count: prev_count,
                    previous: prev_score,
                    next_count,
                    next: next_score,
                });
            }
        }

        if let Some(tb) = tie_breaker {
            if tb.prime < 2 {
                return Err(ConfigError::InvalidTieBreaker {
                    reason: format!("prime must be at least 2, got {}", tb.prime),
                });
            }
            let (_, top) = steps[steps.len() - 1];
            if top as u16 + tb.max_bonus as u16 > SCORE_CEILING as u16 {
                return Err(ConfigError::InvalidTieBreaker {
                    reason: format!(
                        "saturated score {top} + max bonus {} exceeds ceiling {SCORE_CEILING}",
                        tb.max_bonus
                    ),
                });
            }
        }

        Ok(Self { steps, tie_breaker })
    }

    pub fn steps(&self) -> &[(usize, u8)] {
        &self.steps
    }

    pub fn tie_breaker(&self) -> Option<TieBreaker> {
        self.tie_breaker
    }

    /// Score returned when nothing matches.
    pub fn floor(&self) -> u8 {
        self.steps[0].1
    }

    /// Match count at which the last band starts.
    pub fn saturation_threshold(&self) -> usize {
        self.steps[self.steps.len() - 1].0
    }

    /// Base score for `count` matches, ignoring the tie-breaker.
    pub fn band_for(&self, count: usize) -> u8 {
        self.steps
            .iter()
            .take_while(|(min, _)| *min <= count)
            .last()
            .map(|&(_, score)| score)
            .unwrap_or_else(|| self.floor())
    }

    /// Score for a set of matched terms, including the saturated-band bonus.
    pub fn score_for<S: AsRef<str>>(&self, matched: &[S]) -> u8 {
        let count = matched.len();
        let base = self.band_for(count);
        match self.tie_breaker {
            Some(tb) if count > 0 && count >= self.saturation_threshold() => {
                base + tb.bonus(matched)
            }
            _ => base,
        }
    }
}
