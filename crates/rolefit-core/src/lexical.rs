//! Lexical Scorer: overlap between CV and role vocabularies, mapped through a
//! `ScoreCurve`.
//!
//! The role vocabulary is the denominator for coverage: a result says how much
//! of the role the CV covers, not how much of the CV is relevant.

use serde::{Deserialize, Serialize};

use crate::curve::ScoreCurve;
use crate::tokenizer::TermSet;

/// Raw outcome of one lexical comparison, before top-N truncation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalScore {
    pub score: u8,
    pub match_count: usize,
    pub role_term_count: usize,
    /// Full intersection, sorted lexicographically.
    pub matched: Vec<String>,
}

impl LexicalScore {
    /// Share of the role vocabulary found in the CV, as a whole percentage.
    pub fn coverage_pct(&self) -> u8 {
        if self.role_term_count == 0 {
            return 0;
        }
        ((self.match_count * 100) / self.role_term_count).min(100) as u8
    }
}

/// Scores `cv_terms` against `role_terms`.
///
/// An empty role vocabulary carries no signal and scores 0 with no matches,
/// regardless of the curve's floor.
pub fn score(cv_terms: &TermSet, role_terms: &TermSet, curve: &ScoreCurve) -> LexicalScore {
    if role_terms.is_empty() {
        return LexicalScore {
            score: 0,
            match_count: 0,
            role_term_count: 0,
            matched: vec![],
        };
    }

    let matched = cv_terms.intersection(role_terms);
    let score = curve.score_for(&matched);

    tracing::debug!(
        match_count = matched.len(),
        role_terms = role_terms.len(),
        score,
        "lexical score computed"
    );

    LexicalScore {
        score,
        match_count: matched.len(),
        role_term_count: role_terms.len(),
        matched,
    }
}
