//! Scoring Façade: one entry point over the lexical and vector strategies.
//!
//! Strategy selection is explicit: a call names its strategy, and a result
//! never mixes the two. `RelevanceScorer` is the seam callers hold when they
//! want to swap backends at startup (`Arc<dyn RelevanceScorer>`).

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::error::{MatchError, Side};
use crate::lexical::{self, LexicalScore};
use crate::result::{MatchResult, StrategyKind};
use crate::stopwords::{self, Stoplist};
use crate::tokenizer::{tokenize, TermSet};
use crate::vector::{vector_score, EmbeddingVector};

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// Precomputed embeddings for one CV/role pair. Either side may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorPair {
    #[serde(default)]
    pub cv: EmbeddingVector,
    #[serde(default)]
    pub role: EmbeddingVector,
}

/// Strategy for one `analyze` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    Lexical,
    Vector(VectorPair),
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Lexical => StrategyKind::Lexical,
            Strategy::Vector(_) => StrategyKind::Vector,
        }
    }
}

/// Everything a scorer may look at for one pair.
#[derive(Debug, Clone, Copy)]
pub struct MatchInput<'a> {
    pub cv_text: &'a str,
    pub role_text: &'a str,
    pub vectors: Option<&'a VectorPair>,
}

/// One CV to rank against a role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateInput {
    pub id: String,
    pub cv_text: String,
    #[serde(default)]
    pub cv_embedding: EmbeddingVector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub id: String,
    pub result: MatchResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A relevance scoring backend. Implementations are stateless; all tuning
/// comes from the `ScoringConfig` passed to each call.
pub trait RelevanceScorer: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn score(
        &self,
        input: &MatchInput<'_>,
        config: &ScoringConfig,
    ) -> Result<MatchResult, MatchError>;
}

/// Term-overlap scorer: tokenize, filter stopwords, score the intersection
/// through the configured curve.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalMatcher;

impl RelevanceScorer for LexicalMatcher {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Lexical
    }

    fn score(
        &self,
        input: &MatchInput<'_>,
        config: &ScoringConfig,
    ) -> Result<MatchResult, MatchError> {
        let cv_terms = tokenize_and_filter(input.cv_text, &config.stopwords);
        let role_terms = tokenize_and_filter(input.role_text, &config.stopwords);
        Ok(lexical_result(&cv_terms, &role_terms, config))
    }
}

/// Embedding scorer: cosine similarity of precomputed vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorMatcher;

impl RelevanceScorer for VectorMatcher {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Vector
    }

    fn score(
        &self,
        input: &MatchInput<'_>,
        config: &ScoringConfig,
    ) -> Result<MatchResult, MatchError> {
        let absent = VectorPair::default();
        let vectors = input.vectors.unwrap_or(&absent);
        vector_result(&vectors.cv, &vectors.role, config)
    }
}

/// Stateless scorer for a strategy kind.
pub fn scorer_for(kind: StrategyKind) -> &'static dyn RelevanceScorer {
    match kind {
        StrategyKind::Lexical => &LexicalMatcher,
        StrategyKind::Vector => &VectorMatcher,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

/// Normalized, stopword-free vocabulary of `text`.
pub fn tokenize_and_filter(text: &str, stoplist: &Stoplist) -> TermSet {
    stopwords::filter(tokenize(text), stoplist)
}

/// Scores a CV against a role with the given strategy.
///
/// Only fails on caller contract violations (embedding dimension problems).
/// Empty texts and missing vectors produce defined fallback scores.
pub fn analyze(
    cv_text: &str,
    role_text: &str,
    strategy: &Strategy,
    config: &ScoringConfig,
) -> Result<MatchResult, MatchError> {
    let vectors = match strategy {
        Strategy::Lexical => None,
        Strategy::Vector(pair) => Some(pair),
    };
    let input = MatchInput {
        cv_text,
        role_text,
        vectors,
    };
    scorer_for(strategy.kind()).score(&input, config)
}

/// Scores every candidate against one role and orders them by score,
/// highest first. Candidates with equal scores keep their input order.
pub fn rank_candidates(
    role_text: &str,
    role_embedding: &EmbeddingVector,
    candidates: &[CandidateInput],
    kind: StrategyKind,
    config: &ScoringConfig,
) -> Result<Vec<RankedCandidate>, MatchError> {
    let mut ranking = Vec::with_capacity(candidates.len());

    match kind {
        StrategyKind::Lexical => {
            // Role vocabulary is shared by every candidate.
            let role_terms = tokenize_and_filter(role_text, &config.stopwords);
            for candidate in candidates {
                let cv_terms = tokenize_and_filter(&candidate.cv_text, &config.stopwords);
                ranking.push(RankedCandidate {
                    id: candidate.id.clone(),
                    result: lexical_result(&cv_terms, &role_terms, config),
                });
            }
        }
        StrategyKind::Vector => {
            for candidate in candidates {
                ranking.push(RankedCandidate {
                    id: candidate.id.clone(),
                    result: vector_result(&candidate.cv_embedding, role_embedding, config)?,
                });
            }
        }
    }

    ranking.sort_by(|a, b| b.result.score.cmp(&a.result.score));
    tracing::debug!(candidates = ranking.len(), strategy = %kind, "candidates ranked");
    Ok(ranking)
}

/// Text a role is matched on: its name followed by its description, so words
/// in the title count.
pub fn role_context(name: &str, description: &str) -> String {
    match (name.trim(), description.trim()) {
        ("", description) => description.to_string(),
        (name, "") => name.to_string(),
        (name, description) => format!("{name} {description}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Result assembly
// ────────────────────────────────────────────────────────────────────────────

fn lexical_result(cv_terms: &TermSet, role_terms: &TermSet, config: &ScoringConfig) -> MatchResult {
    let scored = lexical::score(cv_terms, role_terms, &config.score_curve);
    let explanation = lexical_explanation(&scored, config.top_n_terms);

    let mut matched_terms = scored.matched;
    matched_terms.truncate(config.top_n_terms);

    MatchResult {
        score: scored.score,
        matched_terms,
        explanation,
        strategy: StrategyKind::Lexical,
    }
}

fn lexical_explanation(scored: &LexicalScore, top_n: usize) -> String {
    if scored.role_term_count == 0 {
        return "Role description has no usable terms; nothing to match against.".to_string();
    }
    if scored.match_count == 0 {
        return format!(
            "No role terms found in the CV (0 of {} role terms).",
            scored.role_term_count
        );
    }

    let mut explanation = format!(
        "Matched {} of {} role terms ({}% role coverage).",
        scored.match_count,
        scored.role_term_count,
        scored.coverage_pct()
    );
    if scored.match_count > top_n {
        explanation.push_str(&format!(" Showing the first {top_n} matched terms."));
    }
    explanation
}

fn vector_result(
    cv: &EmbeddingVector,
    role: &EmbeddingVector,
    config: &ScoringConfig,
) -> Result<MatchResult, MatchError> {
    cv.check_dimension(config.embedding_dimension, Side::Cv)?;
    role.check_dimension(config.embedding_dimension, Side::Role)?;

    let score = vector_score(cv, role)?;

    let explanation = if cv.is_absent() || role.is_absent() {
        let missing = match (cv.is_absent(), role.is_absent()) {
            (true, true) => "cv and role",
            (true, false) => "cv",
            _ => "role",
        };
        format!("No {missing} embedding supplied; no semantic signal.")
    } else if cv.is_zero() || role.is_zero() {
        "Zero-magnitude embedding; no semantic signal.".to_string()
    } else {
        format!("Semantic similarity {score}/100 (cosine).")
    };

    Ok(MatchResult {
        score,
        matched_terms: vec![],
        explanation,
        strategy: StrategyKind::Vector,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
