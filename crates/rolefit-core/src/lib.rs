//! Role fit scoring core.
//!
//! Scores a CV's plain text against a role description, either by term
//! overlap (`Strategy::Lexical`) or by cosine similarity of precomputed
//! embeddings (`Strategy::Vector`), and reports the terms behind the score.
//!
//! Everything here is pure and synchronous. A `ScoringConfig` is built once
//! and passed by reference to every call.
//!
//! ```
//! use rolefit_core::{analyze, ScoringConfig, Strategy};
//!
//! let config = ScoringConfig::default();
//! let result = analyze(
//!     "I have 5 years of Python and SQL experience",
//!     "Python FastAPI SQL System Design",
//!     &Strategy::Lexical,
//!     &config,
//! )
//! .unwrap();
//! assert_eq!(result.matched_terms, vec!["python", "sql"]);
//! ```

pub mod config;
pub mod curve;
pub mod error;
pub mod lexical;
pub mod matcher;
pub mod result;
pub mod stopwords;
pub mod tokenizer;
pub mod vector;

pub use config::ScoringConfig;
pub use curve::{CurvePreset, ScoreCurve, TieBreaker};
pub use error::{ConfigError, MatchError, Side};
pub use matcher::{
    analyze, rank_candidates, role_context, scorer_for, tokenize_and_filter, CandidateInput,
    LexicalMatcher, MatchInput, RankedCandidate, RelevanceScorer, Strategy, VectorMatcher,
    VectorPair,
};
pub use result::{MatchResult, StrategyKind};
pub use stopwords::Stoplist;
pub use tokenizer::{clean_text, tokenize, TermSet};
pub use vector::{vector_score, EmbeddingVector};
