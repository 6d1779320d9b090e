//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use rolefit_core::{
    analyze, clean_text, rank_candidates, role_context, tokenize_and_filter, CandidateInput,
    EmbeddingVector, MatchResult, RankedCandidate, Strategy, StrategyKind, VectorPair,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

/// Upper bound on candidates per ranking request.
pub const MAX_RANK_CANDIDATES: usize = 500;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub cv_text: String,
    #[serde(default)]
    pub role_text: String,
    #[serde(default)]
    pub role_name: Option<String>,
    /// Falls back to the service's DEFAULT_STRATEGY.
    #[serde(default)]
    pub strategy: Option<StrategyKind>,
    #[serde(default)]
    pub cv_embedding: EmbeddingVector,
    #[serde(default)]
    pub role_embedding: EmbeddingVector,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: MatchResult,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct TermsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TermsResponse {
    pub terms: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub role_text: String,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub role_embedding: EmbeddingVector,
    #[serde(default)]
    pub strategy: Option<StrategyKind>,
    pub candidates: Vec<CandidateInput>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub strategy: StrategyKind,
    pub ranking: Vec<RankedCandidate>,
    pub analyzed_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match/analyze
///
/// Scores one CV against one role. Empty texts are legal and score by the
/// degenerate-input rules (an empty role scores 0).
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let kind = request.strategy.unwrap_or(state.config.default_strategy);
    let cv_text = clean_text(&request.cv_text);
    let role_text = role_text(request.role_name.as_deref(), &request.role_text);

    let strategy = match kind {
        StrategyKind::Lexical => Strategy::Lexical,
        StrategyKind::Vector => Strategy::Vector(VectorPair {
            cv: request.cv_embedding,
            role: request.role_embedding,
        }),
    };

    let result = analyze(&cv_text, &role_text, &strategy, &state.scoring)?;
    tracing::info!(
        strategy = %kind,
        score = result.score,
        matched = result.matched_terms.len(),
        "analyzed cv against role"
    );

    Ok(Json(AnalyzeResponse {
        result,
        analyzed_at: Utc::now(),
    }))
}

/// POST /api/v1/match/terms
///
/// Returns the normalized, stopword-free vocabulary of a text, for audits of
/// what the lexical matcher actually compares.
pub async fn handle_terms(
    State(state): State<AppState>,
    Json(request): Json<TermsRequest>,
) -> Result<Json<TermsResponse>, AppError> {
    let terms: Vec<String> = tokenize_and_filter(&request.text, &state.scoring.stopwords)
        .into_iter()
        .collect();

    Ok(Json(TermsResponse {
        count: terms.len(),
        terms,
    }))
}

/// POST /api/v1/match/rank
///
/// Scores every candidate against the role and returns them best first.
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    if request.candidates.is_empty() {
        return Err(AppError::Validation(
            "candidates cannot be empty".to_string(),
        ));
    }
    if request.candidates.len() > MAX_RANK_CANDIDATES {
        return Err(AppError::Validation(format!(
            "at most {MAX_RANK_CANDIDATES} candidates per request, got {}",
            request.candidates.len()
        )));
    }

    let kind = request.strategy.unwrap_or(state.config.default_strategy);
    let role_text = role_text(request.role_name.as_deref(), &request.role_text);
    let candidates: Vec<CandidateInput> = request
        .candidates
        .into_iter()
        .map(|c| CandidateInput {
            cv_text: clean_text(&c.cv_text),
            ..c
        })
        .collect();

    let ranking = rank_candidates(
        &role_text,
        &request.role_embedding,
        &candidates,
        kind,
        &state.scoring,
    )?;
    tracing::info!(strategy = %kind, candidates = ranking.len(), "ranked candidates");

    Ok(Json(RankResponse {
        strategy: kind,
        ranking,
        analyzed_at: Utc::now(),
    }))
}

fn role_text(name: Option<&str>, description: &str) -> String {
    clean_text(&role_context(name.unwrap_or(""), description))
}
