pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::matching::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/match/analyze", post(handlers::handle_analyze))
        .route("/api/v1/match/terms", post(handlers::handle_terms))
        .route("/api/v1/match/rank", post(handlers::handle_rank))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use rolefit_core::{ScoringConfig, StrategyKind};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    fn app() -> Router {
        build_router(AppState::new(Config::default(), ScoringConfig::default()))
    }

    fn vector_app(dimension: usize) -> Router {
        let config = Config {
            default_strategy: StrategyKind::Vector,
            ..Config::default()
        };
        let scoring = ScoringConfig {
            embedding_dimension: dimension,
            ..ScoringConfig::default()
        };
        build_router(AppState::new(config, scoring))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "rolefit-api");
    }

    #[tokio::test]
    async fn test_analyze_lexical_by_default() {
        let (status, body) = post_json(
            app(),
            "/api/v1/match/analyze",
            json!({
                "cv_text": "I have 5 years of   Python and SQL experience",
                "role_text": "Python FastAPI SQL System Design"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["matched_terms"], json!(["python", "sql"]));
        assert_eq!(body["result"]["score"], 50);
        assert_eq!(body["result"]["strategy"], "lexical");
        assert!(body["analyzed_at"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_role_name_contributes_terms() {
        let (status, body) = post_json(
            app(),
            "/api/v1/match/analyze",
            json!({
                "cv_text": "Kubernetes and Terraform",
                "role_name": "Kubernetes Engineer",
                "role_text": "Own our Terraform modules"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["matched_terms"], json!(["kubernetes", "terraform"]));
    }

    #[tokio::test]
    async fn test_analyze_empty_role_scores_zero() {
        let (status, body) = post_json(
            app(),
            "/api/v1/match/analyze",
            json!({ "cv_text": "Python SQL", "role_text": "" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["score"], 0);
        assert_eq!(body["result"]["matched_terms"], json!([]));
    }

    #[tokio::test]
    async fn test_analyze_vector_strategy() {
        let (status, body) = post_json(
            app(),
            "/api/v1/match/analyze",
            json!({
                "strategy": "vector",
                "cv_embedding": vec![0.25_f32; 384],
                "role_embedding": vec![0.25_f32; 384]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["score"], 100);
        assert_eq!(body["result"]["strategy"], "vector");
        assert_eq!(body["result"]["matched_terms"], json!([]));
    }

    #[tokio::test]
    async fn test_analyze_dimension_mismatch_is_bad_request() {
        let (status, body) = post_json(
            vector_app(3),
            "/api/v1/match/analyze",
            json!({
                "cv_embedding": [1.0, 0.0, 0.0],
                "role_embedding": [1.0, 0.0]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_default_strategy_from_config() {
        let (status, body) = post_json(
            vector_app(2),
            "/api/v1/match/analyze",
            json!({
                "cv_text": "python",
                "role_text": "python",
                "cv_embedding": [1.0, 0.0],
                "role_embedding": [1.0, 1.0]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["strategy"], "vector");
        assert_eq!(body["result"]["score"], 70);
    }

    #[tokio::test]
    async fn test_terms_endpoint() {
        let (status, body) = post_json(
            app(),
            "/api/v1/match/terms",
            json!({ "text": "The candidate knows Rust, Tokio and gRPC." }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["terms"], json!(["grpc", "knows", "rust", "tokio"]));
        assert_eq!(body["count"], 4);
    }

    #[tokio::test]
    async fn test_rank_orders_candidates() {
        let (status, body) = post_json(
            app(),
            "/api/v1/match/rank",
            json!({
                "role_name": "Python Dev",
                "role_text": "Looking for Python, FastAPI, and SQL skills.",
                "candidates": [
                    { "id": "a", "cv_text": "Java and Spring" },
                    { "id": "b", "cv_text": "Python FastAPI SQL" },
                    { "id": "c", "cv_text": "Python only" }
                ]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["strategy"], "lexical");
        let ids: Vec<&str> = body["ranking"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_rank_rejects_empty_candidates() {
        let (status, body) = post_json(
            app(),
            "/api/v1/match/rank",
            json!({ "role_text": "Python", "candidates": [] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app()
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
