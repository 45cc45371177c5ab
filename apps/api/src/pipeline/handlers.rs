//! Axum route handlers for the post-generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::pipeline::flow::{run_custom_flow, run_profile_flow};
use crate::pipeline::generator::{CustomPostSpec, GeneratedPost};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GeneratePostsRequest {
    pub profile_url: String,
    /// Source material the drafts rework; also the analysis fallback when
    /// the profile has no public activity.
    pub static_post: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomGenerateRequest {
    pub length: u32,
    pub keywords: Vec<String>,
    pub tone: String,
    pub post: String,
}

#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<GeneratedPost>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate
///
/// Profile pipeline: fetch recent activity, analyze the author's voice,
/// draft posts in that voice from the supplied source material.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GeneratePostsRequest>,
) -> Result<Json<PostsResponse>, AppError> {
    info!("generation request for profile {}", request.profile_url);

    let posts = run_profile_flow(
        &state.linkedin,
        state.agents.as_ref(),
        &request.profile_url,
        &request.static_post,
    )
    .await?;

    Ok(Json(PostsResponse { posts }))
}

/// POST /custom_generate
///
/// Custom pipeline: draft against explicit targets, then evaluate and retry
/// up to the cap. The response carries the final draft set either way.
pub async fn handle_custom_generate(
    State(state): State<AppState>,
    Json(request): Json<CustomGenerateRequest>,
) -> Result<Json<PostsResponse>, AppError> {
    if request.post.trim().is_empty() {
        return Err(AppError::Validation("post cannot be empty".to_string()));
    }

    let spec = CustomPostSpec {
        length: request.length,
        keywords: request.keywords,
        tone: request.tone,
        base_post: request.post,
    };

    let result = run_custom_flow(state.agents.as_ref(), &spec).await?;
    info!(
        "custom flow finished: {:?} after {} evaluation(s)",
        result.outcome, result.retry_count
    );

    Ok(Json(PostsResponse {
        posts: result.posts,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::linkedin::LinkedInClient;
    use crate::pipeline::agents::PostAgents;
    use crate::pipeline::analyzer::{AnalysisSource, PostAnalysis};
    use crate::pipeline::evaluator::Evaluation;
    use crate::routes::build_router;

    /// Stub agents for router-level tests: generation is labelled by attempt,
    /// evaluations follow a script.
    struct StubAgents {
        evaluations: Mutex<VecDeque<Evaluation>>,
        generate_calls: Mutex<u32>,
    }

    impl StubAgents {
        fn new(evaluations: Vec<Evaluation>) -> Self {
            Self {
                evaluations: Mutex::new(evaluations.into()),
                generate_calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl PostAgents for StubAgents {
        async fn analyze(&self, _: AnalysisSource<'_>) -> Result<PostAnalysis, AppError> {
            Ok(PostAnalysis {
                writing_style: "direct".to_string(),
                personal_touch: "anecdotes".to_string(),
                target_audience: "engineers".to_string(),
                post_length_preference: "short".to_string(),
                paragraph_style: "single sentences".to_string(),
            })
        }

        async fn generate_from_profile(
            &self,
            _: &PostAnalysis,
            _: &str,
        ) -> Result<Vec<GeneratedPost>, AppError> {
            Ok(vec![GeneratedPost {
                heading: "profile draft".to_string(),
                content: "profile body".to_string(),
            }])
        }

        async fn generate_custom(
            &self,
            _: &CustomPostSpec,
            _: Option<&str>,
        ) -> Result<Vec<GeneratedPost>, AppError> {
            let mut calls = self.generate_calls.lock().unwrap();
            *calls += 1;
            Ok(vec![GeneratedPost {
                heading: format!("draft-{}", *calls),
                content: "body".to_string(),
            }])
        }

        async fn evaluate(
            &self,
            _: &CustomPostSpec,
            _: &[GeneratedPost],
        ) -> Result<Evaluation, AppError> {
            Ok(self
                .evaluations
                .lock()
                .unwrap()
                .pop_front()
                .expect("evaluation script exhausted"))
        }
    }

    fn test_app(server: &MockServer, agents: StubAgents, dir: &tempfile::TempDir) -> axum::Router {
        let state = AppState {
            linkedin: LinkedInClient::with_base_url(
                "rapid-test".to_string(),
                server.uri(),
                dir.path().join("cache.json"),
            ),
            agents: Arc::new(agents),
        };
        build_router(state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint_is_ok() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&server, StubAgents::new(vec![]), &dir);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_generate_rejects_malformed_profile_url_with_400() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&server, StubAgents::new(vec![]), &dir);

        let response = app
            .oneshot(post_json(
                "/generate",
                json!({"profile_url": "https://example.com/janedoe", "static_post": "hi"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_returns_posts_from_profile_pipeline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get-profile-posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"text": "a post", "totalReactionCount": 1, "commentsCount": 0, "postedDate": 1}]
            })))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&server, StubAgents::new(vec![]), &dir);

        let response = app
            .oneshot(post_json(
                "/generate",
                json!({"profile_url": "https://www.linkedin.com/in/janedoe", "static_post": "hi"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["posts"][0]["post_heading"], "profile draft");
        assert_eq!(body["posts"][0]["post_content"], "profile body");
    }

    #[tokio::test]
    async fn test_generate_maps_upstream_failure_to_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get-profile-posts"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&server, StubAgents::new(vec![]), &dir);

        let response = app
            .oneshot(post_json(
                "/generate",
                json!({"profile_url": "https://www.linkedin.com/in/janedoe", "static_post": "hi"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_custom_generate_returns_accepted_second_draft() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let agents = StubAgents::new(vec![
            Evaluation {
                valid: false,
                feedback: Some("tighten the hook".to_string()),
            },
            Evaluation {
                valid: true,
                feedback: None,
            },
        ]);
        let app = test_app(&server, agents, &dir);

        let response = app
            .oneshot(post_json(
                "/custom_generate",
                json!({"length": 50, "keywords": ["rust"], "tone": "casual", "post": "base"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["posts"][0]["post_heading"], "draft-2");
    }

    #[tokio::test]
    async fn test_custom_generate_still_responds_after_retry_cap() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let always_rejected = Evaluation {
            valid: false,
            feedback: Some("no".to_string()),
        };
        let agents = StubAgents::new(vec![
            always_rejected.clone(),
            always_rejected.clone(),
            always_rejected,
        ]);
        let app = test_app(&server, agents, &dir);

        let response = app
            .oneshot(post_json(
                "/custom_generate",
                json!({"length": 50, "keywords": [], "tone": "formal", "post": "base"}),
            ))
            .await
            .unwrap();
        // Last unvalidated draft set is still a 200 response.
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["posts"][0]["post_heading"], "draft-4");
    }

    #[tokio::test]
    async fn test_custom_generate_rejects_empty_post() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&server, StubAgents::new(vec![]), &dir);

        let response = app
            .oneshot(post_json(
                "/custom_generate",
                json!({"length": 50, "keywords": [], "tone": "casual", "post": "   "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_linkedin_profile_data_passthrough() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get-profile-data"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"headline": "Engineer"})),
            )
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&server, StubAgents::new(vec![]), &dir);

        let response = app
            .oneshot(post_json(
                "/linkedin_profile_data",
                json!({"profile_url": "https://www.linkedin.com/in/janedoe"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"]["headline"], "Engineer");
    }
}
