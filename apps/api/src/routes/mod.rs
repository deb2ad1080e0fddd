pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export_handlers;
use crate::onboarding::handlers as onboarding_handlers;
use crate::simulation::handlers as simulation_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Simulation API
        .route(
            "/api/v1/simulations",
            post(simulation_handlers::handle_simulate),
        )
        .route(
            "/api/v1/scenarios/examples",
            get(simulation_handlers::handle_examples),
        )
        // Export API
        .route(
            "/api/v1/simulations/export",
            post(export_handlers::handle_export),
        )
        // Onboarding API
        .route(
            "/api/v1/onboarding",
            get(onboarding_handlers::handle_get_onboarding),
        )
        .route(
            "/api/v1/onboarding/dismiss",
            post(onboarding_handlers::handle_dismiss),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::export::{
        DirectDrawStrategy, ExportDocument, ExportError, PdfExporter, PdfStrategy,
    };
    use crate::llm_client::{CompletionError, CompletionProvider};
    use crate::models::ScenarioRequest;
    use crate::onboarding::{FilePreferenceStore, InMemoryPreferenceStore, OnboardingGate};

    /// Replies with a fixed body, or fails when `reply` is `None`.
    struct FixedProvider {
        reply: Option<String>,
    }

    #[async_trait]
    impl CompletionProvider for FixedProvider {
        async fn complete_scenario(
            &self,
            _request: &ScenarioRequest,
        ) -> Result<String, CompletionError> {
            self.reply.clone().ok_or(CompletionError::MissingApiKey)
        }
    }

    struct FailingStrategy;

    #[async_trait]
    impl PdfStrategy for FailingStrategy {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn render(&self, _doc: &ExportDocument) -> Result<Vec<u8>, ExportError> {
            Err(ExportError::EmptyOutput)
        }
    }

    fn test_config() -> Config {
        Config {
            groq_api_key: None,
            completion_api_url: "http://127.0.0.1:9/unused".to_string(),
            completion_timeout: Duration::from_secs(1),
            html_to_pdf_bin: "definitely-not-a-real-converter".to_string(),
            preferences_path: None,
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn app_with(reply: Option<&str>, strategies: Vec<Arc<dyn PdfStrategy>>) -> Router {
        let store = Arc::new(InMemoryPreferenceStore::new());
        let state = AppState {
            config: test_config(),
            completion: Arc::new(FixedProvider {
                reply: reply.map(str::to_string),
            }),
            exporter: Arc::new(PdfExporter::new(strategies)),
            onboarding: Arc::new(OnboardingGate::mount(store).unwrap()),
        };
        build_router(state)
    }

    fn offline_app() -> Router {
        app_with(None, vec![Arc::new(DirectDrawStrategy) as Arc<dyn PdfStrategy>])
    }

    fn valid_form() -> Value {
        json!({
            "scenario": "What if I quit my job to sail around the world?",
            "category": "travel",
            "currentSituation": "Software engineer, 32, some savings",
            "timeframe": "2years",
            "riskTolerance": 7
        })
    }

    fn minimal_report() -> Value {
        json!({
            "summary": "s",
            "feasibility": 50,
            "timeToAchieve": "1 year",
            "financialImpact": "none",
            "advantages": ["a"],
            "challenges": ["c"],
            "recommendations": ["r"],
            "timeline": []
        })
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = offline_app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "dreamsim-api");
        assert_eq!(body["aiEnabled"], false);
        assert_eq!(body["pdfStrategies"], json!(["direct-draw"]));
    }

    #[tokio::test]
    async fn test_simulate_falls_back_to_offline_report() {
        let response = offline_app()
            .oneshot(post_json("/api/v1/simulations", &valid_form()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["source"], "offline");
        assert_eq!(body["report"]["feasibility"], 64);
        assert_eq!(body["feasibilityLabel"], "Feasible");
        assert_eq!(body["report"]["timeline"].as_array().unwrap().len(), 5);
        assert!(body["report"]["timeToAchieve"].is_string());
    }

    #[tokio::test]
    async fn test_simulate_uses_ai_reply() {
        let reply = r#"Sure! {"summary":"Doable.","feasibility":85,"timeToAchieve":"2 years"}"#;
        let app = app_with(
            Some(reply),
            vec![Arc::new(DirectDrawStrategy) as Arc<dyn PdfStrategy>],
        );
        let response = app
            .oneshot(post_json("/api/v1/simulations", &valid_form()))
            .await
            .unwrap();
        let body = json_body(response).await;

        assert_eq!(body["source"], "ai");
        assert_eq!(body["report"]["summary"], "Doable.");
        assert_eq!(body["report"]["feasibility"], 85);
        assert_eq!(body["feasibilityLabel"], "Highly Feasible");
        assert_eq!(body["report"]["advantages"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_simulate_rejects_invalid_form_with_every_field() {
        let form = json!({ "scenario": "short", "riskTolerance": 11 });
        let response = offline_app()
            .oneshot(post_json("/api/v1/simulations", &form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = body["error"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        for expected in [
            "scenario",
            "category",
            "currentSituation",
            "timeframe",
            "riskTolerance",
        ] {
            assert!(fields.contains(&expected), "missing {expected}: {fields:?}");
        }
    }

    #[tokio::test]
    async fn test_simulate_wrongly_typed_scenario_is_a_field_error() {
        let mut form = valid_form();
        form["scenario"] = json!(12345678901_i64);
        let response = offline_app()
            .oneshot(post_json("/api/v1/simulations", &form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["fields"][0]["field"], "scenario");
        assert_eq!(
            body["error"]["fields"][0]["message"],
            "Scenario must be text."
        );
    }

    #[tokio::test]
    async fn test_unreadable_body_is_a_validation_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/simulations")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = offline_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["fields"][0]["field"], "body");
    }

    #[tokio::test]
    async fn test_export_wrongly_typed_fields_are_rejected_as_json() {
        for request in [
            json!({ "report": minimal_report(), "scenario": 42, "category": "travel" }),
            json!({ "report": minimal_report(), "scenario": "What if I moved?", "category": "astrology" }),
        ] {
            let response = offline_app()
                .oneshot(post_json("/api/v1/simulations/export", &request))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = json_body(response).await;
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
            assert_eq!(body["error"]["fields"][0]["field"], "body");
            assert!(body["error"]["fields"][0]["message"].is_string());
        }
    }

    #[tokio::test]
    async fn test_examples_by_category_and_fallback() {
        let response = offline_app()
            .oneshot(get("/api/v1/scenarios/examples?category=career"))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["category"], "career");
        assert_eq!(body["examples"].as_array().unwrap().len(), 3);

        let response = offline_app()
            .oneshot(get("/api/v1/scenarios/examples?category=astrology"))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["category"], "other");
    }

    #[tokio::test]
    async fn test_export_returns_pdf_attachment() {
        let sim = offline_app()
            .oneshot(post_json("/api/v1/simulations", &valid_form()))
            .await
            .unwrap();
        let report = json_body(sim).await["report"].clone();

        let app = app_with(
            None,
            vec![
                Arc::new(FailingStrategy) as Arc<dyn PdfStrategy>,
                Arc::new(DirectDrawStrategy) as Arc<dyn PdfStrategy>,
            ],
        );
        let request = json!({
            "report": report,
            "scenario": "What if I quit my job to sail around the world?",
            "category": "travel"
        });
        let response = app
            .oneshot(post_json("/api/v1/simulations/export", &request))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"dream-scenario-travel-"));
        assert!(disposition.ends_with(".pdf\""));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_reports_failure_when_every_strategy_fails() {
        let app = app_with(None, vec![Arc::new(FailingStrategy) as Arc<dyn PdfStrategy>]);
        let request = json!({
            "report": minimal_report(),
            "scenario": "What if I moved to Lisbon?",
            "category": "lifestyle"
        });
        let response = app
            .oneshot(post_json("/api/v1/simulations/export", &request))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(
            body["error"]["message"],
            "Could not generate PDF. Please try again."
        );
    }

    #[tokio::test]
    async fn test_onboarding_dismiss_persists_to_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = Arc::new(FilePreferenceStore::open(&path).unwrap());
        let state = AppState {
            config: test_config(),
            completion: Arc::new(FixedProvider { reply: None }),
            exporter: Arc::new(PdfExporter::new(vec![])),
            onboarding: Arc::new(OnboardingGate::mount(store).unwrap()),
        };

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/onboarding/dismiss")
            .body(Body::empty())
            .unwrap();
        let body = json_body(build_router(state).oneshot(request).await.unwrap()).await;
        assert_eq!(body["dismissed"], true);

        let reopened = FilePreferenceStore::open(&path).unwrap();
        let gate = OnboardingGate::mount(Arc::new(reopened)).unwrap();
        assert!(!gate.should_show_welcome());
    }

    #[tokio::test]
    async fn test_onboarding_dismiss_flow() {
        let app = offline_app();

        let body = json_body(app.clone().oneshot(get("/api/v1/onboarding")).await.unwrap()).await;
        assert_eq!(body["showWelcome"], true);
        assert_eq!(body["steps"].as_array().unwrap().len(), 4);

        let request = || {
            Request::builder()
                .method("POST")
                .uri("/api/v1/onboarding/dismiss")
                .body(Body::empty())
                .unwrap()
        };
        let body = json_body(app.clone().oneshot(request()).await.unwrap()).await;
        assert_eq!(body["dismissed"], true);
        let body = json_body(app.clone().oneshot(request()).await.unwrap()).await;
        assert_eq!(body["dismissed"], false);

        let body = json_body(app.oneshot(get("/api/v1/onboarding")).await.unwrap()).await;
        assert_eq!(body["showWelcome"], false);
    }
}
