use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use vibe_journal::api::middleware::SecurityConfig;
use vibe_journal::api::{create_router, create_router_with_security, AppState, ErrorResponse};
use vibe_journal::db::Database;
use vibe_journal::generator::{GenerateError, TextGenerator};
use vibe_journal::insight::{STRESSED_INSIGHT, STRESSED_QUOTE};
use vibe_journal::models::*;
use vibe_journal::service::InsightService;

/// Generator returning a fixed answer, or failing when `None`.
struct StubGenerator(Option<&'static str>);

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        self.0
            .map(str::to_string)
            .ok_or(GenerateError::Status {
                status: 503,
                body: "overloaded".to_string(),
            })
    }
}

const GENERATED: &str = r#"```json
{"mainInsight":"You showed up today.","microActions":[{"id":1,"text":"Sun Soak","instruction":"Step outside.","icon":"sun"}],"upliftingQuote":"One breath at a time."}
```"#;

fn state_with(generator: StubGenerator) -> AppState {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    AppState::new(db, InsightService::new(Arc::new(generator)))
}

fn setup_with(generator: StubGenerator) -> TestServer {
    TestServer::new(create_router(state_with(generator))).expect("Failed to create test server")
}

fn setup() -> TestServer {
    setup_with(StubGenerator(Some(GENERATED)))
}

fn scan_input(user_id: &str, vibe: &str, insight: &str) -> serde_json::Value {
    json!({
        "userId": user_id,
        "vibe": vibe,
        "body": "tired",
        "heart": "ok",
        "environment": "office",
        "reflection": "",
        "insight": insight,
        "microActions": [{"id": 1, "text": "Hydration Pause", "instruction": "Drink.", "icon": "water"}],
        "upliftingQuote": "Enough."
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let server = setup();
    let response = server.get("/api/v1/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

mod insights {
    use super::*;

    #[tokio::test]
    async fn returns_parsed_generator_output() {
        let server = setup();

        let response = server
            .post("/api/v1/insights")
            .json(&json!({ "body": "fine", "heart": "good", "vibe": "Calm / Peaceful" }))
            .await;

        response.assert_status_ok();
        let insight: Insight = response.json();
        assert_eq!(insight.main_insight, "You showed up today.");
        assert_eq!(insight.micro_actions[0].icon, ActionIcon::Sun);
        assert_eq!(insight.uplifting_quote, "One breath at a time.");
    }

    #[tokio::test]
    async fn falls_back_when_generator_fails() {
        let server = setup_with(StubGenerator(None));

        let response = server
            .post("/api/v1/insights")
            .json(&json!({
                "body": "tired",
                "heart": "stuck",
                "vibe": "Stressed / Frustrated"
            }))
            .await;

        response.assert_status_ok();
        let insight: Insight = response.json();
        assert_eq!(insight.main_insight, STRESSED_INSIGHT);
        assert_eq!(insight.uplifting_quote, STRESSED_QUOTE);
        assert_eq!(insight.micro_actions.len(), 3);
        assert_eq!(insight.micro_actions[0].text, "Define Tiny Step (30 sec)");
        assert_eq!(insight.micro_actions[1].text, "Cold Water Splash (30 sec)");
        assert_eq!(insight.micro_actions[2].text, "2-Minute Rule");
    }

    #[tokio::test]
    async fn accepts_empty_check_in() {
        let server = setup_with(StubGenerator(None));

        let response = server.post("/api/v1/insights").json(&json!({})).await;

        response.assert_status_ok();
        let insight: Insight = response.json();
        assert_eq!(insight.micro_actions.len(), 3);
    }

    #[tokio::test]
    async fn malformed_generator_output_is_bad_gateway() {
        let server = setup_with(StubGenerator(Some("{\"mainInsight\": \"cut off")));

        let response = server
            .post("/api/v1/insights")
            .json(&json!({ "vibe": "Sad / Low" }))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let error: ErrorResponse = response.json();
        assert_eq!(error.error, "insight generation failed");
        assert!(error.details.is_some());
    }

    #[tokio::test]
    async fn rate_limit_rejects_excess_requests() {
        let server = TestServer::new(create_router_with_security(
            state_with(StubGenerator(None)),
            SecurityConfig::with_rate_limit(2),
        ))
        .expect("Failed to create test server");

        for _ in 0..2 {
            server
                .post("/api/v1/insights")
                .json(&json!({}))
                .await
                .assert_status_ok();
        }

        server
            .post("/api/v1/insights")
            .json(&json!({}))
            .await
            .assert_status(StatusCode::TOO_MANY_REQUESTS);

        // History is not rate limited
        server
            .get("/api/v1/history")
            .add_query_param("userId", "u1")
            .await
            .assert_status_ok();
    }
}

mod history {
    use super::*;

    #[tokio::test]
    async fn save_returns_created_record() {
        let server = setup();

        let response = server
            .post("/api/v1/history")
            .json(&scan_input("u1", "Sad / Low", "Be gentle."))
            .await;

        response.assert_status(StatusCode::CREATED);
        let saved: SaveScanResponse = response.json();
        assert!(!saved.scan.id.is_empty());
        assert_eq!(saved.scan.user_id, "u1");
        assert_eq!(saved.scan.vibe, Some(Vibe::Sad));
        assert_eq!(saved.scan.insight, "Be gentle.");
        assert_eq!(saved.scan.micro_actions[0].icon, ActionIcon::Water);
        assert_eq!(saved.scan.uplifting_quote.as_deref(), Some("Enough."));
    }

    #[tokio::test]
    async fn save_requires_user_and_vibe() {
        let server = setup();

        for body in [
            json!({ "vibe": "Calm / Peaceful", "insight": "x" }),
            json!({ "userId": "u1", "insight": "x" }),
            json!({ "userId": "  ", "vibe": "Calm / Peaceful" }),
        ] {
            let response = server.post("/api/v1/history").json(&body).await;
            response.assert_status_bad_request();
            response.assert_json(&json!({ "error": "Missing required fields" }));
        }
    }

    #[tokio::test]
    async fn save_rejects_unknown_vibe() {
        let server = setup();

        let response = server
            .post("/api/v1/history")
            .json(&scan_input("u1", "Ecstatic", "x"))
            .await;

        response.assert_status_bad_request();
        let error: ErrorResponse = response.json();
        assert!(error.error.contains("Ecstatic"));
    }

    #[tokio::test]
    async fn list_is_empty_for_new_user() {
        let server = setup();

        let response = server
            .get("/api/v1/history")
            .add_query_param("userId", "nobody")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "scans": [] }));
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let server = setup();

        for insight in ["first", "second", "third"] {
            server
                .post("/api/v1/history")
                .json(&scan_input("u1", "Calm / Peaceful", insight))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server
            .get("/api/v1/history")
            .add_query_param("userId", "u1")
            .await;

        response.assert_status_ok();
        let list: ScanListResponse = response.json();
        let insights: Vec<&str> = list.scans.iter().map(|s| s.insight.as_str()).collect();
        assert_eq!(insights, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn list_only_returns_own_records() {
        let server = setup();

        server
            .post("/api/v1/history")
            .json(&scan_input("alice", "Happy / Content", "mine"))
            .await;
        server
            .post("/api/v1/history")
            .json(&scan_input("bob", "Sad / Low", "his"))
            .await;

        let list: ScanListResponse = server
            .get("/api/v1/history")
            .add_query_param("userId", "alice")
            .await
            .json();

        assert_eq!(list.scans.len(), 1);
        assert_eq!(list.scans[0].insight, "mine");
    }

    #[tokio::test]
    async fn list_requires_user_id() {
        let server = setup();

        let response = server.get("/api/v1/history").await;

        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "Missing user ID" }));
    }

    #[tokio::test]
    async fn clear_removes_only_that_users_records() {
        let server = setup();

        for user in ["alice", "alice", "bob"] {
            server
                .post("/api/v1/history")
                .json(&scan_input(user, "Neutral / Steady", "x"))
                .await;
        }

        let response = server
            .delete("/api/v1/history")
            .add_query_param("userId", "alice")
            .await;

        response.assert_status_ok();
        let cleared: ClearScansResponse = response.json();
        assert_eq!(cleared.deleted, 2);

        let alice: ScanListResponse = server
            .get("/api/v1/history")
            .add_query_param("userId", "alice")
            .await
            .json();
        assert!(alice.scans.is_empty());

        let bob: ScanListResponse = server
            .get("/api/v1/history")
            .add_query_param("userId", "bob")
            .await
            .json();
        assert_eq!(bob.scans.len(), 1);
    }

    #[tokio::test]
    async fn clear_requires_user_id() {
        let server = setup();

        server
            .delete("/api/v1/history")
            .await
            .assert_status_bad_request();
    }
}
