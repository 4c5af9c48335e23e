use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use adpulse_config::AppConfig;
use adpulse_gateway::{create_router, GatewayState, USER_ID_HEADER};

type TestResult<T = ()> = anyhow::Result<T>;

struct TestContext {
    _temp_dir: TempDir,
    state: GatewayState,
}

impl TestContext {
    async fn new() -> TestResult<Self> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("gateway.sqlite");

        let mut config = AppConfig::default();
        config.database.url = format!("sqlite://{}", db_path.display());
        config.database.max_connections = 2;

        let state = GatewayState::from_config(config).await?;
        state
            .users
            .ensure(state.config.auth.default_user_id, "Owner", "owner@adpulse.local")
            .await?;

        Ok(Self {
            _temp_dir: temp_dir,
            state,
        })
    }

    fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResult<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value)?)
            }
            None => Body::empty(),
        };
        let response = self.router().oneshot(builder.body(body)?).await?;
        read_json(response).await
    }

    async fn get(&self, uri: &str) -> TestResult<(StatusCode, Value)> {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> TestResult<(StatusCode, Value)> {
        self.send(Method::POST, uri, Some(body)).await
    }
}

async fn read_json(response: axum::response::Response) -> TestResult<(StatusCode, Value)> {
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

#[tokio::test]
async fn health_reports_ok() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, body) = ctx.get("/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn realtime_config_exposes_refresh_interval() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, body) = ctx.get("/api/realtime/config").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["refresh_interval_seconds"],
        ctx.state.config.realtime.refresh_interval_seconds
    );
    assert_eq!(body["websocket_path"], "/ws");
    assert_eq!(body["connections"], 0);
    Ok(())
}

#[tokio::test]
async fn client_crud_round_trip() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, created) = ctx
        .post(
            "/api/clients",
            json!({ "name": "Nile Foods", "email": "hello@nilefoods.eg", "industry": "food" }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("client id");
    assert_eq!(created["status"], "active");

    let (status, fetched) = ctx.get(&format!("/api/clients/{id}")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Nile Foods");
    assert_eq!(fetched["email"], "hello@nilefoods.eg");

    let (status, updated) = ctx
        .send(
            Method::PUT,
            &format!("/api/clients/{id}"),
            Some(json!({ "company": "Nile Foods LLC" })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["company"], "Nile Foods LLC");
    // Absent fields stay as they were
    assert_eq!(updated["industry"], "food");

    let (status, _) = ctx.send(Method::DELETE, &format!("/api/clients/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = ctx.get(&format!("/api/clients/{id}")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "404");
    Ok(())
}

#[tokio::test]
async fn invalid_client_is_rejected() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, body) = ctx
        .post("/api/clients", json!({ "name": "  ", "email": "not-an-email" }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("name"));
    assert!(message.contains("email"));
    Ok(())
}

#[tokio::test]
async fn deleting_client_with_invoices_conflicts() -> TestResult {
    let ctx = TestContext::new().await?;

    let (_, client) = ctx.post("/api/clients", json!({ "name": "Delta Retail" })).await?;
    let client_id = client["id"].as_i64().expect("client id");

    let (status, invoice) = ctx
        .post(
            "/api/invoices",
            json!({
                "client_id": client_id,
                "issue_date": "2024-03-01",
                "due_date": "2024-03-31",
                "tax": 14.0,
                "items": [
                    { "description": "Campaign setup", "quantity": 2.0, "unit_price": 50.0 },
                    { "description": "Creative pack", "unit_price": 100.0 }
                ]
            }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(invoice["subtotal"], 200.0);
    assert_eq!(invoice["total"], 214.0);
    assert_eq!(invoice["items"].as_array().map(Vec::len), Some(2));

    let (status, body) = ctx
        .send(Method::DELETE, &format!("/api/clients/{client_id}"), None)
        .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "409");
    Ok(())
}

#[tokio::test]
async fn invoice_due_date_before_issue_date_is_rejected() -> TestResult {
    let ctx = TestContext::new().await?;

    let (_, client) = ctx.post("/api/clients", json!({ "name": "Delta Retail" })).await?;
    let (status, _) = ctx
        .post(
            "/api/invoices",
            json!({
                "client_id": client["id"],
                "issue_date": "2024-03-31",
                "due_date": "2024-03-01",
            }),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn archived_campaign_is_hidden_until_requested() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, campaign) = ctx
        .post(
            "/api/campaigns",
            json!({ "name": "Ramadan push", "platform": "facebook", "budget": 1500.0 }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = campaign["id"].as_i64().expect("campaign id");

    let (status, archived) = ctx.post(&format!("/api/campaigns/{id}/archive"), json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(archived["is_archived"], true);

    let (_, listed) = ctx.get("/api/campaigns").await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));

    let (_, listed) = ctx.get("/api/campaigns?include_archived=true").await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, _) = ctx.send(Method::DELETE, &format!("/api/campaigns/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = ctx.get(&format!("/api/campaigns/{id}")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn campaign_end_before_start_is_rejected() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, _) = ctx
        .post(
            "/api/campaigns",
            json!({
                "name": "Backwards",
                "platform": "instagram",
                "start_date": "2024-05-10",
                "end_date": "2024-05-01"
            }),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn seeding_twice_gives_identical_counts() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, first) = ctx.post("/api/seed", json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["success"], true);

    let (status, second) = ctx.post("/api/seed", json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["counts"], second["counts"]);
    assert!(first["counts"]["clients"].as_i64().unwrap_or_default() > 0);

    let (status, advanced) = ctx.post("/api/seed-advanced", json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(
        advanced["counts"]["analytics"].as_i64().unwrap_or_default()
            > first["counts"]["analytics"].as_i64().unwrap_or_default()
    );
    Ok(())
}

#[tokio::test]
async fn invalid_user_header_is_rejected() -> TestResult {
    let ctx = TestContext::new().await?;

    let request = Request::builder()
        .uri("/api/notifications")
        .header(USER_ID_HEADER, "abc")
        .body(Body::empty())?;
    let (status, body) = read_json(ctx.router().oneshot(request).await?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "400");
    Ok(())
}

#[tokio::test]
async fn current_user_defaults_to_configured_owner() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, body) = ctx.get("/api/users/me").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], ctx.state.config.auth.default_user_id);
    assert_eq!(body["email"], "owner@adpulse.local");
    Ok(())
}

#[tokio::test]
async fn generated_ad_is_stored_as_content() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, ad) = ctx
        .post(
            "/api/ai/ads/generate",
            json!({ "platform": "instagram", "product": "Date cookies" }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(ad["content"].as_str().unwrap_or_default().contains("Date cookies"));
    assert!(ad["image_url"].as_str().unwrap_or_default().starts_with("https://placehold.co/"));

    let content_id = ad["content_id"].as_i64().expect("content id");
    let (status, stored) = ctx.get(&format!("/api/ai/content/{content_id}")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["content_type"], "ad");
    assert_eq!(stored["platform"], "instagram");
    Ok(())
}

#[tokio::test]
async fn chat_message_gets_assistant_reply() -> TestResult {
    let ctx = TestContext::new().await?;

    let (_, chat) = ctx.post("/api/ai/chats", json!({ "title": "Ideas" })).await?;
    let chat_id = chat["id"].as_i64().expect("chat id");

    let (status, exchange) = ctx
        .post(
            &format!("/api/ai/chats/{chat_id}/messages"),
            json!({ "content": "How do I grow my budget?" }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(exchange["user_message"]["role"], "user");
    assert_eq!(exchange["assistant_message"]["role"], "assistant");

    let (_, full) = ctx.get(&format!("/api/ai/chats/{chat_id}")).await?;
    assert_eq!(full["messages"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn market_intelligence_ids_are_prefixed() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, report) = ctx
        .post("/api/ai/competitors/report", json!({ "competitor_ids": [] }))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(report["id"].as_str().unwrap_or_default().starts_with("report-"));

    let (_, reports) = ctx.get("/api/reports").await?;
    assert_eq!(reports.as_array().map(Vec::len), Some(1));
    assert_eq!(reports[0]["report_type"], "competitor_analysis");

    let (status, recommendation) = ctx
        .post(
            "/api/ai/targeting/recommendations",
            json!({ "objective": "conversions", "budget": 1000.0 }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(recommendation["id"].as_str().unwrap_or_default().starts_with("rec-"));
    Ok(())
}

#[tokio::test]
async fn notifications_read_all_clears_unread_count() -> TestResult {
    let ctx = TestContext::new().await?;

    for title in ["Budget alert", "Invoice paid"] {
        let (status, _) = ctx
            .post(
                "/api/notifications",
                json!({ "title": title, "message": "Check the dashboard" }),
            )
            .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, count) = ctx.get("/api/notifications/unread-count").await?;
    assert_eq!(count["count"], 2);

    let (status, body) = ctx.post("/api/notifications/read-all", json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 2);

    let (_, count) = ctx.get("/api/notifications/unread-count").await?;
    assert_eq!(count["count"], 0);
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, doc) = ctx.get("/api-docs/openapi.json").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/dashboard/summary"].is_object());
    Ok(())
}
