use axum::http::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::localizer::ProviderError;
use crate::tests::common::{GatedBackend, StubBackend, create_test_app};

const USER_KEY: &str = "AIzaSy-user-key";
const DEPLOYMENT_KEY: &str = "AIzaSy-deployment-key";

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = create_test_app(None, StubBackend::replying("x"));
    let (status, body) = app.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_scenarios_follow_accept_language() {
    let app = create_test_app(None, StubBackend::replying("x"));

    let (status, en) = app.call(Method::GET, "/api/scenarios", None, Some("en-US,en;q=0.9")).await;
    assert_eq!(status, StatusCode::OK);
    let en = en.as_array().unwrap();
    assert_eq!(en.len(), 4);
    assert_eq!(en[0]["id"], "SEO_TITLE");
    assert_eq!(en[0]["label"], "SEO Title");
    assert_eq!(en[2]["id"], "CUSTOMER_SERVICE");

    let (_, zh) = app.get("/api/scenarios").await;
    assert_eq!(zh[0]["label"], "SEO 标题", "Chinese is the default locale");
}

#[tokio::test]
async fn test_models_and_keywords() {
    let app = create_test_app(None, StubBackend::replying("x"));

    let (_, models) = app.get("/api/models").await;
    let models = models.as_array().unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(models[0]["id"], "gemini-3-pro-preview");
    assert_eq!(models[0]["is_default"], true);
    assert_eq!(models[1]["id"], "gemini-2.5-flash");
    assert_eq!(models[1]["is_default"], false);

    app.post("/api/workbench/tags", json!({ "tag": "Sale 9.9" })).await;
    let (_, keywords) = app.get("/api/keywords").await;
    let keywords = keywords.as_array().unwrap();
    assert_eq!(keywords.len(), 10);
    assert_eq!(keywords[0]["term"], "Freeship");
    assert_eq!(keywords[0]["meaning"], "免运费");
    assert_eq!(keywords[0]["selected"], false);
    assert_eq!(keywords[9]["term"], "Sale 9.9");
    assert_eq!(keywords[9]["custom"], true);
    assert_eq!(keywords[9]["selected"], true);
    assert!(keywords[9]["meaning"].is_null());
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn test_settings_never_return_the_key() {
    let app = create_test_app(None, StubBackend::replying("x"));

    let (status, body) = app.get("/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["key_required"], true);
    assert_eq!(body["has_user_key"], false);
    assert!(body.get("notice").is_none());

    let (status, body) = app.put("/api/settings/api-key", json!({ "api_key": USER_KEY })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_user_key"], true);
    assert_eq!(body["key_required"], false);
    assert!(!body.to_string().contains(USER_KEY));

    let (status, body) = app.call(Method::DELETE, "/api/settings/api-key", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_user_key"], false);
    assert_eq!(body["key_required"], true);
}

#[tokio::test]
async fn test_saving_empty_key_removes_it() {
    let app = create_test_app(None, StubBackend::replying("x"));
    app.put("/api/settings/api-key", json!({ "api_key": USER_KEY })).await;

    let (_, body) = app.put("/api/settings/api-key", json!({ "api_key": "   " })).await;

    assert_eq!(body["has_user_key"], false);
    assert_eq!(app.state.credential_store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_deployment_key_notice() {
    let app = create_test_app(Some(DEPLOYMENT_KEY), StubBackend::replying("x"));

    let (_, body) = app.call(Method::GET, "/api/settings", None, Some("en")).await;

    assert_eq!(body["has_deployment_key"], true);
    assert_eq!(body["key_required"], false);
    assert!(body["notice"].as_str().unwrap().contains("Environment Key Detected"));
    assert!(!body.to_string().contains(DEPLOYMENT_KEY));
}

// ============================================================================
// Generation
// ============================================================================

#[tokio::test]
async fn test_generate_without_key_is_unauthorized() {
    let backend = StubBackend::replying("x");
    let app = create_test_app(None, backend.clone());

    let (status, body) = app.post("/api/generate", json!({ "source_text": "全场包邮" })).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);
    assert_eq!(body["message"], "API Key is missing. Please configure it in Settings.");
    assert_eq!(body["details"]["kind"], "MISSING_CREDENTIAL");
    assert_eq!(body["details"]["reopen_settings"], true);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_generate_uses_saved_user_key() {
    let backend = StubBackend::replying("Freeship toàn quốc");
    let app = create_test_app(None, backend.clone());
    app.put("/api/settings/api-key", json!({ "api_key": USER_KEY })).await;

    let (status, body) = app
        .post(
            "/api/generate",
            json!({
                "source_text": "全场包邮",
                "scenario": "MARKETING",
                "keywords": ["Freeship"],
                "model": "gemini-2.5-flash"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"], "Freeship toàn quốc");
    assert_eq!(body["chars"], "Freeship toàn quốc".chars().count());
    assert_eq!(body["scenario"], "MARKETING");
    assert_eq!(body["model"], "gemini-2.5-flash");
    assert_eq!(backend.last_key().as_deref(), Some(USER_KEY));
}

#[tokio::test]
async fn test_deployment_key_shadows_user_key() {
    let backend = StubBackend::replying("ok");
    let app = create_test_app(Some(DEPLOYMENT_KEY), backend.clone());
    app.put("/api/settings/api-key", json!({ "api_key": USER_KEY })).await;

    let (status, _) = app.post("/api/generate", json!({ "source_text": "现货" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(backend.last_key().as_deref(), Some(DEPLOYMENT_KEY));
}

#[tokio::test]
async fn test_deployment_key_ignores_broken_store() {
    let backend = StubBackend::replying("Hàng có sẵn");
    let app = create_test_app(Some(DEPLOYMENT_KEY), backend.clone());
    app.corrupt_store().await;

    let (status, body) = app.post("/api/generate", json!({ "source_text": "现货" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"], "Hàng có sẵn");
    assert_eq!(backend.last_key().as_deref(), Some(DEPLOYMENT_KEY));
}

#[tokio::test]
async fn test_blank_text_ignores_broken_store() {
    let backend = StubBackend::replying("x");
    let app = create_test_app(None, backend.clone());
    app.corrupt_store().await;

    let (status, body) = app.post("/api/generate", json!({ "source_text": "   " })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"], "");
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_broken_store_without_deployment_key_fails() {
    let backend = StubBackend::replying("x");
    let app = create_test_app(None, backend.clone());
    app.corrupt_store().await;

    let (status, body) = app.post("/api/generate", json!({ "source_text": "现货" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 5003);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_rate_limit_maps_to_429() {
    let backend = StubBackend::answering(Err(ProviderError::status(429, "quota exceeded")));
    let app = create_test_app(Some(DEPLOYMENT_KEY), backend);

    let (status, body) = app.post("/api/generate", json!({ "source_text": "现货" })).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], 1003);
    assert_eq!(body["details"]["kind"], "RATE_LIMITED");
}

#[tokio::test]
async fn test_empty_model_is_rejected() {
    let app = create_test_app(Some(DEPLOYMENT_KEY), StubBackend::replying("x"));

    let (status, body) =
        app.post("/api/generate", json!({ "source_text": "现货", "model": "" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4001);
}

// ============================================================================
// Workbench
// ============================================================================

#[tokio::test]
async fn test_tag_endpoint_deduplicates_presets() {
    let app = create_test_app(None, StubBackend::replying("x"));

    let (status, body) = app.post("/api/workbench/tags", json!({ "tag": " Freeship " })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "selected");
    assert_eq!(body["custom_tags"], json!([]));
    assert_eq!(body["keywords"], json!(["Freeship"]));

    let (_, body) = app.post("/api/workbench/tags", json!({ "tag": "Hàng hot" })).await;
    assert_eq!(body["outcome"], "added");

    let (_, body) = app.post("/api/workbench/tags", json!({ "tag": "Hàng hot" })).await;
    assert_eq!(body["outcome"], "unchanged");
    assert_eq!(body["custom_tags"], json!(["Hàng hot"]));
    assert_eq!(body["keywords"], json!(["Freeship", "Hàng hot"]));

    let (_, body) = app.post("/api/workbench/tags", json!({ "tag": "  " })).await;
    assert_eq!(body["outcome"], "ignored");
}

#[tokio::test]
async fn test_toggle_keyword() {
    let app = create_test_app(None, StubBackend::replying("x"));

    let (_, body) = app.post("/api/workbench/keywords/toggle", json!({ "term": "Voucher" })).await;
    assert_eq!(body["selected"], true);

    let (_, body) = app.post("/api/workbench/keywords/toggle", json!({ "term": "Voucher" })).await;
    assert_eq!(body["selected"], false);
    assert_eq!(body["keywords"], json!([]));

    let (status, _) = app.post("/api/workbench/keywords/toggle", json!({ "term": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_workbench_update_and_clear() {
    let app = create_test_app(None, StubBackend::replying("x"));

    let (status, body) = app
        .put("/api/workbench", json!({ "input": "亲，这款是现货哦", "scenario": "CUSTOMER_SERVICE" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input"], "亲，这款是现货哦");
    assert_eq!(body["scenario"], "CUSTOMER_SERVICE");
    assert_eq!(body["model"], "gemini-3-pro-preview");
    assert_eq!(body["keyword_options"].as_array().unwrap().len(), 9);

    let (_, body) = app.post("/api/workbench/clear", json!({})).await;
    assert_eq!(body["input"], "");
    assert_eq!(body["scenario"], "CUSTOMER_SERVICE");
}

#[tokio::test]
async fn test_workbench_generate_stores_output() {
    let backend = StubBackend::replying("Dạ, sản phẩm này có sẵn ạ");
    let app = create_test_app(Some(DEPLOYMENT_KEY), backend.clone());
    app.put("/api/workbench", json!({ "input": "亲，这款是现货哦", "scenario": "CUSTOMER_SERVICE" }))
        .await;

    let (status, body) = app.post("/api/workbench/generate", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"], "Dạ, sản phẩm này có sẵn ạ");
    let (_, wb) = app.get("/api/workbench").await;
    assert_eq!(wb["output"], "Dạ, sản phẩm này có sẵn ạ");
    assert_eq!(wb["is_loading"], false);
    assert!(wb["error"].is_null());
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_workbench_generate_with_blank_input_skips_backend() {
    let backend = StubBackend::replying("x");
    let app = create_test_app(Some(DEPLOYMENT_KEY), backend.clone());

    let (status, body) = app.post("/api/workbench/generate", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"], "");
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_workbench_generate_failure_is_recorded() {
    let backend = StubBackend::answering(Err(ProviderError::status(400, "API_KEY_INVALID")));
    let app = create_test_app(None, backend);
    app.put("/api/settings/api-key", json!({ "api_key": USER_KEY })).await;
    app.put("/api/workbench", json!({ "input": "全场五折" })).await;

    let (status, body) = app.post("/api/workbench/generate", json!({})).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["details"]["kind"], "INVALID_CREDENTIAL");
    let (_, wb) = app.get("/api/workbench").await;
    assert_eq!(wb["error"], "Invalid API Key. Please check your settings.");
    assert_eq!(wb["is_loading"], false);
}

#[tokio::test]
async fn test_workbench_generate_finishes_after_client_disconnect() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let backend = Arc::new(GatedBackend::default());
    let app = create_test_app(Some(DEPLOYMENT_KEY), backend.clone());
    app.put("/api/workbench", json!({ "input": "现货" })).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/workbench/generate")
        .body(Body::empty())
        .unwrap();
    let router = app.router.clone();
    let call = tokio::spawn(async move { router.oneshot(request).await });

    backend.started.notified().await;
    assert!(app.state.workbench.read().await.is_loading);

    // Client goes away mid-call
    call.abort();
    let _ = call.await;
    backend.release.notify_one();

    let mut cleared = false;
    for _ in 0..100 {
        if !app.state.workbench.read().await.is_loading {
            cleared = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(cleared, "is_loading stuck after disconnect");
    assert_eq!(app.state.workbench.read().await.output, "Hàng có sẵn");
}
