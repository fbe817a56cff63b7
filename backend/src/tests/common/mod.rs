// Common test utilities and helpers

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

use crate::config::Config;
use crate::localizer::{ContentRequest, GenerationBackend, ProviderError};
use crate::{AppState, build_router};

/// Backend double: counts calls, remembers the key it was given, replays one answer
pub struct StubBackend {
    calls: AtomicUsize,
    answer: Result<Option<String>, ProviderError>,
    last_key: std::sync::Mutex<Option<String>>,
}

impl StubBackend {
    pub fn answering(answer: Result<Option<String>, ProviderError>) -> Arc<Self> {
        Arc::new(Self { calls: AtomicUsize::new(0), answer, last_key: Default::default() })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::answering(Ok(Some(text.to_string())))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_key(&self) -> Option<String> {
        self.last_key.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for StubBackend {
    async fn generate_content(
        &self,
        api_key: &str,
        _request: &ContentRequest<'_>,
    ) -> Result<Option<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_key.lock().unwrap() = Some(api_key.to_string());
        self.answer.clone()
    }
}

/// Backend that blocks inside the provider call until released
#[derive(Default)]
pub struct GatedBackend {
    pub started: tokio::sync::Notify,
    pub release: tokio::sync::Notify,
}

#[async_trait]
impl GenerationBackend for GatedBackend {
    async fn generate_content(
        &self,
        _api_key: &str,
        _request: &ContentRequest<'_>,
    ) -> Result<Option<String>, ProviderError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(Some("Hàng có sẵn".to_string()))
    }
}

/// Config pointing the key store at a fresh temp file
pub fn test_config(deployment_key: Option<&str>) -> Config {
    let mut config = Config::default();
    config.storage.path = std::env::temp_dir()
        .join(format!("lendon-api-{}", uuid::Uuid::new_v4()))
        .join("local_storage.json")
        .display()
        .to_string();
    config.gemini.api_key = deployment_key.map(String::from);
    config.logging.file = None;
    config
}

pub struct TestApp {
    pub state: Arc<AppState>,
    pub router: Router,
}

pub fn create_test_app<B>(deployment_key: Option<&str>, backend: Arc<B>) -> TestApp
where
    B: GenerationBackend + 'static,
{
    let state = Arc::new(AppState::new(test_config(deployment_key), backend));
    let router = build_router(Arc::clone(&state));
    TestApp { state, router }
}

impl TestApp {
    /// Replace the key store file with unparsable content
    pub async fn corrupt_store(&self) {
        let path = self.state.credential_store.path();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(path, "not json").await.unwrap();
    }

    /// Send one request, return status and parsed JSON body (Null when empty)
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        lang: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(lang) = lang {
            builder = builder.header(header::ACCEPT_LANGUAGE, lang);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::PUT, uri, Some(body), None).await
    }
}
