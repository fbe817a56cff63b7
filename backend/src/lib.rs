rust_i18n::i18n!("locales", fallback = "zh");

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::models::Workbench;
use crate::services::localizer::CredentialResolver;
use crate::services::{CredentialStore, GenerationBackend, LocalizerService};

pub use services::localizer;

/// Shared state behind every handler
pub struct AppState {
    pub config: Config,
    pub localizer: LocalizerService,
    pub credential_store: CredentialStore,
    /// Held only for short edits, never across a provider call
    pub workbench: RwLock<Workbench>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn GenerationBackend>) -> Self {
        let resolver = CredentialResolver::new(config.gemini.api_key.clone());
        let credential_store = CredentialStore::new(&config.storage.path);
        let workbench = Workbench::with_model(config.gemini.default_model.clone());

        Self {
            localizer: LocalizerService::new(backend, resolver),
            credential_store,
            workbench: RwLock::new(workbench),
            config,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::catalog::health,
        handlers::catalog::list_scenarios,
        handlers::catalog::list_models,
        handlers::catalog::list_keywords,
        handlers::workbench::get_workbench,
        handlers::workbench::update_workbench,
        handlers::workbench::clear_input,
        handlers::workbench::toggle_keyword,
        handlers::workbench::add_tag,
        handlers::localize::generate,
        handlers::localize::generate_from_workbench,
        handlers::settings::get_settings,
        handlers::settings::save_api_key,
        handlers::settings::delete_api_key,
    ),
    components(schemas(
        models::Scenario,
        models::ScenarioInfo,
        models::ModelType,
        models::ModelInfo,
        models::KeywordOption,
        models::GenerationRequest,
        models::GenerationResponse,
        models::Workbench,
        models::TagOutcome,
        models::UpdateWorkbenchRequest,
        models::ToggleKeywordRequest,
        models::AddTagRequest,
        models::TagResponse,
        models::SettingsResponse,
        models::SaveApiKeyRequest,
        localizer::GenerationErrorKind,
        handlers::catalog::HealthResponse,
        handlers::workbench::WorkbenchView,
        handlers::workbench::ToggleKeywordResponse,
    )),
    tags(
        (name = "System", description = "Service health"),
        (name = "Catalog", description = "Scenarios, models and keyword presets"),
        (name = "Workbench", description = "Localization form state"),
        (name = "Localization", description = "Chinese to Vietnamese generation"),
        (name = "Settings", description = "Gemini API key management"),
    ),
    info(
        title = "Lendon API",
        version = "1.0.0",
        description = "Vietnamese e-commerce localization assistant"
    )
)]
pub struct ApiDoc;

pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/health", get(handlers::catalog::health))
        .route("/api/scenarios", get(handlers::catalog::list_scenarios))
        .route("/api/models", get(handlers::catalog::list_models))
        .route("/api/keywords", get(handlers::catalog::list_keywords))
        .route(
            "/api/workbench",
            get(handlers::workbench::get_workbench).put(handlers::workbench::update_workbench),
        )
        .route("/api/workbench/clear", post(handlers::workbench::clear_input))
        .route("/api/workbench/keywords/toggle", post(handlers::workbench::toggle_keyword))
        .route("/api/workbench/tags", post(handlers::workbench::add_tag))
        .route("/api/workbench/generate", post(handlers::localize::generate_from_workbench))
        .route("/api/generate", post(handlers::localize::generate))
        .route("/api/settings", get(handlers::settings::get_settings))
        .route(
            "/api/settings/api-key",
            put(handlers::settings::save_api_key).delete(handlers::settings::delete_api_key),
        )
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .layer(axum_middleware::from_fn(middleware::locale_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
