//! Catalogs: scenarios, models, keyword chips

use axum::{Json, extract::State};
use std::sync::Arc;
use rust_i18n::t;
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;
use crate::models::{DEFAULT_MODEL, KeywordOption, ModelInfo, ModelType, Scenario, ScenarioInfo};
use crate::utils::get_locale;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string(), version: env!("CARGO_PKG_VERSION").to_string() })
}

/// Scenario catalog in the request locale
#[utoipa::path(
    get,
    path = "/api/scenarios",
    responses(
        (status = 200, description = "Scenarios with localized labels", body = Vec<ScenarioInfo>)
    ),
    tag = "Catalog"
)]
pub async fn list_scenarios() -> Json<Vec<ScenarioInfo>> {
    let locale = get_locale();
    tracing::debug!("Listing scenarios for locale {}", locale);

    let scenarios = Scenario::ALL
        .into_iter()
        .map(|scenario| scenario_info(scenario, &locale))
        .collect();
    Json(scenarios)
}

pub fn scenario_info(scenario: Scenario, locale: &str) -> ScenarioInfo {
    let prefix = format!("scenario.{}", scenario.i18n_key());
    let text = |field: &str| {
        let key = format!("{}.{}", prefix, field);
        t!(&key, locale = locale).to_string()
    };
    ScenarioInfo {
        id: scenario,
        label: text("label"),
        description: text("description"),
        placeholder: text("placeholder"),
    }
}

#[utoipa::path(
    get,
    path = "/api/models",
    responses(
        (status = 200, description = "Models offered in the picker", body = Vec<ModelInfo>)
    ),
    tag = "Catalog"
)]
pub async fn list_models() -> Json<Vec<ModelInfo>> {
    let locale = get_locale();
    let models = ModelType::ALL
        .into_iter()
        .map(|model| ModelInfo {
            id: model.id().to_string(),
            label: t!(model.i18n_key(), locale = &locale).to_string(),
            is_default: model.id() == DEFAULT_MODEL,
        })
        .collect();
    Json(models)
}

/// Presets first, then custom tags, each with its selection flag
#[utoipa::path(
    get,
    path = "/api/keywords",
    responses(
        (status = 200, description = "Keyword chips", body = Vec<KeywordOption>)
    ),
    tag = "Catalog"
)]
pub async fn list_keywords(State(state): State<Arc<AppState>>) -> Json<Vec<KeywordOption>> {
    let wb = state.workbench.read().await;
    Json(wb.keyword_options())
}
