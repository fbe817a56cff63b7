//! API key settings. Responses report which keys exist, never the key itself.

use axum::{Json, extract::State};
use rust_i18n::t;
use std::sync::Arc;

use crate::AppState;
use crate::models::{SaveApiKeyRequest, SettingsResponse};
use crate::utils::{ApiResult, get_locale};

#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Credential status", body = SettingsResponse)
    ),
    tag = "Settings"
)]
pub async fn get_settings(State(state): State<Arc<AppState>>) -> ApiResult<Json<SettingsResponse>> {
    Ok(Json(settings_status(&state).await?))
}

#[utoipa::path(
    put,
    path = "/api/settings/api-key",
    request_body = SaveApiKeyRequest,
    responses(
        (status = 200, description = "Key saved, or removed when empty", body = SettingsResponse)
    ),
    tag = "Settings"
)]
pub async fn save_api_key(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveApiKeyRequest>,
) -> ApiResult<Json<SettingsResponse>> {
    state.credential_store.save(&req.api_key).await?;
    Ok(Json(settings_status(&state).await?))
}

#[utoipa::path(
    delete,
    path = "/api/settings/api-key",
    responses(
        (status = 200, description = "Stored key removed", body = SettingsResponse)
    ),
    tag = "Settings"
)]
pub async fn delete_api_key(State(state): State<Arc<AppState>>) -> ApiResult<Json<SettingsResponse>> {
    state.credential_store.clear().await?;
    Ok(Json(settings_status(&state).await?))
}

async fn settings_status(state: &AppState) -> ApiResult<SettingsResponse> {
    let locale = get_locale();
    let has_deployment_key = state.localizer.resolver().has_deployment_key();
    let has_user_key = state.credential_store.load().await?.is_some();

    Ok(SettingsResponse {
        has_deployment_key,
        has_user_key,
        key_required: !has_deployment_key && !has_user_key,
        notice: has_deployment_key
            .then(|| t!("settings.env_detected", locale = &locale).to_string()),
        storage_tip: t!("settings.storage_tip", locale = &locale).to_string(),
    })
}
