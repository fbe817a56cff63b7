//! Localization Handlers - Chinese -> Vietnamese generation

use axum::extract::{Json, State};
use std::sync::Arc;
use validator::Validate;

use crate::AppState;
use crate::models::{GenerationRequest, GenerationResponse};
use crate::utils::error::{ApiError, ApiResult};
use crate::utils::get_locale;
use crate::utils::i18n::with_locale;

/// Stateless generation from a full request body
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Localized text", body = GenerationResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 429, description = "Provider rate limit"),
        (status = 502, description = "Provider or transport failure"),
    ),
    tag = "Localization"
)]
pub async fn generate(
    State(s): State<Arc<AppState>>,
    Json(req): Json<GenerationRequest>,
) -> ApiResult<Json<GenerationResponse>> {
    req.validate()?;

    let t0 = std::time::Instant::now();
    let output = run_generation(&s, &req).await?;
    tracing::debug!("Generation handled in {} ms", t0.elapsed().as_millis());

    Ok(Json(GenerationResponse::new(output, req.scenario, req.model)))
}

/// Generate from the current workbench and store the result in it
#[utoipa::path(
    post,
    path = "/api/workbench/generate",
    responses(
        (status = 200, description = "Localized text", body = GenerationResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 429, description = "Provider rate limit"),
        (status = 502, description = "Provider or transport failure"),
    ),
    tag = "Workbench"
)]
pub async fn generate_from_workbench(
    State(s): State<Arc<AppState>>,
) -> ApiResult<Json<GenerationResponse>> {
    // Snapshot, then release the lock for the duration of the remote call
    let req = {
        let mut wb = s.workbench.write().await;
        if wb.input.trim().is_empty() {
            return Ok(Json(GenerationResponse::new(String::new(), wb.scenario, wb.model.clone())));
        }
        wb.is_loading = true;
        wb.error = None;
        wb.to_request()
    };

    // Runs to completion even if the client goes away, so `is_loading` is always cleared
    let state = Arc::clone(&s);
    let locale = get_locale();
    let task = tokio::spawn(async move {
        with_locale(&locale, async move {
            let result = run_generation(&state, &req).await;

            let mut wb = state.workbench.write().await;
            wb.is_loading = false;
            match &result {
                Ok(output) => wb.output = output.clone(),
                Err(err) => {
                    tracing::warn!("Workbench generation failed: {}", err);
                    wb.error = Some(err.localized_message());
                },
            }
            result.map(|output| GenerationResponse::new(output, req.scenario, req.model.clone()))
        })
        .await
    });

    let response = task
        .await
        .map_err(|e| ApiError::internal_error(format!("Generation task failed: {}", e)))??;
    Ok(Json(response))
}

/// Blank input never touches the key store. With a deployment key the store
/// is not read at all, since that key wins regardless.
async fn run_generation(s: &AppState, req: &GenerationRequest) -> ApiResult<String> {
    if req.source_text.trim().is_empty() {
        return Ok(String::new());
    }

    let user_key = if s.localizer.resolver().has_deployment_key() {
        None
    } else {
        s.credential_store.load().await?
    };
    Ok(s.localizer.generate(req, user_key.as_deref()).await?)
}
