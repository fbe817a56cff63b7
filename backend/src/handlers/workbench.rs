use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::AppState;
use crate::models::{
    AddTagRequest, KeywordOption, TagResponse, ToggleKeywordRequest, UpdateWorkbenchRequest,
    Workbench,
};
use crate::utils::ApiResult;

/// Workbench state plus the keyword chips to render
#[derive(Debug, Serialize, ToSchema)]
pub struct WorkbenchView {
    #[serde(flatten)]
    pub workbench: Workbench,
    pub keyword_options: Vec<KeywordOption>,
}

impl From<&Workbench> for WorkbenchView {
    fn from(wb: &Workbench) -> Self {
        Self { keyword_options: wb.keyword_options(), workbench: wb.clone() }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleKeywordResponse {
    pub term: String,
    pub selected: bool,
    pub keywords: Vec<String>,
}

// Get current workbench
#[utoipa::path(
    get,
    path = "/api/workbench",
    responses(
        (status = 200, description = "Current workbench", body = WorkbenchView)
    ),
    tag = "Workbench"
)]
pub async fn get_workbench(State(state): State<Arc<AppState>>) -> Json<WorkbenchView> {
    let wb = state.workbench.read().await;
    Json(WorkbenchView::from(&*wb))
}

// Update input, glossary, scenario or model
#[utoipa::path(
    put,
    path = "/api/workbench",
    request_body = UpdateWorkbenchRequest,
    responses(
        (status = 200, description = "Updated workbench", body = WorkbenchView),
        (status = 400, description = "Validation error")
    ),
    tag = "Workbench"
)]
pub async fn update_workbench(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateWorkbenchRequest>,
) -> ApiResult<Json<WorkbenchView>> {
    req.validate()?;
    tracing::debug!(
        "Updating workbench: scenario={:?}, model={:?}",
        req.scenario,
        req.model
    );

    let mut wb = state.workbench.write().await;
    wb.apply(req);
    Ok(Json(WorkbenchView::from(&*wb)))
}

// Clear the source text only
#[utoipa::path(
    post,
    path = "/api/workbench/clear",
    responses(
        (status = 200, description = "Workbench with empty input", body = WorkbenchView)
    ),
    tag = "Workbench"
)]
pub async fn clear_input(State(state): State<Arc<AppState>>) -> Json<WorkbenchView> {
    let mut wb = state.workbench.write().await;
    wb.clear_input();
    Json(WorkbenchView::from(&*wb))
}

#[utoipa::path(
    post,
    path = "/api/workbench/keywords/toggle",
    request_body = ToggleKeywordRequest,
    responses(
        (status = 200, description = "New selection state", body = ToggleKeywordResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "Workbench"
)]
pub async fn toggle_keyword(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ToggleKeywordRequest>,
) -> ApiResult<Json<ToggleKeywordResponse>> {
    req.validate()?;

    let mut wb = state.workbench.write().await;
    let selected = wb.toggle_keyword(&req.term);
    tracing::debug!("Keyword '{}' selected={}", req.term, selected);

    Ok(Json(ToggleKeywordResponse { term: req.term, selected, keywords: wb.keywords.clone() }))
}

#[utoipa::path(
    post,
    path = "/api/workbench/tags",
    request_body = AddTagRequest,
    responses(
        (status = 200, description = "Tag outcome", body = TagResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "Workbench"
)]
pub async fn add_tag(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddTagRequest>,
) -> ApiResult<Json<TagResponse>> {
    req.validate()?;

    let mut wb = state.workbench.write().await;
    let outcome = wb.add_custom_tag(&req.tag);
    tracing::debug!("Custom tag '{}': {:?}", req.tag.trim(), outcome);

    Ok(Json(TagResponse {
        outcome,
        keywords: wb.keywords.clone(),
        custom_tags: wb.custom_tags.clone(),
    }))
}
