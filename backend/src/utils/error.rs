use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

use super::i18n::get_locale;
use crate::services::credential_store::StoreError;
use crate::services::localizer::GenerationError;

/// API Error with numeric codes and localized messages
///
/// Generation failures keep their fixed English message: the UI keys its
/// reaction (reopen settings, wait and retry) off `details.kind`.
#[derive(Error, Debug)]
pub enum ApiError {
    // Generation errors 1xxx / 5002
    #[error(transparent)]
    Generation(#[from] GenerationError),

    // Validation errors 4xxx
    #[error("Validation error: {0}")]
    ValidationError(String),

    // System errors 5xxx
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    /// Helper to create internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// Helper to create validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn error_code(&self) -> i32 {
        use crate::services::localizer::GenerationErrorKind as Kind;
        match self {
            Self::Generation(err) => match err.kind() {
                Kind::MissingCredential => 1001,
                Kind::InvalidCredential => 1002,
                Kind::RateLimited => 1003,
                Kind::Unknown => 5002,
            },

            Self::ValidationError(_) => 4001,

            Self::InternalError(_) => 5001,
            Self::Storage(_) => 5003,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.error_code() {
            1001 | 1002 => StatusCode::UNAUTHORIZED,
            1003 => StatusCode::TOO_MANY_REQUESTS,
            4001..=4999 => StatusCode::BAD_REQUEST,
            5002 => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Generation(err) => Some(serde_json::json!({
                "kind": err.kind(),
                "reopen_settings": err.requires_credential_setup(),
            })),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get localized error message based on current locale
    pub fn localized_message(&self) -> String {
        let locale = get_locale();
        match self {
            Self::Generation(err) => err.message(),
            Self::ValidationError(details) => {
                t!("validation.failed", locale = &locale, details = details).to_string()
            },
            Self::InternalError(msg) => {
                t!("internal.error", locale = &locale, message = msg).to_string()
            },
            Self::Storage(err) => {
                t!("storage.error", locale = &locale, error = err.to_string()).to_string()
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let response = ApiErrorResponse {
            code: self.error_code(),
            message: self.localized_message(),
            details: self.details(),
        };

        (status, Json(response)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::validation_error(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
