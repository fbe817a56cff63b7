//! Localizer types: decoding parameters, provider failures and the typed
//! generation error returned to callers.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

// ============================================================================
// Decoding parameters
// ============================================================================

/// Sampling temperature, identical for every scenario
pub const TEMPERATURE: f32 = 0.75;
/// Nucleus sampling threshold, identical for every scenario
pub const TOP_P: f32 = 0.95;

/// Payload handed to a [`GenerationBackend`](super::GenerationBackend).
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub system_instruction: &'a str,
    pub temperature: f32,
    pub top_p: f32,
}

// ============================================================================
// Errors
// ============================================================================

/// Raw failure reported by the provider or the transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    /// HTTP status when the provider answered, `None` for transport failures
    pub status: Option<u16>,
    pub message: String,
}

impl ProviderError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self { status: None, message: message.into() }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self { status: Some(status), message: message.into() }
    }
}

#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationErrorKind {
    MissingCredential,
    InvalidCredential,
    RateLimited,
    Unknown,
}

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "API Key is missing. Please configure it in Settings.";
pub const INVALID_CREDENTIAL_MESSAGE: &str = "Invalid API Key. Please check your settings.";
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please wait a moment.";
pub const FALLBACK_MESSAGE: &str = "Translation failed. Please check connection.";

/// Marker the provider puts in messages about bad or missing keys
const API_KEY_MARKER: &str = "API_KEY";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("{}", MISSING_CREDENTIAL_MESSAGE)]
    MissingCredential,

    #[error("{}", INVALID_CREDENTIAL_MESSAGE)]
    InvalidCredential,

    #[error("{}", RATE_LIMITED_MESSAGE)]
    RateLimited,

    #[error("{0}")]
    Unknown(String),
}

impl GenerationError {
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            Self::MissingCredential => GenerationErrorKind::MissingCredential,
            Self::InvalidCredential => GenerationErrorKind::InvalidCredential,
            Self::RateLimited => GenerationErrorKind::RateLimited,
            Self::Unknown(_) => GenerationErrorKind::Unknown,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The caller should reopen credential settings for these kinds.
    pub fn requires_credential_setup(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::InvalidCredential)
    }
}

impl From<ProviderError> for GenerationError {
    /// Key marker first, then throttling, then everything else.
    fn from(err: ProviderError) -> Self {
        if err.message.contains(API_KEY_MARKER) {
            Self::InvalidCredential
        } else if err.status == Some(429) {
            Self::RateLimited
        } else if err.message.trim().is_empty() {
            Self::Unknown(FALLBACK_MESSAGE.to_string())
        } else {
            Self::Unknown(err.message)
        }
    }
}
