//! Gemini `generateContent` client
//!
//! One POST per call, no retries. Non-2xx answers become a [`ProviderError`]
//! carrying the status and the raw response body.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::GeminiConfig;
use crate::services::localizer::models::{ContentRequest, ProviderError};

/// Seam between the localizer and the remote model.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Returns the generated text, `None` when the provider produced none.
    async fn generate_content(
        &self,
        api_key: &str,
        request: &ContentRequest<'_>,
    ) -> Result<Option<String>, ProviderError>;
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    system_instruction: GeminiInstruction<'a>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiInstruction<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiResponse {
    /// Text parts of the first candidate, concatenated.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

// ============================================================================
// Client
// ============================================================================

pub struct GeminiClient {
    http_client: Client,
    api_base: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build()?;

        Ok(Self { http_client, api_base: config.api_base.trim_end_matches('/').to_string() })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base,
            urlencoding::encode(model.trim())
        )
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &ContentRequest<'_>,
    ) -> Result<Option<String>, ProviderError> {
        let url = self.endpoint(request.model);

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: request.prompt }],
            }],
            system_instruction: GeminiInstruction {
                parts: vec![GeminiPart { text: request.system_instruction }],
            },
            generation_config: GenerationConfig {
                temperature: request.temperature,
                top_p: request.top_p,
            },
        };

        tracing::debug!("POST {} (prompt {} chars)", url, request.prompt.chars().count());

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::transport(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error with status {}: {}", status, error_text);
            return Err(ProviderError::status(status.as_u16(), error_text));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::transport(format!("Failed to parse response: {}", e)))?;

        Ok(parsed.text())
    }
}
