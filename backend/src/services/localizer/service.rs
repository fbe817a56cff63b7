//! Localizer service: the single `generate` entry point.

use std::sync::Arc;
use std::time::Instant;

use crate::models::GenerationRequest;
use crate::services::localizer::client::GenerationBackend;
use crate::services::localizer::credential::CredentialResolver;
use crate::services::localizer::models::{ContentRequest, GenerationError, TEMPERATURE, TOP_P};
use crate::services::localizer::prompt::compose;

#[derive(Clone)]
pub struct LocalizerService {
    backend: Arc<dyn GenerationBackend>,
    resolver: CredentialResolver,
}

impl LocalizerService {
    pub fn new(backend: Arc<dyn GenerationBackend>, resolver: CredentialResolver) -> Self {
        Self { backend, resolver }
    }

    pub fn resolver(&self) -> &CredentialResolver {
        &self.resolver
    }

    /// Localize `request.source_text`.
    ///
    /// Blank input short-circuits to an empty string before any credential
    /// lookup or network traffic. Otherwise exactly one provider call is made;
    /// failures are mapped to [`GenerationError`] and never retried.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        user_key: Option<&str>,
    ) -> Result<String, GenerationError> {
        if request.source_text.trim().is_empty() {
            tracing::debug!("Blank source text, skipping generation");
            return Ok(String::new());
        }

        let api_key = self.resolver.resolve(user_key).ok_or_else(|| {
            tracing::warn!("No API key available for generation");
            GenerationError::MissingCredential
        })?;

        let composed =
            compose(request.scenario, &request.source_text, &request.glossary, &request.keywords);

        let content = ContentRequest {
            model: &request.model,
            prompt: &composed.prompt,
            system_instruction: composed.instruction,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        };

        let request_id = uuid::Uuid::new_v4();
        let started = Instant::now();
        tracing::info!(
            %request_id,
            scenario = %request.scenario,
            model = %request.model,
            keywords = request.keywords.len(),
            "Sending generation request"
        );

        match self.backend.generate_content(&api_key, &content).await {
            Ok(text) => {
                let text = text.unwrap_or_default();
                tracing::info!(
                    %request_id,
                    latency_ms = started.elapsed().as_millis() as u64,
                    output_chars = text.chars().count(),
                    "Generation completed"
                );
                Ok(text)
            },
            Err(err) => {
                tracing::error!(
                    %request_id,
                    status = ?err.status,
                    latency_ms = started.elapsed().as_millis() as u64,
                    "Gemini API error: {}",
                    err
                );
                Err(GenerationError::from(err))
            },
        }
    }
}
