use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Scenario;

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Models offered in the model picker. Requests may still name any model id.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    #[serde(rename = "gemini-3-pro-preview")]
    Gemini3ProPreview,
    #[serde(rename = "gemini-2.5-flash")]
    Gemini25Flash,
}

impl ModelType {
    pub const ALL: [ModelType; 2] = [Self::Gemini3ProPreview, Self::Gemini25Flash];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Gemini3ProPreview => "gemini-3-pro-preview",
            Self::Gemini25Flash => "gemini-2.5-flash",
        }
    }

    pub fn i18n_key(&self) -> &'static str {
        match self {
            Self::Gemini3ProPreview => "model.pro",
            Self::Gemini25Flash => "model.flash",
        }
    }
}

/// One localization call. Built fresh per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenerationRequest {
    pub source_text: String,
    #[serde(default)]
    pub scenario: Scenario,
    /// Comma separated terms that must stay untranslated, passed through verbatim
    #[serde(default)]
    pub glossary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[validate(length(min = 1, message = "model must not be empty"))]
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl GenerationRequest {
    pub fn new(source_text: impl Into<String>, scenario: Scenario) -> Self {
        Self {
            source_text: source_text.into(),
            scenario,
            glossary: String::new(),
            keywords: Vec::new(),
            model: default_model(),
        }
    }

    pub fn with_glossary(mut self, glossary: impl Into<String>) -> Self {
        self.glossary = glossary.into();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerationResponse {
    pub output: String,
    /// Character count of the output (display only, never enforced)
    pub chars: usize,
    pub scenario: Scenario,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

impl GenerationResponse {
    pub fn new(output: String, scenario: Scenario, model: String) -> Self {
        Self { chars: output.chars().count(), output, scenario, model, generated_at: Utc::now() }
    }
}

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct ModelInfo {
    pub id: String,
    pub label: String,
    pub is_default: bool,
}
