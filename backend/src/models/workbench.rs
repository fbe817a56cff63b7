//! Workbench: the form state behind the localization screen.
//!
//! Holds what the user is editing (source text, glossary, keyword selection,
//! custom tags, scenario, model) and the result of the last generation.
//! Keyword rules live here so every caller gets the same deduplication.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::keyword::{KEYWORD_PRESETS, KeywordOption, is_preset};
use crate::models::{DEFAULT_MODEL, GenerationRequest, Scenario};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Workbench {
    pub input: String,
    pub output: String,
    pub glossary: String,
    /// Selected keywords in selection order, no duplicates
    pub keywords: Vec<String>,
    pub custom_tags: Vec<String>,
    pub scenario: Scenario,
    pub model: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for Workbench {
    fn default() -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            glossary: String::new(),
            keywords: Vec::new(),
            custom_tags: Vec::new(),
            scenario: Scenario::default(),
            model: DEFAULT_MODEL.to_string(),
            is_loading: false,
            error: None,
        }
    }
}

/// What happened to a custom tag submission
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TagOutcome {
    /// New custom tag, added and selected
    Added,
    /// Known term that was not selected yet, now selected
    Selected,
    /// Known term, already selected
    Unchanged,
    /// Blank input
    Ignored,
}

impl Workbench {
    pub fn with_model(model: impl Into<String>) -> Self {
        Self { model: model.into(), ..Self::default() }
    }

    pub fn is_selected(&self, term: &str) -> bool {
        self.keywords.iter().any(|k| k == term)
    }

    /// Flip selection of `term`. Returns the new selection state.
    pub fn toggle_keyword(&mut self, term: &str) -> bool {
        if let Some(pos) = self.keywords.iter().position(|k| k == term) {
            self.keywords.remove(pos);
            false
        } else {
            self.keywords.push(term.to_string());
            true
        }
    }

    /// Promote a user entered tag into the keyword set.
    ///
    /// A tag equal to a preset or an existing custom tag is never stored twice;
    /// it only gets selected if it is not selected already.
    pub fn add_custom_tag(&mut self, tag: &str) -> TagOutcome {
        let tag = tag.trim();
        if tag.is_empty() {
            return TagOutcome::Ignored;
        }

        let known = self.custom_tags.iter().any(|t| t == tag) || is_preset(tag);
        if known {
            if self.is_selected(tag) {
                return TagOutcome::Unchanged;
            }
            self.toggle_keyword(tag);
            return TagOutcome::Selected;
        }

        self.custom_tags.push(tag.to_string());
        self.keywords.push(tag.to_string());
        TagOutcome::Added
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Presets first, then custom tags in creation order.
    pub fn keyword_options(&self) -> Vec<KeywordOption> {
        let presets = KEYWORD_PRESETS.iter().map(|p| KeywordOption {
            term: p.term.to_string(),
            meaning: Some(p.meaning.to_string()),
            custom: false,
            selected: self.is_selected(p.term),
        });
        let custom = self.custom_tags.iter().map(|tag| KeywordOption {
            term: tag.clone(),
            meaning: None,
            custom: true,
            selected: self.is_selected(tag),
        });
        presets.chain(custom).collect()
    }

    pub fn apply(&mut self, update: UpdateWorkbenchRequest) {
        if let Some(input) = update.input {
            self.input = input;
        }
        if let Some(glossary) = update.glossary {
            self.glossary = glossary;
        }
        if let Some(scenario) = update.scenario {
            self.scenario = scenario;
        }
        if let Some(model) = update.model {
            self.model = model;
        }
    }

    pub fn to_request(&self) -> GenerationRequest {
        GenerationRequest {
            source_text: self.input.clone(),
            scenario: self.scenario,
            glossary: self.glossary.clone(),
            keywords: self.keywords.clone(),
            model: self.model.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateWorkbenchRequest {
    pub input: Option<String>,
    pub glossary: Option<String>,
    pub scenario: Option<Scenario>,
    #[validate(length(min = 1, message = "model must not be empty"))]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ToggleKeywordRequest {
    #[validate(length(min = 1, max = 64))]
    pub term: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddTagRequest {
    #[validate(length(max = 64))]
    pub tag: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TagResponse {
    pub outcome: TagOutcome,
    pub keywords: Vec<String>,
    pub custom_tags: Vec<String>,
}
