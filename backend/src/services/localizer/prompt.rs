//! Prompt composition
//!
//! Pure mapping from (scenario, source text, glossary, keywords) to the
//! system instruction and the user prompt sent to the model.

use crate::models::Scenario;
use crate::services::localizer::scenarios::system_instruction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub instruction: &'static str,
    pub prompt: String,
}

/// Build the instruction/prompt pair.
///
/// Block order is fixed: source text, glossary (only when non-blank),
/// mandatory keywords (only when non-empty), target marker. The glossary is
/// copied verbatim, keywords are joined with ", " in the given order.
pub fn compose(
    scenario: Scenario,
    source_text: &str,
    glossary: &str,
    keywords: &[String],
) -> ComposedPrompt {
    let mut prompt = format!("SOURCE TEXT (Chinese): \"{}\"\n\n", source_text);

    if !glossary.trim().is_empty() {
        prompt.push_str(&format!("GLOSSARY (Do NOT translate these exact terms): {}\n", glossary));
    }

    if !keywords.is_empty() {
        prompt.push_str(&format!(
            "MANDATORY KEYWORDS (Integrate these naturally): {}\n",
            keywords.join(", ")
        ));
    }

    prompt.push_str("\nTARGET OUTPUT (Vietnamese):");

    ComposedPrompt { instruction: system_instruction(scenario), prompt }
}
