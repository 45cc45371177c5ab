//! Generation step — drafts LinkedIn posts from a writing profile or from
//! explicit custom parameters.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::pipeline::analyzer::PostAnalysis;
use crate::pipeline::prompts::{
    CUSTOM_GENERATION_PROMPT_TEMPLATE, GENERATION_SYSTEM, PROFILE_GENERATION_PROMPT_TEMPLATE,
};

/// A single post draft. Serialized as `post_heading`/`post_content` on both
/// the LLM wire and the HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPost {
    #[serde(rename = "post_heading")]
    pub heading: String,
    #[serde(rename = "post_content")]
    pub content: String,
}

/// Wire shape of the generation agent's structured output.
#[derive(Debug, Deserialize)]
struct GenerationOutput {
    generated_posts: Vec<GeneratedPost>,
}

/// Parameters of a custom-post enhancement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomPostSpec {
    pub length: u32,
    pub keywords: Vec<String>,
    pub tone: String,
    pub base_post: String,
}

/// Drafts posts in the voice captured by `analysis`, reworking `base_post`.
pub async fn generate_from_profile(
    llm: &LlmClient,
    analysis: &PostAnalysis,
    base_post: &str,
) -> Result<Vec<GeneratedPost>, AppError> {
    let prompt = PROFILE_GENERATION_PROMPT_TEMPLATE
        .replace("{writing_style}", &analysis.writing_style)
        .replace("{personal_touch}", &analysis.personal_touch)
        .replace("{target_audience}", &analysis.target_audience)
        .replace("{post_length_preference}", &analysis.post_length_preference)
        .replace("{paragraph_style}", &analysis.paragraph_style)
        .replace("{base_post}", base_post);

    let output: GenerationOutput = llm
        .call_json(&prompt, GENERATION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("profile generation failed: {e}")))?;

    require_drafts(output)
}

/// Drafts posts against explicit length/keywords/tone targets. `feedback`
/// carries the previous evaluation's critique; absent on the first attempt
/// (the prompt renders the literal `none`).
pub async fn generate_custom(
    llm: &LlmClient,
    spec: &CustomPostSpec,
    feedback: Option<&str>,
) -> Result<Vec<GeneratedPost>, AppError> {
    let prompt = CUSTOM_GENERATION_PROMPT_TEMPLATE
        .replace("{length}", &spec.length.to_string())
        .replace("{keywords}", &spec.keywords.join(", "))
        .replace("{tone}", &spec.tone)
        .replace("{base_post}", &spec.base_post)
        .replace("{feedback}", feedback.unwrap_or("none"));

    let output: GenerationOutput = llm
        .call_json(&prompt, GENERATION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("custom generation failed: {e}")))?;

    require_drafts(output)
}

/// An empty draft list is a malformed generation, not a valid result.
fn require_drafts(output: GenerationOutput) -> Result<Vec<GeneratedPost>, AppError> {
    if output.generated_posts.is_empty() {
        return Err(AppError::Llm(
            "generation returned no drafts".to_string(),
        ));
    }
    Ok(output.generated_posts)
}
