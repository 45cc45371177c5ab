//! Evaluation step — pass/fail judgment of generated drafts with feedback.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::pipeline::generator::{CustomPostSpec, GeneratedPost};
use crate::pipeline::prompts::{EVALUATION_PROMPT_TEMPLATE, EVALUATION_SYSTEM};

/// Verdict on one draft set. Lives for a single retry iteration; the
/// feedback feeds the next generation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub valid: bool,
    #[serde(default)]
    pub feedback: Option<String>,
}

impl Evaluation {
    /// Downgrades an evaluator failure to "invalid, with the error text as
    /// feedback" so the retry loop can keep going instead of aborting.
    pub fn from_error(err: &AppError) -> Self {
        Self {
            valid: false,
            feedback: Some(err.to_string()),
        }
    }
}

/// Invokes the evaluation agent on the current draft set. Errors are the
/// caller's to downgrade — this step reports them as-is.
pub async fn evaluate_drafts(
    llm: &LlmClient,
    spec: &CustomPostSpec,
    drafts: &[GeneratedPost],
) -> Result<Evaluation, AppError> {
    let drafts_json = serde_json::to_string_pretty(drafts)
        .map_err(|e| anyhow::anyhow!("failed to serialize drafts: {e}"))?;

    let prompt = EVALUATION_PROMPT_TEMPLATE
        .replace("{length}", &spec.length.to_string())
        .replace("{keywords}", &spec.keywords.join(", "))
        .replace("{tone}", &spec.tone)
        .replace("{drafts_json}", &drafts_json);

    llm.call_json::<Evaluation>(&prompt, EVALUATION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("draft evaluation failed: {e}")))
}
