//! Pipeline seam — one trait method per LLM step.
//!
//! `AppState` carries an `Arc<dyn PostAgents>` so the flow layer can be
//! exercised against scripted stubs without a network. Production wires in
//! `LlmAgents`, which delegates each step to its module.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::pipeline::analyzer::{analyze_source, AnalysisSource, PostAnalysis};
use crate::pipeline::evaluator::{evaluate_drafts, Evaluation};
use crate::pipeline::generator::{
    generate_custom, generate_from_profile, CustomPostSpec, GeneratedPost,
};

#[async_trait]
pub trait PostAgents: Send + Sync {
    /// Analysis step: distill a writing profile from the given source.
    async fn analyze(&self, source: AnalysisSource<'_>) -> Result<PostAnalysis, AppError>;

    /// Generation step, profile path: draft posts in the analyzed voice.
    async fn generate_from_profile(
        &self,
        analysis: &PostAnalysis,
        base_post: &str,
    ) -> Result<Vec<GeneratedPost>, AppError>;

    /// Generation step, custom path: draft posts against explicit targets,
    /// optionally honoring the previous evaluation's feedback.
    async fn generate_custom(
        &self,
        spec: &CustomPostSpec,
        feedback: Option<&str>,
    ) -> Result<Vec<GeneratedPost>, AppError>;

    /// Evaluation step: judge the current draft set against the targets.
    async fn evaluate(
        &self,
        spec: &CustomPostSpec,
        drafts: &[GeneratedPost],
    ) -> Result<Evaluation, AppError>;
}

/// Production implementation backed by the LLM client.
pub struct LlmAgents {
    llm: LlmClient,
}

impl LlmAgents {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl PostAgents for LlmAgents {
    async fn analyze(&self, source: AnalysisSource<'_>) -> Result<PostAnalysis, AppError> {
        analyze_source(&self.llm, source).await
    }

    async fn generate_from_profile(
        &self,
        analysis: &PostAnalysis,
        base_post: &str,
    ) -> Result<Vec<GeneratedPost>, AppError> {
        generate_from_profile(&self.llm, analysis, base_post).await
    }

    async fn generate_custom(
        &self,
        spec: &CustomPostSpec,
        feedback: Option<&str>,
    ) -> Result<Vec<GeneratedPost>, AppError> {
        generate_custom(&self.llm, spec, feedback).await
    }

    async fn evaluate(
        &self,
        spec: &CustomPostSpec,
        drafts: &[GeneratedPost],
    ) -> Result<Evaluation, AppError> {
        evaluate_drafts(&self.llm, spec, drafts).await
    }
}
