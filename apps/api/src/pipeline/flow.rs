//! Flow orchestration — composes fetch, analysis, generation and evaluation
//! into the two request pipelines.
//!
//! Custom-post flow state machine:
//! generate → evaluate → {retry → generate | completed | max_retry_exceeded}

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::linkedin::LinkedInClient;
use crate::pipeline::agents::PostAgents;
use crate::pipeline::analyzer::AnalysisSource;
use crate::pipeline::evaluator::Evaluation;
use crate::pipeline::generator::{CustomPostSpec, GeneratedPost};

/// Evaluation stops once the retry count passes this value, giving at most
/// three evaluator invocations per request.
const RETRY_CAP: u32 = 2;

/// Terminal state of the custom-post flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowOutcome {
    Completed,
    MaxRetriesExceeded,
}

/// Final product of the custom-post flow. `posts` holds a validated draft
/// set on `Completed`, and the last unvalidated set on `MaxRetriesExceeded`.
#[derive(Debug, Clone, Serialize)]
pub struct CustomFlowResult {
    pub posts: Vec<GeneratedPost>,
    pub outcome: FlowOutcome,
    pub retry_count: u32,
}

/// Profile pipeline: fetch activities → analyze → generate.
///
/// When the profile has no public activity the analysis falls back to the
/// caller's own post, so generation still has a voice to imitate.
pub async fn run_profile_flow(
    linkedin: &LinkedInClient,
    agents: &dyn PostAgents,
    profile_url: &str,
    static_post: &str,
) -> Result<Vec<GeneratedPost>, AppError> {
    let activities = linkedin.fetch_activities(profile_url).await?;

    let analysis = if activities.is_empty() {
        info!("no activities found, analyzing the supplied post instead");
        agents.analyze(AnalysisSource::StaticPost(static_post)).await?
    } else {
        debug!("analyzing {} activities", activities.len());
        agents.analyze(AnalysisSource::Activities(&activities)).await?
    };

    let posts = agents.generate_from_profile(&analysis, static_post).await?;
    if posts.is_empty() {
        return Err(AppError::Llm(
            "profile generation produced no drafts".to_string(),
        ));
    }

    info!("profile flow produced {} drafts", posts.len());
    Ok(posts)
}

/// Custom pipeline: generate, then evaluate-and-regenerate until a draft set
/// passes or the retry cap is hit. Always returns a draft set.
///
/// Evaluator failures are deliberately downgraded to "invalid with the error
/// as feedback" — this is the only partial-failure tolerance point in the
/// service. Generation failures still abort the flow.
pub async fn run_custom_flow(
    agents: &dyn PostAgents,
    spec: &CustomPostSpec,
) -> Result<CustomFlowResult, AppError> {
    let mut feedback: Option<String> = None;
    let mut posts = agents.generate_custom(spec, feedback.as_deref()).await?;
    let mut retry_count = 0u32;

    loop {
        if retry_count > RETRY_CAP {
            warn!("retry cap hit after {retry_count} evaluations, returning last draft set");
            return Ok(CustomFlowResult {
                posts,
                outcome: FlowOutcome::MaxRetriesExceeded,
                retry_count,
            });
        }

        let evaluation = match agents.evaluate(spec, &posts).await {
            Ok(evaluation) => evaluation,
            Err(e) => {
                warn!("evaluation errored, treating draft as invalid: {e}");
                Evaluation::from_error(&e)
            }
        };
        retry_count += 1;

        if evaluation.valid {
            info!("drafts accepted after {retry_count} evaluation(s)");
            return Ok(CustomFlowResult {
                posts,
                outcome: FlowOutcome::Completed,
                retry_count,
            });
        }

        debug!("drafts rejected, regenerating with feedback");
        feedback = evaluation.feedback;
        posts = agents.generate_custom(spec, feedback.as_deref()).await?;
    }
}
