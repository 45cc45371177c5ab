//! Analysis step — distills a writing profile from recent activity or a
//! caller-supplied post.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::linkedin::Activity;
use crate::llm_client::LlmClient;
use crate::pipeline::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};

/// Attribute summary of how the author writes.
///
/// Every field is required — an LLM response missing any attribute fails the
/// step rather than flowing a partial profile into generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostAnalysis {
    pub writing_style: String,
    pub personal_touch: String,
    pub target_audience: String,
    pub post_length_preference: String,
    pub paragraph_style: String,
}

/// What the analysis step looks at: the fetched activity feed, or the
/// caller's own post when there is no feed worth learning from.
#[derive(Debug, Clone, Copy)]
pub enum AnalysisSource<'a> {
    Activities(&'a [Activity]),
    StaticPost(&'a str),
}

impl AnalysisSource<'_> {
    fn render(&self) -> Result<String, AppError> {
        match self {
            Self::Activities(activities) => serde_json::to_string_pretty(activities)
                .map_err(|e| anyhow::anyhow!("failed to serialize activities: {e}").into()),
            Self::StaticPost(post) => Ok((*post).to_string()),
        }
    }
}

/// Invokes the analysis agent once. No retry at this layer.
pub async fn analyze_source(
    llm: &LlmClient,
    source: AnalysisSource<'_>,
) -> Result<PostAnalysis, AppError> {
    let prompt = ANALYSIS_PROMPT_TEMPLATE.replace("{content}", &source.render()?);
    llm.call_json::<PostAnalysis>(&prompt, ANALYSIS_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("activity analysis failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_analysis_deserializes_full_schema() {
        let json = r#"{
            "writing_style": "direct",
            "personal_touch": "anecdotes",
            "target_audience": "engineers",
            "post_length_preference": "short",
            "paragraph_style": "single-sentence paragraphs"
        }"#;
        let analysis: PostAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.writing_style, "direct");
        assert_eq!(analysis.paragraph_style, "single-sentence paragraphs");
    }

    #[test]
    fn test_post_analysis_missing_attribute_fails() {
        // No paragraph_style — must not parse into a partial profile.
        let json = r#"{
            "writing_style": "direct",
            "personal_touch": "anecdotes",
            "target_audience": "engineers",
            "post_length_preference": "short"
        }"#;
        assert!(serde_json::from_str::<PostAnalysis>(json).is_err());
    }

    #[test]
    fn test_render_static_post_is_verbatim() {
        let source = AnalysisSource::StaticPost("my draft post");
        assert_eq!(source.render().unwrap(), "my draft post");
    }

    #[test]
    fn test_render_activities_is_json_array() {
        let activities = vec![Activity {
            text: "hello".to_string(),
            reaction_count: 2,
            comment_count: 1,
        }];
        let rendered = AnalysisSource::Activities(&activities).render().unwrap();
        let parsed: Vec<Activity> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, activities);
    }
}
