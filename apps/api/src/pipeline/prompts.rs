// All LLM prompt constants for the pipeline steps.
// Templates use `{placeholder}` substitution; each step fills its own.

/// System prompt for activity analysis — enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str = "You are a LinkedIn content strategist who \
    profiles how an author writes. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Analysis prompt template. Replace `{content}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the LinkedIn content below and distill how its author writes.

Return a JSON object with this EXACT schema (no extra fields, every field required):
{
  "writing_style": "Conversational and direct, short declarative sentences",
  "personal_touch": "Opens with a first-person anecdote before the lesson",
  "target_audience": "Early-career software engineers",
  "post_length_preference": "Short posts, 80-120 words",
  "paragraph_style": "One or two sentences per paragraph, generous line breaks"
}

Rules:
- Describe what the author actually does, not what they should do.
- Base every attribute on the content provided; if the signal is weak, describe the closest observable pattern.
- Keep each value to one concise sentence.

CONTENT TO ANALYZE:
{content}"#;

/// System prompt for post generation — enforces the wrapper-object contract.
pub const GENERATION_SYSTEM: &str = "You are an expert LinkedIn ghostwriter. \
    You MUST respond with valid JSON only: a single object with a \
    \"generated_posts\" array. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent engagement numbers or fabricated credentials.";

/// Profile-based generation prompt template.
/// Replace: {writing_style}, {personal_touch}, {target_audience},
///          {post_length_preference}, {paragraph_style}, {base_post}
pub const PROFILE_GENERATION_PROMPT_TEMPLATE: &str = r#"Write LinkedIn posts in the author's own voice, as profiled below.

AUTHOR PROFILE:
- Writing style: {writing_style}
- Personal touch: {personal_touch}
- Target audience: {target_audience}
- Preferred length: {post_length_preference}
- Paragraph style: {paragraph_style}

SOURCE MATERIAL to rework into posts:
{base_post}

Generate exactly 4 distinct posts. Return a JSON object:
{
  "generated_posts": [
    {
      "post_heading": "A hook that would stop this audience mid-scroll",
      "post_content": "The full post body, formatted with the author's paragraph style"
    }
  ]
}

HARD RULES:
1. Every post must read as if the profiled author wrote it themselves
2. Respect the preferred length and paragraph style in every post
3. Each of the 4 posts must take a different angle on the source material
4. No hashtag walls; at most 3 hashtags where the author's style calls for them"#;

/// Custom-post generation prompt template.
/// Replace: {length}, {keywords}, {tone}, {base_post}, {feedback}
pub const CUSTOM_GENERATION_PROMPT_TEMPLATE: &str = r#"Rewrite and enhance the base post below into polished LinkedIn posts.

TARGET PARAMETERS:
- Length: about {length} words
- Keywords to weave in naturally: {keywords}
- Tone: {tone}

BASE POST:
{base_post}

REVIEWER FEEDBACK from the previous attempt (the literal word none means this is the first attempt):
{feedback}

Generate exactly 4 distinct posts. Return a JSON object:
{
  "generated_posts": [
    {
      "post_heading": "A hook matching the requested tone",
      "post_content": "The full post body"
    }
  ]
}

HARD RULES:
1. Stay within roughly 10 percent of the target length
2. Every keyword must appear at least once, never forced or stuffed
3. Keep the requested tone throughout
4. If feedback is present, fix every point it raises before anything else"#;

/// System prompt for draft evaluation — enforces JSON-only output.
pub const EVALUATION_SYSTEM: &str = "You are an exacting LinkedIn editor who \
    accepts or rejects drafts against explicit requirements. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Evaluation prompt template.
/// Replace: {length}, {keywords}, {tone}, {drafts_json}
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Judge whether the drafts below satisfy the requirements.

REQUIREMENTS:
- Length: about {length} words per post
- Keywords that must appear naturally: {keywords}
- Tone: {tone}

DRAFTS:
{drafts_json}

Return a JSON object:
{
  "valid": false,
  "feedback": "Specific, actionable critique. Null when valid is true."
}

Rules:
- valid is true ONLY if every draft meets every requirement.
- When rejecting, name the drafts that failed and exactly what to change.
- Judge substance and fit, not taste; do not reject for stylistic preference alone."#;
