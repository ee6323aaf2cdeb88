//! Prompt templates for the four enrichment calls

use crate::processing::industry::Industry;
use log::debug;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Longest slice of resume or job text sent to a provider, in graphemes
const MAX_PROMPT_CHARS: usize = 6000;

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub industry: String,
    pub psychology: String,
    pub market: String,
    pub predictions: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            industry: INDUSTRY_TEMPLATE.to_string(),
            psychology: PSYCHOLOGY_TEMPLATE.to_string(),
            market: MARKET_TEMPLATE.to_string(),
            predictions: PREDICTIONS_TEMPLATE.to_string(),
        }
    }
}

/// Parameters for prompt template substitution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptParams {
    pub resume_content: String,
    pub job_content: String,
    pub industry: Option<Industry>,
}

impl PromptParams {
    pub fn new(resume_content: &str, job_content: &str, industry: Option<Industry>) -> Self {
        Self {
            resume_content: truncate_chars(resume_content, MAX_PROMPT_CHARS),
            job_content: truncate_chars(job_content, MAX_PROMPT_CHARS),
            industry,
        }
    }
}

impl PromptTemplates {
    pub fn render_industry(&self, params: &PromptParams) -> String {
        self.render("industry", &self.industry, params)
    }

    pub fn render_psychology(&self, params: &PromptParams) -> String {
        self.render("psychology", &self.psychology, params)
    }

    pub fn render_market(&self, params: &PromptParams) -> String {
        self.render("market", &self.market, params)
    }

    pub fn render_predictions(&self, params: &PromptParams) -> String {
        self.render("predictions", &self.predictions, params)
    }

    fn render(&self, kind: &str, template: &str, params: &PromptParams) -> String {
        let industry = params
            .industry
            .map(|i| i.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        // One pass, so placeholder text inside the resume or job is left alone
        let prompt = placeholder_regex()
            .replace_all(template, |caps: &Captures| match &caps[1] {
                "resume" => params.resume_content.clone(),
                "job" => params.job_content.clone(),
                _ => industry.clone(),
            })
            .into_owned();

        debug!("Rendered {} prompt ({} chars)", kind, prompt.len());
        prompt
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{(resume|job|industry)\}").expect("Invalid placeholder regex"))
}

/// Cut on grapheme boundaries so combining marks and emoji stay whole
fn truncate_chars(text: &str, max: usize) -> String {
    text.graphemes(true).take(max).collect()
}

const INDUSTRY_TEMPLATE: &str = r#"TASK: Classify the industry of the job posting below.

<JOB POSTING>
{job}
</JOB POSTING>

<RESUME>
{resume}
</RESUME>

Answer with JSON only:
{"industry": "<one of technology, finance, healthcare, marketing, sales, education, engineering, design, operations, general>", "confidence": <0.0-1.0>}"#;

const PSYCHOLOGY_TEMPLATE: &str = r#"TASK: Act as a recruiter skimming this resume for a {industry} role.

<RESUME>
{resume}
</RESUME>

<JOB POSTING>
{job}
</JOB POSTING>

Score the first six-second impression, the authority of the language and the
coherence of the career narrative, each 0-100, and list concrete red flags.

Answer with JSON only:
{"first_impression_score": <0-100>, "authority_score": <0-100>, "narrative_score": <0-100>, "red_flags": ["..."]}"#;

const MARKET_TEMPLATE: &str = r#"TASK: Assess the current hiring market for this {industry} role.

<JOB POSTING>
{job}
</JOB POSTING>

<RESUME>
{resume}
</RESUME>

Answer with JSON only:
{"competition_level": <0-100>, "demand_score": <0-100>, "trending_skills": ["..."]}"#;

const PREDICTIONS_TEMPLATE: &str = r#"TASK: Predict hiring outcomes for this candidate in {industry}.

<RESUME>
{resume}
</RESUME>

<JOB POSTING>
{job}
</JOB POSTING>

Salaries are annual USD. x_factor rewards rare, standout achievements.

Answer with JSON only:
{"hire_probability": <0-100>, "salary_conservative": <number>, "salary_market": <number>, "salary_aggressive": <number>, "automation_risk": <0.0-1.0>, "x_factor": <0-30>}"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PromptParams {
        PromptParams::new(
            "Software Engineer with Python experience at Tech Corp.",
            "Senior Software Engineer role requiring React and Python.",
            Some(Industry::Technology),
        )
    }

    #[test]
    fn test_placeholders_replaced() {
        let templates = PromptTemplates::default();
        let params = params();

        for prompt in [
            templates.render_industry(&params),
            templates.render_psychology(&params),
            templates.render_market(&params),
            templates.render_predictions(&params),
        ] {
            assert!(prompt.contains("Tech Corp"));
            assert!(prompt.contains("requiring React"));
            assert!(!prompt.contains("{resume}"));
            assert!(!prompt.contains("{job}"));
            assert!(!prompt.contains("{industry}"));
        }
        assert!(templates.render_market(&params).contains("technology role"));
    }

    #[test]
    fn test_unknown_industry_placeholder() {
        let templates = PromptTemplates::default();
        let params = PromptParams::new("resume", "job", None);
        assert!(templates.render_predictions(&params).contains("in unknown."));
    }

    #[test]
    fn test_placeholders_inside_inputs_untouched() {
        let templates = PromptTemplates::default();
        let params = PromptParams::new("Wrote {job} and {industry} templates", "Template engineer", None);
        let prompt = templates.render_psychology(&params);
        assert!(prompt.contains("Wrote {job} and {industry} templates"));
        assert_eq!(prompt.matches("Template engineer").count(), 1);
    }

    #[test]
    fn test_long_inputs_truncated() {
        let long = "x".repeat(MAX_PROMPT_CHARS + 500);
        let params = PromptParams::new(&long, "job", None);
        assert_eq!(params.resume_content.chars().count(), MAX_PROMPT_CHARS);
    }
}
