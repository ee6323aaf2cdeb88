//! Recruiter first-impression, authority and narrative signals

use crate::llm::payloads::PsychologyEnrichment;
use crate::processing::matcher::TermMatcher;
use crate::processing::structure::{title_like_lines, StructuralExtractor};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const STRONG_VERBS: &[&str] = &[
    "led", "managed", "created", "developed", "increased", "achieved", "designed",
    "launched", "built", "delivered", "improved", "reduced",
];
pub const WEAK_VERBS: &[&str] = &[
    "helped", "assisted", "worked on", "participated", "contributed", "responsible for",
];

const FIRST_IMPRESSION_WINDOW: usize = 500;
const MIN_QUANTIFIED_CLAIMS: usize = 3;

pub const FLAG_MISSING_EMAIL: &str = "Missing email address";
pub const FLAG_MISSING_PHONE: &str = "Missing phone number";
pub const FLAG_WEAK_VERBS: &str = "Weak verbs outnumber strong action verbs";
pub const FLAG_FEW_METRICS: &str = "Fewer than 3 quantified achievements";
pub const FLAG_MISSING_SUMMARY: &str = "No professional summary section";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruiterSignalProfile {
    pub first6s_score: u8,
    pub authority_score: u8,
    pub narrative_score: u8,
    pub red_flags: Vec<String>,
}

impl RecruiterSignalProfile {
    /// Deterministic fallback used when enrichment is unavailable
    pub fn from_heuristics(resume_text: &str) -> Self {
        RecruiterHeuristics::shared().score(resume_text)
    }

    /// Build the profile from a validated enrichment payload
    pub fn from_enrichment(payload: &PsychologyEnrichment) -> Self {
        Self {
            first6s_score: clamp_score(payload.first_impression_score),
            authority_score: clamp_score(payload.authority_score),
            narrative_score: clamp_score(payload.narrative_score),
            red_flags: payload
                .red_flags
                .iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }
}

/// Round and clamp a loose score into `[0, 100]`
pub fn clamp_score(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Raw counts behind the recruiter scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageCounts {
    pub strong_verbs: usize,
    pub weak_verbs: usize,
    pub quantified_claims: usize,
}

impl LanguageCounts {
    /// Share of strong verbs among all matched verbs
    pub fn strong_ratio(&self) -> f64 {
        let total = self.strong_verbs + self.weak_verbs;
        if total == 0 {
            0.0
        } else {
            self.strong_verbs as f64 / total as f64
        }
    }
}

pub struct RecruiterHeuristics {
    extractor: StructuralExtractor,
    strong: TermMatcher,
    weak: TermMatcher,
    quantified_regex: Regex,
    bullet_regex: Regex,
    blank_line_regex: Regex,
    title_word_regex: Regex,
    summary_regex: Regex,
}

impl Default for RecruiterHeuristics {
    fn default() -> Self {
        Self::new()
    }
}

impl RecruiterHeuristics {
    pub fn new() -> Self {
        Self {
            extractor: StructuralExtractor::new(),
            strong: TermMatcher::new(STRONG_VERBS).expect("Invalid strong verb list"),
            weak: TermMatcher::new(WEAK_VERBS).expect("Invalid weak verb list"),
            quantified_regex: Regex::new(r"[0-9]+(?:\.[0-9]+)?\s?%|\$\s?[0-9][0-9,]*(?:\.[0-9]+)?|\b[0-9]+\+")
                .expect("Invalid quantified regex"),
            bullet_regex: Regex::new(r"(?m)^\s*(?:[-*•▪◦‣]|[0-9]+[.)])\s+\S")
                .expect("Invalid bullet regex"),
            blank_line_regex: Regex::new(r"\n[ \t]*\n").expect("Invalid blank line regex"),
            title_word_regex: Regex::new(
                r"(?i)\b(?:engineer|developer|manager|analyst|designer|director|consultant|specialist|coordinator|marketer|scientist|architect|lead|administrator|accountant|nurse|teacher|officer|associate|executive|representative|strategist)s?\b",
            )
            .expect("Invalid title regex"),
            summary_regex: Regex::new(r"(?i)\b(?:summary|objective|profile)\b")
                .expect("Invalid summary regex"),
        }
    }

    /// Process-wide instance, compiled on first use
    pub fn shared() -> &'static Self {
        static SHARED: OnceLock<RecruiterHeuristics> = OnceLock::new();
        SHARED.get_or_init(Self::new)
    }

    pub fn extractor(&self) -> &StructuralExtractor {
        &self.extractor
    }

    pub fn language_counts(&self, text: &str) -> LanguageCounts {
        LanguageCounts {
            strong_verbs: self.strong.total_hits(text),
            weak_verbs: self.weak.total_hits(text),
            quantified_claims: self.quantified_regex.find_iter(text).count(),
        }
    }

    pub fn has_title_line(&self, text: &str) -> bool {
        title_like_lines(text)
            .iter()
            .any(|line| line.chars().count() <= 60 && self.title_word_regex.is_match(line))
    }

    pub fn score(&self, resume_text: &str) -> RecruiterSignalProfile {
        let has_email = self.extractor.has_email(resume_text);
        let has_phone = self.extractor.has_phone(resume_text);
        let counts = self.language_counts(resume_text);

        let opening: String = resume_text.chars().take(FIRST_IMPRESSION_WINDOW).collect();
        let indicators = [
            has_email,
            has_phone,
            self.has_title_line(resume_text),
            self.summary_regex.is_match(&opening),
        ];
        let first6s_score = 25 * indicators.iter().filter(|i| **i).count() as u8;

        let authority = 15 * counts.strong_verbs as i64 + 5 * counts.quantified_claims as i64
            - 10 * counts.weak_verbs as i64;
        let authority_score = authority.clamp(0, 100) as u8;

        let sections = self
            .blank_line_regex
            .split(resume_text)
            .filter(|block| !block.trim().is_empty())
            .count();
        let mut narrative_score = 0u8;
        if sections >= 3 {
            narrative_score += 40;
        }
        if self.bullet_regex.is_match(resume_text) {
            narrative_score += 30;
        }
        if self.extractor.has_year(resume_text) {
            narrative_score += 30;
        }

        let lower = resume_text.to_lowercase();
        let has_summary = StructuralExtractor::detect_sections(&lower).has_summary;

        let mut red_flags = Vec::new();
        if !has_email {
            red_flags.push(FLAG_MISSING_EMAIL.to_string());
        }
        if !has_phone {
            red_flags.push(FLAG_MISSING_PHONE.to_string());
        }
        if counts.weak_verbs > counts.strong_verbs {
            red_flags.push(FLAG_WEAK_VERBS.to_string());
        }
        if counts.quantified_claims < MIN_QUANTIFIED_CLAIMS {
            red_flags.push(FLAG_FEW_METRICS.to_string());
        }
        if !has_summary {
            red_flags.push(FLAG_MISSING_SUMMARY.to_string());
        }

        RecruiterSignalProfile {
            first6s_score,
            authority_score,
            narrative_score,
            red_flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRONG_RESUME: &str = "Jane Doe\nSenior Software Engineer\njane@example.com | 555-123-4567\n\nSummary\nBackend engineer who led platform work.\n\nExperience\n- Led a team of 6 engineers (2019-2023)\n- Increased throughput by 40%\n- Reduced costs by $200,000\n- Built 10+ services";

    #[test]
    fn test_shared_heuristics_built_once() {
        assert!(std::ptr::eq(RecruiterHeuristics::shared(), RecruiterHeuristics::shared()));
        assert_eq!(
            RecruiterSignalProfile::from_heuristics(STRONG_RESUME),
            RecruiterHeuristics::new().score(STRONG_RESUME)
        );
    }

    #[test]
    fn test_first_impression_full_marks() {
        let profile = RecruiterSignalProfile::from_heuristics(STRONG_RESUME);
        assert_eq!(profile.first6s_score, 100);
    }

    #[test]
    fn test_first_impression_is_quantized() {
        let profile = RecruiterSignalProfile::from_heuristics("just some words without signals");
        assert_eq!(profile.first6s_score, 0);
        for text in [STRONG_RESUME, "jane@example.com", "Data Analyst\nphone 555 123 4567"] {
            let score = RecruiterSignalProfile::from_heuristics(text).first6s_score;
            assert!([0, 25, 50, 75, 100].contains(&score));
        }
    }

    #[test]
    fn test_authority_formula() {
        let heuristics = RecruiterHeuristics::new();
        let text = "Led the launch. Helped with QA. Grew revenue 25%.";
        let counts = heuristics.language_counts(text);
        assert_eq!(counts, LanguageCounts { strong_verbs: 1, weak_verbs: 1, quantified_claims: 1 });
        // 15 + 5 - 10
        assert_eq!(heuristics.score(text).authority_score, 10);
    }

    #[test]
    fn test_authority_clamped() {
        let weak = "helped assisted participated contributed helped";
        assert_eq!(RecruiterSignalProfile::from_heuristics(weak).authority_score, 0);
        let strong = "led managed created developed increased achieved designed launched";
        assert_eq!(RecruiterSignalProfile::from_heuristics(strong).authority_score, 100);
    }

    #[test]
    fn test_narrative_terms() {
        let profile = RecruiterSignalProfile::from_heuristics(STRONG_RESUME);
        assert_eq!(profile.narrative_score, 100);

        let flat = "one block of prose written in 2020";
        assert_eq!(RecruiterSignalProfile::from_heuristics(flat).narrative_score, 30);

        let none = "no structure at all";
        assert_eq!(RecruiterSignalProfile::from_heuristics(none).narrative_score, 0);
    }

    #[test]
    fn test_red_flag_order() {
        let profile = RecruiterSignalProfile::from_heuristics("Helped with things");
        assert_eq!(
            profile.red_flags,
            vec![
                FLAG_MISSING_EMAIL.to_string(),
                FLAG_MISSING_PHONE.to_string(),
                FLAG_WEAK_VERBS.to_string(),
                FLAG_FEW_METRICS.to_string(),
                FLAG_MISSING_SUMMARY.to_string(),
            ]
        );

        let clean = RecruiterSignalProfile::from_heuristics(STRONG_RESUME);
        assert!(clean.red_flags.is_empty());
    }

    #[test]
    fn test_from_enrichment_clamps() {
        let payload = PsychologyEnrichment {
            first_impression_score: 140.0,
            authority_score: -3.0,
            narrative_score: 66.6,
            red_flags: vec!["  Vague titles ".to_string(), "".to_string()],
        };
        let profile = RecruiterSignalProfile::from_enrichment(&payload);
        assert_eq!(profile.first6s_score, 100);
        assert_eq!(profile.authority_score, 0);
        assert_eq!(profile.narrative_score, 67);
        assert_eq!(profile.red_flags, vec!["Vague titles".to_string()]);
    }
}
