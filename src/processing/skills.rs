//! Found/missing skill diff between a resume and a job description

use crate::error::Result;
use crate::processing::industry::SkillVocabulary;
use crate::processing::matcher::TermMatcher;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Weight of a required skill that the resume never mentions
pub const MISSING_SKILL_WEIGHT: i32 = -25;
const FOUND_BASE_WEIGHT: i32 = 5;
const FOUND_REPEAT_BONUS: i32 = 3;
const FOUND_REPEAT_CAP: usize = 5;
const FOUND_REQUIREMENT_BONUS: i32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub hard_found: BTreeSet<String>,
    pub hard_missing: BTreeSet<String>,
    pub soft_found: BTreeSet<String>,
    pub soft_missing: BTreeSet<String>,
    /// Signed criticality per required skill
    pub impact_weights: BTreeMap<String, i32>,
    /// Required skills named in a requirements block or at least twice
    pub critical: BTreeSet<String>,
}

impl SkillProfile {
    pub fn hard_required(&self) -> usize {
        self.hard_found.len() + self.hard_missing.len()
    }

    pub fn soft_required(&self) -> usize {
        self.soft_found.len() + self.soft_missing.len()
    }

    pub fn found_count(&self) -> usize {
        self.hard_found.len() + self.soft_found.len()
    }

    /// Critical skills the resume already covers
    pub fn critical_found(&self) -> usize {
        self.critical
            .iter()
            .filter(|s| self.hard_found.contains(*s) || self.soft_found.contains(*s))
            .count()
    }

    /// Missing hard skills, most critical first
    pub fn missing_by_impact(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = self.hard_missing.iter().map(String::as_str).collect();
        missing.sort_by_key(|s| (!self.critical.contains(*s), *s));
        missing
    }
}

/// How strongly the job text asks for a skill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Emphasis {
    pub mentions: usize,
    pub in_requirements: bool,
}

impl Emphasis {
    pub fn is_critical(&self) -> bool {
        self.in_requirements || self.mentions >= 2
    }
}

/// Impact weight of a required skill. Non-decreasing in emphasis for a fixed
/// found/missing state; missing skills always weigh at most -20.
pub fn impact_weight(found: bool, emphasis: Emphasis) -> i32 {
    if !found {
        return MISSING_SKILL_WEIGHT;
    }
    let repeats = emphasis.mentions.saturating_sub(1).min(FOUND_REPEAT_CAP) as i32;
    let requirement = if emphasis.in_requirements { FOUND_REQUIREMENT_BONUS } else { 0 };
    FOUND_BASE_WEIGHT + FOUND_REPEAT_BONUS * repeats + requirement
}

/// Skill differ bound to one vocabulary
pub struct SkillDiffer {
    hard: TermMatcher,
    soft: TermMatcher,
    requirement_inline: Regex,
    requirement_heading: Regex,
}

impl SkillDiffer {
    pub fn new(vocabulary: &SkillVocabulary) -> Result<Self> {
        Ok(Self {
            hard: TermMatcher::new(&vocabulary.hard)?,
            soft: TermMatcher::new(&vocabulary.soft)?,
            requirement_inline: Regex::new(
                r"(?i)(?:required|requirements|must have|must-have|should have|experience with|knowledge of|proficient in|proficiency in)\s*:?\s*([^.!?\n]+)",
            )
            .expect("Invalid requirement regex"),
            requirement_heading: Regex::new(
                r"(?i)^\s*(?:requirements|required|qualifications|required qualifications|minimum qualifications|must have|what you(?:'ll)? need)\b",
            )
            .expect("Invalid requirement heading regex"),
        })
    }

    pub fn diff(&self, resume_text: &str, job_text: &str) -> SkillProfile {
        let requirements = self.requirement_text(job_text);
        let mut profile = SkillProfile::default();

        let (hard_found, hard_missing) =
            self.diff_category(&self.hard, resume_text, job_text, &requirements, &mut profile);
        let (soft_found, soft_missing) =
            self.diff_category(&self.soft, resume_text, job_text, &requirements, &mut profile);

        profile.hard_found = hard_found;
        profile.hard_missing = hard_missing;
        profile.soft_found = soft_found;
        profile.soft_missing = soft_missing;
        profile
    }

    fn diff_category(
        &self,
        matcher: &TermMatcher,
        resume_text: &str,
        job_text: &str,
        requirements: &str,
        profile: &mut SkillProfile,
    ) -> (BTreeSet<String>, BTreeSet<String>) {
        let job_counts = matcher.counts(job_text);
        let resume_counts = matcher.counts(resume_text);
        let requirement_counts = matcher.counts(requirements);

        let mut found = BTreeSet::new();
        let mut missing = BTreeSet::new();

        for (idx, term) in matcher.terms().iter().enumerate() {
            if job_counts[idx] == 0 {
                continue;
            }
            let emphasis = Emphasis {
                mentions: job_counts[idx],
                in_requirements: requirement_counts[idx] > 0,
            };
            let is_found = resume_counts[idx] > 0;

            profile.impact_weights.insert(term.clone(), impact_weight(is_found, emphasis));
            if emphasis.is_critical() {
                profile.critical.insert(term.clone());
            }
            if is_found {
                found.insert(term.clone());
            } else {
                missing.insert(term.clone());
            }
        }

        (found, missing)
    }

    /// Text of inline requirement phrases plus blocks under requirement headings
    fn requirement_text(&self, job_text: &str) -> String {
        let mut parts: Vec<String> = self
            .requirement_inline
            .captures_iter(job_text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect();

        let mut in_block = false;
        for line in job_text.lines() {
            if self.requirement_heading.is_match(line) {
                in_block = true;
                parts.push(line.to_string());
                continue;
            }
            if line.trim().is_empty() {
                in_block = false;
                continue;
            }
            if in_block {
                parts.push(line.to_string());
            }
        }

        parts.join("\n")
    }
}

/// Diff skills with a one-off differ
pub fn diff_skills(resume_text: &str, job_text: &str, vocabulary: &SkillVocabulary) -> Result<SkillProfile> {
    Ok(SkillDiffer::new(vocabulary)?.diff(resume_text, job_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::matcher::contains_term;

    fn vocab() -> SkillVocabulary {
        SkillVocabulary::new(
            vec!["sql".into(), "python".into(), "aws".into(), "tableau".into()],
            vec!["communication".into(), "leadership".into()],
        )
    }

    #[test]
    fn test_found_and_missing() {
        let job = "We need SQL, Python and AWS experience.";
        let resume = "Wrote SQL reports daily.";
        let profile = diff_skills(resume, job, &vocab()).unwrap();

        assert_eq!(profile.hard_found, BTreeSet::from(["sql".to_string()]));
        assert_eq!(
            profile.hard_missing,
            BTreeSet::from(["aws".to_string(), "python".to_string()])
        );
        assert!(profile.impact_weights["python"] <= -20);
        assert!(profile.impact_weights["sql"] > 0);
        assert!(!profile.impact_weights.contains_key("tableau"));
    }

    #[test]
    fn test_found_and_missing_are_disjoint() {
        let job = "Requirements:\nSQL and Python\nTableau a plus. Communication matters.";
        let resume = "Python, Tableau, great communication";
        let profile = diff_skills(resume, job, &vocab()).unwrap();

        assert!(profile.hard_found.is_disjoint(&profile.hard_missing));
        assert!(profile.soft_found.is_disjoint(&profile.soft_missing));
        for skill in profile.hard_found.iter().chain(profile.hard_missing.iter()) {
            assert!(contains_term(job, skill));
        }
        for skill in &profile.hard_found {
            assert!(contains_term(resume, skill));
        }
        for skill in &profile.hard_missing {
            assert!(!contains_term(resume, skill));
        }
    }

    #[test]
    fn test_requirement_block_marks_critical() {
        let job = "About us\nWe like Tableau.\n\nRequirements\n- SQL\n- Python\n\nBenefits\nAWS credits";
        let profile = diff_skills("SQL", job, &vocab()).unwrap();

        assert!(profile.critical.contains("sql"));
        assert!(profile.critical.contains("python"));
        assert!(!profile.critical.contains("aws"));
        assert!(!profile.critical.contains("tableau"));
        assert_eq!(profile.critical_found(), 1);
        assert_eq!(profile.missing_by_impact()[0], "python");
    }

    #[test]
    fn test_weight_monotonic_in_emphasis() {
        let emphases = [
            Emphasis { mentions: 1, in_requirements: false },
            Emphasis { mentions: 2, in_requirements: false },
            Emphasis { mentions: 4, in_requirements: false },
            Emphasis { mentions: 4, in_requirements: true },
            Emphasis { mentions: 20, in_requirements: true },
        ];
        for found in [true, false] {
            for pair in emphases.windows(2) {
                assert!(impact_weight(found, pair[0]) <= impact_weight(found, pair[1]));
            }
        }
        assert!(emphases.iter().all(|e| impact_weight(false, *e) <= -20));
    }

    #[test]
    fn test_no_required_skills() {
        let profile = diff_skills("Python expert", "Join our friendly team", &vocab()).unwrap();
        assert_eq!(profile.hard_required(), 0);
        assert_eq!(profile.soft_required(), 0);
        assert!(profile.impact_weights.is_empty());
    }
}
