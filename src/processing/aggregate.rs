//! Weighted aggregation of the component scores into the final report

use crate::config::{ScoringConfig, MAX_LIST_ITEMS};
use crate::processing::market::MarketContext;
use crate::processing::predictive::PredictiveProfile;
use crate::processing::recruiter::{RecruiterSignalProfile, FLAG_FEW_METRICS, FLAG_WEAK_VERBS};
use crate::processing::skills::SkillProfile;
use crate::processing::structure::{StructuralProfile, WordCountStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const DEFAULT_HARD_COVERAGE: f64 = 50.0;
const DEFAULT_SOFT_COVERAGE: f64 = 70.0;
const CRITICAL_BONUS_PER_SKILL: f64 = 3.0;
const CRITICAL_BONUS_CAP: f64 = 15.0;
const RED_FLAG_PENALTY: f64 = 3.0;
const PERCENTILE_MIN: i32 = 5;
const PERCENTILE_MAX: i32 = 95;
const MISSING_SKILL_FIXES: usize = 3;

/// The five scored components, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Ats,
    Skills,
    Recruiter,
    Market,
    Predictions,
}

impl Component {
    pub const ALL: [Component; 5] = [
        Component::Ats,
        Component::Skills,
        Component::Recruiter,
        Component::Market,
        Component::Predictions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Component::Ats => "ATS compatibility",
            Component::Skills => "Skill match",
            Component::Recruiter => "Recruiter appeal",
            Component::Market => "Market alignment",
            Component::Predictions => "Hiring outlook",
        }
    }

    fn strength_message(&self) -> &'static str {
        match self {
            Component::Ats => "Resume structure parses cleanly in applicant tracking systems",
            Component::Skills => "Strong coverage of the skills the job asks for",
            Component::Recruiter => "Makes a confident first impression with authoritative language",
            Component::Market => "Skill set lines up with current market demand",
            Component::Predictions => "Good predicted hiring outcome for this role",
        }
    }

    fn weakness_message(&self) -> &'static str {
        match self {
            Component::Ats => "Structural gaps may stop ATS parsers from reading the resume",
            Component::Skills => "Several required skills are missing from the resume",
            Component::Recruiter => "Recruiters may not see impact in a quick skim",
            Component::Market => "Skills trail what the market currently rewards",
            Component::Predictions => "Predicted hiring outcome is below average",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub ats: u8,
    pub skills: u8,
    pub recruiter: u8,
    pub market: u8,
    pub predictions: u8,
}

impl ComponentScores {
    pub fn uniform(score: u8) -> Self {
        let score = score.min(100);
        Self {
            ats: score,
            skills: score,
            recruiter: score,
            market: score,
            predictions: score,
        }
    }

    pub fn get(&self, component: Component) -> u8 {
        match component {
            Component::Ats => self.ats,
            Component::Skills => self.skills,
            Component::Recruiter => self.recruiter,
            Component::Market => self.market,
            Component::Predictions => self.predictions,
        }
    }

    pub fn breakdown(&self) -> BTreeMap<Component, u8> {
        Component::ALL.iter().map(|c| (*c, self.get(*c))).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityFix {
    pub priority: u8,
    pub component: Component,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub overall_score: u8,
    pub percentile: u8,
    pub breakdown: BTreeMap<Component, u8>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub priority_fixes: Vec<PriorityFix>,
}

fn to_score(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Points out of 100 for parseability and completeness of the resume layout
pub fn ats_score(structural: &StructuralProfile) -> u8 {
    let mut points = 0.0;
    let mut award = |condition: bool, value: f64| {
        if condition {
            points += value;
        }
    };

    award(structural.file_type_ok, 10.0);
    award(structural.file_name_ok, 5.0);
    award(structural.contact.has_email, 10.0);
    award(structural.contact.has_phone, 10.0);
    award(structural.contact.has_location, 5.0);
    award(structural.sections.has_experience, 10.0);
    award(structural.sections.has_education, 10.0);
    award(structural.sections.has_skills, 10.0);
    award(structural.sections.has_summary, 5.0);
    award(structural.dates_valid, 10.0);
    match structural.word_count_status {
        WordCountStatus::Optimal => points += 10.0,
        WordCountStatus::Under | WordCountStatus::Over => points += 5.0,
    }
    if structural.job_title_match.exact {
        points += 5.0;
    } else {
        points += 5.0 * structural.job_title_match.similarity.clamp(0.0, 1.0);
    }

    to_score(points)
}

/// `0.7 x hard coverage + 0.3 x soft coverage + 3 per critical skill found (max 15)`
pub fn skill_match_score(skills: &SkillProfile) -> u8 {
    let coverage = |found: usize, required: usize, default: f64| {
        if required == 0 {
            default
        } else {
            100.0 * found as f64 / required as f64
        }
    };
    let hard = coverage(skills.hard_found.len(), skills.hard_required(), DEFAULT_HARD_COVERAGE);
    let soft = coverage(skills.soft_found.len(), skills.soft_required(), DEFAULT_SOFT_COVERAGE);
    let bonus = (CRITICAL_BONUS_PER_SKILL * skills.critical_found() as f64).min(CRITICAL_BONUS_CAP);

    to_score(0.7 * hard + 0.3 * soft + bonus)
}

pub fn recruiter_score(recruiter: &RecruiterSignalProfile) -> u8 {
    let base = 0.4 * recruiter.first6s_score as f64
        + 0.35 * recruiter.authority_score as f64
        + 0.25 * recruiter.narrative_score as f64;
    to_score(base - RED_FLAG_PENALTY * recruiter.red_flags.len() as f64)
}

pub fn predictions_score(predictive: &PredictiveProfile) -> u8 {
    let x_factor = predictive.x_factor.min(30) as f64 / 30.0 * 100.0;
    let resilience = (1.0 - predictive.automation_risk.clamp(0.0, 1.0)) * 100.0;
    to_score(0.5 * predictive.hire_probability.point as f64 + 0.25 * x_factor + 0.25 * resilience)
}

/// `round(sum of weight x score)`, clamped to `[0, 100]`
pub fn combine(scores: &ComponentScores, weights: &ScoringConfig) -> u8 {
    let total = weights.ats_weight * scores.ats as f64
        + weights.skills_weight * scores.skills as f64
        + weights.recruiter_weight * scores.recruiter as f64
        + weights.market_weight * scores.market as f64
        + weights.predictions_weight * scores.predictions as f64;
    to_score(total)
}

pub fn percentile(overall_score: u8, competition_level: u8) -> u8 {
    let raw = overall_score as f64 * 0.8 + (100.0 - competition_level.min(100) as f64) * 0.2;
    (raw.round() as i32).clamp(PERCENTILE_MIN, PERCENTILE_MAX) as u8
}

/// Aggregates component profiles using one scoring configuration
#[derive(Debug, Clone)]
pub struct AggregationEngine {
    config: ScoringConfig,
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl AggregationEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn component_scores(
        &self,
        structural: &StructuralProfile,
        skills: &SkillProfile,
        recruiter: &RecruiterSignalProfile,
        predictive: &PredictiveProfile,
        market: &MarketContext,
    ) -> ComponentScores {
        ComponentScores {
            ats: ats_score(structural),
            skills: skill_match_score(skills),
            recruiter: recruiter_score(recruiter),
            market: market.alignment_score(),
            predictions: predictions_score(predictive),
        }
    }

    pub fn aggregate(
        &self,
        structural: &StructuralProfile,
        skills: &SkillProfile,
        recruiter: &RecruiterSignalProfile,
        predictive: &PredictiveProfile,
        market: &MarketContext,
    ) -> AggregateReport {
        let scores = self.component_scores(structural, skills, recruiter, predictive, market);
        let overall_score = combine(&scores, &self.config);
        // Hand-built configs may skip `validate`
        let cap = self.config.max_list_items.min(MAX_LIST_ITEMS);

        let strengths = Component::ALL
            .iter()
            .filter(|c| scores.get(**c) >= self.config.strength_threshold)
            .map(|c| c.strength_message().to_string())
            .take(cap)
            .collect();
        let weaknesses = Component::ALL
            .iter()
            .filter(|c| scores.get(**c) < self.config.weakness_threshold)
            .map(|c| c.weakness_message().to_string())
            .take(cap)
            .collect();

        let mut priority_fixes =
            self.fix_candidates(&scores, structural, skills, recruiter, predictive, market);
        // Stable, so equal priorities keep the order they were checked in
        priority_fixes.sort_by(|a, b| b.priority.cmp(&a.priority));
        priority_fixes.truncate(cap);

        AggregateReport {
            overall_score,
            percentile: percentile(overall_score, market.competition_level),
            breakdown: scores.breakdown(),
            strengths,
            weaknesses,
            priority_fixes,
        }
    }

    fn fix_candidates(
        &self,
        scores: &ComponentScores,
        structural: &StructuralProfile,
        skills: &SkillProfile,
        recruiter: &RecruiterSignalProfile,
        predictive: &PredictiveProfile,
        market: &MarketContext,
    ) -> Vec<PriorityFix> {
        let threshold = self.config.fix_threshold;
        let mut fixes = Vec::new();
        let mut push = |component: Component, priority: u8, action: String| {
            fixes.push(PriorityFix { priority, component, action });
        };

        if scores.ats < threshold {
            let c = Component::Ats;
            if !structural.contact.has_email {
                push(c, 10, "Add email address to the contact section at the top".to_string());
            }
            if !structural.contact.has_phone {
                push(c, 9, "Add a phone number with area code to the contact section".to_string());
            }
            if !structural.file_type_ok {
                push(c, 9, "Submit the resume as a PDF or Word document".to_string());
            }
            if !structural.sections.has_experience {
                push(c, 8, "Add a clearly labelled Experience section".to_string());
            }
            if !structural.sections.has_skills {
                push(c, 8, "Add a dedicated Skills section listing your core tools".to_string());
            }
            if !structural.dates_valid {
                push(c, 7, "Add start and end dates (Month YYYY) to each role".to_string());
            }
            match structural.word_count_status {
                WordCountStatus::Under => push(
                    c,
                    6,
                    format!("Expand the resume from {} words toward 400-1200", structural.word_count),
                ),
                WordCountStatus::Over => push(
                    c,
                    6,
                    format!("Trim the resume from {} words to at most 1200", structural.word_count),
                ),
                WordCountStatus::Optimal => {}
            }
            if !structural.job_title_match.exact && structural.job_title_match.similarity < 0.8 {
                push(c, 6, "Use the target job title in your headline".to_string());
            }
            if !structural.sections.has_education {
                push(c, 5, "Add an Education section".to_string());
            }
            if !structural.sections.has_summary {
                push(c, 5, "Open with a short professional summary".to_string());
            }
            if !structural.contact.has_location {
                push(c, 4, "Add your city and state, or Remote".to_string());
            }
            if !structural.file_name_ok {
                push(c, 3, "Rename the file using only letters, digits, dashes and dots".to_string());
            }
        }

        if scores.skills < threshold {
            let c = Component::Skills;
            for skill in skills.missing_by_impact().into_iter().take(MISSING_SKILL_FIXES) {
                let priority = if skills.critical.contains(skill) { 9 } else { 7 };
                push(c, priority, format!("Add evidence of '{}' experience, the job asks for it", skill));
            }
            if let Some(soft) = skills.soft_missing.iter().next() {
                push(c, 4, format!("Show '{}' through a concrete example", soft));
            }
        }

        if scores.recruiter < threshold {
            let c = Component::Recruiter;
            if recruiter.red_flags.iter().any(|f| f == FLAG_FEW_METRICS) {
                push(c, 8, "Quantify achievements with numbers, percentages or dollar amounts".to_string());
            }
            if recruiter.authority_score < 50 || recruiter.red_flags.iter().any(|f| f == FLAG_WEAK_VERBS) {
                push(c, 7, "Replace weak verbs like 'helped' with strong action verbs like 'led'".to_string());
            }
            if recruiter.first6s_score < 75 {
                push(c, 6, "Put your title, email and phone in the first lines".to_string());
            }
            if recruiter.narrative_score < 70 {
                push(c, 5, "Use bulleted, dated sections separated by blank lines".to_string());
            }
        }

        if scores.market < threshold && !market.trending_skills.is_empty() {
            let trending: Vec<&str> = market.trending_skills.iter().take(3).map(String::as_str).collect();
            push(
                Component::Market,
                5,
                format!("Highlight in-demand skills such as {}", trending.join(", ")),
            );
        }

        if scores.predictions < threshold {
            let c = Component::Predictions;
            if predictive.hire_probability.point < 50 {
                push(c, 6, "Close the required-skill gap before applying".to_string());
            }
            if predictive.x_factor < 10 {
                push(c, 4, "Showcase a standout achievement such as a launch or patent".to_string());
            }
            if predictive.automation_risk > 0.5 {
                push(c, 3, "Emphasise skills that are hard to automate, like leadership".to_string());
            }
        }

        fixes
    }
}
