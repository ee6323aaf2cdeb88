//! Hire probability, salary band, automation risk and X-factor heuristics

use crate::llm::payloads::PredictionEnrichment;
use crate::processing::industry::Industry;
use crate::processing::matcher::{contains_term, TermMatcher};
use crate::processing::recruiter::RecruiterHeuristics;
use crate::processing::skills::SkillProfile;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const HIRE_MIN: i32 = 5;
const HIRE_MAX: i32 = 95;
const BAND_HALF_WIDTH: i32 = 15;
const BAND_MIN: i32 = 1;
const BAND_MAX: i32 = 99;
const X_FACTOR_CAP: u8 = 30;
const RISK_FLOOR: f64 = 0.05;
const RISK_PER_MODERN_SKILL: f64 = 0.05;
const MAX_MODERN_REDUCTION: f64 = 0.25;
const LEADERSHIP_RISK_REDUCTION: f64 = 0.1;

const LEADERSHIP_SKILLS: &[&str] = &[
    "leadership", "mentoring", "people management", "team management", "stakeholder management",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictiveProfile {
    pub hire_probability: HireProbability,
    pub salary: SalaryBand,
    pub automation_risk: f64,
    pub x_factor: u8,
}

/// `lower <= point <= upper`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HireProbability {
    pub point: u8,
    pub lower: u8,
    pub upper: u8,
}

impl HireProbability {
    pub fn from_point(point: i32) -> Self {
        let point = point.clamp(HIRE_MIN, HIRE_MAX);
        Self {
            point: point as u8,
            lower: (point - BAND_HALF_WIDTH).clamp(BAND_MIN, BAND_MAX) as u8,
            upper: (point + BAND_HALF_WIDTH).clamp(BAND_MIN, BAND_MAX) as u8,
        }
    }
}

/// Annual salary in USD; `conservative <= market <= aggressive`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub conservative: f64,
    pub market: f64,
    pub aggressive: f64,
}

impl SalaryBand {
    pub fn from_market(market: f64) -> Self {
        let market = market.max(0.0);
        Self {
            conservative: (market * 0.85).round(),
            market: market.round(),
            aggressive: (market * 1.15).round(),
        }
    }
}

/// Seniority implied by the job text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleLevel {
    Entry,
    Mid,
    Senior,
    Principal,
    Director,
    VicePresident,
}

impl RoleLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            RoleLevel::Entry => 0.8,
            RoleLevel::Mid => 1.0,
            RoleLevel::Senior => 1.3,
            RoleLevel::Principal => 1.6,
            RoleLevel::Director => 1.8,
            RoleLevel::VicePresident => 2.5,
        }
    }
}

impl PredictiveProfile {
    /// Deterministic fallback used when enrichment is unavailable
    pub fn from_heuristics(
        skills: &SkillProfile,
        industry: Industry,
        resume_text: &str,
        job_text: &str,
        reference_year: i32,
    ) -> Self {
        PredictiveHeuristics::shared().score(skills, industry, resume_text, job_text, reference_year)
    }

    pub fn from_enrichment(payload: &PredictionEnrichment) -> Self {
        let mut salaries = [
            payload.salary_conservative.max(0.0),
            payload.salary_market.max(0.0),
            payload.salary_aggressive.max(0.0),
        ];
        salaries.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Self {
            hire_probability: HireProbability::from_point(payload.hire_probability.round() as i32),
            salary: SalaryBand {
                conservative: salaries[0].round(),
                market: salaries[1].round(),
                aggressive: salaries[2].round(),
            },
            automation_risk: round2(payload.automation_risk.clamp(RISK_FLOOR, 1.0)),
            x_factor: payload.x_factor.round().clamp(0.0, X_FACTOR_CAP as f64) as u8,
        }
    }
}

pub struct PredictiveHeuristics {
    recruiter: RecruiterHeuristics,
    leadership_skills: TermMatcher,
    leadership_regex: Regex,
    present_regex: Regex,
    founder_regex: Regex,
    innovation_regex: Regex,
    scale_regex: Regex,
    prestige_regex: Regex,
    vp_regex: Regex,
    director_regex: Regex,
    principal_regex: Regex,
    senior_regex: Regex,
    entry_regex: Regex,
}

impl Default for PredictiveHeuristics {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictiveHeuristics {
    pub fn new() -> Self {
        let re = |pattern: &str| Regex::new(pattern).expect("Invalid predictive regex");

        Self {
            recruiter: RecruiterHeuristics::new(),
            leadership_skills: TermMatcher::new(LEADERSHIP_SKILLS)
                .expect("Invalid leadership skill list"),
            leadership_regex: re(r"(?i)\b(?:led|leading|managed|mentored|supervised|directed|headed|leadership|team lead)\b"),
            present_regex: re(r"(?i)\b(?:present|current|currently|now)\b"),
            founder_regex: re(r"(?i)\b(?:founded|co-founded|founder|co-founder|launched)\b"),
            innovation_regex: re(r"(?i)\b(?:patents?|patented|invented|innovat[a-z]*|pioneered)\b"),
            scale_regex: re(r"(?i)\b(?:millions?|billions?|global|enterprise-wide|at scale|scaled|[0-9]+[kmb]\+? users)\b"),
            prestige_regex: re(r"(?i)\b(?:harvard|stanford|mit|princeton|yale|oxford|cambridge|berkeley|caltech|columbia|wharton)\b"),
            vp_regex: re(r"(?i)\b(?:vp|vice president|svp|evp)\b"),
            director_regex: re(r"(?i)\b(?:director|head of|manager)\b"),
            principal_regex: re(r"(?i)\b(?:principal|staff)\b"),
            senior_regex: re(r"(?i)\b(?:senior|sr\.?|lead)\b"),
            entry_regex: re(r"(?i)\b(?:junior|jr\.?|entry[- ]level|entry|graduate|intern)\b"),
        }
    }

    /// Process-wide instance, compiled on first use
    pub fn shared() -> &'static Self {
        static SHARED: OnceLock<PredictiveHeuristics> = OnceLock::new();
        SHARED.get_or_init(Self::new)
    }

    pub fn score(
        &self,
        skills: &SkillProfile,
        industry: Industry,
        resume_text: &str,
        job_text: &str,
        reference_year: i32,
    ) -> PredictiveProfile {
        PredictiveProfile {
            hire_probability: self.hire_probability(skills, resume_text, reference_year),
            salary: self.salary(skills, industry, job_text),
            automation_risk: self.automation_risk(skills, industry, resume_text),
            x_factor: self.x_factor(resume_text),
        }
    }

    pub fn hire_probability(&self, skills: &SkillProfile, resume_text: &str, reference_year: i32) -> HireProbability {
        let required = skills.hard_required();
        let mut point = if required == 0 {
            50
        } else {
            (100.0 * skills.hard_found.len() as f64 / required as f64).round() as i32
        };

        let found = skills.found_count();
        if found >= 8 {
            point += 5;
        } else if found <= 3 {
            point -= 8;
        }

        if self.leadership_regex.is_match(resume_text) {
            point += 8;
        }
        if self.recruiter.language_counts(resume_text).quantified_claims > 0 {
            point += 6;
        }

        point += self.trajectory_delta(resume_text, reference_year);

        HireProbability::from_point(point)
    }

    /// -10 for a gap over two years or a stale most-recent year, +3 otherwise,
    /// 0 when the resume names no years at all
    pub fn trajectory_delta(&self, resume_text: &str, reference_year: i32) -> i32 {
        let mut years: Vec<i32> = self
            .recruiter
            .extractor()
            .years(resume_text)
            .into_iter()
            .filter(|y| *y <= reference_year)
            .collect();
        years.sort_unstable();
        years.dedup();

        let Some(&last) = years.last() else {
            return 0;
        };

        let has_gap = years.windows(2).any(|pair| pair[1] - pair[0] > 2);
        let most_recent = if self.present_regex.is_match(resume_text) {
            reference_year
        } else {
            last
        };
        let stale = reference_year - most_recent > 1;

        if has_gap || stale {
            -10
        } else {
            3
        }
    }

    pub fn role_level(&self, job_text: &str) -> RoleLevel {
        if self.vp_regex.is_match(job_text) {
            RoleLevel::VicePresident
        } else if self.director_regex.is_match(job_text) {
            RoleLevel::Director
        } else if self.principal_regex.is_match(job_text) {
            RoleLevel::Principal
        } else if self.senior_regex.is_match(job_text) {
            RoleLevel::Senior
        } else if self.entry_regex.is_match(job_text) {
            RoleLevel::Entry
        } else {
            RoleLevel::Mid
        }
    }

    pub fn salary(&self, skills: &SkillProfile, industry: Industry, job_text: &str) -> SalaryBand {
        let skill_count = skills.hard_found.len().min(15) as f64;
        let market = industry.profile().base_salary
            * self.role_level(job_text).multiplier()
            * (1.0 + 0.02 * skill_count);
        SalaryBand::from_market(market)
    }

    pub fn automation_risk(&self, skills: &SkillProfile, industry: Industry, resume_text: &str) -> f64 {
        let profile = industry.profile();
        let modern_hits = profile
            .modern_skills
            .iter()
            .filter(|s| contains_term(resume_text, s))
            .count();

        let mut risk = profile.automation_risk
            - (RISK_PER_MODERN_SKILL * modern_hits as f64).min(MAX_MODERN_REDUCTION);

        let leadership_skill = skills
            .soft_found
            .iter()
            .chain(skills.hard_found.iter())
            .any(|s| LEADERSHIP_SKILLS.contains(&s.as_str()))
            || self.leadership_skills.contains_any(resume_text);
        if leadership_skill {
            risk -= LEADERSHIP_RISK_REDUCTION;
        }

        round2(risk.max(RISK_FLOOR))
    }

    pub fn x_factor(&self, resume_text: &str) -> u8 {
        let mut score = 0u8;
        if self.founder_regex.is_match(resume_text) {
            score += 15;
        }
        if self.innovation_regex.is_match(resume_text) {
            score += 10;
        }
        if self.scale_regex.is_match(resume_text) {
            score += 8;
        }
        if self.recruiter.language_counts(resume_text).strong_ratio() > 0.7 {
            score += 7;
        }
        if self.prestige_regex.is_match(resume_text) {
            score += 5;
        }
        score.min(X_FACTOR_CAP)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn skills(found: &[&str], missing: &[&str]) -> SkillProfile {
        SkillProfile {
            hard_found: found.iter().map(|s| s.to_string()).collect(),
            hard_missing: missing.iter().map(|s| s.to_string()).collect(),
            ..SkillProfile::default()
        }
    }

    #[test]
    fn test_hire_probability_band() {
        let h = HireProbability::from_point(90);
        assert_eq!((h.lower, h.point, h.upper), (75, 90, 99));
        let h = HireProbability::from_point(-40);
        assert_eq!((h.lower, h.point, h.upper), (1, 5, 20));
    }

    #[test]
    fn test_shared_heuristics_match_fresh_instance() {
        assert!(std::ptr::eq(PredictiveHeuristics::shared(), PredictiveHeuristics::shared()));
        let profile = skills(&["sql"], &["python"]);
        let resume = "Senior Data Engineer 2018 - present. Led a team of 4.";
        assert_eq!(
            PredictiveProfile::from_heuristics(&profile, Industry::Technology, resume, "Data Engineer", 2026),
            PredictiveHeuristics::new().score(&profile, Industry::Technology, resume, "Data Engineer", 2026)
        );
    }

    #[test]
    fn test_hire_probability_no_required_skills() {
        let heuristics = PredictiveHeuristics::new();
        // 50 base, -8 narrow skill set, no other signals
        let h = heuristics.hire_probability(&SkillProfile::default(), "plain text", 2026);
        assert_eq!(h.point, 42);
    }

    #[test]
    fn test_hire_probability_adjustments() {
        let heuristics = PredictiveHeuristics::new();
        let s = skills(&["sql", "python"], &["aws", "gcp"]);
        // 50 base, -8 narrow, +8 leadership, +6 metrics, +3 steady trajectory
        let text = "Led analytics, grew revenue 20%. 2023 - present";
        assert_eq!(heuristics.hire_probability(&s, text, 2026).point, 59);
    }

    #[test]
    fn test_trajectory() {
        let heuristics = PredictiveHeuristics::new();
        assert_eq!(heuristics.trajectory_delta("2019 2020 2021 present", 2026), 3);
        assert_eq!(heuristics.trajectory_delta("2012 2019 present", 2026), -10);
        assert_eq!(heuristics.trajectory_delta("2018 2019 2020", 2026), -10);
        assert_eq!(heuristics.trajectory_delta("2024 2025", 2026), 3);
        assert_eq!(heuristics.trajectory_delta("no dates", 2026), 0);
    }

    #[test]
    fn test_role_level() {
        let heuristics = PredictiveHeuristics::new();
        assert_eq!(heuristics.role_level("VP of Engineering"), RoleLevel::VicePresident);
        assert_eq!(heuristics.role_level("Staff Engineer"), RoleLevel::Principal);
        assert_eq!(heuristics.role_level("Senior Analyst"), RoleLevel::Senior);
        assert_eq!(heuristics.role_level("Junior Designer"), RoleLevel::Entry);
        assert_eq!(heuristics.role_level("Data Analyst"), RoleLevel::Mid);
    }

    #[test]
    fn test_salary() {
        let heuristics = PredictiveHeuristics::new();
        let s = skills(&["sql", "python", "aws", "docker", "git"], &[]);
        let band = heuristics.salary(&s, Industry::Technology, "Senior Backend Engineer");
        // 120000 * 1.3 * 1.10
        assert_eq!(band.market, 171_600.0);
        assert!(band.conservative <= band.market && band.market <= band.aggressive);
        assert_eq!(band.conservative, 145_860.0);
        assert_eq!(band.aggressive, 197_340.0);
    }

    #[test]
    fn test_automation_risk() {
        let heuristics = PredictiveHeuristics::new();
        let base = heuristics.automation_risk(&SkillProfile::default(), Industry::Operations, "clerk");
        assert_eq!(base, 0.5);

        let mut s = SkillProfile::default();
        s.soft_found = BTreeSet::from(["leadership".to_string()]);
        let reduced = heuristics.automation_risk(&s, Industry::Operations, "ERP and SAP rollout");
        assert_eq!(reduced, 0.3);

        let floor = heuristics.automation_risk(
            &s,
            Industry::Technology,
            "kubernetes terraform rust react graphql serverless aws",
        );
        assert_eq!(floor, RISK_FLOOR);
    }

    #[test]
    fn test_x_factor_cap() {
        let heuristics = PredictiveHeuristics::new();
        let text = "Founded a startup, patented a parser, scaled to millions of users. Stanford alum. Led teams.";
        assert_eq!(heuristics.x_factor(text), 30);
        assert_eq!(heuristics.x_factor("did some work"), 0);
    }

    #[test]
    fn test_from_enrichment_orders_salary() {
        let payload = PredictionEnrichment {
            hire_probability: 130.0,
            salary_conservative: 120_000.0,
            salary_market: 90_000.0,
            salary_aggressive: 100_000.0,
            automation_risk: 0.01,
            x_factor: 44.0,
        };
        let profile = PredictiveProfile::from_enrichment(&payload);
        assert_eq!(profile.hire_probability.point, 95);
        assert_eq!(profile.salary.conservative, 90_000.0);
        assert_eq!(profile.salary.aggressive, 120_000.0);
        assert_eq!(profile.automation_risk, RISK_FLOOR);
        assert_eq!(profile.x_factor, 30);
    }
}
