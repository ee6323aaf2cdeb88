//! Market context and industry detection

use crate::error::Result;
use crate::llm::payloads::MarketEnrichment;
use crate::processing::industry::Industry;
use crate::processing::matcher::{contains_term, TermMatcher};
use crate::processing::recruiter::clamp_score;
use crate::processing::skills::SkillProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const BASE_DEMAND: i32 = 50;
const MAX_TRENDING: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    pub competition_level: u8,
    pub demand_score: u8,
    pub trending_skills: Vec<String>,
}

impl MarketContext {
    pub fn from_heuristics(industry: Industry, skills: &SkillProfile, resume_text: &str) -> Self {
        let profile = industry.profile();

        let modern_found = profile
            .modern_skills
            .iter()
            .filter(|s| contains_term(resume_text, s))
            .count();
        let demand = BASE_DEMAND
            + 5 * modern_found.min(6) as i32
            + 2 * skills.hard_found.len().min(10) as i32;

        let trending_skills = profile
            .modern_skills
            .iter()
            .filter(|s| !contains_term(resume_text, s))
            .take(MAX_TRENDING)
            .map(|s| s.to_string())
            .collect();

        Self {
            competition_level: profile.competition_level.min(100),
            demand_score: demand.clamp(0, 100) as u8,
            trending_skills,
        }
    }

    pub fn from_enrichment(payload: &MarketEnrichment) -> Self {
        Self {
            competition_level: clamp_score(payload.competition_level),
            demand_score: clamp_score(payload.demand_score),
            trending_skills: payload
                .trending_skills
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .take(MAX_TRENDING)
                .collect(),
        }
    }

    /// Market-alignment component: demand discounted by a tenth of the competition
    pub fn alignment_score(&self) -> u8 {
        let score = self.demand_score as i32 - self.competition_level as i32 / 10;
        score.clamp(0, 100) as u8
    }
}

/// Pick the industry whose vocabulary the job text names most often.
///
/// Resume hits only separate industries the job text leaves tied; ties that
/// remain go to the earlier industry, and no job hits at all means General.
pub fn detect_industry(job_text: &str, resume_text: &str) -> Result<Industry> {
    let mut best = (Industry::General, 0usize, 0usize);

    for industry in Industry::ALL {
        if industry == Industry::General {
            continue;
        }
        let profile = industry.profile();
        let terms: BTreeSet<&str> = profile
            .hard_skills
            .iter()
            .chain(profile.modern_skills.iter())
            .copied()
            .collect();
        let matcher = TermMatcher::new(terms)?;

        let job_hits = matcher.distinct_hits(job_text);
        if job_hits == 0 {
            continue;
        }
        let resume_hits = matcher.distinct_hits(resume_text);
        if (job_hits, resume_hits) > (best.1, best.2) {
            best = (industry, job_hits, resume_hits);
        }
    }

    Ok(best.0)
}
