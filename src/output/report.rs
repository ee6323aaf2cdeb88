//! Scan report combining every profile with provenance and metadata

use crate::processing::aggregate::AggregateReport;
use crate::processing::industry::Industry;
use crate::processing::market::MarketContext;
use crate::processing::predictive::PredictiveProfile;
use crate::processing::recruiter::RecruiterSignalProfile;
use crate::processing::skills::SkillProfile;
use crate::processing::structure::StructuralProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a profile came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Enrichment,
    Heuristic,
    /// Supplied by the caller, e.g. `--industry`
    Provided,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Source::Enrichment => "enrichment",
            Source::Heuristic => "heuristic",
            Source::Provided => "provided",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub industry: Source,
    pub recruiter: Source,
    pub market: Source,
    pub predictions: Source,
}

impl Provenance {
    /// Number of profiles that fell back to heuristics
    pub fn fallback_count(&self) -> usize {
        [self.industry, self.recruiter, self.market, self.predictions]
            .iter()
            .filter(|s| **s == Source::Heuristic)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub scanner_version: String,
    pub resume_file: String,
    pub processing_time_ms: u64,
    pub enrichment_provider: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub job_title: String,
    pub industry: Industry,
    pub structural: StructuralProfile,
    pub skills: SkillProfile,
    pub recruiter: RecruiterSignalProfile,
    pub predictive: PredictiveProfile,
    pub market: MarketContext,
    pub aggregate: AggregateReport,
    pub provenance: Provenance,
    pub metadata: ReportMetadata,
}

impl ScanReport {
    pub fn overall_score(&self) -> u8 {
        self.aggregate.overall_score
    }

    /// One-line verdict for the overall score
    pub fn verdict(&self) -> &'static str {
        match self.aggregate.overall_score {
            85..=100 => "Excellent match, ready to submit",
            70..=84 => "Strong match with a few gaps to close",
            55..=69 => "Moderate match, targeted edits recommended",
            40..=54 => "Weak match, significant revisions needed",
            _ => "Poor match for this role",
        }
    }
}
