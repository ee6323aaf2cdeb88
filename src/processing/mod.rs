//! Deterministic scoring core: extraction, skill diff, heuristics and aggregation

pub mod aggregate;
pub mod industry;
pub mod market;
pub mod matcher;
pub mod predictive;
pub mod recruiter;
pub mod similarity;
pub mod skills;
pub mod structure;

pub use aggregate::{AggregateReport, AggregationEngine, Component, ComponentScores, PriorityFix};
pub use industry::{Industry, SkillVocabulary};
pub use market::{detect_industry, MarketContext};
pub use predictive::PredictiveProfile;
pub use recruiter::RecruiterSignalProfile;
pub use similarity::similarity;
pub use skills::{diff_skills, SkillProfile};
pub use structure::{FileMeta, StructuralExtractor, StructuralProfile};
