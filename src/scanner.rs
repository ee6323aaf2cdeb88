//! Scan orchestration: structural and skill analysis, concurrent enrichment
//! with per-call heuristic fallback, then aggregation

use crate::config::{Config, ScoringConfig};
use crate::error::{EnrichmentError, Result};
use crate::input::manager::RawInput;
use crate::llm::enrichment::Enricher;
use crate::llm::prompts::PromptParams;
use crate::llm::provider::{provider_from_config, DisabledProvider, EnrichmentProvider};
use crate::output::report::{Provenance, ReportMetadata, ScanReport, Source};
use crate::processing::aggregate::AggregationEngine;
use crate::processing::industry::{Industry, SkillVocabulary};
use crate::processing::market::{detect_industry, MarketContext};
use crate::processing::predictive::{PredictiveHeuristics, PredictiveProfile};
use crate::processing::recruiter::{RecruiterHeuristics, RecruiterSignalProfile};
use crate::processing::skills::SkillDiffer;
use crate::processing::structure::{title_like_lines, StructuralExtractor};
use chrono::{Datelike, Utc};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub struct ScanOptions {
    /// Target job title; the first title-like line of the job text when absent
    pub job_title: Option<String>,
    /// Skip industry detection
    pub industry: Option<Industry>,
    /// Year treated as "present" by the recency checks
    pub reference_year: i32,
    /// Replaces the industry vocabulary
    pub vocabulary: Option<SkillVocabulary>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            job_title: None,
            industry: None,
            reference_year: Utc::now().year(),
            vocabulary: None,
        }
    }
}

pub struct AtsScanner {
    enricher: Enricher,
    engine: AggregationEngine,
    extractor: StructuralExtractor,
    recruiter: RecruiterHeuristics,
    predictive: PredictiveHeuristics,
}

impl AtsScanner {
    pub fn new(provider: Arc<dyn EnrichmentProvider>, scoring: ScoringConfig) -> Self {
        Self {
            enricher: Enricher::new(provider),
            engine: AggregationEngine::new(scoring),
            extractor: StructuralExtractor::new(),
            recruiter: RecruiterHeuristics::new(),
            predictive: PredictiveHeuristics::new(),
        }
    }

    /// Scanner that never calls out and always uses the heuristics
    pub fn heuristic_only(scoring: ScoringConfig) -> Self {
        Self::new(Arc::new(DisabledProvider), scoring)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(provider_from_config(&config.enrichment), config.scoring.clone())
    }

    pub async fn scan(&self, input: &RawInput, options: &ScanOptions) -> Result<ScanReport> {
        let start = Instant::now();
        input.validate()?;

        let resume = input.resume_text.as_str();
        let job = input.job_description_text.as_str();

        let job_title = resolve_job_title(options.job_title.as_deref(), job);
        debug!("Scanning for job title '{}'", job_title);
        let structural = self.extractor.extract(resume, &job_title, &input.file_meta);

        let params = PromptParams::new(resume, job, options.industry);
        let (industry_result, psychology_result, market_result, prediction_result) = tokio::join!(
            async {
                match options.industry {
                    Some(_) => None,
                    None => Some(self.enricher.industry(&params).await),
                }
            },
            self.enricher.psychology(&params),
            self.enricher.market(&params),
            self.enricher.predictions(&params),
        );

        let (industry, industry_source) = match (options.industry, industry_result) {
            (Some(industry), _) => (industry, Source::Provided),
            (None, Some(Ok(payload))) => match payload.resolved() {
                Some(industry) => (industry, Source::Enrichment),
                None => (detect_industry(job, resume)?, Source::Heuristic),
            },
            (None, Some(Err(err))) => {
                self.log_fallback("industry", &err);
                (detect_industry(job, resume)?, Source::Heuristic)
            }
            (None, None) => (detect_industry(job, resume)?, Source::Heuristic),
        };
        info!("Industry: {} ({})", industry, industry_source);

        let vocabulary = options
            .vocabulary
            .clone()
            .unwrap_or_else(|| SkillVocabulary::for_industry(industry));
        let skills = SkillDiffer::new(&vocabulary)?.diff(resume, job);
        debug!(
            "Skills: {} hard found, {} hard missing",
            skills.hard_found.len(),
            skills.hard_missing.len()
        );

        let (recruiter, recruiter_source) = match psychology_result {
            Ok(payload) => (RecruiterSignalProfile::from_enrichment(&payload), Source::Enrichment),
            Err(err) => {
                self.log_fallback("psychology", &err);
                (self.recruiter.score(resume), Source::Heuristic)
            }
        };

        let (market, market_source) = match market_result {
            Ok(payload) => (MarketContext::from_enrichment(&payload), Source::Enrichment),
            Err(err) => {
                self.log_fallback("market", &err);
                (MarketContext::from_heuristics(industry, &skills, resume), Source::Heuristic)
            }
        };

        let (predictive, predictions_source) = match prediction_result {
            Ok(payload) => (PredictiveProfile::from_enrichment(&payload), Source::Enrichment),
            Err(err) => {
                self.log_fallback("predictions", &err);
                (
                    self.predictive
                        .score(&skills, industry, resume, job, options.reference_year),
                    Source::Heuristic,
                )
            }
        };

        let aggregate = self
            .engine
            .aggregate(&structural, &skills, &recruiter, &predictive, &market);
        info!(
            "Overall score {} (percentile {})",
            aggregate.overall_score, aggregate.percentile
        );

        Ok(ScanReport {
            job_title,
            industry,
            structural,
            skills,
            recruiter,
            predictive,
            market,
            aggregate,
            provenance: Provenance {
                industry: industry_source,
                recruiter: recruiter_source,
                market: market_source,
                predictions: predictions_source,
            },
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                scanner_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: input.file_meta.filename.clone(),
                processing_time_ms: start.elapsed().as_millis() as u64,
                enrichment_provider: self.enricher.provider_name().to_string(),
            },
        })
    }

    fn log_fallback(&self, call: &str, err: &EnrichmentError) {
        match err {
            EnrichmentError::Unavailable => debug!("No {} enrichment, using heuristics", call),
            _ => warn!("{} enrichment failed ({}), falling back to heuristics", call, err),
        }
    }
}

fn resolve_job_title(requested: Option<&str>, job_text: &str) -> String {
    requested
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| title_like_lines(job_text).first().map(|line| line.to_string()))
        .unwrap_or_default()
}
