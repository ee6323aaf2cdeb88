//! Typed enrichment payloads validated at the provider boundary

use crate::error::EnrichmentError;
use crate::processing::industry::Industry;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A payload that can be checked after deserialization
pub trait Payload: DeserializeOwned + Sized {
    fn validate(self) -> Result<Self, EnrichmentError>;

    /// Deserialize and validate a raw provider response
    fn from_value(value: Value) -> Result<Self, EnrichmentError> {
        let value = unwrap_envelope(value);
        let payload: Self = serde_json::from_value(value)?;
        payload.validate()
    }
}

/// Providers sometimes wrap the object as `{"data": {...}}` or return it as a
/// JSON string
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::String(raw) => serde_json::from_str(&raw).unwrap_or(Value::String(raw)),
        Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), EnrichmentError> {
    if !value.is_finite() || value < min || value > max {
        return Err(EnrichmentError::Parse(format!(
            "{} = {} outside [{}, {}]",
            field, value, min, max
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryEnrichment {
    pub industry: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl IndustryEnrichment {
    /// The label resolved onto a known industry; `validate` guarantees `Some`
    pub fn resolved(&self) -> Option<Industry> {
        Industry::from_label(&self.industry)
    }
}

impl Payload for IndustryEnrichment {
    fn validate(self) -> Result<Self, EnrichmentError> {
        if self.resolved().is_none() {
            return Err(EnrichmentError::Parse(format!("unknown industry '{}'", self.industry)));
        }
        if let Some(confidence) = self.confidence {
            check_range("confidence", confidence, 0.0, 1.0)?;
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsychologyEnrichment {
    #[serde(alias = "firstImpressionScore", alias = "first6s_score")]
    pub first_impression_score: f64,
    #[serde(alias = "authorityScore")]
    pub authority_score: f64,
    #[serde(alias = "narrativeScore")]
    pub narrative_score: f64,
    #[serde(default, alias = "redFlags")]
    pub red_flags: Vec<String>,
}

impl Payload for PsychologyEnrichment {
    fn validate(self) -> Result<Self, EnrichmentError> {
        check_range("first_impression_score", self.first_impression_score, 0.0, 100.0)?;
        check_range("authority_score", self.authority_score, 0.0, 100.0)?;
        check_range("narrative_score", self.narrative_score, 0.0, 100.0)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEnrichment {
    #[serde(alias = "competitionLevel")]
    pub competition_level: f64,
    #[serde(alias = "demandScore")]
    pub demand_score: f64,
    #[serde(default, alias = "trendingSkills")]
    pub trending_skills: Vec<String>,
}

impl Payload for MarketEnrichment {
    fn validate(self) -> Result<Self, EnrichmentError> {
        check_range("competition_level", self.competition_level, 0.0, 100.0)?;
        check_range("demand_score", self.demand_score, 0.0, 100.0)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionEnrichment {
    #[serde(alias = "hireProbability")]
    pub hire_probability: f64,
    #[serde(alias = "salaryConservative")]
    pub salary_conservative: f64,
    #[serde(alias = "salaryMarket")]
    pub salary_market: f64,
    #[serde(alias = "salaryAggressive")]
    pub salary_aggressive: f64,
    #[serde(alias = "automationRisk")]
    pub automation_risk: f64,
    #[serde(default, alias = "xFactor")]
    pub x_factor: f64,
}

impl Payload for PredictionEnrichment {
    fn validate(self) -> Result<Self, EnrichmentError> {
        check_range("hire_probability", self.hire_probability, 0.0, 100.0)?;
        check_range("salary_conservative", self.salary_conservative, 0.0, f64::MAX)?;
        check_range("salary_market", self.salary_market, 0.0, f64::MAX)?;
        check_range("salary_aggressive", self.salary_aggressive, 0.0, f64::MAX)?;
        check_range("automation_risk", self.automation_risk, 0.0, 1.0)?;
        check_range("x_factor", self.x_factor, 0.0, 30.0)?;
        Ok(self)
    }
}
