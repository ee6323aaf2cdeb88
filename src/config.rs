//! Configuration management for the ATS scanner

use crate::error::{AtsScannerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound on strengths, weaknesses and priority fixes in a report
pub const MAX_LIST_ITEMS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub enrichment: EnrichmentConfig,
    pub output: OutputConfig,
}

/// Component weights and report thresholds used by the aggregation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub ats_weight: f64,
    pub skills_weight: f64,
    pub recruiter_weight: f64,
    pub market_weight: f64,
    pub predictions_weight: f64,
    pub strength_threshold: u8,
    pub weakness_threshold: u8,
    pub fix_threshold: u8,
    pub max_list_items: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    /// External program that answers one prompt on stdin with JSON on stdout
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ats_weight: 0.15,
            skills_weight: 0.30,
            recruiter_weight: 0.15,
            market_weight: 0.15,
            predictions_weight: 0.25,
            strength_threshold: 80,
            weakness_threshold: 60,
            fix_threshold: 70,
            max_list_items: MAX_LIST_ITEMS,
        }
    }
}

impl ScoringConfig {
    pub fn weight_sum(&self) -> f64 {
        self.ats_weight
            + self.skills_weight
            + self.recruiter_weight
            + self.market_weight
            + self.predictions_weight
    }

    /// Reject weights, thresholds and list caps the aggregation engine cannot use
    pub fn validate(&self) -> Result<()> {
        let weights = [
            self.ats_weight,
            self.skills_weight,
            self.recruiter_weight,
            self.market_weight,
            self.predictions_weight,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(AtsScannerError::Configuration(
                "Scoring weights must be finite and non-negative".to_string(),
            ));
        }
        if (self.weight_sum() - 1.0).abs() > 1e-6 {
            return Err(AtsScannerError::Configuration(format!(
                "Scoring weights must sum to 1.0 (got {:.4})",
                self.weight_sum()
            )));
        }
        if self.strength_threshold > 100 || self.weakness_threshold > 100 || self.fix_threshold > 100 {
            return Err(AtsScannerError::Configuration(
                "Score thresholds must be within 0-100".to_string(),
            ));
        }
        if !(1..=MAX_LIST_ITEMS).contains(&self.max_list_items) {
            return Err(AtsScannerError::Configuration(format!(
                "max_list_items must be within 1-{} (got {})",
                MAX_LIST_ITEMS, self.max_list_items
            )));
        }
        Ok(())
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: None,
            args: Vec::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            enrichment: EnrichmentConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the user config, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| AtsScannerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.scoring.validate()?;
        Ok(config)
    }

    /// Overwrite the user config with defaults
    pub fn reset() -> Result<Self> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AtsScannerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-scanner")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let scoring = ScoringConfig::default();
        assert!((scoring.weight_sum() - 1.0).abs() < 1e-9);
        assert!(scoring.validate().is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let mut scoring = ScoringConfig::default();
        scoring.skills_weight = 0.5;
        assert!(scoring.validate().is_err());

        let mut negative = ScoringConfig::default();
        negative.ats_weight = -0.15;
        negative.skills_weight = 0.60;
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.output.format = OutputFormat::Markdown;
        config.enrichment.command = Some("enrich-cli".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_bad_weights() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.scoring.market_weight = 0.9;
        config.save_to(&path).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(AtsScannerError::Configuration(_))
        ));
    }

    #[test]
    fn test_load_rejects_large_list_cap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.scoring.max_list_items = 20;
        config.save_to(&path).unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(AtsScannerError::Configuration(_))
        ));

        let mut empty = ScoringConfig::default();
        empty.max_list_items = 0;
        assert!(empty.validate().is_err());
    }
}
