//! Integration tests for the ATS scanner

use ats_scanner::config::{Config, ScoringConfig};
use ats_scanner::error::EnrichmentError;
use ats_scanner::input::{InputManager, RawInput};
use ats_scanner::llm::{CommandProvider, EnrichmentProvider};
use ats_scanner::output::{ReportGenerator, Source};
use ats_scanner::processing::aggregate::combine;
use ats_scanner::processing::{ComponentScores, FileMeta, Industry, SkillVocabulary};
use ats_scanner::{AtsScanner, ScanOptions};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

struct RejectingProvider;

#[async_trait]
impl EnrichmentProvider for RejectingProvider {
    async fn generate_structured_analysis(&self, _prompt: &str) -> Result<Value, EnrichmentError> {
        Err(EnrichmentError::Provider("429 Too Many Requests".to_string()))
    }

    fn name(&self) -> &str {
        "rejecting"
    }
}

fn text_meta(name: &str) -> FileMeta {
    FileMeta {
        filename: name.to_string(),
        mime_type: "text/plain".to_string(),
    }
}

async fn fixture_input() -> RawInput {
    let mut manager = InputManager::new();
    manager
        .load_raw_input(
            Path::new("tests/fixtures/sample_resume.txt"),
            Path::new("tests/fixtures/job_description.txt"),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("React"));
    assert!(text.contains("- Built React and Node.js dashboards"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_and_missing_files() {
    let mut manager = InputManager::new();
    assert!(manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await.is_err());
    assert!(manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await.is_err());
}

#[tokio::test]
async fn test_load_raw_input_records_file_meta() {
    let input = fixture_input().await;
    assert_eq!(input.file_meta.filename, "sample_resume.txt");
    assert_eq!(input.file_meta.mime_type, "text/plain");
    assert!(input.job_description_text.contains("Kubernetes"));
}

#[tokio::test]
async fn test_end_to_end_heuristic_scan() {
    let input = fixture_input().await;
    let scanner = AtsScanner::from_config(&Config::default());
    let report = scanner.scan(&input, &ScanOptions::default()).await.unwrap();

    assert_eq!(report.industry, Industry::Technology);
    assert_eq!(report.job_title, "Senior Software Engineer");
    assert!(report.structural.file_type_ok);
    assert!(report.structural.contact.has_email);
    assert!(report.structural.contact.has_phone);
    assert!(report.structural.web_presence.linkedin);
    assert!(report.structural.web_presence.github);

    for skill in ["react", "node.js", "docker", "redis"] {
        assert!(report.skills.hard_found.contains(skill), "{} should be found", skill);
    }
    for skill in ["kubernetes", "typescript", "aws"] {
        assert!(report.skills.hard_missing.contains(skill), "{} should be missing", skill);
    }
    assert!(report.skills.hard_found.is_disjoint(&report.skills.hard_missing));

    let aggregate = &report.aggregate;
    assert!(aggregate.overall_score <= 100);
    assert!((5..=95).contains(&aggregate.percentile));
    assert!(aggregate.strengths.len() <= 5);
    assert!(aggregate.weaknesses.len() <= 5);
    assert!(aggregate.priority_fixes.len() <= 5);
    assert_eq!(aggregate.breakdown.len(), 5);
}

#[tokio::test]
async fn test_rejecting_provider_falls_back() {
    let input = fixture_input().await;
    let scanner = AtsScanner::new(Arc::new(RejectingProvider), ScoringConfig::default());
    let report = scanner.scan(&input, &ScanOptions::default()).await.unwrap();

    assert_eq!(report.provenance.fallback_count(), 4);
    assert_eq!(report.provenance.recruiter, Source::Heuristic);
    assert_eq!(report.provenance.predictions, Source::Heuristic);
    assert_eq!(report.metadata.enrichment_provider, "rejecting");

    let recruiter = &report.recruiter;
    assert!([0, 25, 50, 75, 100].contains(&recruiter.first6s_score));
    assert!(recruiter.authority_score <= 100);
    assert!(recruiter.narrative_score <= 100);

    let predictive = &report.predictive;
    let hire = predictive.hire_probability;
    assert!(hire.lower <= hire.point && hire.point <= hire.upper);
    assert!((5..=95).contains(&hire.point));
    assert!(predictive.salary.conservative <= predictive.salary.market);
    assert!(predictive.salary.market <= predictive.salary.aggressive);
    assert!((0.05..=0.95).contains(&predictive.automation_risk));
    assert!(predictive.x_factor <= 30);

    let heuristic = AtsScanner::heuristic_only(ScoringConfig::default())
        .scan(&input, &ScanOptions::default())
        .await
        .unwrap();
    assert_eq!(report.aggregate.overall_score, heuristic.aggregate.overall_score);
}

#[cfg(unix)]
#[tokio::test]
async fn test_command_provider_enriches_every_call() {
    let answer = r#"{"industry": "finance", "first_impression_score": 80, "authority_score": 70, "narrative_score": 60, "red_flags": ["gap in 2020"], "competition_level": 40, "demand_score": 90, "trending_skills": ["Rust"], "hire_probability": 66, "salary_conservative": 90000, "salary_market": 100000, "salary_aggressive": 115000, "automation_risk": 0.2, "x_factor": 12}"#;
    let provider = CommandProvider::new(
        "sh",
        vec!["-c".to_string(), format!("cat > /dev/null; echo '{}'", answer)],
        Duration::from_secs(10),
    );
    let scanner = AtsScanner::new(Arc::new(provider), ScoringConfig::default());
    let report = scanner.scan(&fixture_input().await, &ScanOptions::default()).await.unwrap();

    assert_eq!(report.provenance.fallback_count(), 0);
    assert_eq!(report.industry, Industry::Finance);
    assert_eq!(report.recruiter.first6s_score, 80);
    assert_eq!(report.recruiter.red_flags, vec!["gap in 2020".to_string()]);
    assert_eq!(report.market.trending_skills, vec!["rust".to_string()]);
    assert_eq!(report.predictive.hire_probability.point, 66);
    assert_eq!(report.metadata.enrichment_provider, "sh");
}

#[tokio::test]
async fn test_growth_marketer_scenario() {
    let mut resume = String::from("Alex Kim\nSenior Growth Marketing Manager\nPortland area\n\n");
    let filler = ["campaign", "launch", "content", "funnel", "audience"];
    for i in 0..242 {
        resume.push_str(filler[i % filler.len()]);
        resume.push(if i % 12 == 11 { '\n' } else { ' ' });
    }
    let job = "Growth Marketer\nOwn SEO, email marketing and A/B testing for our product launches.";
    let input = RawInput::new(resume, job, text_meta("alex_kim.txt")).unwrap();

    let options = ScanOptions {
        job_title: Some("Growth Marketer".to_string()),
        ..ScanOptions::default()
    };
    let report = AtsScanner::heuristic_only(ScoringConfig::default())
        .scan(&input, &options)
        .await
        .unwrap();

    let structural = &report.structural;
    assert!(!structural.contact.has_email);
    assert!(!structural.contact.has_phone);
    assert_eq!(structural.word_count, 250);
    assert_eq!(structural.word_count_status, ats_scanner::processing::structure::WordCountStatus::Under);
    assert!(!structural.job_title_match.exact);
    assert!(structural.job_title_match.similarity > 0.5);
    assert!(report
        .aggregate
        .priority_fixes
        .iter()
        .any(|fix| fix.action.to_lowercase().contains("email")));
}

#[tokio::test]
async fn test_missing_skills_lower_skill_score() {
    let job = "Data Engineer\nRequirements: SQL, Python and AWS experience for our pipelines.";
    let partial = "Pat Jones\nData Engineer\npat@example.com\nExperience with SQL reporting and dashboards for finance teams.";
    let complete = "Pat Jones\nData Engineer\npat@example.com\nExperience with SQL, Python and AWS pipelines for finance teams.";

    let scanner = AtsScanner::heuristic_only(ScoringConfig::default());
    let options = ScanOptions {
        industry: Some(Industry::Technology),
        ..ScanOptions::default()
    };

    let partial_report = scanner
        .scan(&RawInput::new(partial, job, text_meta("pat.txt")).unwrap(), &options)
        .await
        .unwrap();
    let complete_report = scanner
        .scan(&RawInput::new(complete, job, text_meta("pat.txt")).unwrap(), &options)
        .await
        .unwrap();

    let found: Vec<&str> = partial_report.skills.hard_found.iter().map(String::as_str).collect();
    let missing: Vec<&str> = partial_report.skills.hard_missing.iter().map(String::as_str).collect();
    assert_eq!(found, vec!["sql"]);
    assert_eq!(missing, vec!["aws", "python"]);

    let skill_score = |report: &ats_scanner::output::ScanReport| {
        report.aggregate.breakdown[&ats_scanner::processing::Component::Skills]
    };
    assert!(skill_score(&partial_report) < skill_score(&complete_report));
}

#[test]
fn test_uniform_component_extremes() {
    let weights = ScoringConfig::default();
    assert_eq!(combine(&ComponentScores::uniform(100), &weights), 100);
    assert_eq!(combine(&ComponentScores::uniform(0), &weights), 0);
}

#[tokio::test]
async fn test_custom_vocabulary_and_rendering() {
    let input = fixture_input().await;
    let vocabulary = SkillVocabulary::for_industry(Industry::Technology)
        .merge(vec!["GitHub Actions".to_string()], Vec::new());
    let options = ScanOptions {
        vocabulary: Some(vocabulary),
        ..ScanOptions::default()
    };
    let report = AtsScanner::heuristic_only(ScoringConfig::default())
        .scan(&input, &options)
        .await
        .unwrap();
    // Only required skills are reported, and the job never names GitHub Actions
    assert!(!report.skills.hard_found.contains("github actions"));

    let generator = ReportGenerator::with_options(false, true, false, true);
    let json = generator
        .generate_report(&report, &ats_scanner::config::OutputFormat::Json)
        .unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["industry"], "technology");
    assert_eq!(value["structural"]["word_count_status"], "under");
}
