//! ATS scanner: deterministic resume and job description scoring

use ats_scanner::cli::{self, Cli, Commands, ConfigAction};
use ats_scanner::config::Config;
use ats_scanner::error::{AtsScannerError, Result};
use ats_scanner::input::InputManager;
use ats_scanner::output::{save_report_to_file, ReportGenerator};
use ats_scanner::processing::{detect_industry, SkillVocabulary};
use ats_scanner::scanner::{AtsScanner, ScanOptions};
use clap::Parser;
use log::{error, info};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Scan {
            resume,
            job,
            title,
            industry,
            skills,
            output,
            save,
            detailed,
            no_enrich,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md", "doc", "docx"])
                .map_err(|e| AtsScannerError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| AtsScannerError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(AtsScannerError::InvalidInput)?,
                None => config.output.format,
            };

            info!("Scanning {} against {}", resume.display(), job.display());
            let mut input_manager = InputManager::new();
            let input = input_manager.load_raw_input(&resume, &job).await?;

            let scanner = if no_enrich {
                AtsScanner::heuristic_only(config.scoring.clone())
            } else {
                AtsScanner::from_config(&config)
            };

            // Extra skills extend an industry vocabulary, so they pin the industry
            let (industry, vocabulary) = match (industry, skills.is_empty()) {
                (industry, true) => (industry, None),
                (Some(industry), false) => (Some(industry), Some(SkillVocabulary::for_industry(industry).merge(skills, Vec::new()))),
                (None, false) => {
                    let detected = detect_industry(&input.job_description_text, &input.resume_text)?;
                    (Some(detected), Some(SkillVocabulary::for_industry(detected).merge(skills, Vec::new())))
                }
            };

            let options = ScanOptions {
                job_title: title,
                industry,
                vocabulary,
                ..ScanOptions::default()
            };
            let report = scanner.scan(&input, &options).await?;

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Vocab { industry } => {
            let profile = industry.profile();
            let vocabulary = SkillVocabulary::for_industry(industry);
            println!("📚 {} vocabulary ({} terms)\n", industry, vocabulary.len());
            println!("Hard skills: {}", vocabulary.hard.join(", "));
            println!("Soft skills: {}", vocabulary.soft.join(", "));
            println!("Trending: {}", profile.modern_skills.join(", "));
            println!(
                "\nBase salary: ${:.0} | Automation risk: {:.0}% | Competition: {}",
                profile.base_salary,
                profile.automation_risk * 100.0,
                profile.competition_level
            );
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config file: {}", Config::config_path().display());
                println!("\nScoring Weights:");
                println!("  ATS: {:.1}%", config.scoring.ats_weight * 100.0);
                println!("  Skills: {:.1}%", config.scoring.skills_weight * 100.0);
                println!("  Recruiter: {:.1}%", config.scoring.recruiter_weight * 100.0);
                println!("  Market: {:.1}%", config.scoring.market_weight * 100.0);
                println!("  Predictions: {:.1}%", config.scoring.predictions_weight * 100.0);
                println!("\nEnrichment:");
                if config.enrichment.enabled {
                    match &config.enrichment.command {
                        Some(command) => println!("  Command: {} {}", command, config.enrichment.args.join(" ")),
                        None => println!("  Enabled, but no command configured"),
                    }
                    println!("  Timeout: {}s", config.enrichment.timeout_secs);
                } else {
                    println!("  Disabled (heuristics only)");
                }
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::reset()?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => println!("{}", Config::config_path().display()),
        },
    }

    Ok(())
}
