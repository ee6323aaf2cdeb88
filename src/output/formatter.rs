//! Output formatters for scan reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{ScanReport, Source};
use crate::processing::aggregate::Component;
use crate::processing::structure::WordCountStatus;
use colored::{Color, Colorize};
use std::collections::BTreeSet;
use std::path::Path;

/// Trait for formatting scan reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and section headers
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_check(&self, ok: bool) -> String {
        if ok {
            self.colorize("✓", Color::Green)
        } else {
            self.colorize("✗", Color::Red)
        }
    }

    fn format_source(&self, source: Source) -> String {
        let color = match source {
            Source::Enrichment => Color::Cyan,
            Source::Heuristic => Color::BrightBlack,
            Source::Provided => Color::White,
        };
        self.colorize(&format!("({})", source), color)
    }

    fn format_details(&self, report: &ScanReport, output: &mut String) {
        let structural = &report.structural;

        output.push_str(&self.format_header("ATS Checks", 2));
        let checks = [
            ("Parseable file type", structural.file_type_ok),
            ("Professional file name", structural.file_name_ok),
            ("Email address", structural.contact.has_email),
            ("Phone number", structural.contact.has_phone),
            ("Location", structural.contact.has_location),
            ("Experience section", structural.sections.has_experience),
            ("Education section", structural.sections.has_education),
            ("Skills section", structural.sections.has_skills),
            ("Summary section", structural.sections.has_summary),
            ("Consistent dates", structural.dates_valid),
            ("LinkedIn profile", structural.web_presence.linkedin),
            ("GitHub profile", structural.web_presence.github),
            ("Portfolio site", structural.web_presence.portfolio),
        ];
        for (label, ok) in checks {
            output.push_str(&format!("  {} {}\n", self.format_check(ok), label));
        }
        output.push_str(&format!(
            "  Word count: {} ({})\n",
            structural.word_count,
            word_count_label(structural.word_count_status)
        ));
        output.push_str(&format!(
            "  Job title match: {} (similarity {:.2})\n",
            if structural.job_title_match.exact { "exact" } else { "partial" },
            structural.job_title_match.similarity
        ));

        output.push_str(&self.format_header("Recruiter Signals", 2));
        output.push_str(&format!(
            "First impression: {} | Authority: {} | Narrative: {} {}\n",
            report.recruiter.first6s_score,
            report.recruiter.authority_score,
            report.recruiter.narrative_score,
            self.format_source(report.provenance.recruiter)
        ));
        for flag in &report.recruiter.red_flags {
            output.push_str(&format!("  ⚑ {}\n", self.colorize(flag, Color::Red)));
        }

        output.push_str(&self.format_header("Market & Predictions", 2));
        output.push_str(&format!(
            "Competition: {} | Demand: {} {}\n",
            report.market.competition_level,
            report.market.demand_score,
            self.format_source(report.provenance.market)
        ));
        if !report.market.trending_skills.is_empty() {
            output.push_str(&format!("Trending skills: {}\n", report.market.trending_skills.join(", ")));
        }
        let predictive = &report.predictive;
        output.push_str(&format!(
            "Hire probability: {}% ({}-{}%) {}\n",
            predictive.hire_probability.point,
            predictive.hire_probability.lower,
            predictive.hire_probability.upper,
            self.format_source(report.provenance.predictions)
        ));
        output.push_str(&format!(
            "Salary: ${:.0} / ${:.0} / ${:.0} (conservative / market / aggressive)\n",
            predictive.salary.conservative, predictive.salary.market, predictive.salary.aggressive
        ));
        output.push_str(&format!(
            "Automation risk: {:.0}% | X-factor: {}/30\n",
            predictive.automation_risk * 100.0,
            predictive.x_factor
        ));
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        let mut output = String::new();
        let aggregate = &report.aggregate;

        output.push_str(&self.format_header("ATS SCAN REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));
        let title = if report.job_title.is_empty() { "n/a" } else { report.job_title.as_str() };
        output.push_str(&format!(
            "Job title: {} | Industry: {} {}\n",
            title,
            report.industry,
            self.format_source(report.provenance.industry)
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Overall Score: {}% {}\n",
            aggregate.overall_score,
            self.format_score_badge(aggregate.overall_score)
        ));
        output.push_str(&format!("Percentile: {}\n", aggregate.percentile));
        output.push_str(&format!("Verdict: {}\n", self.colorize(report.verdict(), Color::Cyan)));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for component in Component::ALL {
            if let Some(score) = aggregate.breakdown.get(&component) {
                output.push_str(&format!(
                    "  {:<20} {:>3}% {}\n",
                    component.label(),
                    score,
                    self.format_score_badge(*score)
                ));
            }
        }

        if !aggregate.strengths.is_empty() {
            output.push_str(&self.format_header("Strengths", 3));
            for strength in &aggregate.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        if !aggregate.weaknesses.is_empty() {
            output.push_str(&self.format_header("Weaknesses", 3));
            for weakness in &aggregate.weaknesses {
                output.push_str(&format!("  • {}\n", self.colorize(weakness, Color::Yellow)));
            }
        }

        output.push_str(&self.format_header("Skills", 2));
        output.push_str(&format!(
            "Found: {}\n",
            self.colorize(&join_or_none(&report.skills.hard_found), Color::Green)
        ));
        let missing = report.skills.missing_by_impact();
        let missing = if missing.is_empty() { "none".to_string() } else { missing.join(", ") };
        output.push_str(&format!("Missing: {}\n", self.colorize(&missing, Color::Red)));
        if self.detailed {
            output.push_str(&format!("Soft skills found: {}\n", join_or_none(&report.skills.soft_found)));
            output.push_str(&format!("Soft skills missing: {}\n", join_or_none(&report.skills.soft_missing)));
            output.push_str(&format!("Critical: {}\n", join_or_none(&report.skills.critical)));
        }

        if !aggregate.priority_fixes.is_empty() {
            output.push_str(&self.format_header("Priority Fixes", 2));
            for (i, fix) in aggregate.priority_fixes.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {} {}\n",
                    i + 1,
                    fix.action,
                    self.colorize(&format!("[{} · priority {}]", fix.component.label(), fix.priority), Color::BrightBlack)
                ));
            }
        }

        if self.detailed {
            self.format_details(report, &mut output);
        }

        output.push_str(&format!(
            "\n{} Generated by ATS Scanner v{} | Enrichment: {}\n",
            self.colorize("ℹ", Color::Blue),
            report.metadata.scanner_version,
            report.metadata.enrichment_provider
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: u8) -> &'static str {
        match score {
            90..=100 => "🟢 Excellent",
            80..=89 => "🟡 Very Good",
            70..=79 => "🟠 Good",
            60..=69 => "🔴 Fair",
            50..=59 => "🔴 Below Average",
            _ => "🔴 Poor",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        let mut output = String::new();
        let aggregate = &report.aggregate;

        output.push_str("# ATS Scan Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Enrichment:** {}\n\n",
                report.metadata.resume_file, report.metadata.enrichment_provider
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Overall Score:** {}% {}\n\n",
            aggregate.overall_score,
            Self::markdown_score_badge(aggregate.overall_score)
        ));
        output.push_str(&format!("**Percentile:** {}\n\n", aggregate.percentile));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict()));
        output.push_str(&format!(
            "**Industry:** {} ({})\n\n",
            report.industry, report.provenance.industry
        ));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        for component in Component::ALL {
            if let Some(score) = aggregate.breakdown.get(&component) {
                output.push_str(&format!("| {} | {}% |\n", component.label(), score));
            }
        }
        output.push('\n');

        if !aggregate.strengths.is_empty() {
            output.push_str("## Strengths\n\n");
            for strength in &aggregate.strengths {
                output.push_str(&format!("- {}\n", strength));
            }
            output.push('\n');
        }

        if !aggregate.weaknesses.is_empty() {
            output.push_str("## Weaknesses\n\n");
            for weakness in &aggregate.weaknesses {
                output.push_str(&format!("- {}\n", weakness));
            }
            output.push('\n');
        }

        output.push_str("## Skills\n\n");
        output.push_str(&format!("**Found:** {}\n\n", join_or_none(&report.skills.hard_found)));
        let missing = report.skills.missing_by_impact();
        let missing = if missing.is_empty() { "none".to_string() } else { missing.join(", ") };
        output.push_str(&format!("**Missing:** {}\n\n", missing));

        if !aggregate.priority_fixes.is_empty() {
            output.push_str("## Priority Fixes\n\n");
            for (i, fix) in aggregate.priority_fixes.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {} *({}, priority {})*\n",
                    i + 1,
                    fix.action,
                    fix.component.label(),
                    fix.priority
                ));
            }
            output.push('\n');
        }

        if !report.recruiter.red_flags.is_empty() {
            output.push_str("## Red Flags\n\n");
            for flag in &report.recruiter.red_flags {
                output.push_str(&format!("- ⚑ {}\n", flag));
            }
            output.push('\n');
        }

        output.push_str("## Outlook\n\n");
        let predictive = &report.predictive;
        output.push_str(&format!(
            "- Hire probability: {}% ({}-{}%)\n",
            predictive.hire_probability.point,
            predictive.hire_probability.lower,
            predictive.hire_probability.upper
        ));
        output.push_str(&format!(
            "- Salary band: ${:.0} / ${:.0} / ${:.0}\n",
            predictive.salary.conservative, predictive.salary.market, predictive.salary.aggressive
        ));
        output.push_str(&format!("- Automation risk: {:.0}%\n", predictive.automation_risk * 100.0));
        output.push_str(&format!(
            "- Market demand: {} (competition {})\n",
            report.market.demand_score, report.market.competition_level
        ));

        output.push_str(&format!(
            "\n---\n*Generated by ATS Scanner v{}*\n",
            report.metadata.scanner_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &ScanReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn join_or_none(items: &BTreeSet<String>) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

fn word_count_label(status: WordCountStatus) -> &'static str {
    match status {
        WordCountStatus::Under => "too short",
        WordCountStatus::Optimal => "optimal",
        WordCountStatus::Over => "too long",
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };
    format!("{}_scan{}.{}", base_name, timestamp_suffix, extension)
}
