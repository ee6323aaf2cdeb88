//! Structural extraction of contact info, sections, dates and title match

use crate::processing::matcher::contains_term;
use crate::processing::similarity::{round2, similarity};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const WORD_COUNT_MIN: usize = 400;
pub const WORD_COUNT_MAX: usize = 1200;
const MAX_TITLE_CANDIDATES: usize = 10;
const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

/// Words that mark a line as a section header, never a job title
pub const SECTION_HEADER_WORDS: &[&str] = &[
    "experience", "education", "skills", "summary", "profile", "objective",
    "projects", "certifications", "contact", "references", "employment",
    "work history", "languages", "interests",
];

const EXPERIENCE_ALIASES: &[&str] = &[
    "experience", "work experience", "employment", "professional experience", "work history",
];
const EDUCATION_ALIASES: &[&str] = &[
    "education", "academic background", "degree", "university", "college",
];
const SKILLS_ALIASES: &[&str] = &[
    "skills", "technical skills", "core competencies", "expertise", "proficiencies",
];
const SUMMARY_ALIASES: &[&str] = &[
    "summary", "professional summary", "profile", "objective", "about me",
];

const US_STATES: &[&str] = &[
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa",
    "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan",
    "Minnesota", "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada",
    "New Hampshire", "New Jersey", "New Mexico", "New York", "North Carolina",
    "North Dakota", "Ohio", "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island",
    "South Carolina", "South Dakota", "Tennessee", "Texas", "Utah", "Vermont", "Virginia",
    "Washington", "West Virginia", "Wisconsin", "Wyoming",
];

/// Domains that never count as a personal portfolio
const NON_PORTFOLIO_DOMAINS: &[&str] = &["gmail", "yahoo", "outlook", "linkedin"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMeta {
    pub filename: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralProfile {
    pub file_type_ok: bool,
    pub file_name_ok: bool,
    pub contact: ContactInfo,
    pub sections: SectionFlags,
    pub dates_valid: bool,
    pub word_count: usize,
    pub word_count_status: WordCountStatus,
    pub job_title_match: JobTitleMatch,
    pub web_presence: WebPresence,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub has_email: bool,
    pub has_phone: bool,
    pub has_location: bool,
    pub links: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionFlags {
    pub has_experience: bool,
    pub has_education: bool,
    pub has_skills: bool,
    pub has_summary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebPresence {
    pub linkedin: bool,
    pub github: bool,
    pub portfolio: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordCountStatus {
    Under,
    Optimal,
    Over,
}

impl WordCountStatus {
    pub fn from_count(words: usize) -> Self {
        if words < WORD_COUNT_MIN {
            WordCountStatus::Under
        } else if words > WORD_COUNT_MAX {
            WordCountStatus::Over
        } else {
            WordCountStatus::Optimal
        }
    }
}

/// `exact` implies `similarity == 1.0`; similarity is always in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JobTitleMatch {
    pub exact: bool,
    pub similarity: f64,
}

/// Regex-based extractor; build once and reuse across scans
pub struct StructuralExtractor {
    email_regex: Regex,
    phone_regex: Regex,
    city_state_regex: Regex,
    zip_regex: Regex,
    remote_regex: Regex,
    year_regex: Regex,
    month_year_regex: Regex,
    linkedin_url_regex: Regex,
    linkedin_mention_regex: Regex,
    github_regex: Regex,
    url_regex: Regex,
    domain_regex: Regex,
    file_name_regex: Regex,
}

impl Default for StructuralExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralExtractor {
    pub fn new() -> Self {
        let states = US_STATES.join("|");

        Self {
            email_regex: Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
                .expect("Invalid email regex"),
            phone_regex: Regex::new(r"\+?[0-9(][0-9 ().\-]{8,}[0-9]")
                .expect("Invalid phone regex"),
            city_state_regex: Regex::new(&format!(
                r"\b[A-Z][a-zA-Z]+(?:[ .][A-Z][a-zA-Z]+)*,\s*(?:[A-Z]{{2}}|{})\b",
                states
            ))
            .expect("Invalid location regex"),
            zip_regex: Regex::new(r"\b[0-9]{5}(?:-[0-9]{4})?\b").expect("Invalid zip regex"),
            remote_regex: Regex::new(r"(?i)\bremote\b").expect("Invalid remote regex"),
            year_regex: Regex::new(r"\b(?:19|20)[0-9]{2}\b").expect("Invalid year regex"),
            month_year_regex: Regex::new(
                concat!(
                    r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?",
                    r"|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)",
                    r"\.?\s+[0-9]{4}\b",
                ),
            )
            .expect("Invalid month-year regex"),
            linkedin_url_regex: Regex::new(r"(?i)linkedin\.com/in/[\w\-]+")
                .expect("Invalid LinkedIn regex"),
            linkedin_mention_regex: Regex::new(r"(?i)\blinkedin\b")
                .expect("Invalid LinkedIn mention regex"),
            github_regex: Regex::new(r"(?i)github\.com/[\w\-]+").expect("Invalid GitHub regex"),
            url_regex: Regex::new(r"(?i)\bhttps?://[^\s,;)]+").expect("Invalid URL regex"),
            domain_regex: Regex::new(
                r"(?i)\b[a-z0-9][a-z0-9\-]*\.(?:com|io|dev|me|net|org|co|app|design|site|portfolio)\b(?:/[^\s,;)]*)?",
            )
            .expect("Invalid domain regex"),
            file_name_regex: Regex::new(r"^[\w\-.]*$").expect("Invalid file name regex"),
        }
    }

    /// Extract the structural profile of a resume
    pub fn extract(&self, resume_text: &str, job_title: &str, file_meta: &FileMeta) -> StructuralProfile {
        let lower = resume_text.to_lowercase();
        let word_count = resume_text.split_whitespace().count();
        let (contact, web_presence) = self.extract_contact(resume_text);

        StructuralProfile {
            file_type_ok: Self::is_supported_mime(&file_meta.mime_type),
            file_name_ok: self.file_name_regex.is_match(&file_meta.filename),
            contact,
            sections: Self::detect_sections(&lower),
            dates_valid: self.has_valid_dates(resume_text),
            word_count,
            word_count_status: WordCountStatus::from_count(word_count),
            job_title_match: self.match_job_title(resume_text, job_title),
            web_presence,
        }
    }

    pub fn has_email(&self, text: &str) -> bool {
        self.email_regex.is_match(text)
    }

    /// Phone numbers tolerate separators and a country code but need 10+ digits
    pub fn has_phone(&self, text: &str) -> bool {
        self.phone_regex
            .find_iter(text)
            .any(|m| has_phone_sized_run(m.as_str()))
    }

    pub fn has_location(&self, text: &str) -> bool {
        self.city_state_regex.is_match(text)
            || self.zip_regex.is_match(text)
            || self.remote_regex.is_match(text)
    }

    pub fn has_valid_dates(&self, text: &str) -> bool {
        self.year_regex.is_match(text) || self.month_year_regex.is_match(text)
    }

    pub fn has_year(&self, text: &str) -> bool {
        self.year_regex.is_match(text)
    }

    /// Every 4-digit year in `[1900, 2099]` mentioned in the text, in order
    pub fn years(&self, text: &str) -> Vec<i32> {
        self.year_regex
            .find_iter(text)
            .filter_map(|m| m.as_str().parse().ok())
            .collect()
    }

    fn extract_contact(&self, text: &str) -> (ContactInfo, WebPresence) {
        let mut links = BTreeSet::new();
        let mut presence = WebPresence::default();

        for m in self.linkedin_url_regex.find_iter(text) {
            links.insert(m.as_str().to_lowercase());
            presence.linkedin = true;
        }
        if self.linkedin_mention_regex.is_match(text) {
            presence.linkedin = true;
        }

        for m in self.github_regex.find_iter(text) {
            links.insert(m.as_str().to_lowercase());
            presence.github = true;
        }

        for m in self.url_regex.find_iter(text) {
            let url = m.as_str().trim_end_matches('.').to_lowercase();
            if !Self::is_excluded_domain(&url) {
                presence.portfolio = true;
                links.insert(url);
            }
        }

        for m in self.domain_regex.find_iter(text) {
            // Skip the domain half of an email address and the tail of a URL
            let preceding = text[..m.start()].chars().next_back();
            if matches!(preceding, Some('@') | Some('/') | Some('.')) {
                continue;
            }
            let domain = m.as_str().trim_end_matches('.').to_lowercase();
            if !Self::is_excluded_domain(&domain) {
                presence.portfolio = true;
                links.insert(domain);
            }
        }

        let contact = ContactInfo {
            has_email: self.has_email(text),
            has_phone: self.has_phone(text),
            has_location: self.has_location(text),
            links,
        };
        (contact, presence)
    }

    fn is_excluded_domain(link: &str) -> bool {
        NON_PORTFOLIO_DOMAINS.iter().any(|d| link.contains(d))
    }

    /// Loose keyword detection: an alias anywhere in the text counts
    pub fn detect_sections(lower_text: &str) -> SectionFlags {
        let any = |aliases: &[&str]| aliases.iter().any(|a| lower_text.contains(a));
        SectionFlags {
            has_experience: any(EXPERIENCE_ALIASES),
            has_education: any(EDUCATION_ALIASES),
            has_skills: any(SKILLS_ALIASES),
            has_summary: any(SUMMARY_ALIASES),
        }
    }

    fn is_supported_mime(mime_type: &str) -> bool {
        let mime = mime_type.to_lowercase();
        mime.contains("pdf")
            || mime.contains("msword")
            || mime.contains("word")
            || mime.contains("officedocument")
            || mime.starts_with("text/plain")
    }

    pub fn match_job_title(&self, resume_text: &str, job_title: &str) -> JobTitleMatch {
        let title = job_title.trim().to_lowercase();
        if title.is_empty() {
            return JobTitleMatch { exact: false, similarity: 0.0 };
        }

        if contains_term(resume_text, &title) {
            return JobTitleMatch { exact: true, similarity: 1.0 };
        }

        let best = title_like_lines(resume_text)
            .into_iter()
            .map(|line| similarity(&title, &line.to_lowercase()))
            .fold(0.0_f64, f64::max);

        JobTitleMatch {
            exact: false,
            similarity: round2(best).clamp(0.0, 1.0),
        }
    }
}

/// A greedy match can run a number into neighbouring figures such as years,
/// so any run of consecutive space-separated tokens may carry the phone
fn has_phone_sized_run(span: &str) -> bool {
    let digits: Vec<usize> = span
        .split_whitespace()
        .map(|token| token.chars().filter(char::is_ascii_digit).count())
        .collect();

    (0..digits.len()).any(|start| {
        let mut total = 0;
        digits[start..].iter().any(|count| {
            total += count;
            (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&total)
        })
    })
}

/// Up to ten lines that could be job titles: 3-100 characters and not
/// starting with a section header word
pub fn title_like_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| {
            let len = line.chars().count();
            (3..=100).contains(&len)
        })
        .filter(|line| {
            let lower = line.to_lowercase();
            !SECTION_HEADER_WORDS.iter().any(|h| lower.starts_with(h))
        })
        .take(MAX_TITLE_CANDIDATES)
        .collect()
}
