//! Industry tables and skill vocabularies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strsim::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a free-form label to map onto an industry
const LABEL_MATCH_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Technology,
    Finance,
    Healthcare,
    Marketing,
    Sales,
    Education,
    Engineering,
    Design,
    Operations,
    General,
}

/// Static per-industry constants
#[derive(Debug, Clone, Copy)]
pub struct IndustryProfile {
    pub base_salary: f64,
    pub automation_risk: f64,
    pub competition_level: u8,
    pub hard_skills: &'static [&'static str],
    pub soft_skills: &'static [&'static str],
    pub modern_skills: &'static [&'static str],
}

const COMMON_SOFT_SKILLS: &[&str] = &[
    "communication",
    "leadership",
    "teamwork",
    "collaboration",
    "problem solving",
    "critical thinking",
    "adaptability",
    "time management",
    "mentoring",
    "negotiation",
    "presentation",
    "attention to detail",
    "stakeholder management",
];

const TECHNOLOGY: IndustryProfile = IndustryProfile {
    base_salary: 120_000.0,
    automation_risk: 0.25,
    competition_level: 75,
    hard_skills: &[
        "python", "java", "javascript", "typescript", "rust", "go", "c++", "c#", "sql",
        "react", "node.js", "aws", "azure", "gcp", "docker", "kubernetes", "terraform",
        "linux", "git", "rest", "graphql", "microservices", "postgresql", "mongodb",
        "redis", "kafka", "machine learning", "ci/cd",
    ],
    soft_skills: COMMON_SOFT_SKILLS,
    modern_skills: &[
        "kubernetes", "terraform", "rust", "machine learning", "generative ai", "llm",
        "react", "graphql", "serverless", "aws",
    ],
};

const FINANCE: IndustryProfile = IndustryProfile {
    base_salary: 95_000.0,
    automation_risk: 0.45,
    competition_level: 70,
    hard_skills: &[
        "financial modeling", "excel", "sql", "python", "valuation", "forecasting",
        "budgeting", "accounting", "gaap", "ifrs", "risk management", "audit",
        "bloomberg", "tableau", "power bi", "cfa", "cpa", "reconciliation",
    ],
    soft_skills: COMMON_SOFT_SKILLS,
    modern_skills: &["python", "power bi", "tableau", "machine learning", "blockchain", "sql"],
};

const HEALTHCARE: IndustryProfile = IndustryProfile {
    base_salary: 85_000.0,
    automation_risk: 0.20,
    competition_level: 55,
    hard_skills: &[
        "patient care", "emr", "epic", "hipaa", "clinical research", "triage",
        "medical coding", "icd-10", "pharmacology", "bls", "acls", "care coordination",
        "healthcare administration",
    ],
    soft_skills: COMMON_SOFT_SKILLS,
    modern_skills: &["telehealth", "epic", "health informatics", "data analysis"],
};

const MARKETING: IndustryProfile = IndustryProfile {
    base_salary: 80_000.0,
    automation_risk: 0.35,
    competition_level: 70,
    hard_skills: &[
        "seo", "sem", "google analytics", "content marketing", "email marketing",
        "social media", "ppc", "hubspot", "salesforce", "copywriting", "a/b testing",
        "marketing automation", "brand strategy", "growth marketing", "crm",
    ],
    soft_skills: COMMON_SOFT_SKILLS,
    modern_skills: &[
        "marketing automation", "a/b testing", "growth marketing", "generative ai",
        "google analytics", "hubspot",
    ],
};

const SALES: IndustryProfile = IndustryProfile {
    base_salary: 75_000.0,
    automation_risk: 0.40,
    competition_level: 60,
    hard_skills: &[
        "salesforce", "crm", "lead generation", "cold calling", "account management",
        "pipeline management", "forecasting", "b2b", "saas", "hubspot",
        "business development", "closing",
    ],
    soft_skills: COMMON_SOFT_SKILLS,
    modern_skills: &["salesforce", "saas", "sales enablement", "hubspot"],
};

const EDUCATION: IndustryProfile = IndustryProfile {
    base_salary: 60_000.0,
    automation_risk: 0.15,
    competition_level: 50,
    hard_skills: &[
        "curriculum development", "lesson planning", "classroom management",
        "instructional design", "assessment", "lms", "special education",
        "e-learning", "tutoring",
    ],
    soft_skills: COMMON_SOFT_SKILLS,
    modern_skills: &["e-learning", "instructional design", "lms", "edtech"],
};

const ENGINEERING: IndustryProfile = IndustryProfile {
    base_salary: 95_000.0,
    automation_risk: 0.30,
    competition_level: 60,
    hard_skills: &[
        "autocad", "solidworks", "matlab", "cad", "six sigma", "lean manufacturing",
        "plc", "fea", "quality control", "project management", "iso 9001",
        "root cause analysis",
    ],
    soft_skills: COMMON_SOFT_SKILLS,
    modern_skills: &["matlab", "python", "iot", "robotics", "additive manufacturing"],
};

const DESIGN: IndustryProfile = IndustryProfile {
    base_salary: 85_000.0,
    automation_risk: 0.35,
    competition_level: 72,
    hard_skills: &[
        "figma", "sketch", "adobe creative suite", "photoshop", "illustrator",
        "user research", "wireframing", "prototyping", "ux", "ui", "design systems",
        "typography", "usability testing",
    ],
    soft_skills: COMMON_SOFT_SKILLS,
    modern_skills: &["figma", "design systems", "prototyping", "motion design"],
};

const OPERATIONS: IndustryProfile = IndustryProfile {
    base_salary: 70_000.0,
    automation_risk: 0.50,
    competition_level: 55,
    hard_skills: &[
        "supply chain", "logistics", "inventory management", "procurement", "erp",
        "sap", "vendor management", "process improvement", "lean", "six sigma",
        "excel", "scheduling",
    ],
    soft_skills: COMMON_SOFT_SKILLS,
    modern_skills: &["erp", "process automation", "data analysis", "sap"],
};

const GENERAL: IndustryProfile = IndustryProfile {
    base_salary: 65_000.0,
    automation_risk: 0.40,
    competition_level: 60,
    hard_skills: &[
        "excel", "microsoft office", "sql", "project management", "data analysis",
        "customer service", "reporting", "crm", "budgeting",
    ],
    soft_skills: COMMON_SOFT_SKILLS,
    modern_skills: &["data analysis", "automation", "sql"],
};

impl Industry {
    pub const ALL: [Industry; 10] = [
        Industry::Technology,
        Industry::Finance,
        Industry::Healthcare,
        Industry::Marketing,
        Industry::Sales,
        Industry::Education,
        Industry::Engineering,
        Industry::Design,
        Industry::Operations,
        Industry::General,
    ];

    pub fn profile(&self) -> &'static IndustryProfile {
        match self {
            Industry::Technology => &TECHNOLOGY,
            Industry::Finance => &FINANCE,
            Industry::Healthcare => &HEALTHCARE,
            Industry::Marketing => &MARKETING,
            Industry::Sales => &SALES,
            Industry::Education => &EDUCATION,
            Industry::Engineering => &ENGINEERING,
            Industry::Design => &DESIGN,
            Industry::Operations => &OPERATIONS,
            Industry::General => &GENERAL,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Industry::Technology => "technology",
            Industry::Finance => "finance",
            Industry::Healthcare => "healthcare",
            Industry::Marketing => "marketing",
            Industry::Sales => "sales",
            Industry::Education => "education",
            Industry::Engineering => "engineering",
            Industry::Design => "design",
            Industry::Operations => "operations",
            Industry::General => "general",
        }
    }

    /// Map a free-form label ("Tech", "fintech", "Software") onto an industry
    pub fn from_label(label: &str) -> Option<Industry> {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            return None;
        }

        let alias = match label.as_str() {
            "tech" | "software" | "it" | "saas" => Some(Industry::Technology),
            "fintech" | "banking" | "accounting" => Some(Industry::Finance),
            "medical" | "health" | "nursing" => Some(Industry::Healthcare),
            "advertising" | "growth" => Some(Industry::Marketing),
            "retail" | "business development" => Some(Industry::Sales),
            "teaching" | "edtech" => Some(Industry::Education),
            "manufacturing" | "mechanical" => Some(Industry::Engineering),
            "ux" | "ui" | "creative" => Some(Industry::Design),
            "logistics" | "supply chain" => Some(Industry::Operations),
            _ => None,
        };
        if alias.is_some() {
            return alias;
        }

        Industry::ALL
            .iter()
            .map(|industry| (*industry, jaro_winkler(&label, industry.name())))
            .filter(|(_, score)| *score >= LABEL_MATCH_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(industry, _)| industry)
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Industry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Industry::from_label(s).ok_or_else(|| format!("Unknown industry: {}", s))
    }
}

/// Controlled skill vocabulary matched against job and resume text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillVocabulary {
    pub hard: Vec<String>,
    pub soft: Vec<String>,
}

impl SkillVocabulary {
    pub fn new(hard: Vec<String>, soft: Vec<String>) -> Self {
        let mut vocabulary = Self { hard, soft };
        vocabulary.normalize();
        vocabulary
    }

    pub fn for_industry(industry: Industry) -> Self {
        let profile = industry.profile();
        Self::new(
            profile.hard_skills.iter().map(|s| s.to_string()).collect(),
            profile.soft_skills.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Add extra terms supplied by the caller
    pub fn merge(mut self, hard: Vec<String>, soft: Vec<String>) -> Self {
        self.hard.extend(hard);
        self.soft.extend(soft);
        self.normalize();
        self
    }

    fn normalize(&mut self) {
        for list in [&mut self.hard, &mut self.soft] {
            for term in list.iter_mut() {
                *term = term.trim().to_lowercase();
            }
            list.retain(|t| !t.is_empty());
            list.sort();
            list.dedup();
        }
        // A term is hard or soft, never both
        let hard = self.hard.clone();
        self.soft.retain(|t| !hard.contains(t));
    }

    pub fn len(&self) -> usize {
        self.hard.len() + self.soft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_in_range() {
        for industry in Industry::ALL {
            let profile = industry.profile();
            assert!(profile.base_salary > 0.0);
            assert!((0.05..=0.95).contains(&profile.automation_risk));
            assert!(profile.competition_level <= 100);
            assert!(!profile.hard_skills.is_empty());
        }
    }

    #[test]
    fn test_from_label() {
        assert_eq!(Industry::from_label("Technology"), Some(Industry::Technology));
        assert_eq!(Industry::from_label("tech"), Some(Industry::Technology));
        assert_eq!(Industry::from_label("  Marketing "), Some(Industry::Marketing));
        assert_eq!(Industry::from_label("healthcre"), Some(Industry::Healthcare));
        assert_eq!(Industry::from_label("zzz"), None);
        assert_eq!(Industry::from_label(""), None);
    }

    #[test]
    fn test_vocabulary_normalization() {
        let vocab = SkillVocabulary::new(
            vec!["SQL".to_string(), "sql".to_string(), " Python ".to_string()],
            vec!["Leadership".to_string(), "sql".to_string()],
        );
        assert_eq!(vocab.hard, vec!["python".to_string(), "sql".to_string()]);
        assert_eq!(vocab.soft, vec!["leadership".to_string()]);
    }

    #[test]
    fn test_vocabulary_merge() {
        let vocab = SkillVocabulary::for_industry(Industry::Sales)
            .merge(vec!["Gong".to_string()], vec![]);
        assert!(vocab.hard.contains(&"gong".to_string()));
        assert!(vocab.hard.contains(&"salesforce".to_string()));
    }
}
