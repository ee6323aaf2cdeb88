//! Case-insensitive whole-term matching over a fixed vocabulary

use crate::error::{AtsScannerError, Result};
use aho_corasick::{AhoCorasick, MatchKind};

/// Aho-Corasick matcher that only reports hits bounded by non-alphanumeric
/// characters, so "go" never matches inside "good" and "sql" never inside
/// "postgresql".
#[derive(Debug, Clone)]
pub struct TermMatcher {
    automaton: AhoCorasick,
    terms: Vec<String>,
}

impl TermMatcher {
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        // Standard match kind is required for overlapping search
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&terms)
            .map_err(|e| AtsScannerError::Processing(format!("Failed to build term matcher: {}", e)))?;

        Ok(Self { automaton, terms })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Occurrence count per term, indexed like `terms()`
    pub fn counts(&self, text: &str) -> Vec<usize> {
        let mut counts = vec![0; self.terms.len()];
        for mat in self.automaton.find_overlapping_iter(text) {
            if is_bounded(text, mat.start(), mat.end()) {
                counts[mat.pattern().as_usize()] += 1;
            }
        }
        counts
    }

    /// Terms present at least once, in vocabulary order
    pub fn found<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.counts(text)
            .into_iter()
            .zip(self.terms.iter())
            .filter(|(count, _)| *count > 0)
            .map(|(_, term)| term.as_str())
            .collect()
    }

    /// Number of distinct terms present
    pub fn distinct_hits(&self, text: &str) -> usize {
        self.counts(text).into_iter().filter(|c| *c > 0).count()
    }

    /// Total number of bounded occurrences of any term
    pub fn total_hits(&self, text: &str) -> usize {
        self.counts(text).into_iter().sum()
    }

    pub fn contains_any(&self, text: &str) -> bool {
        self.automaton
            .find_overlapping_iter(text)
            .any(|mat| is_bounded(text, mat.start(), mat.end()))
    }
}

/// True when `text[start..end]` is not glued to alphanumerics on either side
pub fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}

/// Whole-word, case-insensitive check for a single phrase
pub fn contains_term(text: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return false;
    }
    let haystack = text.to_lowercase();
    haystack
        .match_indices(term.as_str())
        .any(|(start, m)| is_bounded(&haystack, start, start + m.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundaries() {
        let matcher = TermMatcher::new(["go", "sql", "java"]).unwrap();
        let text = "Good PostgreSQL and JavaScript skills";
        assert!(matcher.found(text).is_empty());

        let text = "Go, SQL and Java (8 years)";
        assert_eq!(matcher.found(text), vec!["go", "sql", "java"]);
    }

    #[test]
    fn test_symbol_terms() {
        let matcher = TermMatcher::new(["c++", "node.js", "ci/cd"]).unwrap();
        let text = "Built CI/CD pipelines; wrote C++ and Node.js services";
        assert_eq!(matcher.distinct_hits(text), 3);
    }

    #[test]
    fn test_overlapping_terms_counted() {
        let matcher = TermMatcher::new(["machine learning", "learning"]).unwrap();
        let counts = matcher.counts("machine learning and learning");
        assert_eq!(counts, vec![1, 2]);
    }

    #[test]
    fn test_contains_term() {
        assert!(contains_term("Senior Growth Marketer at Acme", "growth marketer"));
        assert!(!contains_term("Growth Marketers wanted", "growth marketer"));
        assert!(!contains_term("anything", "  "));
    }
}
