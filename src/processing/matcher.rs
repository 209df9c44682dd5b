//! Substring term matching over case-folded text

use crate::error::Result;
use aho_corasick::AhoCorasick;
use std::collections::HashSet;

/// An ordered list of terms with a compiled Aho-Corasick automaton.
///
/// Matching is plain substring containment: "java" is found inside "javascript".
/// Callers pass already case-folded text; terms are case-folded on construction.
#[derive(Debug, Clone)]
pub struct TermSet {
    terms: Vec<String>,
    matcher: AhoCorasick,
}

impl TermSet {
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Result<Self> {
        let terms: Vec<String> = terms.iter().map(|t| t.as_ref().to_lowercase()).collect();

        // Standard match kind is required for overlapping iteration
        let matcher = AhoCorasick::builder()
            .match_kind(aho_corasick::MatchKind::Standard)
            .build(&terms)?;

        Ok(Self { terms, matcher })
    }

    /// True if any term occurs in `text`
    pub fn any_in(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    /// Terms occurring in `text`, in table order
    pub fn present_in(&self, text: &str) -> Vec<&str> {
        let found: HashSet<usize> = self
            .matcher
            .find_overlapping_iter(text)
            .map(|m| m.pattern().as_usize())
            .collect();

        self.terms
            .iter()
            .enumerate()
            .filter(|(id, _)| found.contains(id))
            .map(|(_, term)| term.as_str())
            .collect()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_semantics() {
        let set = TermSet::new(&["java", "javascript", "sql"]).unwrap();

        assert_eq!(set.present_in("senior javascript developer"), vec!["java", "javascript"]);
        assert!(set.any_in("postgresql"));
        assert!(!set.any_in("rust and go"));
    }

    #[test]
    fn test_terms_are_case_folded() {
        let set = TermSet::new(&["AWS Certified"]).unwrap();

        assert_eq!(set.terms(), &["aws certified".to_string()]);
        assert!(set.any_in("i am aws certified"));
    }

    #[test]
    fn test_table_order_kept() {
        let set = TermSet::new(&["docker", "aws", "git"]).unwrap();
        let present = set.present_in("git, aws and docker");

        assert_eq!(present, vec!["docker", "aws", "git"]);
    }

    #[test]
    fn test_empty_set_never_matches() {
        let terms: Vec<String> = Vec::new();
        let set = TermSet::new(&terms).unwrap();

        assert!(set.is_empty());
        assert!(!set.any_in("anything"));
        assert!(set.present_in("anything").is_empty());
    }
}
