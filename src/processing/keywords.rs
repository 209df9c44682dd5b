//! Frequency-gated keyword extraction

use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Default cap on extracted keywords per text
pub const DEFAULT_KEYWORD_LIMIT: usize = 30;

/// Extracts repeated single words and repeated two-word phrases from text.
///
/// The output is capped but not ranked: single tokens come first in first-seen order,
/// followed by bigrams in first-seen order.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stop_words: HashSet<String>,
    limit: usize,
    non_word: Regex,
}

impl KeywordExtractor {
    pub fn new<S: AsRef<str>>(stop_words: &[S], limit: usize) -> Self {
        let stop_words = stop_words.iter().map(|w| w.as_ref().to_lowercase()).collect();
        let non_word = Regex::new(r"[^\w\s]").expect("Invalid non-word regex");

        Self {
            stop_words,
            limit,
            non_word,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        let folded = text.to_lowercase();
        let cleaned = self.non_word.replace_all(&folded, " ");
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();

        let mut keywords = self.repeated_tokens(&tokens);
        keywords.extend(self.repeated_bigrams(&tokens, &folded));

        let mut seen = HashSet::new();
        keywords.retain(|k| seen.insert(k.clone()));
        keywords.truncate(self.limit);
        keywords
    }

    fn repeated_tokens(&self, tokens: &[&str]) -> Vec<String> {
        let mut order = Vec::new();
        let mut freq: HashMap<&str, usize> = HashMap::new();

        for &token in tokens {
            if token.chars().count() <= 2 || self.is_stop_word(token) {
                continue;
            }
            let count = freq.entry(token).or_insert(0);
            if *count == 0 {
                order.push(token);
            }
            *count += 1;
        }

        order
            .into_iter()
            .filter(|t| freq[t] > 1)
            .map(str::to_string)
            .collect()
    }

    // Pairs come from the unfiltered token stream; only stop words break a pair.
    fn repeated_bigrams(&self, tokens: &[&str], folded: &str) -> Vec<String> {
        let mut candidates = Vec::new();
        let mut seen = HashSet::new();

        for pair in tokens.windows(2) {
            if self.is_stop_word(pair[0]) || self.is_stop_word(pair[1]) {
                continue;
            }
            let bigram = format!("{} {}", pair[0], pair[1]);
            if seen.insert(bigram.clone()) {
                candidates.push(bigram);
            }
        }

        candidates
            .into_iter()
            .filter(|bigram| folded.matches(bigram.as_str()).count() > 1)
            .collect()
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        let knowledge = crate::processing::knowledge::KnowledgeBase::builtin();
        Self::new(&knowledge.stop_words, DEFAULT_KEYWORD_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_gate() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("python python java");

        assert_eq!(keywords, vec!["python".to_string()]);
    }

    #[test]
    fn test_empty_and_stop_word_text() {
        let extractor = KeywordExtractor::default();

        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("the the and and with with").is_empty());
    }

    #[test]
    fn test_short_tokens_dropped() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("go go go ml ml");

        assert!(keywords.is_empty());
    }

    #[test]
    fn test_punctuation_and_case_folded() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("Rust, RUST! rust.");

        assert_eq!(keywords, vec!["rust".to_string()]);
    }

    #[test]
    fn test_singles_before_bigrams() {
        let extractor = KeywordExtractor::default();
        let text = "data pipelines and data pipelines for cloud teams";
        let keywords = extractor.extract(text);

        assert_eq!(
            keywords,
            vec![
                "data".to_string(),
                "pipelines".to_string(),
                "data pipelines".to_string(),
            ]
        );
    }

    #[test]
    fn test_bigram_with_short_token() {
        let extractor = KeywordExtractor::default();
        // "ci" is too short to be a keyword but still forms pairs
        let keywords = extractor.extract("ci pipelines. ci pipelines.");

        assert!(keywords.contains(&"pipelines".to_string()));
        assert!(keywords.contains(&"ci pipelines".to_string()));
        assert!(!keywords.contains(&"ci".to_string()));
    }

    #[test]
    fn test_bigram_counted_against_folded_text() {
        let extractor = KeywordExtractor::default();
        // Tokens form "node js" but the folded text only contains "node.js"
        let keywords = extractor.extract("node.js node.js");

        assert!(!keywords.iter().any(|k| k == "node js"));
    }

    #[test]
    fn test_accented_words_stay_whole() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("Café café, Résumé résumé");

        assert_eq!(keywords, vec!["café".to_string(), "résumé".to_string()]);
        assert!(!keywords.contains(&"caf".to_string()));
    }

    #[test]
    fn test_limit_applied() {
        let extractor = KeywordExtractor::default();
        let text: String = (0..40)
            .map(|i| format!("term{i} term{i} "))
            .collect();
        let keywords = extractor.extract(&text);

        assert_eq!(keywords.len(), DEFAULT_KEYWORD_LIMIT);
        let unique: HashSet<&String> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
    }

    #[test]
    fn test_custom_stop_words() {
        let extractor = KeywordExtractor::new(&["python"], 30);
        let keywords = extractor.extract("python python java java");

        assert_eq!(keywords, vec!["java".to_string()]);
    }
}
