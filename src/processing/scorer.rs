//! ATS compatibility scoring

use crate::error::{AtsScorerError, Result};
use crate::processing::keywords::KeywordExtractor;
use crate::processing::knowledge::KnowledgeBase;
use crate::processing::matcher::TermSet;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Skills sub-score used when the job description names none of the common skills
const NO_JOB_SKILLS_SCORE: f64 = 0.7;

/// Certification sub-score when certifications are requested but the resume has none
const MISSING_CERTIFICATION_SCORE: f64 = 0.3;

const SECTION_TERMS: &[&str] = &["experience", "education", "skills", "summary"];
const CONTACT_TERMS: &[&str] = &["@", "phone", "email", "linkedin"];

/// Weights of the five sub-scores; they must sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub keyword_match: f64,
    pub formatting: f64,
    pub skills: f64,
    pub certifications: f64,
    pub content: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword_match: 40.0,
            formatting: 20.0,
            skills: 20.0,
            certifications: 10.0,
            content: 10.0,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.keyword_match + self.formatting + self.skills + self.certifications + self.content
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            self.keyword_match,
            self.formatting,
            self.skills,
            self.certifications,
            self.content,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(AtsScorerError::Configuration(
                "Scoring weights must be finite and non-negative".to_string(),
            ));
        }
        if (self.total() - 100.0).abs() > 1e-6 {
            return Err(AtsScorerError::Configuration(format!(
                "Scoring weights must sum to 100, got {}",
                self.total()
            )));
        }
        Ok(())
    }
}

/// Normalized sub-scores, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_match: f64,
    pub formatting: f64,
    pub skills: f64,
    pub certifications: f64,
    pub content: f64,
    /// Weighted sum before rounding
    pub weighted_total: f64,
}

/// Scorer output: final score plus the keyword partition it was computed from
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub job_keywords: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// Combines keyword, formatting, skills, certification and content checks into one score.
#[derive(Debug, Clone)]
pub struct Scorer {
    extractor: KeywordExtractor,
    common_skills: TermSet,
    certification_terms: TermSet,
    action_verbs: TermSet,
    section_terms: TermSet,
    contact_terms: TermSet,
    weights: ScoringWeights,
    structure_regex: Regex,
    metrics_regex: Regex,
    whitespace_regex: Regex,
}

impl Scorer {
    pub fn new(knowledge: &KnowledgeBase, extractor: KeywordExtractor, weights: ScoringWeights) -> Result<Self> {
        weights.validate()?;

        let structure_regex = Regex::new(r"(?m)[•\-*]|^\d+\.").expect("Invalid structure regex");
        let metrics_regex = Regex::new(r"\d+%|\d+\+|increased by|reduced by|grew|saved \$")
            .expect("Invalid metrics regex");

        Ok(Self {
            extractor,
            common_skills: TermSet::new(&knowledge.common_skills)?,
            certification_terms: TermSet::new(&knowledge.certification_keywords)?,
            action_verbs: TermSet::new(&knowledge.action_verbs)?,
            section_terms: TermSet::new(SECTION_TERMS)?,
            contact_terms: TermSet::new(CONTACT_TERMS)?,
            weights,
            structure_regex,
            metrics_regex,
            whitespace_regex: Regex::new(r"\s+").expect("Invalid whitespace regex"),
        })
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score `resume_text` against `job_text`.
    pub fn score(&self, resume_text: &str, job_text: &str) -> ScoreCard {
        let resume = resume_text.to_lowercase();
        let job = job_text.to_lowercase();

        let job_keywords = self.extractor.extract(&job);
        let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = job_keywords
            .iter()
            .cloned()
            .partition(|k| resume.contains(k.as_str()));

        let keyword_match = keyword_ratio(matched_keywords.len(), job_keywords.len());
        let formatting = self.formatting_score(resume_text);
        let skills = self.skills_score(&resume, &job);
        let certifications = self.certification_score(&resume, &job);
        let content = self.content_score(&resume);

        let weighted_total = keyword_match * self.weights.keyword_match
            + formatting * self.weights.formatting
            + skills * self.weights.skills
            + certifications * self.weights.certifications
            + content * self.weights.content;

        let score = weighted_total.min(100.0).max(0.0).round() as u8;

        debug!(
            "Sub-scores: keywords={:.2} formatting={:.2} skills={:.2} certifications={:.2} content={:.2} => {}",
            keyword_match, formatting, skills, certifications, content, score
        );

        ScoreCard {
            score,
            breakdown: ScoreBreakdown {
                keyword_match,
                formatting,
                skills,
                certifications,
                content,
                weighted_total,
            },
            job_keywords,
            matched_keywords,
            missing_keywords,
        }
    }

    /// Layout checks on the raw resume text
    pub fn formatting_score(&self, resume_text: &str) -> f64 {
        let folded = resume_text.to_lowercase();
        let mut score: f64 = 0.0;

        if self.section_terms.any_in(&folded) {
            score += 0.3;
        }
        if self.structure_regex.is_match(resume_text) {
            score += 0.3;
        }
        if self.contact_terms.any_in(&folded) {
            score += 0.2;
        }

        let word_count = self.word_count(resume_text);
        if word_count > 200 && word_count < 1500 {
            score += 0.2;
        }

        score.min(1.0)
    }

    /// Pieces of a whitespace split, edge pieces included: "" is 1 and "a b\n" is 3.
    pub fn word_count(&self, text: &str) -> usize {
        self.whitespace_regex.split(text).count()
    }

    /// Expects case-folded inputs
    pub fn skills_score(&self, resume: &str, job: &str) -> f64 {
        let job_skills = self.common_skills.present_in(job);
        if job_skills.is_empty() {
            return NO_JOB_SKILLS_SCORE;
        }

        let covered = job_skills.iter().filter(|s| resume.contains(**s)).count();
        covered as f64 / job_skills.len() as f64
    }

    /// Expects case-folded inputs
    pub fn certification_score(&self, resume: &str, job: &str) -> f64 {
        if !self.certification_terms.any_in(job) {
            return 1.0;
        }
        if self.certification_terms.any_in(resume) {
            return 1.0;
        }
        MISSING_CERTIFICATION_SCORE
    }

    /// Expects case-folded input
    pub fn content_score(&self, resume: &str) -> f64 {
        let mut score = 0.0;

        if self.action_verbs.any_in(resume) {
            score += 0.5;
        }
        if self.metrics_regex.is_match(resume) {
            score += 0.5;
        }

        score
    }
}

/// Share of job keywords found in the resume; zero when the job yields no keywords.
fn keyword_ratio(matched: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::keywords::DEFAULT_KEYWORD_LIMIT;

    fn scorer() -> Scorer {
        let knowledge = KnowledgeBase::builtin();
        let extractor = KeywordExtractor::new(&knowledge.stop_words, DEFAULT_KEYWORD_LIMIT);
        Scorer::new(&knowledge, extractor, ScoringWeights::default()).unwrap()
    }

    #[test]
    fn test_empty_inputs() {
        let card = scorer().score("", "");

        assert_eq!(card.breakdown.keyword_match, 0.0);
        assert_eq!(card.breakdown.formatting, 0.0);
        assert_eq!(card.breakdown.skills, 0.7);
        assert_eq!(card.breakdown.certifications, 1.0);
        assert_eq!(card.breakdown.content, 0.0);
        assert_eq!(card.score, 24);
        assert!(card.matched_keywords.is_empty());
        assert!(card.missing_keywords.is_empty());
    }

    #[test]
    fn test_keyword_partition() {
        let card = scorer().score("I know python", "python python java");

        assert_eq!(card.job_keywords, vec!["python".to_string()]);
        assert_eq!(card.matched_keywords, vec!["python".to_string()]);
        assert!(card.missing_keywords.is_empty());
        assert_eq!(card.breakdown.keyword_match, 1.0);
    }

    #[test]
    fn test_content_score_with_verb_and_metric() {
        let s = scorer();
        let resume = "Increased sales by 25% and led a team of 5".to_lowercase();

        assert_eq!(s.content_score(&resume), 1.0);
        assert_eq!(s.content_score("worked on things"), 0.0);
        assert_eq!(s.content_score("grew the team"), 0.5);
    }

    #[test]
    fn test_formatting_checks() {
        let s = scorer();

        assert!((s.formatting_score("EXPERIENCE") - 0.3).abs() < 1e-9);
        assert!((s.formatting_score("1. First item") - 0.3).abs() < 1e-9);
        assert!((s.formatting_score("jane@example.com") - 0.2).abs() < 1e-9);

        let long_resume = format!("Experience\n- built things\nemail {}", "word ".repeat(300));
        assert!((s.formatting_score(&long_resume) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_word_count_keeps_edge_pieces() {
        let s = scorer();

        assert_eq!(s.word_count(""), 1);
        assert_eq!(s.word_count("one two"), 2);
        assert_eq!(s.word_count("one two\n"), 3);
        assert_eq!(s.word_count("  one\t\ttwo  "), 4);
    }

    #[test]
    fn test_word_count_band_boundaries() {
        let s = scorer();
        let words = |n: usize| vec!["word"; n].join(" ");

        assert_eq!(s.formatting_score(&words(200)), 0.0);
        assert!((s.formatting_score(&format!("{}\n", words(200))) - 0.2).abs() < 1e-9);
        assert!((s.formatting_score(&words(1499)) - 0.2).abs() < 1e-9);
        assert_eq!(s.formatting_score(&format!("{}\n", words(1499))), 0.0);
    }

    #[test]
    fn test_skills_score() {
        let s = scorer();

        assert_eq!(s.skills_score("rust", "no listed skills here"), 0.7);
        assert_eq!(s.skills_score("docker", "docker and kubernetes"), 0.5);
        // "java" is a substring of "javascript", so both skills are requested
        assert_eq!(s.skills_score("java", "javascript"), 0.5);
    }

    #[test]
    fn test_certification_score() {
        let s = scorer();

        assert_eq!(s.certification_score("", "no certs needed"), 1.0);
        assert_eq!(s.certification_score("pmp holder", "certification required"), 1.0);
        assert_eq!(s.certification_score("nothing", "certification required"), 0.3);
    }

    #[test]
    fn test_weights_must_sum_to_hundred() {
        let knowledge = KnowledgeBase::builtin();
        let weights = ScoringWeights {
            keyword_match: 50.0,
            ..ScoringWeights::default()
        };

        let result = Scorer::new(&knowledge, KeywordExtractor::default(), weights);
        assert!(matches!(result, Err(AtsScorerError::Configuration(_))));
    }

    #[test]
    fn test_superset_resume_never_loses_keywords() {
        let s = scorer();
        let job = "rust services, rust tooling, distributed services";
        let base = s.score("rust", job);
        let extended = s.score("rust\ndistributed services", job);

        assert!(extended.breakdown.keyword_match >= base.breakdown.keyword_match);
    }
}
