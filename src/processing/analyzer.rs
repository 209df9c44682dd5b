//! Analysis engine: extraction, scoring and suggestion generation in one pass

use crate::error::Result;
use crate::processing::keywords::{KeywordExtractor, DEFAULT_KEYWORD_LIMIT};
use crate::processing::knowledge::KnowledgeBase;
use crate::processing::scorer::{ScoreBreakdown, Scorer, ScoringWeights};
use crate::processing::suggestions::{Suggestion, SuggestionGenerator};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Engine output handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// ATS compatibility score (0-100)
    pub score: u8,

    pub suggestions: Vec<Suggestion>,

    /// Job keywords found in the resume
    pub matched_keywords: Vec<String>,

    /// Job keywords absent from the resume
    pub missing_keywords: Vec<String>,
}

/// Result plus the intermediate values used for detailed reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub result: AnalysisResult,
    pub breakdown: ScoreBreakdown,
    pub resume_keywords: Vec<String>,
}

/// Tunables injected alongside the knowledge tables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub weights: ScoringWeights,
    pub keyword_limit: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
        }
    }
}

/// Stateless analysis engine; safe to share between threads.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    knowledge: KnowledgeBase,
    scorer: Scorer,
    generator: SuggestionGenerator,
}

impl AnalysisEngine {
    pub fn new(knowledge: KnowledgeBase, settings: AnalysisSettings) -> Result<Self> {
        knowledge.validate()?;

        let extractor = KeywordExtractor::new(&knowledge.stop_words, settings.keyword_limit);
        let scorer = Scorer::new(&knowledge, extractor, settings.weights)?;
        let generator = SuggestionGenerator::new(&knowledge)?;

        Ok(Self {
            knowledge,
            scorer,
            generator,
        })
    }

    /// Score `resume_text` against `job_text` and derive suggestions.
    pub fn analyze(&self, resume_text: &str, job_text: &str) -> AnalysisResult {
        self.evaluate(resume_text, job_text).result
    }

    /// Like [`AnalysisEngine::analyze`], keeping the sub-scores and resume keywords.
    pub fn evaluate(&self, resume_text: &str, job_text: &str) -> Evaluation {
        let card = self.scorer.score(resume_text, job_text);

        let suggestions = self.generator.generate(
            &card.missing_keywords,
            &job_text.to_lowercase(),
            &resume_text.to_lowercase(),
            resume_text,
            card.score,
        );

        debug!(
            "Analysis finished: score={}, matched={}, missing={}, suggestions={}",
            card.score,
            card.matched_keywords.len(),
            card.missing_keywords.len(),
            suggestions.len()
        );

        Evaluation {
            result: AnalysisResult {
                score: card.score,
                suggestions,
                matched_keywords: card.matched_keywords,
                missing_keywords: card.missing_keywords,
            },
            breakdown: card.breakdown,
            resume_keywords: self.scorer.extractor().extract(resume_text),
        }
    }

    /// Extract the keyword set of arbitrary text with this engine's stop words and limit
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        self.scorer.extractor().extract(text)
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn weights(&self) -> &ScoringWeights {
        self.scorer.weights()
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(KnowledgeBase::builtin(), AnalysisSettings::default())
            .expect("Failed to create default analysis engine")
    }
}

/// Analyze with the built-in knowledge tables and default settings.
pub fn analyze_resume(resume_text: &str, job_text: &str) -> AnalysisResult {
    static ENGINE: OnceLock<AnalysisEngine> = OnceLock::new();
    ENGINE
        .get_or_init(AnalysisEngine::default)
        .analyze(resume_text, job_text)
}
