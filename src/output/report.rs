//! Report structures combining the analysis result with presentation data

use crate::processing::analyzer::{AnalysisResult, Evaluation};
use crate::processing::scorer::{ScoreBreakdown, ScoringWeights};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a formatter needs to render one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Engine output, unchanged
    pub analysis: AnalysisResult,

    /// Normalized sub-scores
    pub breakdown: ScoreBreakdown,

    /// Weights the sub-scores were combined with
    pub weights: ScoringWeights,

    pub band: ScoreBand,

    /// One-line advice keyed on the score
    pub advisory: String,

    /// Keywords extracted from the resume itself
    pub resume_keywords: Vec<String>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub scorer_version: String,
    pub resume_source: String,
    pub job_source: String,
    pub processing_time_ms: u64,
    pub knowledge_terms: usize,
}

/// One weighted line of the score breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentScore {
    pub name: &'static str,
    pub ratio: f64,
    pub weight: f64,
}

impl ComponentScore {
    pub fn percentage(&self) -> u8 {
        (self.ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }

    pub fn points(&self) -> f64 {
        self.ratio * self.weight
    }
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            _ => ScoreBand::NeedsImprovement,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

pub fn advisory_message(score: u8) -> &'static str {
    if score >= 80 {
        "Excellent! Your resume is well-optimized for this job. Review minor suggestions to perfect it."
    } else if score >= 60 {
        "Good start! Consider the suggestions below to optimize your resume further."
    } else {
        "Your resume needs improvement. Review the suggestions below to increase your ATS score."
    }
}

pub struct ReportSources<'a> {
    pub resume: &'a str,
    pub job: &'a str,
    pub processing_time_ms: u64,
    pub knowledge_terms: usize,
}

impl ScoreReport {
    pub fn from_evaluation(evaluation: Evaluation, weights: ScoringWeights, sources: ReportSources<'_>) -> Self {
        let score = evaluation.result.score;

        Self {
            analysis: evaluation.result,
            breakdown: evaluation.breakdown,
            weights,
            band: ScoreBand::from_score(score),
            advisory: advisory_message(score).to_string(),
            resume_keywords: evaluation.resume_keywords,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                scorer_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_source: sources.resume.to_string(),
                job_source: sources.job.to_string(),
                processing_time_ms: sources.processing_time_ms,
                knowledge_terms: sources.knowledge_terms,
            },
        }
    }

    pub fn score(&self) -> u8 {
        self.analysis.score
    }

    pub fn components(&self) -> Vec<ComponentScore> {
        vec![
            ComponentScore {
                name: "Keyword Match",
                ratio: self.breakdown.keyword_match,
                weight: self.weights.keyword_match,
            },
            ComponentScore {
                name: "Formatting",
                ratio: self.breakdown.formatting,
                weight: self.weights.formatting,
            },
            ComponentScore {
                name: "Skills",
                ratio: self.breakdown.skills,
                weight: self.weights.skills,
            },
            ComponentScore {
                name: "Certifications",
                ratio: self.breakdown.certifications,
                weight: self.weights.certifications,
            },
            ComponentScore {
                name: "Content Quality",
                ratio: self.breakdown.content,
                weight: self.weights.content,
            },
        ]
    }
}
