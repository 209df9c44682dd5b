//! ATS scorer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{AtsScorerError, Result};
pub use config::Config;
pub use processing::analyzer::{analyze_resume, AnalysisEngine, AnalysisResult, AnalysisSettings, Evaluation};
pub use processing::knowledge::KnowledgeBase;
pub use processing::suggestions::{Priority, Suggestion, SuggestionCategory};
