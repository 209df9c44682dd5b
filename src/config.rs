//! Configuration management for the ATS scorer

use crate::error::{AtsScorerError, Result};
use crate::processing::analyzer::AnalysisSettings;
use crate::processing::keywords::DEFAULT_KEYWORD_LIMIT;
use crate::processing::knowledge::KnowledgeBase;
use crate::processing::scorer::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub knowledge: KnowledgeConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub keyword_weight: f64,
    pub formatting_weight: f64,
    pub skills_weight: f64,
    pub certification_weight: f64,
    pub content_weight: f64,
    pub keyword_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// TOML file replacing the built-in knowledge tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub max_missing_keywords: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        let weights = ScoringWeights::default();

        Self {
            scoring: ScoringConfig {
                keyword_weight: weights.keyword_match,
                formatting_weight: weights.formatting,
                skills_weight: weights.skills,
                certification_weight: weights.certifications,
                content_weight: weights.content,
                keyword_limit: DEFAULT_KEYWORD_LIMIT,
            },
            knowledge: KnowledgeConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                max_missing_keywords: 20,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AtsScorerError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| AtsScorerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.settings().weights.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AtsScorerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-scorer")
            .join("config.toml")
    }

    /// Engine settings derived from the scoring section
    pub fn settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            weights: ScoringWeights {
                keyword_match: self.scoring.keyword_weight,
                formatting: self.scoring.formatting_weight,
                skills: self.scoring.skills_weight,
                certifications: self.scoring.certification_weight,
                content: self.scoring.content_weight,
            },
            keyword_limit: self.scoring.keyword_limit,
        }
    }

    /// Knowledge tables from `override_path`, the configured path, or the built-ins
    pub fn knowledge_base(&self, override_path: Option<&Path>) -> Result<KnowledgeBase> {
        match override_path.or(self.knowledge.tables_path.as_deref()) {
            Some(path) => {
                if !path.exists() {
                    return Err(AtsScorerError::KnowledgeBase(format!(
                        "Knowledge table file not found: {}",
                        path.display()
                    )));
                }
                KnowledgeBase::from_toml_file(path)
            }
            None => Ok(KnowledgeBase::builtin()),
        }
    }
}
