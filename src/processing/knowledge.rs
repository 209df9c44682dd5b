//! Knowledge tables consulted by the extractor, scorer and suggestion generator

use crate::error::{AtsScorerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Read-only vocabulary injected into the analysis engine.
///
/// The built-in tables are available through [`KnowledgeBase::builtin`]; alternate
/// vocabularies can be loaded from TOML with [`KnowledgeBase::from_toml_file`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Words never reported as keywords
    pub stop_words: Vec<String>,

    /// Skills checked by the skills sub-score
    pub common_skills: Vec<String>,

    /// Terms that count as "mentions a certification"
    pub certification_keywords: Vec<String>,

    /// Verbs that signal achievement-oriented writing
    pub action_verbs: Vec<String>,

    /// Verbs whose absence triggers the "strong action verbs" tip
    #[serde(default = "default_tip_action_verbs")]
    pub tip_action_verbs: Vec<String>,

    /// Technical skills suggested when missing from the resume
    pub technical_skills: Vec<String>,

    /// Certifications recommended per job-description domain, in priority order
    pub certification_tracks: Vec<CertificationTrack>,
}

/// A domain rule: when any signal appears in the job description, recommend its certifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationTrack {
    pub domain: String,
    pub signals: Vec<String>,
    pub certifications: Vec<String>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    /// The compiled-in tables
    pub fn builtin() -> Self {
        Self {
            stop_words: to_strings(&[
                "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
                "of", "with", "by", "from", "as", "is", "was", "are", "be", "been",
                "being", "have", "has", "had", "do", "does", "did", "will", "would",
                "should", "could", "may", "might", "must", "can", "this", "that",
                "these", "those", "i", "you", "he", "she", "it", "we", "they",
            ]),
            common_skills: to_strings(&[
                "python", "java", "javascript", "react", "node", "sql", "aws", "azure",
                "docker", "kubernetes", "git", "agile", "scrum", "leadership", "communication",
                "project management", "data analysis", "machine learning", "ai", "excel",
            ]),
            certification_keywords: to_strings(&[
                "certified", "certification", "license", "aws certified", "pmp", "scrum master",
                "google certified", "microsoft certified", "cisco", "comptia",
            ]),
            action_verbs: to_strings(&[
                "achieved", "improved", "led", "managed", "developed", "created", "increased",
                "reduced", "implemented", "designed", "launched", "established",
            ]),
            tip_action_verbs: default_tip_action_verbs(),
            technical_skills: to_strings(&[
                "python", "java", "javascript", "typescript", "react", "angular", "vue",
                "node.js", "express", "django", "flask", "spring", "sql", "nosql",
                "mongodb", "postgresql", "mysql", "aws", "azure", "gcp", "docker",
                "kubernetes", "jenkins", "ci/cd", "git", "agile", "scrum", "jira",
                "machine learning", "deep learning", "tensorflow", "pytorch", "excel",
                "tableau", "power bi", "salesforce", "sap", "rest api", "graphql",
            ]),
            certification_tracks: vec![
                track(
                    "aws",
                    &["aws", "cloud", "amazon web services"],
                    &["AWS Certified Solutions Architect", "AWS Certified Developer"],
                ),
                track(
                    "azure",
                    &["azure", "microsoft cloud"],
                    &["Microsoft Azure Fundamentals (AZ-900)", "Azure Administrator Associate"],
                ),
                track(
                    "project-management",
                    &["project management", "pmp"],
                    &["PMP (Project Management Professional)", "Certified Scrum Master (CSM)"],
                ),
                track(
                    "data",
                    &["data", "analytics"],
                    &["Google Data Analytics Certificate", "Tableau Desktop Specialist"],
                ),
                track(
                    "security",
                    &["security", "cybersecurity"],
                    &[
                        "CompTIA Security+",
                        "CISSP (Certified Information Systems Security Professional)",
                    ],
                ),
                track(
                    "google-cloud",
                    &["google", "gcp"],
                    &["Google Cloud Professional Cloud Architect"],
                ),
            ],
        }
    }

    /// Load tables from a TOML file with the same shape as [`KnowledgeBase`]
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let knowledge: KnowledgeBase = toml::from_str(content)
            .map_err(|e| AtsScorerError::KnowledgeBase(format!("Failed to parse tables: {}", e)))?;
        knowledge.validate()?;
        Ok(knowledge)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AtsScorerError::KnowledgeBase(format!("Failed to serialize tables: {}", e)))
    }

    /// Reject tables containing blank entries; an empty term would match every text.
    pub fn validate(&self) -> Result<()> {
        let tables: [(&str, &[String]); 6] = [
            ("stop_words", &self.stop_words),
            ("common_skills", &self.common_skills),
            ("certification_keywords", &self.certification_keywords),
            ("action_verbs", &self.action_verbs),
            ("tip_action_verbs", &self.tip_action_verbs),
            ("technical_skills", &self.technical_skills),
        ];

        for (name, terms) in tables {
            if terms.iter().any(|t| t.trim().is_empty()) {
                return Err(AtsScorerError::KnowledgeBase(format!(
                    "Table '{}' contains an empty entry",
                    name
                )));
            }
        }

        for track in &self.certification_tracks {
            if track.signals.iter().any(|s| s.trim().is_empty()) {
                return Err(AtsScorerError::KnowledgeBase(format!(
                    "Certification track '{}' has an empty signal",
                    track.domain
                )));
            }
        }

        Ok(())
    }

    /// Total number of entries across all tables
    pub fn term_count(&self) -> usize {
        self.stop_words.len()
            + self.common_skills.len()
            + self.certification_keywords.len()
            + self.action_verbs.len()
            + self.tip_action_verbs.len()
            + self.technical_skills.len()
            + self
                .certification_tracks
                .iter()
                .map(|t| t.signals.len() + t.certifications.len())
                .sum::<usize>()
    }
}

fn default_tip_action_verbs() -> Vec<String> {
    to_strings(&["achieved", "improved", "led", "managed", "developed"])
}

fn to_strings(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|s| s.to_string()).collect()
}

fn track(domain: &str, signals: &[&str], certifications: &[&str]) -> CertificationTrack {
    CertificationTrack {
        domain: domain.to_string(),
        signals: to_strings(signals),
        certifications: to_strings(certifications),
    }
}
