//! Suggestion generation from the scoring inputs

use crate::error::Result;
use crate::processing::knowledge::KnowledgeBase;
use crate::processing::matcher::TermSet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_LISTED_KEYWORDS: usize = 10;
const MAX_LISTED_SKILLS: usize = 5;
const MAX_CERTIFICATIONS: usize = 4;
const LOW_SCORE_THRESHOLD: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Keywords,
    Certifications,
    Skills,
    Improvements,
    Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A titled group of recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: SuggestionCategory,
    pub title: String,
    pub items: Vec<String>,
    pub priority: Priority,
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SuggestionCategory::Keywords => "Keywords",
            SuggestionCategory::Certifications => "Certifications",
            SuggestionCategory::Skills => "Skills",
            SuggestionCategory::Improvements => "Improvements",
            SuggestionCategory::Format => "Format",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        write!(f, "{}", name)
    }
}

impl Suggestion {
    fn new(category: SuggestionCategory, title: &str, items: Vec<String>, priority: Priority) -> Self {
        Self {
            category,
            title: title.to_string(),
            items,
            priority,
        }
    }
}

#[derive(Debug, Clone)]
struct CertificationRule {
    signals: TermSet,
    certifications: Vec<String>,
}

/// Builds the ordered suggestion list for one analysis.
#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    technical_skills: TermSet,
    action_verbs: TermSet,
    certification_mentions: TermSet,
    certification_rules: Vec<CertificationRule>,
    bullet_regex: Regex,
    metric_regex: Regex,
}

impl SuggestionGenerator {
    pub fn new(knowledge: &KnowledgeBase) -> Result<Self> {
        let certification_rules = knowledge
            .certification_tracks
            .iter()
            .map(|track| {
                Ok(CertificationRule {
                    signals: TermSet::new(&track.signals)?,
                    certifications: track.certifications.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            technical_skills: TermSet::new(&knowledge.technical_skills)?,
            action_verbs: TermSet::new(&knowledge.tip_action_verbs)?,
            certification_mentions: TermSet::new(&["certified", "certification"])?,
            certification_rules,
            bullet_regex: Regex::new(r"[•\-*]").expect("Invalid bullet regex"),
            metric_regex: Regex::new(r"\d+%|\d+\+").expect("Invalid metric regex"),
        })
    }

    /// Produce suggestions in their fixed order.
    ///
    /// `job` and `resume` must be case-folded; `raw_resume` is the resume as supplied.
    pub fn generate(
        &self,
        missing_keywords: &[String],
        job: &str,
        resume: &str,
        raw_resume: &str,
        score: u8,
    ) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        if let Some(s) = self.keyword_suggestion(missing_keywords) {
            suggestions.push(s);
        }
        if let Some(s) = self.skills_suggestion(job, resume) {
            suggestions.push(s);
        }
        if let Some(s) = self.certification_suggestion(job, resume) {
            suggestions.push(s);
        }
        if let Some(s) = self.format_suggestion(raw_resume) {
            suggestions.push(s);
        }
        suggestions.push(self.improvement_suggestion(resume, score));

        suggestions
    }

    fn keyword_suggestion(&self, missing_keywords: &[String]) -> Option<Suggestion> {
        if missing_keywords.is_empty() {
            return None;
        }

        let listed: Vec<&str> = missing_keywords
            .iter()
            .take(MAX_LISTED_KEYWORDS)
            .map(String::as_str)
            .collect();

        Some(Suggestion::new(
            SuggestionCategory::Keywords,
            "Missing Keywords from Job Description",
            vec![
                format!("Add these important keywords: {}", listed.join(", ")),
                "Incorporate keywords naturally throughout your resume".to_string(),
                "Use exact phrases from the job description where applicable".to_string(),
            ],
            Priority::High,
        ))
    }

    fn skills_suggestion(&self, job: &str, resume: &str) -> Option<Suggestion> {
        let missing: Vec<&str> = self
            .technical_skills
            .present_in(job)
            .into_iter()
            .filter(|skill| !resume.contains(skill))
            .collect();

        if missing.is_empty() {
            return None;
        }

        let listed: Vec<&str> = missing.into_iter().take(MAX_LISTED_SKILLS).collect();

        Some(Suggestion::new(
            SuggestionCategory::Skills,
            "Technical Skills to Highlight",
            vec![
                format!("Add or emphasize: {}", listed.join(", ")),
                "Create a dedicated \"Technical Skills\" section if not present".to_string(),
                "Match skill proficiency levels mentioned in job description".to_string(),
            ],
            Priority::High,
        ))
    }

    fn certification_suggestion(&self, job: &str, resume: &str) -> Option<Suggestion> {
        if !self.certification_mentions.any_in(job) || self.certification_mentions.any_in(resume) {
            return None;
        }

        Some(Suggestion::new(
            SuggestionCategory::Certifications,
            "Recommended Certifications",
            self.recommended_certifications(job),
            Priority::Medium,
        ))
    }

    /// Certifications for every domain signalled in `job`, capped at four
    pub fn recommended_certifications(&self, job: &str) -> Vec<String> {
        let mut items: Vec<String> = self
            .certification_rules
            .iter()
            .filter(|rule| rule.signals.any_in(job))
            .flat_map(|rule| rule.certifications.iter().take(2).cloned())
            .collect();

        if items.is_empty() {
            items.push("Research industry-standard certifications for this role".to_string());
            items.push("Consider LinkedIn Learning or Coursera certifications".to_string());
        }

        items.truncate(MAX_CERTIFICATIONS);
        items
    }

    fn format_suggestion(&self, raw_resume: &str) -> Option<Suggestion> {
        let folded = raw_resume.to_lowercase();
        let mut issues = Vec::new();

        if !folded.contains("experience") {
            issues.push("Add a clear \"Experience\" section".to_string());
        }
        if !folded.contains("education") {
            issues.push("Add an \"Education\" section".to_string());
        }
        if !folded.contains("skills") {
            issues.push("Add a \"Skills\" section".to_string());
        }
        if !self.bullet_regex.is_match(raw_resume) {
            issues.push("Use bullet points for better readability".to_string());
        }

        if issues.is_empty() {
            return None;
        }

        Some(Suggestion::new(
            SuggestionCategory::Format,
            "Format & Structure Improvements",
            issues,
            Priority::Medium,
        ))
    }

    fn improvement_suggestion(&self, resume: &str, score: u8) -> Suggestion {
        let mut items = Vec::new();

        if !self.metric_regex.is_match(resume) {
            items.push("Add quantifiable achievements (e.g., \"Increased sales by 25%\")".to_string());
        }
        if !self.action_verbs.any_in(resume) {
            items.push("Start bullet points with strong action verbs".to_string());
        }
        items.push("Tailor your experience to match job requirements".to_string());
        items.push("Include relevant projects or accomplishments".to_string());

        let priority = if score < LOW_SCORE_THRESHOLD {
            Priority::High
        } else {
            Priority::Low
        };

        Suggestion::new(
            SuggestionCategory::Improvements,
            "Content Enhancement Tips",
            items,
            priority,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> SuggestionGenerator {
        SuggestionGenerator::new(&KnowledgeBase::builtin()).unwrap()
    }

    fn categories(suggestions: &[Suggestion]) -> Vec<SuggestionCategory> {
        suggestions.iter().map(|s| s.category).collect()
    }

    #[test]
    fn test_empty_inputs_only_format_and_improvements() {
        let suggestions = generator().generate(&[], "", "", "", 24);

        assert_eq!(
            categories(&suggestions),
            vec![SuggestionCategory::Format, SuggestionCategory::Improvements]
        );
        let improvements = suggestions.last().unwrap();
        assert_eq!(improvements.priority, Priority::High);
        assert_eq!(improvements.items.len(), 4);
    }

    #[test]
    fn test_keyword_suggestion_lists_first_ten() {
        let missing: Vec<String> = (0..12).map(|i| format!("kw{i}")).collect();
        let suggestions = generator().generate(&missing, "", "", "", 80);

        let keywords = &suggestions[0];
        assert_eq!(keywords.category, SuggestionCategory::Keywords);
        assert_eq!(keywords.priority, Priority::High);
        assert_eq!(
            keywords.items[0],
            "Add these important keywords: kw0, kw1, kw2, kw3, kw4, kw5, kw6, kw7, kw8, kw9"
        );
        assert_eq!(keywords.items.len(), 3);
    }

    #[test]
    fn test_missing_technical_skills_capped_at_five() {
        let job = "python, typescript, react, angular, vue, docker and kubernetes";
        let suggestions = generator().generate(&[], job, "python", "python", 70);

        let skills = suggestions
            .iter()
            .find(|s| s.category == SuggestionCategory::Skills)
            .unwrap();
        assert_eq!(
            skills.items[0],
            "Add or emphasize: typescript, react, angular, vue, docker"
        );
    }

    #[test]
    fn test_aws_certifications_recommended() {
        let job = "AWS Certified Solutions Architect required".to_lowercase();
        let suggestions = generator().generate(&[], &job, "", "", 30);

        let certs = suggestions
            .iter()
            .find(|s| s.category == SuggestionCategory::Certifications)
            .unwrap();
        assert_eq!(certs.priority, Priority::Medium);
        assert!(certs.items.contains(&"AWS Certified Solutions Architect".to_string()));
        assert!(certs.items.contains(&"AWS Certified Developer".to_string()));
    }

    #[test]
    fn test_certifications_skipped_when_resume_certified() {
        let suggestions = generator().generate(&[], "certification required", "pmi certified", "PMI certified", 70);

        assert!(!categories(&suggestions).contains(&SuggestionCategory::Certifications));
    }

    #[test]
    fn test_certifications_capped_and_fallback() {
        let g = generator();

        let many = g.recommended_certifications("aws azure security google cloud");
        assert_eq!(many.len(), 4);
        assert_eq!(many[2], "Microsoft Azure Fundamentals (AZ-900)");

        let none = g.recommended_certifications("certification in welding");
        assert_eq!(
            none,
            vec![
                "Research industry-standard certifications for this role".to_string(),
                "Consider LinkedIn Learning or Coursera certifications".to_string(),
            ]
        );
    }

    #[test]
    fn test_well_structured_resume_has_no_format_suggestion() {
        let raw = "Experience\n• Led launches\nEducation\nSkills";
        let resume = raw.to_lowercase();
        let suggestions = generator().generate(&[], "", &resume, raw, 85);

        assert!(!categories(&suggestions).contains(&SuggestionCategory::Format));
        let improvements = suggestions.last().unwrap();
        assert_eq!(improvements.priority, Priority::Low);
        assert_eq!(
            improvements.items[0],
            "Add quantifiable achievements (e.g., \"Increased sales by 25%\")"
        );
        assert_eq!(improvements.items.len(), 3);
    }

    #[test]
    fn test_action_verb_tip_uses_narrow_verb_list() {
        // "created" and "increased" feed the content sub-score but not this tip
        let raw = "Created dashboards and increased revenue";
        let resume = raw.to_lowercase();
        let suggestions = generator().generate(&[], "", &resume, raw, 50);

        let improvements = suggestions.last().unwrap();
        assert!(improvements
            .items
            .contains(&"Start bullet points with strong action verbs".to_string()));

        let raw = "Managed a team of four";
        let suggestions = generator().generate(&[], "", &raw.to_lowercase(), raw, 50);
        assert!(!suggestions
            .last()
            .unwrap()
            .items
            .contains(&"Start bullet points with strong action verbs".to_string()));
    }

    #[test]
    fn test_serialized_tags_are_lowercase() {
        let json = serde_json::to_string(&Suggestion::new(
            SuggestionCategory::Improvements,
            "t",
            vec![],
            Priority::Medium,
        ))
        .unwrap();

        assert!(json.contains("\"category\":\"improvements\""));
        assert!(json.contains("\"priority\":\"medium\""));
    }
}
