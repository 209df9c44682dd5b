//! Text extraction from plain text and Markdown sources

use crate::error::Result;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.convert(&content))
    }

    /// Turn raw file content into plain text
    fn convert(&self, content: &str) -> String;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn convert(&self, content: &str) -> String {
        content.to_string()
    }
}

/// Renders Markdown and strips the markup, keeping list markers so bullet
/// structure survives into the formatting checks.
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn convert(&self, content: &str) -> String {
        let parser = Parser::new(content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.html_to_text(&html_output)
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<li>", "\n- ")
            .replace("<br />", "\n")
            .replace("</p>", "\n\n");

        let tag_regex = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
        let clean_text = tag_regex
            .replace_all(&text, "")
            .replace("&nbsp;", " ")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&");

        clean_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_markup_removed() {
        let text = MarkdownExtractor.convert("# Jane Doe\n\n**Senior** engineer & mentor\n");

        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Senior engineer & mentor"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_markdown_lists_keep_bullets() {
        let text = MarkdownExtractor.convert("## Experience\n\n* Led migrations\n* Reduced costs\n");

        assert!(text.contains("- Led migrations"));
        assert!(text.contains("- Reduced costs"));
    }

    #[test]
    fn test_plain_text_untouched() {
        let raw = "  Line one\n\n• bullet\n";
        assert_eq!(PlainTextExtractor.convert(raw), raw);
    }
}
