//! Output formatters for console, JSON, Markdown and HTML reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::input::file_detector::is_stdin;
use crate::output::report::{ScoreBand, ScoreReport};
use crate::processing::suggestions::{Priority, Suggestion, SuggestionCategory};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a score report
pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    max_missing_keywords: usize,
}

/// JSON formatter for integration with other tools
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing reports
pub struct MarkdownFormatter {
    include_metadata: bool,
    max_missing_keywords: usize,
}

/// Standalone HTML page
pub struct HtmlFormatter {
    include_styles: bool,
    max_missing_keywords: usize,
}

/// Report generator that dispatches to the formatter for each format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ATS Score Report</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .score { font-size: 3em; font-weight: bold; }
        .band-excellent { color: #22c55e; }
        .band-good { color: #eab308; }
        .band-fair { color: #f97316; }
        .band-poor { color: #ef4444; }
        .chip { display: inline-block; padding: 2px 10px; margin: 3px; border-radius: 12px; font-size: 0.9em; }
        .chip-matched { background: #f0fdf4; color: #15803d; border: 1px solid #bbf7d0; }
        .chip-missing { background: #fef2f2; color: #b91c1c; border: 1px solid #fecaca; }
        .card { background: #f8f9fa; padding: 15px; margin: 10px 0; border-radius: 6px; border-left: 4px solid #17a2b8; }
        .priority-high { border-left-color: #dc3545; }
        .priority-medium { border-left-color: #ffc107; }
        .priority-low { border-left-color: #3b82f6; }
        table { border-collapse: collapse; width: 100%; }
        td, th { text-align: left; padding: 6px; border-bottom: 1px solid #e9ecef; }
        .metadata { margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h1>ATS Score Report</h1>
        <div class="score {{ band_class }}">{{ score }}</div>
        <p><strong>{{ band_label }}</strong>: {{ advisory }}</p>

        <h2>Score Breakdown</h2>
        <table>
            <tr><th>Component</th><th>Score</th><th>Weight</th></tr>
            {% for row in components %}
            <tr><td>{{ row.name }}</td><td>{{ row.percentage }}%</td><td>{{ row.weight }}</td></tr>
            {% endfor %}
        </table>

        <h2>Keyword Analysis</h2>
        <h3>Matched ({{ matched.len() }})</h3>
        {% if matched.is_empty() %}<p>No keywords matched yet</p>{% endif %}
        {% for keyword in matched %}<span class="chip chip-matched">{{ keyword }}</span>{% endfor %}
        <h3>Missing ({{ missing_total }})</h3>
        {% if missing.is_empty() %}<p>All keywords matched!</p>{% endif %}
        {% for keyword in missing %}<span class="chip chip-missing">{{ keyword }}</span>{% endfor %}

        <h2>Suggestions</h2>
        {% for card in cards %}
        <div class="card priority-{{ card.priority }}">
            <h3>{{ card.title }} <small>[{{ card.category }} / {{ card.priority }}]</small></h3>
            <ul>
            {% for item in card.items %}<li>{{ item }}</li>
            {% endfor %}
            </ul>
        </div>
        {% endfor %}

        <div class="metadata">
            <p>Generated {{ generated_at }} by ATS Scorer v{{ version }} in {{ processing_time }}ms</p>
            <p>Resume: {{ resume_source }} | Job: {{ job_source }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    score: u8,
    band_class: &'static str,
    band_label: &'static str,
    advisory: String,
    components: Vec<HtmlComponent>,
    matched: Vec<String>,
    missing: Vec<String>,
    missing_total: usize,
    cards: Vec<HtmlCard>,
    generated_at: String,
    version: String,
    processing_time: u64,
    resume_source: String,
    job_source: String,
}

struct HtmlComponent {
    name: &'static str,
    percentage: u8,
    weight: String,
}

struct HtmlCard {
    title: String,
    category: &'static str,
    priority: &'static str,
    items: Vec<String>,
}

fn category_tag(category: SuggestionCategory) -> &'static str {
    match category {
        SuggestionCategory::Keywords => "keywords",
        SuggestionCategory::Certifications => "certifications",
        SuggestionCategory::Skills => "skills",
        SuggestionCategory::Improvements => "improvements",
        SuggestionCategory::Format => "format",
    }
}

fn priority_tag(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "high",
        Priority::Medium => "medium",
        Priority::Low => "low",
    }
}

fn format_timestamp(report: &ScoreReport) -> String {
    report
        .metadata
        .generated_at
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool, max_missing_keywords: usize) -> Self {
        Self {
            use_colors,
            detailed,
            max_missing_keywords,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn band_color(band: ScoreBand) -> Color {
        match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::Yellow,
            ScoreBand::Fair => Color::BrightRed,
            ScoreBand::NeedsImprovement => Color::Red,
        }
    }

    fn format_score_badge(&self, band: ScoreBand) -> String {
        let badge = band.label().to_uppercase();
        if self.use_colors {
            format!("[{}]", badge.color(Self::band_color(band)).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_priority_icon(&self, priority: Priority) -> &'static str {
        if self.use_colors {
            match priority {
                Priority::High => "⚠️ ",
                Priority::Medium => "📋 ",
                Priority::Low => "💡 ",
            }
        } else {
            match priority {
                Priority::High => "[*] ",
                Priority::Medium => "[-] ",
                Priority::Low => "[+] ",
            }
        }
    }

    fn format_suggestion(&self, index: usize, suggestion: &Suggestion) -> String {
        let mut output = format!(
            "{}. {}{} {}\n",
            index,
            self.format_priority_icon(suggestion.priority),
            self.colorize(&suggestion.title, Color::White),
            self.colorize(
                &format!("({}, {} priority)", suggestion.category, suggestion.priority),
                Color::BrightBlack
            )
        );
        for item in &suggestion.items {
            output.push_str(&format!("   • {}\n", item));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let mut output = String::new();
        let analysis = &report.analysis;

        output.push_str(&self.format_header("📊 ATS SCORE REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(report),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Overall Score", 2));
        output.push_str(&format!(
            "ATS Score: {} {}\n",
            self.colorize(&format!("{}/100", analysis.score), Self::band_color(report.band)),
            self.format_score_badge(report.band)
        ));
        output.push_str(&format!("{}\n", self.colorize(&report.advisory, Color::Cyan)));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for component in report.components() {
            output.push_str(&format!(
                "  {:<16} {:>3}% (weight: {})\n",
                component.name,
                component.percentage(),
                component.weight
            ));
        }

        output.push_str(&self.format_header("🔍 Keyword Analysis", 2));
        output.push_str(&format!("Matched ({}): ", analysis.matched_keywords.len()));
        if analysis.matched_keywords.is_empty() {
            output.push_str("No keywords matched yet\n");
        } else {
            output.push_str(&format!(
                "{}\n",
                self.colorize(&analysis.matched_keywords.join(", "), Color::Green)
            ));
        }

        output.push_str(&format!("Missing ({}): ", analysis.missing_keywords.len()));
        if analysis.missing_keywords.is_empty() {
            output.push_str("All keywords matched!\n");
        } else {
            let shown: Vec<&str> = analysis
                .missing_keywords
                .iter()
                .take(self.max_missing_keywords)
                .map(String::as_str)
                .collect();
            output.push_str(&format!("{}\n", self.colorize(&shown.join(", "), Color::Red)));
        }

        output.push_str(&self.format_header("💡 Suggestions", 2));
        for (i, suggestion) in analysis.suggestions.iter().enumerate() {
            output.push_str(&self.format_suggestion(i + 1, suggestion));
            output.push('\n');
        }

        if self.detailed {
            output.push_str(&self.format_header("📊 Detailed Analysis", 2));
            output.push_str(&format!(
                "Weighted total before rounding: {:.2}\n",
                report.breakdown.weighted_total
            ));
            if !report.resume_keywords.is_empty() {
                output.push_str(&format!("Resume keywords: {}\n", report.resume_keywords.join(", ")));
            }
            output.push_str(&format!(
                "Resume: {} | Job: {} | Knowledge terms: {}\n",
                report.metadata.resume_source, report.metadata.job_source, report.metadata.knowledge_terms
            ));
        }

        output.push_str(&format!(
            "\n{} Generated by ATS Scorer v{}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.scorer_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, max_missing_keywords: usize) -> Self {
        Self {
            include_metadata,
            max_missing_keywords,
        }
    }

    fn markdown_score_badge(band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Excellent => "🟢 Excellent",
            ScoreBand::Good => "🟡 Good",
            ScoreBand::Fair => "🟠 Fair",
            ScoreBand::NeedsImprovement => "🔴 Needs Improvement",
        }
    }

    fn code_list(keywords: &[String]) -> String {
        format!("`{}`", keywords.join("`, `"))
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::from("# ATS Score Report\n\n");

        output.push_str(&format!(
            "**Score:** {}/100 ({})\n\n> {}\n\n",
            analysis.score,
            Self::markdown_score_badge(report.band),
            report.advisory
        ));

        output.push_str("## Score Breakdown\n\n| Component | Score | Weight |\n|---|---|---|\n");
        for component in report.components() {
            output.push_str(&format!(
                "| {} | {}% | {} |\n",
                component.name,
                component.percentage(),
                component.weight
            ));
        }

        output.push_str("\n## Keyword Analysis\n\n");
        output.push_str(&format!("**Matched ({}):** ", analysis.matched_keywords.len()));
        if analysis.matched_keywords.is_empty() {
            output.push_str("No keywords matched yet\n\n");
        } else {
            output.push_str(&format!("{}\n\n", Self::code_list(&analysis.matched_keywords)));
        }

        output.push_str(&format!("**Missing ({}):** ", analysis.missing_keywords.len()));
        if analysis.missing_keywords.is_empty() {
            output.push_str("All keywords matched!\n\n");
        } else {
            let shown: Vec<String> = analysis
                .missing_keywords
                .iter()
                .take(self.max_missing_keywords)
                .cloned()
                .collect();
            output.push_str(&format!("{}\n\n", Self::code_list(&shown)));
        }

        output.push_str("## Suggestions\n\n");
        for (i, suggestion) in analysis.suggestions.iter().enumerate() {
            output.push_str(&format!(
                "### {}. {}\n\n**Category:** {} | **Priority:** {}\n\n",
                i + 1,
                suggestion.title,
                suggestion.category,
                suggestion.priority
            ));
            for item in &suggestion.items {
                output.push_str(&format!("- {}\n", item));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated {} by ATS Scorer v{} in {}ms. Resume: {} | Job: {}*\n",
                format_timestamp(report),
                report.metadata.scorer_version,
                report.metadata.processing_time_ms,
                report.metadata.resume_source,
                report.metadata.job_source
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool, max_missing_keywords: usize) -> Self {
        Self {
            include_styles,
            max_missing_keywords,
        }
    }

    fn band_class(band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Excellent => "band-excellent",
            ScoreBand::Good => "band-good",
            ScoreBand::Fair => "band-fair",
            ScoreBand::NeedsImprovement => "band-poor",
        }
    }

    fn create_template_data(&self, report: &ScoreReport) -> HtmlTemplate {
        let analysis = &report.analysis;

        HtmlTemplate {
            include_styles: self.include_styles,
            score: analysis.score,
            band_class: Self::band_class(report.band),
            band_label: report.band.label(),
            advisory: report.advisory.clone(),
            components: report
                .components()
                .into_iter()
                .map(|c| HtmlComponent {
                    name: c.name,
                    percentage: c.percentage(),
                    weight: c.weight.to_string(),
                })
                .collect(),
            matched: analysis.matched_keywords.clone(),
            missing: analysis
                .missing_keywords
                .iter()
                .take(self.max_missing_keywords)
                .cloned()
                .collect(),
            missing_total: analysis.missing_keywords.len(),
            cards: analysis
                .suggestions
                .iter()
                .map(|s| HtmlCard {
                    title: s.title.clone(),
                    category: category_tag(s.category),
                    priority: priority_tag(s.priority),
                    items: s.items.clone(),
                })
                .collect(),
            generated_at: format_timestamp(report),
            version: report.metadata.scorer_version.clone(),
            processing_time: report.metadata.processing_time_ms,
            resume_source: report.metadata.resume_source.clone(),
            job_source: report.metadata.job_source.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        Ok(self.create_template_data(report).render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, 20)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, max_missing_keywords: usize) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed, max_missing_keywords),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(true, max_missing_keywords),
            html_formatter: HtmlFormatter::new(true, max_missing_keywords),
        }
    }

    pub fn generate_report(&self, report: &ScoreReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let resume_path = Path::new(resume_name);
    let base_name = match resume_path.file_stem() {
        Some(stem) if !is_stdin(resume_path) => stem.to_string_lossy(),
        _ => "resume".into(),
    };

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_ats{}.{}", base_name, timestamp_suffix, extension)
}
