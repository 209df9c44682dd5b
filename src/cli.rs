//! CLI interface for the ATS scorer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ats-scorer")]
#[command(about = "Score a resume against a job description the way an ATS would")]
#[command(long_about = "Estimate ATS compatibility from keyword coverage, formatting, skills, certifications and quantified content, with prioritized suggestions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job description
    Analyze {
        /// Path to resume file (TXT, MD), or - for stdin
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD), or - for stdin
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include the score breakdown details and resume keywords
        #[arg(short, long)]
        detailed: bool,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,

        /// TOML file replacing the built-in knowledge tables
        #[arg(short, long)]
        knowledge: Option<PathBuf>,
    },

    /// Inspect the knowledge tables
    Knowledge {
        #[command(subcommand)]
        action: KnowledgeAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum KnowledgeAction {
    /// Summarize the active tables
    Show,

    /// Write the active tables as TOML
    Export {
        /// Destination file; printed to stdout when omitted
        #[arg(short, long)]
        save: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_parse_analyze_command() {
        let cli = Cli::parse_from([
            "ats-scorer", "analyze", "--resume", "cv.md", "--job", "-", "--output", "html", "--no-color",
        ]);

        match cli.command {
            Commands::Analyze { resume, job, output, no_color, .. } => {
                assert_eq!(resume, PathBuf::from("cv.md"));
                assert_eq!(job, PathBuf::from("-"));
                assert_eq!(output.as_deref(), Some("html"));
                assert!(no_color);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("job.TXT"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("job.pdf"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("job"), &["txt", "md"]).is_err());
    }
}
