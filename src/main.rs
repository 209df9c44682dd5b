//! ATS scorer: resume and job description compatibility scoring

use ats_scorer::cli::{self, Cli, Commands, ConfigAction, KnowledgeAction};
use ats_scorer::config::Config;
use ats_scorer::input::file_detector::is_stdin;
use ats_scorer::input::InputManager;
use ats_scorer::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use ats_scorer::output::report::{ReportSources, ScoreReport};
use ats_scorer::{AnalysisEngine, AtsScorerError, KnowledgeBase, Result};
use clap::Parser;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration; a reset must work even when the current file is broken
    let resetting = matches!(
        cli.command,
        Commands::Config {
            action: Some(ConfigAction::Reset)
        }
    );
    let config = match &cli.config {
        _ if resetting => Ok(Config::default()),
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            save,
            detailed,
            no_color,
            knowledge,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(AtsScorerError::InvalidInput)?,
                None => config.output.format,
            };

            if is_stdin(&resume) && is_stdin(&job) {
                return Err(AtsScorerError::InvalidInput(
                    "Only one of --resume and --job can be read from stdin".to_string(),
                ));
            }

            let knowledge_base = load_knowledge(&config, knowledge.as_deref())?;
            let knowledge_terms = knowledge_base.term_count();
            let engine = AnalysisEngine::new(knowledge_base, config.settings())?;

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume)?;
            let job_text = input_manager.extract_text(&job)?;
            debug!(
                "Resume: {} characters, job description: {} characters",
                resume_text.len(),
                job_text.len()
            );

            info!("Scoring {} against {}", resume.display(), job.display());
            let started = Instant::now();
            let evaluation = engine.evaluate(&resume_text, &job_text);
            let processing_time_ms = started.elapsed().as_millis() as u64;

            let resume_source = resume.display().to_string();
            let job_source = job.display().to_string();
            let report = ScoreReport::from_evaluation(
                evaluation,
                *engine.weights(),
                ReportSources {
                    resume: &resume_source,
                    job: &job_source,
                    processing_time_ms,
                    knowledge_terms,
                },
            );

            // Files never carry ANSI escapes
            let use_colors = config.output.color_output && !no_color && save.is_none();
            let generator = ReportGenerator::with_options(
                use_colors,
                detailed || config.output.detailed,
                true,
                config.output.max_missing_keywords,
            );
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(output_format, &resume_source, true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Knowledge { action } => {
            let knowledge_base = load_knowledge(&config, None)?;

            match action {
                KnowledgeAction::Show => print_knowledge_summary(&knowledge_base),
                KnowledgeAction::Export { save } => {
                    let content = knowledge_base.to_toml_string()?;
                    match save {
                        Some(path) => {
                            save_report_to_file(&content, &path)?;
                            println!("✅ Knowledge tables exported to {}", path.display());
                        }
                        None => print!("{}", content),
                    }
                }
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);

            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    println!("📁 Config file: {}", path.display());
                    let content = toml::to_string_pretty(&config)
                        .map_err(|e| AtsScorerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                    println!("{}", content);
                }
                ConfigAction::Reset => {
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset to defaults at {}", path.display());
                }
                ConfigAction::Path => println!("{}", path.display()),
            }
        }
    }

    Ok(())
}

fn load_knowledge(config: &Config, override_path: Option<&Path>) -> Result<KnowledgeBase> {
    if let Some(path) = override_path {
        cli::validate_file_extension(path, &["toml"])
            .map_err(|e| AtsScorerError::InvalidInput(format!("Knowledge file: {}", e)))?;
    }

    let knowledge_base = config.knowledge_base(override_path)?;
    debug!("Loaded {} knowledge terms", knowledge_base.term_count());
    Ok(knowledge_base)
}

fn print_knowledge_summary(knowledge: &KnowledgeBase) {
    println!("📚 Knowledge tables ({} terms)", knowledge.term_count());
    println!("  • Stop words: {}", knowledge.stop_words.len());
    println!("  • Common skills: {}", knowledge.common_skills.len());
    println!("  • Technical skills: {}", knowledge.technical_skills.len());
    println!("  • Certification keywords: {}", knowledge.certification_keywords.len());
    println!("  • Action verbs: {}", knowledge.action_verbs.len());
    println!("  • Tip action verbs: {}", knowledge.tip_action_verbs.len());
    println!("  • Certification tracks:");
    for track in &knowledge.certification_tracks {
        println!(
            "    - {}: {} signals, {}",
            track.domain,
            track.signals.len(),
            track.certifications.join(", ")
        );
    }
}
