//! Job assistant: CV, LinkedIn, motivation letter and interview prep generator

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use job_assistant::cli::{self, Cli, Commands, ConfigAction, VocabularyAction};
use job_assistant::input::InputManager;
use job_assistant::output::console::ConsoleFormatter;
use job_assistant::output::pdf::PrintPdfRenderer;
use job_assistant::output::{DocumentComposer, DocumentKind, Exporter};
use job_assistant::processing::vocabulary::Vocabulary;
use job_assistant::{ApplicationAnalyzer, ApplicationInput, Config, JobAssistantError, ProfileInput, Result};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_or_create(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Generate {
            resume,
            job,
            job_text,
            profile_url,
            about,
            about_file,
            format,
            only,
            output_dir,
            print,
        } => {
            info!("Starting document generation");

            let export_format = match format {
                Some(format) => cli::parse_export_format(&format).map_err(JobAssistantError::InvalidInput)?,
                None => config.output.default_format,
            };
            let kinds = match only {
                Some(kind) => vec![cli::parse_document_kind(&kind).map_err(JobAssistantError::InvalidInput)?],
                None => DocumentKind::ALL.to_vec(),
            };

            println!("🚀 Job application assistant");
            println!("📄 Resume: {}", resume.display());

            let mut input_manager = InputManager::new();
            let resume_text = read_document(&mut input_manager, &resume, "Resume").await?;
            let job_text = read_job(&mut input_manager, job, job_text).await?;
            let about = match (about, about_file) {
                (Some(text), _) => Some(text),
                (None, Some(path)) => Some(read_document(&mut input_manager, &path, "About section").await?),
                (None, None) => None,
            };

            let analyzer = ApplicationAnalyzer::from_config(&config)?;
            let analysis = analyzer.analyze(&ApplicationInput {
                resume_text,
                job_text,
                profile: ProfileInput { url: profile_url, about },
            });

            println!(
                "\n🎯 {} at {}: {}% CV match ({} exact, {} partial, {} missing)",
                analysis.position_name,
                analysis.company_name,
                analysis.cv_match.match_percentage,
                analysis.cv_match.matched.len(),
                analysis.cv_match.partial.len(),
                analysis.cv_match.missing.len()
            );
            if let Some(profile_match) = &analysis.profile_match {
                println!("🔗 LinkedIn About match: {}%", profile_match.match_percentage);
            }

            let composer = DocumentComposer::new(analyzer.vocabulary());
            let exporter = Exporter::with_renderer(
                output_dir.unwrap_or_else(|| config.output_dir().clone()),
                PrintPdfRenderer::new(config.pdf.clone()),
            );
            let generated_at = chrono::Local::now().naive_local();

            let progress = ProgressBar::new(kinds.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .map_err(|e| JobAssistantError::Configuration(format!("Invalid progress template: {}", e)))?
                    .progress_chars("=> "),
            );

            let mut outcomes = Vec::new();
            for kind in kinds {
                progress.set_message(kind.title());
                let content = composer.compose(kind, &analysis, generated_at)?;
                if print {
                    progress.suspend(|| println!("\n{}\n{}", kind.title().to_uppercase(), content));
                }
                outcomes.extend(exporter.export(kind, &content, export_format, generated_at)?);
                progress.inc(1);
            }
            progress.finish_and_clear();

            let formatter = ConsoleFormatter::new(config.output.color_output, false);
            if outcomes.is_empty() {
                println!("\n💡 Export format is 'none', nothing was written");
            } else {
                println!("\n📁 Generated files in {}:", exporter.output_dir().display());
                print!("{}", formatter.format_exports(&outcomes));
            }
            println!("\n✅ Done!");
        }

        Commands::Analyze {
            resume,
            job,
            job_text,
            about,
            detailed,
            json,
        } => {
            let mut input_manager = InputManager::new();
            let resume_text = read_document(&mut input_manager, &resume, "Resume").await?;
            let job_text = read_job(&mut input_manager, job, job_text).await?;

            let analyzer = ApplicationAnalyzer::from_config(&config)?;
            let analysis = analyzer.analyze(&ApplicationInput {
                resume_text,
                job_text,
                profile: ProfileInput { url: None, about },
            });

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                let formatter = ConsoleFormatter::new(config.output.color_output, detailed);
                print!("{}", formatter.format_analysis(&analysis));
            }
        }

        Commands::Vocabulary { action } => match action {
            VocabularyAction::Show => {
                let analyzer = ApplicationAnalyzer::from_config(&config)?;
                print_vocabulary(analyzer.vocabulary());
            }
            VocabularyAction::Export { path } => {
                let analyzer = ApplicationAnalyzer::from_config(&config)?;
                let json = analyzer.vocabulary().to_json_pretty()?;
                match path {
                    Some(path) => {
                        std::fs::write(&path, json)?;
                        println!("💾 Vocabulary written to {}", path.display());
                    }
                    None => println!("{}", json),
                }
            }
            VocabularyAction::Validate { path } => {
                let vocabulary = Vocabulary::load(&path)?;
                println!("✅ {} is valid", path.display());
                print_vocabulary(&vocabulary);
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| JobAssistantError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", rendered);
            }
            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },

        Commands::Clean => {
            let exporter = Exporter::from_config(&config);
            let removed = exporter.clear()?;
            println!("🗑️  Removed {} generated files from {}", removed, exporter.output_dir().display());
        }
    }

    Ok(())
}

async fn read_document(input_manager: &mut InputManager, path: &Path, label: &str) -> Result<String> {
    cli::validate_file_extension(path, cli::DOCUMENT_EXTENSIONS)
        .map_err(|e| JobAssistantError::InvalidInput(format!("{} file: {}", label, e)))?;

    println!("📂 Reading {}: {}", label.to_lowercase(), path.display());
    let text = input_manager.extract_text(path).await?;
    if text.trim().is_empty() {
        return Err(JobAssistantError::InvalidInput(format!(
            "{} file contains no text: {}",
            label,
            path.display()
        )));
    }
    Ok(text)
}

async fn read_job(input_manager: &mut InputManager, job: Option<PathBuf>, job_text: Option<String>) -> Result<String> {
    match (job, job_text) {
        (_, Some(text)) if !text.trim().is_empty() => Ok(text),
        (Some(path), _) => read_document(input_manager, &path, "Job description").await,
        _ => Err(JobAssistantError::InvalidInput(
            "A job description is required (--job or --job-text)".to_string(),
        )),
    }
}

fn print_vocabulary(vocabulary: &Vocabulary) {
    println!("📚 Vocabulary: {} v{}", vocabulary.name, vocabulary.version);
    if let Some(description) = &vocabulary.description {
        println!("   {}", description);
    }
    println!("\nSkill categories:");
    for category in &vocabulary.skill_categories {
        println!("  • {}: {}", category.name, category.terms.join(", "));
    }
    println!("\nUnique skill terms: {}", vocabulary.skill_term_count());
    println!("Soft skills: {}", vocabulary.soft_skills.len());
    println!("Qualifications: {}", vocabulary.qualifications.len());
    println!("Experience patterns: {}", vocabulary.experience_patterns.len());
    println!("Achievement patterns: {}", vocabulary.achievement_patterns.len());
}
