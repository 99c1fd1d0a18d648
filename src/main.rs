//! Resume scanner: rank resumes against a job description

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_scanner::cli::{self, Cli, Commands, ConfigAction, JobSource, ResumeSource};
use resume_scanner::config::OutputFormat;
use resume_scanner::input::InputManager;
use resume_scanner::output::formatter::{save_report_to_file, ReportGenerator};
use resume_scanner::output::report::ScanResponse;
use resume_scanner::{Config, Result, ResumeScanner, ResumeScannerError};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_file: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Scan {
            job,
            resumes,
            output,
            save,
            detailed,
            top,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let mut input_manager = InputManager::new();
            let job_description = read_job(&job, &mut input_manager).await?;

            let scanner = ResumeScanner::from_config(&config)?;
            info!("Scanning {} resume files", resumes.len());

            let progress = extraction_progress(resumes.len() as u64);
            let (candidates, skipped) =
                ResumeScanner::extract_candidates(&resumes, &mut input_manager, |name| {
                    progress.set_message(name.to_string());
                    progress.inc(1);
                })
                .await;
            progress.finish_and_clear();

            let response = scanner
                .scan_with_skipped(&job_description, candidates, skipped)
                .await;

            let mut report = match response {
                ScanResponse::Ranked(report) => report,
                ScanResponse::Error(e) => {
                    return Err(ResumeScannerError::InvalidInput(e.error));
                }
            };
            if let Some(n) = top {
                report.truncate(n);
            }

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                config.output.pretty_json,
            );
            let rendered = generator.generate_report(&report, format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!("{} {}", "Report saved to".green(), path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Analyze { job, resume, output } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let mut input_manager = InputManager::new();
            let job_description = read_job(&job, &mut input_manager).await?;
            let resume_text = read_resume(&resume, &mut input_manager).await?;

            let scanner = ResumeScanner::from_config(&config)?;
            let analysis = scanner.analyze(&job_description, &resume_text)?;

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                true,
                config.output.pretty_json,
            );
            println!("{}", generator.generate_analysis(&analysis, format)?);
        }

        Commands::Skills => {
            println!("{}", "Skill taxonomy".blue().bold());
            for category in &config.taxonomy.categories {
                println!(
                    "\n{} ({} keywords)",
                    category.name.cyan(),
                    category.keywords.len()
                );
                println!("  {}", category.keywords.join(", "));
            }
        }

        Commands::Config { action } => {
            let path = config_file.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("Configuration file: {}\n", path.display());
                    println!("Matching:");
                    println!("  Max features: {}", config.matching.max_features);
                    println!("  Max n-gram: {}", config.matching.max_ngram);
                    println!("  Max concurrency: {}", config.matching.max_concurrency);
                    println!("\nTaxonomy:");
                    for name in config.taxonomy.category_names() {
                        println!("  {}", name);
                    }
                    println!("\nOutput:");
                    println!("  Format: {:?}", config.output.format);
                    println!("  Pretty JSON: {}", config.output.pretty_json);
                    println!("  Colors: {}", config.output.color_output);
                    println!("  Detailed: {}", config.output.detailed);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("{} {}", "Configuration reset:".green(), path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn resolve_format(flag: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match flag {
        Some(flag) => cli::parse_output_format(flag).map_err(ResumeScannerError::InvalidInput),
        None => Ok(config.output.format),
    }
}

async fn read_job(source: &JobSource, input: &mut InputManager) -> Result<String> {
    match (&source.job_text, &source.job) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => input.extract_text(path).await,
        (None, None) => Err(ResumeScannerError::InvalidInput(
            "A job description file or text is required".to_string(),
        )),
    }
}

async fn read_resume(source: &ResumeSource, input: &mut InputManager) -> Result<String> {
    match (&source.resume_text, &source.resume) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => input.extract_text(path).await,
        (None, None) => Err(ResumeScannerError::InvalidInput(
            "A resume file or text is required".to_string(),
        )),
    }
}

fn extraction_progress(len: u64) -> ProgressBar {
    let progress = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    progress.set_style(style);
    progress
}
