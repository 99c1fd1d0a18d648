//! CLI interface for the resume scanner

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-scanner")]
#[command(about = "Rank resumes against a job description")]
#[command(long_about = "Score resumes against a job description with TF-IDF cosine similarity, and pull out skills and contact details for each candidate")]
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

/// Where the job description comes from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct JobSource {
    /// Path to job description file (TXT, MD, PDF, DOCX)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    pub job_text: Option<String>,
}

/// Where the single resume comes from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ResumeSource {
    /// Path to resume file (PDF, DOCX, TXT, MD)
    #[arg(short, long)]
    pub resume: Option<PathBuf>,

    /// Resume text given inline
    #[arg(long)]
    pub resume_text: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank a batch of resumes against a job description
    Scan {
        #[command(flatten)]
        job: JobSource,

        /// Resume files (PDF, DOCX, TXT, MD)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show every skill category, including empty ones
        #[arg(short, long)]
        detailed: bool,

        /// Only show the best N candidates
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Analyze one resume against a job description
    Analyze {
        #[command(flatten)]
        job: JobSource,

        #[command(flatten)]
        resume: ResumeSource,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the active skill taxonomy
    Skills,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("md").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_scan_needs_exactly_one_job_source() {
        let parsed = Cli::try_parse_from(["resume-scanner", "scan", "--job-text", "rust", "a.pdf", "b.docx"]);
        let cli = parsed.unwrap();
        match cli.command {
            Commands::Scan { job, resumes, .. } => {
                assert_eq!(job.job_text.as_deref(), Some("rust"));
                assert_eq!(resumes.len(), 2);
            }
            _ => panic!("expected scan"),
        }

        assert!(Cli::try_parse_from(["resume-scanner", "scan", "a.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "resume-scanner", "scan", "--job", "j.txt", "--job-text", "rust", "a.pdf"
        ])
        .is_err());
    }
}
