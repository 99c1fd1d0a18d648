//! Report formatters for console, JSON and Markdown output

use crate::config::OutputFormat;
use crate::error::{Result, ResumeScannerError};
use crate::output::report::{AnalysisResult, ScanReport};
use crate::processing::document::ScoredCandidate;
use crate::processing::skill_extractor::ExtractedSkills;
use colored::{Color, Colorize};
use std::path::Path;

/// Output formatter trait for different formats
pub trait OutputFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String>;
    fn format_analysis(&self, analysis: &AnalysisResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

pub struct ReportGenerator {
    console: ConsoleFormatter,
    json: JsonFormatter,
    markdown: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_score_badge(&self, percentage: f64) -> String {
        let text = format!("{:>6.2}%", percentage);
        let color = match percentage {
            p if p >= 50.0 => Color::Green,
            p if p >= 20.0 => Color::Yellow,
            _ => Color::Red,
        };
        self.colorize(&text, color)
    }

    fn format_skills(&self, skills: &ExtractedSkills, out: &mut String) {
        for (category, found) in skills.iter() {
            if found.is_empty() && !self.detailed {
                continue;
            }
            let listed = if found.is_empty() {
                "-".to_string()
            } else {
                found.join(", ")
            };
            out.push_str(&format!("      {}: {}\n", category, listed));
        }
    }

    fn format_candidate(&self, rank: usize, candidate: &ScoredCandidate, out: &mut String) {
        out.push_str(&format!(
            "  {}. {} {}\n",
            rank,
            self.format_score_badge(candidate.percentage_match),
            self.colorize(&candidate.filename, Color::Cyan)
        ));

        let contacts = &candidate.contact_info;
        if !contacts.emails.is_empty() {
            out.push_str(&format!("      emails: {}\n", contacts.emails.join(", ")));
        }
        if !contacts.phones.is_empty() {
            out.push_str(&format!("      phones: {}\n", contacts.phones.join(", ")));
        }

        if candidate.skills.total_matches() > 0 || self.detailed {
            self.format_skills(&candidate.skills, out);
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        let mut out = String::new();

        out.push_str(&self.colorize("Ranked candidates", Color::Blue));
        out.push_str(&format!(
            " ({} ranked)\n\n",
            report.total_candidates
        ));

        for (idx, candidate) in report.ranked_candidates.iter().enumerate() {
            self.format_candidate(idx + 1, candidate, &mut out);
        }

        if !report.skipped.is_empty() {
            out.push('\n');
            out.push_str(&self.colorize("Skipped files", Color::Yellow));
            out.push('\n');
            for skipped in &report.skipped {
                out.push_str(&format!("  - {}: {}\n", skipped.filename, skipped.reason));
            }
        }

        if self.detailed {
            out.push_str(&format!(
                "\nGenerated at {}\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        Ok(out)
    }

    fn format_analysis(&self, analysis: &AnalysisResult) -> Result<String> {
        let mut out = String::new();
        out.push_str(&format!(
            "Match: {}\n",
            self.format_score_badge(analysis.percentage_match)
        ));
        if !analysis.contact_info.emails.is_empty() {
            out.push_str(&format!("Emails: {}\n", analysis.contact_info.emails.join(", ")));
        }
        if !analysis.contact_info.phones.is_empty() {
            out.push_str(&format!("Phones: {}\n", analysis.contact_info.phones.join(", ")));
        }
        out.push_str("Skills:\n");
        self.format_skills(&analysis.skills, &mut out);
        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_analysis(&self, analysis: &AnalysisResult) -> Result<String> {
        self.to_json(analysis)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    fn skills_cell(skills: &ExtractedSkills) -> String {
        let found: Vec<String> = skills
            .iter()
            .filter(|(_, found)| !found.is_empty())
            .map(|(category, found)| format!("**{}**: {}", category, found.join(", ")))
            .collect();

        if found.is_empty() {
            "-".to_string()
        } else {
            found.join("<br>")
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        let mut out = String::new();
        out.push_str("# Candidate Ranking\n\n");
        out.push_str(&format!(
            "_Generated {} · {} candidates_\n\n",
            report.generated_at.format("%Y-%m-%d %H:%M UTC"),
            report.total_candidates
        ));

        out.push_str("| Rank | File | Match | Skills | Contact |\n");
        out.push_str("|---:|---|---:|---|---|\n");
        for (idx, candidate) in report.ranked_candidates.iter().enumerate() {
            let contact: Vec<String> = candidate
                .contact_info
                .emails
                .iter()
                .chain(&candidate.contact_info.phones)
                .cloned()
                .collect();

            out.push_str(&format!(
                "| {} | {} | {:.2}% | {} | {} |\n",
                idx + 1,
                candidate.filename.replace('|', "\\|"),
                candidate.percentage_match,
                Self::skills_cell(&candidate.skills),
                if contact.is_empty() { "-".to_string() } else { contact.join(", ") }
            ));
        }

        if !report.skipped.is_empty() {
            out.push_str("\n## Skipped\n\n");
            for skipped in &report.skipped {
                out.push_str(&format!("- `{}`: {}\n", skipped.filename, skipped.reason));
            }
        }

        Ok(out)
    }

    fn format_analysis(&self, analysis: &AnalysisResult) -> Result<String> {
        let mut out = String::new();
        out.push_str("# Resume Analysis\n\n");
        out.push_str(&format!("**Match:** {:.2}%\n\n", analysis.percentage_match));
        out.push_str("## Skills\n\n");
        for (category, found) in analysis.skills.iter() {
            let listed = if found.is_empty() { "-".to_string() } else { found.join(", ") };
            out.push_str(&format!("- **{}**: {}\n", category, listed));
        }
        out.push_str("\n## Contact\n\n");
        for email in &analysis.contact_info.emails {
            out.push_str(&format!("- {}\n", email));
        }
        for phone in &analysis.contact_info.phones {
            out.push_str(&format!("- {}\n", phone));
        }
        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console: ConsoleFormatter::new(use_colors, detailed),
            json: JsonFormatter::new(pretty_json),
            markdown: MarkdownFormatter,
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console,
            OutputFormat::Json => &self.json,
            OutputFormat::Markdown => &self.markdown,
        }
    }

    pub fn generate_report(&self, report: &ScanReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    pub fn generate_analysis(&self, analysis: &AnalysisResult, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_analysis(analysis)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(file_path, content).map_err(|e| {
        ResumeScannerError::OutputFormatting(format!(
            "Failed to write report to '{}': {}",
            file_path.display(),
            e
        ))
    })
}

pub fn suggest_filename(format: OutputFormat, stem: &str, timestamp: bool) -> String {
    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    if timestamp {
        format!(
            "{}_{}.{}",
            stem,
            chrono::Utc::now().format("%Y%m%d_%H%M%S"),
            extension
        )
    } else {
        format!("{}.{}", stem, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::SkippedDocument;
    use crate::processing::contact_extractor::ContactInfo;
    use crate::processing::skill_extractor::SkillTaxonomy;

    fn sample_report() -> ScanReport {
        let candidate = ScoredCandidate::new(
            "jane.pdf".to_string(),
            0.4321,
            ExtractedSkills::empty(&SkillTaxonomy::default()),
            ContactInfo {
                emails: vec!["jane@example.com".to_string()],
                phones: vec!["4155551234".to_string()],
            },
        );
        ScanReport::new(
            vec![candidate],
            vec![SkippedDocument {
                filename: "old.doc".to_string(),
                reason: "unsupported".to_string(),
            }],
        )
    }

    #[test]
    fn test_console_output_without_colors() {
        let out = ConsoleFormatter::new(false, false)
            .format_report(&sample_report())
            .unwrap();

        assert!(out.contains("1.  43.21% jane.pdf"));
        assert!(out.contains("jane@example.com"));
        assert!(out.contains("old.doc: unsupported"));
    }

    #[test]
    fn test_json_output_parses() {
        let out = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["ranked_candidates"][0]["percentage_match"], 43.21);
        assert_eq!(value["skipped"][0]["filename"], "old.doc");
    }

    #[test]
    fn test_markdown_table() {
        let out = MarkdownFormatter.format_report(&sample_report()).unwrap();

        assert!(out.contains("| 1 | jane.pdf | 43.21% | - | jane@example.com, 4155551234 |"));
        assert!(out.contains("## Skipped"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, true);
        assert_eq!(generator.formatter(OutputFormat::Json).supports_format(), OutputFormat::Json);
        assert_eq!(
            generator.formatter(OutputFormat::Markdown).supports_format(),
            OutputFormat::Markdown
        );
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(OutputFormat::Json, "ranking", false), "ranking.json");
        assert!(suggest_filename(OutputFormat::Markdown, "ranking", true).ends_with(".md"));
    }
}
