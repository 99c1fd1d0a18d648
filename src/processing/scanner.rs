//! Request boundary: validates a scan request, runs the ranking engine and
//! shapes the response

use crate::config::Config;
use crate::error::{Result, ResumeScannerError};
use crate::input::manager::InputManager;
use crate::output::report::{AnalysisResult, ScanReport, ScanResponse, SkippedDocument};
use crate::processing::document::Document;
use crate::processing::ranking::RankingEngine;
use log::{info, warn};
use std::path::{Path, PathBuf};

pub const MISSING_JOB_DESCRIPTION: &str = "Job description is required";
pub const NO_CANDIDATES: &str = "No resume files uploaded";
pub const NO_VALID_CANDIDATES: &str = "No valid resumes could be processed";
pub const MISSING_ANALYSIS_INPUT: &str = "Both job_description and resume_text are required";

pub struct ResumeScanner {
    engine: RankingEngine,
}

impl ResumeScanner {
    pub fn new(engine: RankingEngine) -> Self {
        Self { engine }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(RankingEngine::from_config(config)?))
    }

    pub fn engine(&self) -> &RankingEngine {
        &self.engine
    }

    /// Rank already-extracted candidate documents.
    pub async fn scan(&self, job_description: &str, candidates: Vec<Document>) -> ScanResponse {
        self.scan_with_skipped(job_description, candidates, Vec::new())
            .await
    }

    /// Extract each file, drop the ones that fail, and rank the rest.
    pub async fn scan_files(
        &self,
        job_description: &str,
        paths: &[PathBuf],
        input: &mut InputManager,
    ) -> ScanResponse {
        if let Err(e) = Self::require_job_description(job_description) {
            return ScanResponse::error(e.to_string());
        }
        if paths.is_empty() {
            return ScanResponse::error(NO_CANDIDATES);
        }

        let (candidates, skipped) = Self::extract_candidates(paths, input, |_| {}).await;
        if candidates.is_empty() {
            return ScanResponse::error(NO_VALID_CANDIDATES);
        }

        self.scan_with_skipped(job_description, candidates, skipped)
            .await
    }

    /// Extract candidate documents from files. Files that cannot be read, are
    /// of an unsupported type or yield no text are returned as skipped.
    /// `on_file` is called with each file name once it has been handled.
    pub async fn extract_candidates<F>(
        paths: &[PathBuf],
        input: &mut InputManager,
        mut on_file: F,
    ) -> (Vec<Document>, Vec<SkippedDocument>)
    where
        F: FnMut(&str),
    {
        let mut candidates = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();

        for path in paths {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());

            match Self::load_candidate(input, path, &filename).await {
                Ok(document) => candidates.push(document),
                Err(e) => {
                    warn!("Skipping '{}': {}", filename, e);
                    skipped.push(SkippedDocument {
                        filename: filename.clone(),
                        reason: e.to_string(),
                    });
                }
            }
            on_file(&filename);
        }

        (candidates, skipped)
    }

    async fn load_candidate(
        input: &mut InputManager,
        path: &Path,
        filename: &str,
    ) -> Result<Document> {
        let text = input.extract_text(path).await?;
        let document = Document::new(filename, text);

        if document.is_blank() {
            return Err(ResumeScannerError::ExtractionFailure {
                source_id: filename.to_string(),
                reason: "no text could be extracted".to_string(),
            });
        }
        Ok(document)
    }

    /// Rank candidates that were extracted earlier, carrying the skipped list
    /// into the report.
    pub async fn scan_with_skipped(
        &self,
        job_description: &str,
        candidates: Vec<Document>,
        skipped: Vec<SkippedDocument>,
    ) -> ScanResponse {
        if let Err(e) = Self::require_job_description(job_description) {
            return ScanResponse::error(e.to_string());
        }
        if candidates.is_empty() {
            return if skipped.is_empty() {
                ScanResponse::error(NO_CANDIDATES)
            } else {
                ScanResponse::error(NO_VALID_CANDIDATES)
            };
        }

        info!("Ranking {} candidates", candidates.len());
        let ranked = self.engine.rank(candidates, job_description).await;

        ScanResponse::Ranked(ScanReport::new(ranked.into_candidates(), skipped))
    }

    /// Analyze one resume text against the job description.
    pub fn analyze(&self, job_description: &str, resume_text: &str) -> Result<AnalysisResult> {
        if job_description.trim().is_empty() || resume_text.trim().is_empty() {
            return Err(ResumeScannerError::InputMissing(
                MISSING_ANALYSIS_INPUT.to_string(),
            ));
        }

        let document = Document::new("resume", resume_text);
        Ok(self.engine.score_candidate(&document, job_description).into())
    }

    fn require_job_description(job_description: &str) -> Result<()> {
        if job_description.trim().is_empty() {
            Err(ResumeScannerError::InputMissing(
                MISSING_JOB_DESCRIPTION.to_string(),
            ))
        } else {
            Ok(())
        }
    }
}
