//! Response and report structures rendered by the request boundary

use crate::processing::contact_extractor::ContactInfo;
use crate::processing::document::ScoredCandidate;
use crate::processing::skill_extractor::ExtractedSkills;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Either a ranked report or a single error message.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScanResponse {
    Ranked(ScanReport),
    Error(ErrorResponse),
}

impl ScanResponse {
    pub fn error(message: impl Into<String>) -> Self {
        ScanResponse::Error(ErrorResponse {
            error: message.into(),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ScanResponse::Error(_))
    }

    pub fn report(&self) -> Option<&ScanReport> {
        match self {
            ScanResponse::Ranked(report) => Some(report),
            ScanResponse::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ScanResponse::Ranked(_) => None,
            ScanResponse::Error(e) => Some(&e.error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Ranked candidates for one job description.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub ranked_candidates: Vec<ScoredCandidate>,
    pub total_candidates: usize,
    /// Documents excluded before ranking and why
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedDocument>,
    pub generated_at: DateTime<Utc>,
}

impl ScanReport {
    pub fn new(ranked_candidates: Vec<ScoredCandidate>, skipped: Vec<SkippedDocument>) -> Self {
        Self {
            total_candidates: ranked_candidates.len(),
            ranked_candidates,
            skipped,
            generated_at: Utc::now(),
        }
    }

    /// Keep only the first `n` candidates; `total_candidates` still counts all.
    pub fn truncate(&mut self, n: usize) {
        self.ranked_candidates.truncate(n);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub filename: String,
    pub reason: String,
}

/// Single resume analysis against a job description.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub similarity_score: f64,
    pub percentage_match: f64,
    pub skills: ExtractedSkills,
    pub contact_info: ContactInfo,
}

impl From<ScoredCandidate> for AnalysisResult {
    fn from(candidate: ScoredCandidate) -> Self {
        Self {
            similarity_score: candidate.similarity_score,
            percentage_match: candidate.percentage_match,
            skills: candidate.skills,
            contact_info: candidate.contact_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let response = ScanResponse::error("No resume files uploaded");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "error": "No resume files uploaded" }));
        assert!(response.is_error());
        assert_eq!(response.error_message(), Some("No resume files uploaded"));
    }

    #[test]
    fn test_report_shape() {
        let candidate = ScoredCandidate::new(
            "a.pdf".to_string(),
            0.25,
            ExtractedSkills::default(),
            ContactInfo::default(),
        );
        let response = ScanResponse::Ranked(ScanReport::new(vec![candidate], Vec::new()));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["total_candidates"], 1);
        assert_eq!(json["ranked_candidates"][0]["filename"], "a.pdf");
        assert_eq!(json["ranked_candidates"][0]["percentage_match"], 25.0);
        assert!(json["ranked_candidates"][0]["contact_info"]["emails"].is_array());
        assert!(json.get("skipped").is_none());
    }
}
