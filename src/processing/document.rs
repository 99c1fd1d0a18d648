//! Candidate documents and scored results

use crate::processing::contact_extractor::ContactInfo;
use crate::processing::skill_extractor::ExtractedSkills;
use serde::{Deserialize, Serialize};

/// A source identifier (usually the file name) plus its extracted raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One ranked candidate. Ordering key is `similarity_score`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub filename: String,
    pub similarity_score: f64,
    pub percentage_match: f64,
    pub skills: ExtractedSkills,
    pub contact_info: ContactInfo,
}

impl ScoredCandidate {
    pub fn new(
        filename: String,
        similarity_score: f64,
        skills: ExtractedSkills,
        contact_info: ContactInfo,
    ) -> Self {
        let similarity_score = similarity_score.clamp(0.0, 1.0);
        Self {
            filename,
            similarity_score,
            percentage_match: to_percentage(similarity_score),
            skills,
            contact_info,
        }
    }
}

/// `score * 100` rounded to two decimal places.
pub fn to_percentage(score: f64) -> f64 {
    (score * 100.0 * 100.0).round() / 100.0
}

/// Candidates in descending score order; ties keep their input order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RankedResult {
    candidates: Vec<ScoredCandidate>,
}

impl RankedResult {
    /// Stable sort of `candidates` by descending similarity.
    pub fn from_unsorted(mut candidates: Vec<ScoredCandidate>) -> Self {
        candidates.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        Self { candidates }
    }

    pub fn candidates(&self) -> &[ScoredCandidate] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<ScoredCandidate> {
        self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn top(&self) -> Option<&ScoredCandidate> {
        self.candidates.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, score: f64) -> ScoredCandidate {
        ScoredCandidate::new(
            name.to_string(),
            score,
            ExtractedSkills::default(),
            ContactInfo::default(),
        )
    }

    #[test]
    fn test_document_creation() {
        let doc = Document::new("resume.pdf", "Jane Doe\nRust engineer");
        assert_eq!(doc.id, "resume.pdf");
        assert_eq!(doc.word_count(), 4);
        assert!(!doc.is_blank());
        assert!(Document::new("empty.docx", "  \n").is_blank());
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(to_percentage(0.123456), 12.35);
        assert_eq!(to_percentage(1.0), 100.0);
        assert_eq!(to_percentage(0.0), 0.0);
        assert_eq!(candidate("a", 0.5).percentage_match, 50.0);
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let ranked = RankedResult::from_unsorted(vec![
            candidate("low", 0.1),
            candidate("tie-first", 0.5),
            candidate("high", 0.9),
            candidate("tie-second", 0.5),
        ]);

        let names: Vec<&str> = ranked
            .candidates()
            .iter()
            .map(|c| c.filename.as_str())
            .collect();
        assert_eq!(names, vec!["high", "tie-first", "tie-second", "low"]);
        assert_eq!(ranked.top().map(|c| c.filename.as_str()), Some("high"));
    }
}
