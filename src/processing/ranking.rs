//! Candidate ranking: parallel per-candidate scoring followed by one sort

use crate::config::Config;
use crate::error::Result;
use crate::processing::contact_extractor::{ContactExtractor, ContactInfo};
use crate::processing::document::{Document, RankedResult, ScoredCandidate};
use crate::processing::skill_extractor::{ExtractedSkills, SkillExtractor, SkillTaxonomy};
use crate::processing::vector_space::VectorSpaceModel;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle};

/// Scores candidates against a job description and orders them.
///
/// Each candidate is scored on the blocking pool independently of the others;
/// results are joined in input order and sorted once.
#[derive(Clone)]
pub struct RankingEngine {
    model: Arc<VectorSpaceModel>,
    skills: Arc<SkillExtractor>,
    contacts: Arc<ContactExtractor>,
    permits: Arc<Semaphore>,
}

impl RankingEngine {
    pub fn new(
        model: VectorSpaceModel,
        skills: SkillExtractor,
        contacts: ContactExtractor,
        max_concurrency: usize,
    ) -> Self {
        Self {
            model: Arc::new(model),
            skills: Arc::new(skills),
            contacts: Arc::new(contacts),
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let model = VectorSpaceModel::new(config.matching.max_features, config.matching.max_ngram);
        let skills = SkillExtractor::new(Arc::new(config.taxonomy.clone()))?;
        let contacts = ContactExtractor::new()?;

        Ok(Self::new(
            model,
            skills,
            contacts,
            config.matching.max_concurrency,
        ))
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        self.skills.taxonomy()
    }

    pub fn model(&self) -> &VectorSpaceModel {
        &self.model
    }

    pub fn skill_extractor(&self) -> &SkillExtractor {
        &self.skills
    }

    pub fn contact_extractor(&self) -> &ContactExtractor {
        &self.contacts
    }

    /// Score a single candidate synchronously.
    pub fn score_candidate(&self, candidate: &Document, job_description: &str) -> ScoredCandidate {
        score_with(
            &self.model,
            &self.skills,
            &self.contacts,
            candidate,
            job_description,
        )
    }

    /// Rank all candidates against the job description.
    ///
    /// A candidate whose scoring task fails is kept with a 0.0 score and empty
    /// extraction results.
    pub async fn rank(&self, candidates: Vec<Document>, job_description: &str) -> RankedResult {
        let job: Arc<str> = Arc::from(job_description);
        let mut handles = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let filename = candidate.id.clone();
            let model = Arc::clone(&self.model);
            let skills = Arc::clone(&self.skills);
            let contacts = Arc::clone(&self.contacts);
            let permits = Arc::clone(&self.permits);
            let job = Arc::clone(&job);

            let handle = tokio::spawn(async move {
                // Never closed; a failed acquire just runs without a permit.
                let _permit = permits.acquire_owned().await.ok();
                tokio::task::spawn_blocking(move || {
                    score_with(&model, &skills, &contacts, &candidate, &job)
                })
                .await
            });
            handles.push((filename, handle));
        }

        let mut scored = Vec::with_capacity(handles.len());
        for (filename, handle) in handles {
            scored.push(join_scored(filename, handle, self.skills.taxonomy()).await);
        }

        RankedResult::from_unsorted(scored)
    }
}

type ScoringHandle = JoinHandle<std::result::Result<ScoredCandidate, JoinError>>;

/// Wait for one scoring task; a panicked or cancelled task yields an unscored candidate.
async fn join_scored(
    filename: String,
    handle: ScoringHandle,
    taxonomy: &SkillTaxonomy,
) -> ScoredCandidate {
    match handle.await {
        Ok(Ok(candidate)) => candidate,
        Ok(Err(e)) | Err(e) => {
            warn!("Scoring failed for '{}': {}; using score 0.0", filename, e);
            ScoredCandidate::new(
                filename,
                0.0,
                ExtractedSkills::empty(taxonomy),
                ContactInfo::default(),
            )
        }
    }
}

fn score_with(
    model: &VectorSpaceModel,
    skills: &SkillExtractor,
    contacts: &ContactExtractor,
    candidate: &Document,
    job_description: &str,
) -> ScoredCandidate {
    let similarity = model.similarity(&candidate.text, job_description);
    debug!("'{}' similarity {:.4}", candidate.id, similarity);

    ScoredCandidate::new(
        candidate.id.clone(),
        similarity,
        skills.extract_skills(&candidate.text),
        contacts.extract_contacts(&candidate.text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RankingEngine {
        RankingEngine::from_config(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_high_overlap_ranks_first() {
        let job = "Senior Python developer with Django, PostgreSQL and Docker experience";
        let candidates = vec![
            Document::new("gardener.pdf", "Landscape gardener, hedge trimming, lawn care"),
            Document::new(
                "python_dev.docx",
                "Python developer: Django REST APIs on PostgreSQL, deployed with Docker",
            ),
        ];

        let ranked = engine().rank(candidates, job).await;

        assert_eq!(ranked.len(), 2);
        let first = &ranked.candidates()[0];
        let second = &ranked.candidates()[1];
        assert_eq!(first.filename, "python_dev.docx");
        assert!(first.percentage_match > second.percentage_match);
    }

    #[tokio::test]
    async fn test_ties_keep_input_order() {
        let job = "rust engineer";
        let candidates = (0..6)
            .map(|i| Document::new(format!("same-{}.pdf", i), "Rust engineer"))
            .collect();

        let ranked = engine().rank(candidates, job).await;
        let names: Vec<&str> = ranked
            .candidates()
            .iter()
            .map(|c| c.filename.as_str())
            .collect();

        assert_eq!(
            names,
            vec!["same-0.pdf", "same-1.pdf", "same-2.pdf", "same-3.pdf", "same-4.pdf", "same-5.pdf"]
        );
    }

    #[tokio::test]
    async fn test_output_sorted_descending() {
        let job = "kubernetes docker aws terraform devops engineer";
        let candidates = vec![
            Document::new("a", "docker"),
            Document::new("b", "kubernetes docker aws terraform devops engineer"),
            Document::new("c", "chef"),
            Document::new("d", "aws devops engineer"),
        ];

        let ranked = engine().rank(candidates, job).await;
        let scores: Vec<f64> = ranked.candidates().iter().map(|c| c.similarity_score).collect();

        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[tokio::test]
    async fn test_failed_task_falls_back_to_zero() {
        let handle: ScoringHandle = tokio::spawn(async {
            tokio::task::spawn_blocking(|| -> ScoredCandidate { panic!("scoring blew up") }).await
        });
        let taxonomy = SkillTaxonomy::default();

        let candidate = join_scored("broken.pdf".to_string(), handle, &taxonomy).await;

        assert_eq!(candidate.filename, "broken.pdf");
        assert_eq!(candidate.similarity_score, 0.0);
        assert_eq!(candidate.percentage_match, 0.0);
        assert_eq!(candidate.skills.len(), 5);
        assert_eq!(candidate.skills.total_matches(), 0);
        assert!(candidate.contact_info.is_empty());
    }

    #[tokio::test]
    async fn test_empty_candidate_list() {
        let ranked = engine().rank(Vec::new(), "anything").await;
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_score_candidate_fields() {
        let candidate = Document::new(
            "jane.pdf",
            "Jane Doe - jane@example.com - (415) 555-1234\nI have 5 years experience with Python and Flask",
        );
        let scored = engine().score_candidate(&candidate, "python flask developer needed");

        assert!(scored.percentage_match > 0.0);
        assert_eq!(scored.contact_info.emails, vec!["jane@example.com".to_string()]);
        assert!(scored.contact_info.phones.contains(&"4155551234".to_string()));
        assert!(scored.skills.get("programming").unwrap().contains(&"python".to_string()));
    }

    #[tokio::test]
    async fn test_concurrency_of_one_still_ranks_everything() {
        let mut config = Config::default();
        config.matching.max_concurrency = 1;
        let engine = RankingEngine::from_config(&config).unwrap();

        let candidates = (0..10)
            .map(|i| Document::new(format!("{}", i), format!("candidate {} rust", i)))
            .collect();
        let ranked = engine.rank(candidates, "rust").await;
        assert_eq!(ranked.len(), 10);
    }
}
