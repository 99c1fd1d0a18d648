//! TF-IDF vector space model with cosine similarity
//!
//! The vocabulary is fitted on exactly the documents being compared and is
//! thrown away afterwards. Two comparisons never share vocabulary state.

use crate::error::{Result, ResumeScannerError};
use crate::processing::text_processor::{content_tokens, normalize};
use std::collections::{BTreeMap, HashMap};

/// Default vocabulary cap per comparison
pub const DEFAULT_MAX_FEATURES: usize = 1000;

/// Default n-gram upper bound (unigrams and bigrams)
pub const DEFAULT_MAX_NGRAM: usize = 2;

#[derive(Debug, Clone)]
pub struct VectorSpaceModel {
    max_features: usize,
    max_ngram: usize,
}

/// Vocabulary terms in alphabetical order; a term's position is its column.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
}

impl Vocabulary {
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms
            .binary_search_by(|probe| probe.as_str().cmp(term))
            .ok()
    }
}

/// L2-normalized TF-IDF rows, one per input document, over a shared vocabulary.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    pub vocabulary: Vocabulary,
    pub idf: Vec<f64>,
    pub rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    /// Cosine similarity between two rows, clamped to [0, 1].
    pub fn cosine(&self, a: usize, b: usize) -> Result<f64> {
        let (row_a, row_b) = match (self.rows.get(a), self.rows.get(b)) {
            (Some(row_a), Some(row_b)) => (row_a, row_b),
            _ => {
                return Err(ResumeScannerError::Processing(format!(
                    "row index out of range: {} / {} of {}",
                    a,
                    b,
                    self.rows.len()
                )))
            }
        };

        let norm_a = l2_norm(row_a);
        let norm_b = l2_norm(row_b);
        if norm_a == 0.0 || norm_b == 0.0 {
            return Err(ResumeScannerError::ScoringDegenerate(
                "document has no usable features".to_string(),
            ));
        }

        let dot: f64 = row_a.iter().zip(row_b).map(|(x, y)| x * y).sum();
        Ok(dot.clamp(0.0, 1.0))
    }
}

impl Default for VectorSpaceModel {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEATURES, DEFAULT_MAX_NGRAM)
    }
}

impl VectorSpaceModel {
    pub fn new(max_features: usize, max_ngram: usize) -> Self {
        Self {
            max_features: max_features.max(1),
            max_ngram: max_ngram.max(1),
        }
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Similarity of two raw documents in [0, 1]. Degenerate comparisons
    /// (no usable features on either side) score 0.0.
    pub fn similarity(&self, document_a: &str, document_b: &str) -> f64 {
        match self.try_similarity(document_a, document_b) {
            Ok(score) => score,
            Err(e) => {
                log::debug!("similarity resolved to 0.0: {}", e);
                0.0
            }
        }
    }

    pub fn try_similarity(&self, document_a: &str, document_b: &str) -> Result<f64> {
        let matrix = self.fit_transform(&[document_a, document_b])?;
        matrix.cosine(0, 1)
    }

    /// Fit a vocabulary on `documents` and return their weighted rows.
    pub fn fit_transform(&self, documents: &[&str]) -> Result<TfidfMatrix> {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| self.feature_counts(doc))
            .collect();

        let vocabulary = self.build_vocabulary(&counts)?;

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = vocabulary
            .terms
            .iter()
            .map(|term| {
                let df = counts.iter().filter(|c| c.contains_key(term)).count() as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = counts
            .iter()
            .map(|doc_counts| {
                let mut row: Vec<f64> = vocabulary
                    .terms
                    .iter()
                    .zip(&idf)
                    .map(|(term, weight)| {
                        doc_counts.get(term).copied().unwrap_or(0) as f64 * weight
                    })
                    .collect();

                let norm = l2_norm(&row);
                if norm > 0.0 {
                    row.iter_mut().for_each(|x| *x /= norm);
                }
                row
            })
            .collect();

        Ok(TfidfMatrix {
            vocabulary,
            idf,
            rows,
        })
    }

    /// Counts of every n-gram feature of one document.
    pub fn feature_counts(&self, document: &str) -> HashMap<String, usize> {
        let normalized = normalize(document);
        let tokens = content_tokens(&normalized);

        let mut counts = HashMap::new();
        for n in 1..=self.max_ngram {
            for window in tokens.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Keep the `max_features` most frequent terms across the corpus, ties
    /// broken alphabetically, then order the survivors alphabetically.
    fn build_vocabulary(&self, counts: &[HashMap<String, usize>]) -> Result<Vocabulary> {
        let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
        for doc_counts in counts {
            for (term, count) in doc_counts {
                *totals.entry(term.as_str()).or_insert(0) += count;
            }
        }

        if totals.is_empty() {
            return Err(ResumeScannerError::ScoringDegenerate(
                "empty vocabulary; documents contain only stop words".to_string(),
            ));
        }

        let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
        if ranked.len() > self.max_features {
            // Stable sort keeps alphabetical order among equal counts.
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            ranked.truncate(self.max_features);
        }

        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        terms.sort();

        Ok(Vocabulary { terms })
    }
}

fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}
