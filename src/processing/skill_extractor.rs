//! Categorical skill keyword extraction

use crate::error::{Result, ResumeScannerError};
use crate::processing::text_processor::normalize;
use aho_corasick::AhoCorasick;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed mapping from category name to an ordered list of lowercase keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTaxonomy {
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

impl SkillCategory {
    fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self {
            categories: vec![
                SkillCategory::new(
                    "programming",
                    &[
                        "python", "java", "javascript", "c++", "c#", "php", "ruby", "go", "swift",
                        "kotlin", "scala", "r", "matlab", "sql", "html", "css",
                    ],
                ),
                SkillCategory::new(
                    "frameworks",
                    &[
                        "react", "angular", "vue", "django", "flask", "spring", "nodejs",
                        "express", "laravel", "rails", "asp.net", "tensorflow", "pytorch",
                    ],
                ),
                SkillCategory::new(
                    "databases",
                    &[
                        "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "oracle",
                        "sqlite", "cassandra", "dynamodb",
                    ],
                ),
                SkillCategory::new(
                    "tools",
                    &[
                        "git", "docker", "kubernetes", "jenkins", "aws", "azure", "gcp", "linux",
                        "windows", "mac", "jira", "confluence", "slack",
                    ],
                ),
                SkillCategory::new(
                    "soft_skills",
                    &[
                        "leadership", "communication", "teamwork", "problem solving",
                        "analytical", "creative", "adaptable", "organized",
                    ],
                ),
            ],
        }
    }
}

impl SkillTaxonomy {
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|c| c.keywords.len()).sum()
    }

    /// Lowercase every keyword and reject empty or duplicate names.
    pub fn canonicalize(&mut self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();

        for category in &mut self.categories {
            if category.name.trim().is_empty() {
                return Err(ResumeScannerError::Configuration(
                    "taxonomy category names must not be empty".to_string(),
                ));
            }
            if !seen.insert(category.name.clone()) {
                return Err(ResumeScannerError::Configuration(format!(
                    "duplicate taxonomy category: {}",
                    category.name
                )));
            }

            for keyword in &mut category.keywords {
                *keyword = keyword.trim().to_lowercase();
            }
            if category.keywords.iter().any(|k| k.is_empty()) {
                return Err(ResumeScannerError::Configuration(format!(
                    "empty keyword in taxonomy category '{}'",
                    category.name
                )));
            }
        }

        Ok(())
    }
}

/// Matched keywords per category, in taxonomy order. Every taxonomy category
/// is present even when nothing matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedSkills {
    categories: Vec<(String, Vec<String>)>,
}

impl ExtractedSkills {
    /// All categories of the taxonomy with no matches.
    pub fn empty(taxonomy: &SkillTaxonomy) -> Self {
        Self {
            categories: taxonomy
                .categories
                .iter()
                .map(|c| (c.name.clone(), Vec::new()))
                .collect(),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, skills)| skills.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, skills)| (name.as_str(), skills.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of matched keywords across all categories
    pub fn total_matches(&self) -> usize {
        self.categories.iter().map(|(_, skills)| skills.len()).sum()
    }
}

impl Serialize for ExtractedSkills {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (name, skills) in &self.categories {
            map.serialize_entry(name, skills)?;
        }
        map.end()
    }
}

/// Keyword extractor over a shared taxonomy.
///
/// Matching is plain substring containment on normalized text, so short
/// keywords also hit inside longer words ("go" in "good").
pub struct SkillExtractor {
    taxonomy: Arc<SkillTaxonomy>,
    matcher: Option<AhoCorasick>,
    // For each unique pattern, the (category, keyword) slots it fills.
    slots: Vec<Vec<(usize, usize)>>,
}

impl SkillExtractor {
    pub fn new(taxonomy: Arc<SkillTaxonomy>) -> Result<Self> {
        let mut patterns: Vec<String> = Vec::new();
        let mut slots: Vec<Vec<(usize, usize)>> = Vec::new();
        let mut pattern_ids: HashMap<String, usize> = HashMap::new();

        for (category_idx, category) in taxonomy.categories.iter().enumerate() {
            for (keyword_idx, keyword) in category.keywords.iter().enumerate() {
                if keyword.is_empty() {
                    continue;
                }
                let id = *pattern_ids.entry(keyword.clone()).or_insert_with(|| {
                    patterns.push(keyword.clone());
                    slots.push(Vec::new());
                    patterns.len() - 1
                });
                slots[id].push((category_idx, keyword_idx));
            }
        }

        let matcher = if patterns.is_empty() {
            None
        } else {
            Some(AhoCorasick::new(&patterns).map_err(|e| {
                ResumeScannerError::Processing(format!("Failed to build skill matcher: {}", e))
            })?)
        };

        Ok(Self {
            taxonomy,
            matcher,
            slots,
        })
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    pub fn extract_skills(&self, text: &str) -> ExtractedSkills {
        let normalized = normalize(text);

        let mut found: Vec<Vec<bool>> = self
            .taxonomy
            .categories
            .iter()
            .map(|c| vec![false; c.keywords.len()])
            .collect();

        if let Some(matcher) = &self.matcher {
            for mat in matcher.find_overlapping_iter(&normalized) {
                for &(category_idx, keyword_idx) in &self.slots[mat.pattern().as_usize()] {
                    found[category_idx][keyword_idx] = true;
                }
            }
        }

        let categories = self
            .taxonomy
            .categories
            .iter()
            .zip(found)
            .map(|(category, hits)| {
                let matched = category
                    .keywords
                    .iter()
                    .zip(hits)
                    .filter(|(_, hit)| *hit)
                    .map(|(keyword, _)| keyword.clone())
                    .collect();
                (category.name.clone(), matched)
            })
            .collect();

        ExtractedSkills { categories }
    }
}
