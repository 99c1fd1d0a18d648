//! Configuration management for the resume scanner

use crate::error::{Result, ResumeScannerError};
use crate::processing::skill_extractor::SkillTaxonomy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub matching: MatchingConfig,
    pub taxonomy: SkillTaxonomy,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Vocabulary cap per pairwise comparison
    pub max_features: usize,
    /// Largest n-gram used as a feature (1 = unigrams only)
    pub max_ngram: usize,
    /// Upper bound on candidates scored at the same time
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty_json: bool,
    pub color_output: bool,
    pub detailed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_features: 1000,
            max_ngram: 2,
            max_concurrency: 8,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            pretty_json: true,
            color_output: true,
            detailed: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig::default(),
            taxonomy: SkillTaxonomy::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load the configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content).map_err(|e| {
            ResumeScannerError::Configuration(format!(
                "Failed to parse config '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeScannerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scanner")
            .join("config.toml")
    }

    /// Check value ranges and bring the taxonomy into canonical (lowercase) form
    pub fn validate(&mut self) -> Result<()> {
        if self.matching.max_features == 0 {
            return Err(ResumeScannerError::Configuration(
                "matching.max_features must be at least 1".to_string(),
            ));
        }
        if self.matching.max_ngram == 0 {
            return Err(ResumeScannerError::Configuration(
                "matching.max_ngram must be at least 1".to_string(),
            ));
        }
        if self.matching.max_concurrency == 0 {
            return Err(ResumeScannerError::Configuration(
                "matching.max_concurrency must be at least 1".to_string(),
            ));
        }

        self.taxonomy.canonicalize()?;
        Ok(())
    }
}
