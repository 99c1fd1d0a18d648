//! Input manager for handling different file types

use crate::error::{Result, ResumeScannerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeScannerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        // Reject unknown types before reading the file.
        let file_type = FileType::from_name(&path_str);
        if !file_type.is_supported() {
            return Err(ResumeScannerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        let text = Self::extract_typed(file_type, &bytes, &path_str)?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Extract text from bytes already in memory, typed by the file name.
    pub fn extract_from_bytes(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        Self::extract_typed(FileType::from_name(filename), bytes, filename)
    }

    fn extract_typed(file_type: FileType, bytes: &[u8], source: &str) -> Result<String> {
        match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", source);
                PdfExtractor.extract(bytes, source)
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", source);
                DocxExtractor.extract(bytes, source)
            }
            FileType::Text => {
                info!("Reading plain text file: {}", source);
                PlainTextExtractor.extract(bytes, source)
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", source);
                MarkdownExtractor.extract(bytes, source)
            }
            FileType::Unknown => Err(ResumeScannerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                source
            ))),
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_bytes_by_name() {
        let manager = InputManager::new();

        let text = manager
            .extract_from_bytes("resume.txt", b"Jane Doe, Rust engineer")
            .unwrap();
        assert_eq!(text, "Jane Doe, Rust engineer");

        assert!(matches!(
            manager.extract_from_bytes("resume.rtf", b"{\\rtf1}"),
            Err(ResumeScannerError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_cache_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        std::fs::write(&path, "Python developer").unwrap();

        let mut manager = InputManager::new().with_cache(false);
        assert_eq!(manager.extract_text(&path).await.unwrap(), "Python developer");
        assert_eq!(manager.cache_size(), 0);
    }
}
