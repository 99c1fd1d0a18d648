//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Detect from a file name or path; names without an extension are `Unknown`.
    pub fn from_name(name: &str) -> Self {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, FileType::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection() {
        assert_eq!(FileType::from_name("Resume.PDF"), FileType::Pdf);
        assert_eq!(FileType::from_name("cv.docx"), FileType::Docx);
        assert_eq!(FileType::from_name("notes.markdown"), FileType::Markdown);
        assert_eq!(FileType::from_name("job.txt"), FileType::Text);
        assert_eq!(FileType::from_name("old.doc"), FileType::Unknown);
        assert_eq!(FileType::from_name("README"), FileType::Unknown);
        assert!(!FileType::Unknown.is_supported());
    }
}
