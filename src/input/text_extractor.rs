//! Text extraction from various file formats

use crate::error::{Result, ResumeScannerError};
use anyhow::Context;
use pulldown_cmark::{Event, Parser, Tag};

/// Turns the raw bytes of one file into plain text.
pub trait TextExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ResumeScannerError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                source, e
            ))
        })
    }
}

/// Word documents: paragraph runs are concatenated, paragraphs joined by newlines.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| {
            ResumeScannerError::DocxExtraction(format!(
                "Failed to parse DOCX '{}': {:?}",
                source, e
            ))
        })?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .filter(|text| !text.trim().is_empty())
            .collect();

        Ok(paragraphs.join("\n"))
    }
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        let text = std::str::from_utf8(bytes)
            .with_context(|| format!("'{}' is not valid UTF-8", source))?;
        Ok(text.to_string())
    }
}

/// Markdown rendered down to its text content, one block per line.
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        let markdown = PlainTextExtractor.extract(bytes, source)?;
        let mut text = String::new();

        for event in Parser::new(&markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_formatting_is_stripped() {
        let md = b"# Jane Doe\n\n## Skills\n\n- **Rust**, `tokio`\n- Python\n\nSee [site](https://example.com).";
        let text = MarkdownExtractor.extract(md, "cv.md").unwrap();

        assert_eq!(text, "Jane Doe\nSkills\nRust, tokio\nPython\nSee site.");
    }

    #[test]
    fn test_plain_text_requires_utf8() {
        assert_eq!(PlainTextExtractor.extract(b"hello", "a.txt").unwrap(), "hello");
        assert!(PlainTextExtractor.extract(&[0xff, 0xfe, 0x00], "b.txt").is_err());
    }

    #[test]
    fn test_corrupt_docx_fails() {
        let garbage = b"definitely not a document";
        assert!(matches!(
            DocxExtractor.extract(garbage, "x.docx"),
            Err(ResumeScannerError::DocxExtraction(_))
        ));
    }
}
