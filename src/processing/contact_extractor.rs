//! Email and phone number extraction from raw resume text

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

// Groups: country code, area code, exchange, line number.
const PHONE_PATTERN: &str =
    r"(?:\+(\d{1,3})[-.\s]?)?\(?(\d{3})\)?[-.\s]?(\d{3})[-.\s]?(\d{4})";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty()
    }
}

/// Pattern-based contact extractor. Works on un-normalized text since the
/// punctuation in addresses and numbers is needed for matching.
pub struct ContactExtractor {
    email_regex: Regex,
    phone_regex: Regex,
}

impl ContactExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            email_regex: Regex::new(EMAIL_PATTERN)?,
            phone_regex: Regex::new(PHONE_PATTERN)?,
        })
    }

    pub fn extract_contacts(&self, raw_text: &str) -> ContactInfo {
        ContactInfo {
            emails: self.extract_emails(raw_text),
            phones: self.extract_phones(raw_text),
        }
    }

    /// Every non-overlapping email match in order of appearance, duplicates kept.
    pub fn extract_emails(&self, raw_text: &str) -> Vec<String> {
        self.email_regex
            .find_iter(raw_text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Phone matches as the plain concatenation of their digit groups.
    ///
    /// Any digit run with the right shape matches, so long numbers embedded in
    /// other identifiers produce false positives.
    pub fn extract_phones(&self, raw_text: &str) -> Vec<String> {
        self.phone_regex
            .captures_iter(raw_text)
            .map(|caps| {
                caps.iter()
                    .skip(1)
                    .flatten()
                    .map(|group| group.as_str())
                    .collect::<String>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ContactExtractor {
        ContactExtractor::new().unwrap()
    }

    #[test]
    fn test_email_and_parenthesized_phone() {
        let info = extractor()
            .extract_contacts("Jane Doe\njane@example.com | (415) 555-1234\nSan Francisco");

        assert_eq!(info.emails, vec!["jane@example.com".to_string()]);
        assert!(info.phones.contains(&"4155551234".to_string()));
    }

    #[test]
    fn test_phone_separators() {
        let extractor = extractor();

        for text in ["415-555-1234", "415.555.1234", "415 555 1234", "4155551234"] {
            assert_eq!(extractor.extract_phones(text), vec!["4155551234".to_string()], "{}", text);
        }
    }

    #[test]
    fn test_country_code_is_included() {
        let phones = extractor().extract_phones("Call +1 (415) 555-1234 or +44-207-555-0199");
        assert_eq!(phones, vec!["14155551234".to_string(), "442075550199".to_string()]);
    }

    #[test]
    fn test_duplicate_emails_are_kept() {
        let emails = extractor().extract_emails("a.b@mail.io, a.b@mail.io; c_d+tag@sub.example.org");
        assert_eq!(
            emails,
            vec![
                "a.b@mail.io".to_string(),
                "a.b@mail.io".to_string(),
                "c_d+tag@sub.example.org".to_string(),
            ]
        );
    }

    #[test]
    fn test_email_requires_alphabetic_tld() {
        assert!(extractor().extract_emails("user@host.c0m user@localhost").is_empty());
    }

    #[test]
    fn test_long_digit_runs_are_false_positives() {
        // Order ids and similar digit runs match the phone shape.
        let phones = extractor().extract_phones("Order #98765432101234");
        assert_eq!(phones, vec!["9876543210".to_string()]);
    }

    #[test]
    fn test_no_contacts() {
        let info = extractor().extract_contacts("No contact details here, just 42 words.");
        assert!(info.is_empty());
    }
}
