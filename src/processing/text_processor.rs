//! Text normalization, tokenization and the English stop-word list

use std::collections::HashSet;
use std::sync::LazyLock;

/// Minimum token length kept by the tokenizer
pub const MIN_TOKEN_LEN: usize = 2;

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Lowercase the text, replace everything that is not an ASCII letter, ASCII
/// digit or whitespace with a space, collapse whitespace runs and trim.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into word tokens, dropping single-character tokens.
pub fn tokenize(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split_whitespace()
        .filter(|token| token.len() >= MIN_TOKEN_LEN)
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// Tokens of the normalized text with stop words removed, in document order.
pub fn content_tokens(normalized: &str) -> Vec<&str> {
    tokenize(normalized)
        .filter(|token| !is_stop_word(token))
        .collect()
}

pub fn stop_word_count() -> usize {
    STOP_WORDS.len()
}

/// Standard English stop-word list
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against",
    "all", "almost", "alone", "along", "already", "also", "although", "always",
    "am", "among", "amongst", "amoungst", "amount", "an", "and", "another",
    "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being",
    "below", "beside", "besides", "between", "beyond", "bill", "both",
    "bottom", "but", "by", "call", "can", "cannot", "cant", "co", "con",
    "could", "couldnt", "cry", "de", "describe", "detail", "do", "done",
    "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone",
    "everything", "everywhere", "except", "few", "fifteen", "fifty", "fill",
    "find", "fire", "first", "five", "for", "former", "formerly", "forty",
    "found", "four", "from", "front", "full", "further", "get", "give", "go",
    "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter",
    "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed",
    "interest", "into", "is", "it", "its", "itself", "keep", "last", "latter",
    "latterly", "least", "less", "ltd", "made", "many", "may", "me",
    "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone",
    "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on",
    "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our",
    "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps",
    "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such",
    "system", "take", "ten", "than", "that", "the", "their", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
    "third", "this", "those", "though", "three", "through", "throughout",
    "thru", "thus", "to", "together", "too", "top", "toward", "towards",
    "twelve", "twenty", "two", "un", "under", "until", "up", "upon", "us",
    "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby",
    "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with",
    "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(
            normalize("  Hello, World!  Rust & C++\tdeveloper\n"),
            "hello world rust c developer"
        );
        assert_eq!(normalize("jane.doe@Example.COM"), "jane doe example com");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let samples = [
            "Senior Rust/Go engineer -- 10+ years (remote)",
            "ÉCOLE naïve café",
            "a\u{00A0}b\u{2003}c",
            "(415) 555-1234 | jane@example.com",
            "",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_non_ascii_letters_become_separators() {
        assert_eq!(normalize("naïve"), "na ve");
    }

    #[test]
    fn test_tokenization_drops_short_tokens() {
        let normalized = normalize("I have 5 years of Go and R");
        let tokens: Vec<&str> = tokenize(&normalized).collect();

        assert_eq!(tokens, vec!["have", "years", "of", "go", "and"]);
    }

    #[test]
    fn test_stop_words_removed_in_order() {
        let normalized = normalize("Experience with the Python language and Flask");
        assert_eq!(
            content_tokens(&normalized),
            vec!["experience", "python", "language", "flask"]
        );
        assert!(is_stop_word("the"));
        assert!(!is_stop_word("python"));
        assert_eq!(stop_word_count(), ENGLISH_STOP_WORDS.len());
    }
}
