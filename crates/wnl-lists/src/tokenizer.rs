//! Definition tokenizer
//!
//! Splits glosses into word tokens and drops punctuation and stopwords.
//! The stopword table is resolved once per run and handed to the
//! [`Tokenizer`]; languages without a table are rejected up front.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use wnl_core::{Result, WnlError};

/// Letter/digit runs (combining marks included), optionally joined by internal
/// hyphens, apostrophes or periods; any other non-space run is a punctuation candidate
static SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{M}\p{N}]+(?:[-'’.][\p{L}\p{M}\p{N}]+)*|[^\s\p{L}\p{M}\p{N}]+")
        .expect("valid segmentation pattern")
});

/// English stopwords as shipped with the NLTK stopwords corpus
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

// ============================================================================
// Stopwords
// ============================================================================

/// Stopword set for one language
#[derive(Debug, Clone)]
pub struct StopwordTable {
    language: String,
    words: HashSet<String>,
}

impl StopwordTable {
    /// Table for a supported language (`english`)
    pub fn for_language(language: &str) -> Result<Self> {
        match language.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Self::custom("english", ENGLISH_STOPWORDS.iter().copied())),
            _ => Err(WnlError::UnsupportedLanguage(language.to_string())),
        }
    }

    /// Table from an explicit word list
    pub fn custom<I, S>(language: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            language: language.into(),
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Case-insensitive membership
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

/// Raw segments of `text`, words and punctuation runs alike
pub fn segment(text: &str) -> impl Iterator<Item = &str> {
    SEGMENT.find_iter(text).map(|m| m.as_str())
}

/// True when no character of `token` is a letter or digit
pub fn is_punctuation(token: &str) -> bool {
    token.chars().all(|c| !c.is_alphanumeric())
}

/// Word tokenizer bound to one stopword table
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: StopwordTable,
}

impl Tokenizer {
    pub fn new(stopwords: StopwordTable) -> Self {
        Self { stopwords }
    }

    /// Tokenizer for a supported language
    pub fn for_language(language: &str) -> Result<Self> {
        StopwordTable::for_language(language).map(Self::new)
    }

    pub fn stopwords(&self) -> &StopwordTable {
        &self.stopwords
    }

    /// Word tokens of `text` in order, without punctuation or stopwords
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        segment(text)
            .filter(|token| !is_punctuation(token))
            .filter(|token| !self.stopwords.contains(token))
            .map(str::to_string)
            .collect()
    }
}

/// One-shot tokenization; fails for languages without a stopword table
pub fn tokenize(text: &str, language: &str) -> Result<Vec<String>> {
    Ok(Tokenizer::for_language(language)?.tokenize(text))
}

// ============================================================================
// Tests
// ============================================================================
