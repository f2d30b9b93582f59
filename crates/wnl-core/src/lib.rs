//! WNL Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout WNL:
//! - Lexical graph models (concepts, parts of speech, relation directions)
//! - The `LexicalGraph` accessor trait implemented by graph backends
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{
    AppConfig, ConfigError, GraphConfig, GraphFormat, ListsConfig, LoggingConfig, OutputConfig,
    TokenizerConfig,
};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for WNL operations
#[derive(Error, Debug)]
pub enum WnlError {
    #[error("Concept not found: {0}")]
    NotFound(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Cannot access file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised inside the closure engine only; logged, never returned.
    #[error("Cycle detected at concept: {0}")]
    CycleDetected(String),

    #[error("Failed to load graph from {path}: {message}")]
    GraphLoad { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WnlError {
    /// Wrap an I/O error with the path it happened on
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Build a graph load error for the given source path
    pub fn graph_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::GraphLoad {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<ConfigError> for WnlError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WnlError>;

// ============================================================================
// Lexical Graph Models
// ============================================================================

/// Dense identifier of a concept inside one loaded graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConceptId(pub usize);

impl ConceptId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ConceptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Part-of-speech tag partitioning the graph
///
/// WordNet distinguishes head adjectives (`a`) from adjective
/// satellites (`s`); listing by adjective covers both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    AdjectiveSatellite,
    Adverb,
}

impl PartOfSpeech {
    /// Tags that get their own part-of-speech list
    pub const LISTABLE: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Adjective,
        PartOfSpeech::Verb,
        PartOfSpeech::Adverb,
    ];

    /// Single-letter WordNet tag (`n`, `v`, `a`, `s`, `r`)
    pub fn as_char(&self) -> char {
        match self {
            Self::Noun => 'n',
            Self::Verb => 'v',
            Self::Adjective => 'a',
            Self::AdjectiveSatellite => 's',
            Self::Adverb => 'r',
        }
    }

    /// Parse a single-letter WordNet tag
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Self::Noun),
            'v' => Some(Self::Verb),
            'a' => Some(Self::Adjective),
            's' => Some(Self::AdjectiveSatellite),
            'r' => Some(Self::Adverb),
            _ => None,
        }
    }

    /// Plural name used in part-of-speech list file names
    pub fn plural_name(&self) -> &'static str {
        match self {
            Self::Noun => "nouns",
            Self::Verb => "verbs",
            Self::Adjective | Self::AdjectiveSatellite => "adjectives",
            Self::Adverb => "adverbs",
        }
    }

    /// Whether a concept tagged `other` is enumerated when listing `self`
    pub fn covers(&self, other: PartOfSpeech) -> bool {
        match self {
            Self::Adjective => matches!(other, Self::Adjective | Self::AdjectiveSatellite),
            _ => *self == other,
        }
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl std::str::FromStr for PartOfSpeech {
    type Err = WnlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "n" | "noun" => Ok(Self::Noun),
            "v" | "verb" => Ok(Self::Verb),
            "a" | "adj" | "adjective" => Ok(Self::Adjective),
            "s" | "adjective_satellite" => Ok(Self::AdjectiveSatellite),
            "r" | "adv" | "adverb" => Ok(Self::Adverb),
            _ => Err(WnlError::Config(format!("unknown part of speech: {s}"))),
        }
    }
}

/// Edge direction followed by closure computations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow hyponym edges (towards more specific concepts)
    Narrower,
    /// Follow hypernym edges (towards more general concepts)
    Broader,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Narrower => write!(f, "narrower"),
            Self::Broader => write!(f, "broader"),
        }
    }
}

/// A word sense node (synset) in the lexical graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Unique name (e.g., "animal.n.01")
    pub name: String,

    /// Part of speech
    pub pos: PartOfSpeech,

    /// Surface word forms, in source order
    pub lemmas: Vec<String>,

    /// Free-text gloss without example sentences
    pub definition: String,
}

impl Concept {
    /// Create a concept with no lemmas and an empty definition
    pub fn new(name: impl Into<String>, pos: PartOfSpeech) -> Self {
        Self {
            name: name.into(),
            pos,
            lemmas: Vec::new(),
            definition: String::new(),
        }
    }

    /// Add a lemma
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemmas.push(lemma.into());
        self
    }

    /// Set the definition
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pos(&self) -> PartOfSpeech {
        self.pos
    }

    pub fn lemma_names(&self) -> &[String] {
        &self.lemmas
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }
}

impl std::fmt::Display for Concept {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Synset('{}')", self.name)
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Read-only accessor over a lexical graph
///
/// Implementations own the concepts and their relations; callers address
/// concepts by `ConceptId` once resolved through [`LexicalGraph::synset`].
pub trait LexicalGraph {
    /// Resolve a concept by its unique name
    fn synset(&self, name: &str) -> Result<ConceptId>;

    /// Borrow a resolved concept
    fn concept(&self, id: ConceptId) -> &Concept;

    /// Direct neighbours in the given direction
    fn related(&self, id: ConceptId, direction: Direction) -> Vec<ConceptId>;

    /// All concepts listed under a part of speech, in name order
    fn all_synsets(&self, pos: PartOfSpeech) -> Vec<ConceptId>;

    /// Number of concepts in the graph
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct broader concepts
    fn hypernyms(&self, id: ConceptId) -> Vec<ConceptId> {
        self.related(id, Direction::Broader)
    }

    /// Direct narrower concepts
    fn hyponyms(&self, id: ConceptId) -> Vec<ConceptId> {
        self.related(id, Direction::Narrower)
    }
}

// ============================================================================
// Tests
// ============================================================================
