//! WNL Lists - Word list generation
//!
//! Turns slices of a lexical graph into flat text files:
//! - lemma lists over a concept's hyponym closure
//! - definition-token lists built from tokenized glosses
//! - part-of-speech lemma lists

pub mod builders;
pub mod tokenizer;
pub mod writer;

pub use builders::{ListBuilder, ListKind, Report, MARKER_PREFIX};
pub use tokenizer::{tokenize, StopwordTable, Tokenizer};
pub use writer::write_lines;
