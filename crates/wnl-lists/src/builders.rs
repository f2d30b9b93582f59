//! List builders
//!
//! Three report generators over a lexical graph:
//! - lemma lists: per concept, its lemmas plus every hyponym's lemmas
//! - definition-token lists: per concept, its lemmas plus the tokenized
//!   definitions of itself and every hyponym
//! - part-of-speech lists: every lemma of one tag, no markers
//!
//! Concept-scoped builders either work on the root alone or on the root's
//! hyponym closure ranked by subtree size. Collected tokens are emitted in
//! lexicographic order so repeated runs produce identical files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use wnl_core::{ConceptId, LexicalGraph, PartOfSpeech, Result};
use wnl_graph::ClosureEngine;

use crate::tokenizer::Tokenizer;
use crate::writer::write_lines;

/// Prefix of the line that opens a concept's section
pub const MARKER_PREFIX: &str = ": ";

/// Lines of one output file and the name they are written under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub file_name: String,
    pub lines: Vec<String>,
}

impl Report {
    /// Write into `dir` (which must exist) and return the file path
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        write_lines(&self.lines, &path)?;
        Ok(path)
    }

    /// Number of section marker lines
    pub fn marker_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| line.starts_with(MARKER_PREFIX))
            .count()
    }
}

/// Which list to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Lemmas,
    DefinitionTokens,
    PartOfSpeech(PartOfSpeech),
}

/// Builds reports over one graph, sharing closure results between them
pub struct ListBuilder<'g, G: LexicalGraph + ?Sized> {
    engine: ClosureEngine<'g, G>,
}

impl<'g, G: LexicalGraph + ?Sized> ListBuilder<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            engine: ClosureEngine::new(graph),
        }
    }

    pub fn engine(&mut self) -> &mut ClosureEngine<'g, G> {
        &mut self.engine
    }

    /// Concepts a concept-scoped list covers
    ///
    /// Expanded scope is the ranked hyponym closure of `root`; a root
    /// without hyponyms is its own scope.
    pub fn scope(&mut self, root: &str, expanded: bool) -> Result<Vec<ConceptId>> {
        let root = self.engine.graph().synset(root)?;
        if !expanded {
            return Ok(vec![root]);
        }

        let ranked = self.engine.expand(root);
        if ranked.is_empty() {
            Ok(vec![root])
        } else {
            Ok(ranked)
        }
    }

    /// Lemma list, `wn-lemmas-<concepts>.txt`
    pub fn lemmas(&mut self, root: &str, expanded: bool) -> Result<Report> {
        let scope = self.scope(root, expanded)?;
        let graph = self.engine.graph();

        let mut lines = Vec::new();
        for &id in &scope {
            let concept = graph.concept(id);
            let mut lemmas: BTreeSet<&str> = concept.lemmas.iter().map(String::as_str).collect();
            for &hyponym in self.engine.narrower(id).iter() {
                lemmas.extend(graph.concept(hyponym).lemmas.iter().map(String::as_str));
            }

            tracing::info!("Retrieved {} hyponym lemmas from {}", lemmas.len(), concept);
            lines.push(format!("{MARKER_PREFIX}{}", concept.name));
            lines.extend(lemmas.into_iter().map(str::to_string));
        }

        Ok(Report {
            file_name: format!("wn-lemmas-{}.txt", scope.len()),
            lines,
        })
    }

    /// Definition-token list, `wn-definition-tokens-<concepts>.txt`
    pub fn definition_tokens(
        &mut self,
        tokenizer: &Tokenizer,
        root: &str,
        expanded: bool,
    ) -> Result<Report> {
        let scope = self.scope(root, expanded)?;
        let graph = self.engine.graph();

        let mut lines = Vec::new();
        for &id in &scope {
            let concept = graph.concept(id);
            let mut tokens: BTreeSet<String> = concept.lemmas.iter().cloned().collect();
            tokens.extend(tokenizer.tokenize(&concept.definition));
            for &hyponym in self.engine.narrower(id).iter() {
                tokens.extend(tokenizer.tokenize(&graph.concept(hyponym).definition));
            }

            tracing::info!("Retrieved {} definition tokens from {}", tokens.len(), concept);
            lines.push(format!("{MARKER_PREFIX}{}", concept.name));
            lines.extend(tokens);
        }

        Ok(Report {
            file_name: format!("wn-definition-tokens-{}.txt", scope.len()),
            lines,
        })
    }

    /// Every lemma of one tag, `wn-<tag plural>-<lemmas>.txt`
    pub fn part_of_speech(&self, pos: PartOfSpeech) -> Report {
        let graph = self.engine.graph();
        let lemmas: BTreeSet<&str> = graph
            .all_synsets(pos)
            .into_iter()
            .flat_map(move |id| graph.concept(id).lemmas.iter().map(String::as_str))
            .collect();

        tracing::info!("Retrieved {} {} lemmas", lemmas.len(), pos.plural_name());
        Report {
            file_name: format!("wn-{}-{}.txt", pos.plural_name(), lemmas.len()),
            lines: lemmas.into_iter().map(str::to_string).collect(),
        }
    }

    /// One part-of-speech report per tag, in the order given
    pub fn parts_of_speech(&self, tags: &[PartOfSpeech]) -> Vec<Report> {
        tags.iter().map(|&pos| self.part_of_speech(pos)).collect()
    }

    /// Dispatch on `kind`
    ///
    /// The tokenizer is only consulted for definition tokens and defaults
    /// to English when absent.
    pub fn build(
        &mut self,
        kind: ListKind,
        root: &str,
        expanded: bool,
        tokenizer: Option<&Tokenizer>,
    ) -> Result<Report> {
        let report = match kind {
            ListKind::Lemmas => self.lemmas(root, expanded)?,
            ListKind::DefinitionTokens => {
                let tokenizer = match tokenizer {
                    Some(tokenizer) => tokenizer.clone(),
                    None => Tokenizer::for_language("english")?,
                };
                self.definition_tokens(&tokenizer, root, expanded)?
            }
            ListKind::PartOfSpeech(pos) => self.part_of_speech(pos),
        };

        let stats = self.engine.stats();
        tracing::debug!(
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            cycles = stats.cycles,
            "Closure cache"
        );
        Ok(report)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wnl_core::{Concept, WnlError};
    use wnl_graph::{GraphBuilder, WordNetGraph};

    fn graph() -> WordNetGraph {
        let mut builder = GraphBuilder::new();
        let concepts = [
            ("animal.n.01", &["animal", "beast"][..], "a living organism characterized by voluntary movement"),
            ("dog.n.01", &["dog", "domestic_dog"][..], "a member of the genus Canis"),
            ("cat.n.01", &["cat"][..], "feline mammal usually having thick soft fur"),
            ("puppy.n.01", &["puppy"][..], "a young dog"),
        ];
        for (name, lemmas, definition) in concepts {
            let mut concept = Concept::new(name, PartOfSpeech::Noun).with_definition(definition);
            for lemma in lemmas {
                concept = concept.with_lemma(*lemma);
            }
            builder.add_concept(concept).unwrap();
        }
        builder
            .add_concept(Concept::new("run.v.01", PartOfSpeech::Verb).with_lemma("run"))
            .unwrap();
        builder.link("animal.n.01", "dog.n.01").unwrap();
        builder.link("animal.n.01", "cat.n.01").unwrap();
        builder.link("dog.n.01", "puppy.n.01").unwrap();
        builder.build()
    }

    #[test]
    fn test_lemma_list_expanded() {
        let graph = graph();
        let report = ListBuilder::new(&graph).lemmas("animal.n.01", true).unwrap();

        assert_eq!(report.file_name, "wn-lemmas-3.txt");
        assert_eq!(
            report.lines,
            [": dog.n.01", "dog", "domestic_dog", "puppy", ": cat.n.01", "cat", ": puppy.n.01", "puppy"]
        );
    }

    #[test]
    fn test_lemma_list_unexpanded() {
        let graph = graph();
        let report = ListBuilder::new(&graph).lemmas("animal.n.01", false).unwrap();

        assert_eq!(report.file_name, "wn-lemmas-1.txt");
        assert_eq!(
            report.lines,
            [": animal.n.01", "animal", "beast", "cat", "dog", "domestic_dog", "puppy"]
        );
        assert_eq!(report.marker_count(), 1);
    }

    #[test]
    fn test_leaf_root_in_both_modes() {
        let graph = graph();
        let mut builder = ListBuilder::new(&graph);
        for expanded in [true, false] {
            let report = builder.lemmas("cat.n.01", expanded).unwrap();
            assert_eq!(report.file_name, "wn-lemmas-1.txt");
            assert_eq!(report.lines, [": cat.n.01", "cat"]);
        }
    }

    #[test]
    fn test_definition_tokens() {
        let graph = graph();
        let tokenizer = Tokenizer::for_language("english").unwrap();
        let report = ListBuilder::new(&graph)
            .definition_tokens(&tokenizer, "dog.n.01", false)
            .unwrap();

        assert_eq!(report.file_name, "wn-definition-tokens-1.txt");
        assert_eq!(
            report.lines,
            [": dog.n.01", "Canis", "dog", "domestic_dog", "genus", "member", "young"]
        );
    }

    #[test]
    fn test_part_of_speech_lists() {
        let graph = graph();
        let builder = ListBuilder::new(&graph);
        let reports = builder.parts_of_speech(&[PartOfSpeech::Noun, PartOfSpeech::Verb, PartOfSpeech::Adverb]);

        assert_eq!(reports[0].file_name, "wn-nouns-6.txt");
        assert_eq!(
            reports[0].lines,
            ["animal", "beast", "cat", "dog", "domestic_dog", "puppy"]
        );
        assert_eq!(reports[1].file_name, "wn-verbs-1.txt");
        assert_eq!(reports[2].file_name, "wn-adverbs-0.txt");
        assert!(reports[2].lines.is_empty());
        assert_eq!(reports[2].marker_count(), 0);
    }

    #[test]
    fn test_unknown_root() {
        let graph = graph();
        let mut builder = ListBuilder::new(&graph);
        assert!(matches!(
            builder.lemmas("nonexistent.n.99", true),
            Err(WnlError::NotFound(_))
        ));
        assert!(matches!(
            builder.build(ListKind::DefinitionTokens, "nonexistent.n.99", false, None),
            Err(WnlError::NotFound(_))
        ));
    }

    #[test]
    fn test_build_dispatch() {
        let graph = graph();
        let mut builder = ListBuilder::new(&graph);

        let report = builder
            .build(ListKind::PartOfSpeech(PartOfSpeech::Verb), "ignored.n.01", true, None)
            .unwrap();
        assert_eq!(report.lines, ["run"]);

        let report = builder.build(ListKind::Lemmas, "dog.n.01", true, None).unwrap();
        assert_eq!(report.file_name, "wn-lemmas-1.txt");
    }
}
