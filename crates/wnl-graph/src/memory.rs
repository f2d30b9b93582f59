//! In-memory lexical graph
//!
//! Concepts live in a `petgraph` arena; every edge points from a
//! hypernym to one of its hyponyms, so narrower traversal follows
//! outgoing edges and broader traversal follows incoming ones.

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::anyhow;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction as EdgeDirection;

use wnl_core::{Concept, ConceptId, Direction, LexicalGraph, PartOfSpeech, Result, WnlError};

// ============================================================================
// Graph
// ============================================================================

/// Read-only lexical graph held entirely in memory
#[derive(Debug, Clone)]
pub struct WordNetGraph {
    graph: DiGraph<Concept, ()>,
    by_name: HashMap<String, ConceptId>,
    /// Concept ids per tag, sorted by name
    by_pos: BTreeMap<PartOfSpeech, Vec<ConceptId>>,
}

impl WordNetGraph {
    /// Number of hypernym/hyponym links
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate over every concept id in insertion order
    pub fn ids(&self) -> impl Iterator<Item = ConceptId> + '_ {
        self.graph.node_indices().map(|idx| ConceptId(idx.index()))
    }
}

impl LexicalGraph for WordNetGraph {
    fn synset(&self, name: &str) -> Result<ConceptId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| WnlError::NotFound(name.to_string()))
    }

    fn concept(&self, id: ConceptId) -> &Concept {
        &self.graph[NodeIndex::new(id.index())]
    }

    fn related(&self, id: ConceptId, direction: Direction) -> Vec<ConceptId> {
        let edge_direction = match direction {
            Direction::Narrower => EdgeDirection::Outgoing,
            Direction::Broader => EdgeDirection::Incoming,
        };

        let mut related: Vec<ConceptId> = self
            .graph
            .neighbors_directed(NodeIndex::new(id.index()), edge_direction)
            .map(|idx| ConceptId(idx.index()))
            .collect();
        related.sort_unstable();
        related
    }

    fn all_synsets(&self, pos: PartOfSpeech) -> Vec<ConceptId> {
        let mut ids: Vec<ConceptId> = self
            .by_pos
            .iter()
            .filter(|(tag, _)| pos.covers(**tag))
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect();

        if pos == PartOfSpeech::Adjective {
            ids.sort_by(|a, b| self.concept(*a).name.cmp(&self.concept(*b).name));
        }
        ids
    }

    fn len(&self) -> usize {
        self.graph.node_count()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Incrementally assembles a [`WordNetGraph`]
///
/// Concept names must be unique. Links are deduplicated, so a source that
/// lists both `@` and `~` pointers for the same pair yields a single edge.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: DiGraph<Concept, ()>,
    by_name: HashMap<String, ConceptId>,
    links: HashSet<(ConceptId, ConceptId)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a concept, rejecting duplicate names
    pub fn add_concept(&mut self, concept: Concept) -> Result<ConceptId> {
        if self.by_name.contains_key(&concept.name) {
            return Err(WnlError::Other(anyhow!(
                "duplicate concept name: {}",
                concept.name
            )));
        }

        let name = concept.name.clone();
        let id = ConceptId(self.graph.add_node(concept).index());
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Look up an already added concept
    pub fn id(&self, name: &str) -> Option<ConceptId> {
        self.by_name.get(name).copied()
    }

    /// Link `hyponym` under `hypernym`
    pub fn add_hyponym(&mut self, hypernym: ConceptId, hyponym: ConceptId) {
        if self.links.insert((hypernym, hyponym)) {
            self.graph.add_edge(
                NodeIndex::new(hypernym.index()),
                NodeIndex::new(hyponym.index()),
                (),
            );
        }
    }

    /// Link two concepts by name
    pub fn link(&mut self, hypernym: &str, hyponym: &str) -> Result<()> {
        let parent = self
            .id(hypernym)
            .ok_or_else(|| WnlError::NotFound(hypernym.to_string()))?;
        let child = self
            .id(hyponym)
            .ok_or_else(|| WnlError::NotFound(hyponym.to_string()))?;
        self.add_hyponym(parent, child);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Freeze into a read-only graph
    pub fn build(self) -> WordNetGraph {
        let mut by_pos: BTreeMap<PartOfSpeech, Vec<ConceptId>> = BTreeMap::new();
        for idx in self.graph.node_indices() {
            by_pos
                .entry(self.graph[idx].pos)
                .or_default()
                .push(ConceptId(idx.index()));
        }
        for ids in by_pos.values_mut() {
            ids.sort_by(|a, b| {
                let left = &self.graph[NodeIndex::new(a.index())].name;
                let right = &self.graph[NodeIndex::new(b.index())].name;
                left.cmp(right)
            });
        }

        WordNetGraph {
            graph: self.graph,
            by_name: self.by_name,
            by_pos,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn noun(name: &str, lemma: &str) -> Concept {
        Concept::new(name, PartOfSpeech::Noun).with_lemma(lemma)
    }

    fn small_graph() -> WordNetGraph {
        let mut builder = GraphBuilder::new();
        builder.add_concept(noun("animal.n.01", "animal")).unwrap();
        builder.add_concept(noun("dog.n.01", "dog")).unwrap();
        builder.add_concept(noun("cat.n.01", "cat")).unwrap();
        builder
            .add_concept(Concept::new("red.s.01", PartOfSpeech::AdjectiveSatellite).with_lemma("red"))
            .unwrap();
        builder
            .add_concept(Concept::new("chromatic.a.03", PartOfSpeech::Adjective).with_lemma("chromatic"))
            .unwrap();
        builder.link("animal.n.01", "dog.n.01").unwrap();
        builder.link("animal.n.01", "cat.n.01").unwrap();
        builder.link("animal.n.01", "dog.n.01").unwrap();
        builder.build()
    }

    #[test]
    fn test_synset_lookup() {
        let graph = small_graph();
        let dog = graph.synset("dog.n.01").unwrap();
        assert_eq!(graph.concept(dog).lemma_names(), ["dog"]);

        let err = graph.synset("nonexistent.n.99").unwrap_err();
        assert!(matches!(err, WnlError::NotFound(name) if name == "nonexistent.n.99"));
    }

    #[test]
    fn test_relations_are_inverse_and_deduplicated() {
        let graph = small_graph();
        let animal = graph.synset("animal.n.01").unwrap();
        let dog = graph.synset("dog.n.01").unwrap();
        let cat = graph.synset("cat.n.01").unwrap();

        assert_eq!(graph.hyponyms(animal), vec![dog, cat]);
        assert_eq!(graph.hypernyms(dog), vec![animal]);
        assert!(graph.hyponyms(dog).is_empty());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_all_synsets_sorted_and_adjectives_include_satellites() {
        let graph = small_graph();

        let nouns: Vec<&str> = graph
            .all_synsets(PartOfSpeech::Noun)
            .into_iter()
            .map(|id| graph.concept(id).name())
            .collect();
        assert_eq!(nouns, ["animal.n.01", "cat.n.01", "dog.n.01"]);

        let adjectives: Vec<&str> = graph
            .all_synsets(PartOfSpeech::Adjective)
            .into_iter()
            .map(|id| graph.concept(id).name())
            .collect();
        assert_eq!(adjectives, ["chromatic.a.03", "red.s.01"]);

        assert!(graph.all_synsets(PartOfSpeech::Adverb).is_empty());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut builder = GraphBuilder::new();
        builder.add_concept(noun("dog.n.01", "dog")).unwrap();
        assert!(builder.add_concept(noun("dog.n.01", "hound")).is_err());
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_link_unknown_concept() {
        let mut builder = GraphBuilder::new();
        builder.add_concept(noun("dog.n.01", "dog")).unwrap();
        assert!(matches!(
            builder.link("canine.n.02", "dog.n.01"),
            Err(WnlError::NotFound(_))
        ));
    }
}
