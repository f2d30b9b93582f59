//! Closure engine
//!
//! Computes transitive hyponym/hypernym closures over any [`LexicalGraph`]
//! and ranks the descendants of a root by the size of their own subtree.
//!
//! Every closure is memoized per `(concept, direction)`. A traversal that
//! reaches a concept whose closure is already known unions the cached set
//! instead of walking it again, and the visited set doubles as the cycle
//! guard, so each traversal terminates even on cyclic input.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

use wnl_core::{ConceptId, Direction, LexicalGraph, Result, WnlError};

/// Shared, immutable closure result
pub type ClosureSet = Rc<BTreeSet<ConceptId>>;

/// Cache counters, reported at debug level by callers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub cycles: usize,
}

/// Memoizing closure engine borrowed over one graph
pub struct ClosureEngine<'g, G: LexicalGraph + ?Sized> {
    graph: &'g G,
    cache: HashMap<(ConceptId, Direction), ClosureSet>,
    stats: CacheStats,
}

impl<'g, G: LexicalGraph + ?Sized> ClosureEngine<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            cache: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Every concept reachable from `start` by one or more edges
    ///
    /// `start` itself is only included when a cycle leads back to it.
    pub fn closure(&mut self, start: ConceptId, direction: Direction) -> ClosureSet {
        if let Some(known) = self.cache.get(&(start, direction)) {
            self.stats.hits += 1;
            return Rc::clone(known);
        }
        self.stats.misses += 1;

        let mut visited: BTreeSet<ConceptId> = BTreeSet::new();
        let mut frontier = vec![start];

        while let Some(current) = frontier.pop() {
            for next in self.graph.related(current, direction) {
                if !visited.insert(next) {
                    continue;
                }

                if next == start {
                    self.report_cycle(start, direction);
                    continue;
                }

                // Cached closures are complete, so their members need no walk
                if let Some(known) = self.cache.get(&(next, direction)).map(Rc::clone) {
                    let closes_cycle = known.contains(&start) && !visited.contains(&start);
                    visited.extend(known.iter().copied());
                    if closes_cycle {
                        self.report_cycle(start, direction);
                    }
                    continue;
                }

                frontier.push(next);
            }
        }

        let closure = Rc::new(visited);
        self.cache.insert((start, direction), Rc::clone(&closure));
        closure
    }

    /// Hyponym closure
    pub fn narrower(&mut self, start: ConceptId) -> ClosureSet {
        self.closure(start, Direction::Narrower)
    }

    /// Hypernym closure
    pub fn broader(&mut self, start: ConceptId) -> ClosureSet {
        self.closure(start, Direction::Broader)
    }

    pub fn closure_size(&mut self, start: ConceptId, direction: Direction) -> usize {
        self.closure(start, direction).len()
    }

    /// Hyponym closure of `root`, most productive subtrees first
    ///
    /// Concepts are ordered by descending size of their own hyponym
    /// closure; equal sizes fall back to ascending concept name.
    pub fn expand(&mut self, root: ConceptId) -> Vec<ConceptId> {
        // Children before parents, so every closure below is a cache union
        for id in self.post_order(root, Direction::Narrower) {
            self.closure(id, Direction::Narrower);
        }

        let members = self.narrower(root);
        let mut ranked: Vec<(usize, ConceptId)> = members
            .iter()
            .map(|&id| (self.closure_size(id, Direction::Narrower), id))
            .collect();

        let graph = self.graph;
        ranked.sort_by(|(left_size, left), (right_size, right)| {
            right_size
                .cmp(left_size)
                .then_with(|| graph.concept(*left).name.cmp(&graph.concept(*right).name))
        });

        tracing::debug!(
            root = %graph.concept(root).name,
            concepts = ranked.len(),
            cache_hits = self.stats.hits,
            cache_misses = self.stats.misses,
            "Expanded concept"
        );

        ranked.into_iter().map(|(_, id)| id).collect()
    }

    /// Resolve `name` and expand it
    pub fn expand_by_name(&mut self, name: &str) -> Result<Vec<ConceptId>> {
        let root = self.graph.synset(name)?;
        Ok(self.expand(root))
    }

    /// Depth-first post-order over everything reachable from `root`, root last
    fn post_order(&self, root: ConceptId, direction: Direction) -> Vec<ConceptId> {
        let mut order = Vec::new();
        let mut seen: HashSet<ConceptId> = HashSet::from([root]);
        let mut stack = vec![(root, self.graph.related(root, direction), 0usize)];

        while let Some((node, children, cursor)) = stack.last_mut() {
            if let Some(&child) = children.get(*cursor) {
                *cursor += 1;
                if seen.insert(child) {
                    let grandchildren = self.graph.related(child, direction);
                    stack.push((child, grandchildren, 0));
                }
            } else {
                order.push(*node);
                stack.pop();
            }
        }

        order
    }

    fn report_cycle(&mut self, start: ConceptId, direction: Direction) {
        self.stats.cycles += 1;
        let err = WnlError::CycleDetected(self.graph.concept(start).name.clone());
        tracing::warn!(error = %err, %direction, "Closure reached its own start concept");
    }
}

// ============================================================================
// Tests
// ============================================================================
