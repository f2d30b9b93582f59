//! WNL Graph - Lexical graph storage and traversal
//!
//! Holds a WordNet-style taxonomy in memory, loads it from a JSON
//! snapshot or a WordNet database directory, and computes memoized
//! hyponym/hypernym closures over it.

use std::path::Path;

use wnl_core::{GraphConfig, GraphFormat, Result};

pub mod closure;
pub mod memory;
pub mod snapshot;
pub mod wndb;

pub use closure::{CacheStats, ClosureEngine, ClosureSet};
pub use memory::{GraphBuilder, WordNetGraph};
pub use snapshot::{load_json, ConceptRecord};
pub use wndb::load_wndb;

/// Resolve `Auto` against what is on disk: directories are WordNet databases
pub fn detect_format(path: &Path, format: GraphFormat) -> GraphFormat {
    match format {
        GraphFormat::Auto if path.is_dir() => GraphFormat::Wndb,
        GraphFormat::Auto => GraphFormat::Json,
        explicit => explicit,
    }
}

/// Load the graph described by the configuration
pub fn load_graph(config: &GraphConfig) -> Result<WordNetGraph> {
    match detect_format(&config.path, config.format) {
        GraphFormat::Wndb => load_wndb(&config.path),
        _ => load_json(&config.path),
    }
}
