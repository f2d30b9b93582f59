//! JSON snapshot loader
//!
//! A snapshot is a JSON array of concept records:
//!
//! ```json
//! [
//!   {"name": "entity.n.01", "pos": "n", "lemmas": ["entity"],
//!    "definition": "that which is perceived or known or inferred to have its own distinct existence"},
//!   {"name": "physical_entity.n.01", "pos": "n", "lemmas": ["physical_entity"],
//!    "definition": "an entity that has physical existence", "hypernyms": ["entity.n.01"]}
//! ]
//! ```
//!
//! `hyponyms` may be listed as well; both lists feed the same edge set.

use std::path::Path;

use serde::{Deserialize, Serialize};

use wnl_core::{Concept, LexicalGraph, PartOfSpeech, Result, WnlError};

use crate::memory::{GraphBuilder, WordNetGraph};

/// One concept as stored in a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptRecord {
    pub name: String,

    /// `n`, `v`, `a`, `s`, `r` or the spelled-out tag
    pub pos: String,

    #[serde(default)]
    pub lemmas: Vec<String>,

    #[serde(default)]
    pub definition: String,

    #[serde(default)]
    pub hypernyms: Vec<String>,

    #[serde(default)]
    pub hyponyms: Vec<String>,
}

/// Load a snapshot file
pub fn load_json(path: impl AsRef<Path>) -> Result<WordNetGraph> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| WnlError::file_access(path, e))?;
    let graph = from_json_str(&content).map_err(|e| match e {
        WnlError::GraphLoad { message, .. } => WnlError::graph_load(path, message),
        other => other,
    })?;

    tracing::info!(
        path = %path.display(),
        concepts = graph.len(),
        links = graph.edge_count(),
        "Loaded JSON snapshot"
    );
    Ok(graph)
}

/// Parse snapshot text
pub fn from_json_str(content: &str) -> Result<WordNetGraph> {
    let records: Vec<ConceptRecord> = serde_json::from_str(content)
        .map_err(|e| WnlError::graph_load("<json>", e.to_string()))?;
    from_records(records)
}

/// Build a graph from already parsed records
pub fn from_records(records: Vec<ConceptRecord>) -> Result<WordNetGraph> {
    let mut builder = GraphBuilder::new();
    let mut links = Vec::new();

    for record in records {
        let pos: PartOfSpeech = record
            .pos
            .parse()
            .map_err(|e: WnlError| WnlError::graph_load("<json>", format!("{}: {e}", record.name)))?;

        let concept = Concept {
            name: record.name,
            pos,
            lemmas: record.lemmas,
            definition: record.definition,
        };
        for hypernym in record.hypernyms {
            links.push((hypernym, concept.name.clone()));
        }
        for hyponym in record.hyponyms {
            links.push((concept.name.clone(), hyponym));
        }

        builder
            .add_concept(concept)
            .map_err(|e| WnlError::graph_load("<json>", e.to_string()))?;
    }

    for (hypernym, hyponym) in links {
        builder.link(&hypernym, &hyponym).map_err(|e| {
            WnlError::graph_load(
                "<json>",
                format!("link {hypernym} -> {hyponym} references an unknown concept: {e}"),
            )
        })?;
    }

    Ok(builder.build())
}
