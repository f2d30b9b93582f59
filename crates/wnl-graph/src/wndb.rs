//! WordNet database loader
//!
//! Reads the Princeton WordNet `data.<pos>` and `index.<pos>` files
//! (WordNet 3.0/3.1 layout) into a [`WordNetGraph`].
//!
//! Concepts are named `<lemma>.<pos>.<NN>`: the synset's first lemma in
//! lower case, its synset type letter, and the 1-based position of the
//! synset offset in that lemma's index entry. Adjective satellites are
//! indexed in `index.adj`, so they share the `a` offset list but keep `s`
//! in their name. Only `@` (hypernym) and `~` (hyponym) pointers become
//! edges; instance pointers are ignored.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use wnl_core::{Concept, ConceptId, LexicalGraph, PartOfSpeech, Result, WnlError};

use crate::memory::{GraphBuilder, WordNetGraph};

/// Suffixes of the per-tag database files
const POS_FILES: [&str; 4] = ["noun", "verb", "adj", "adv"];

/// Field widths in data lines: two hex digits of words, three decimal digits of pointers
const MAX_WORDS: u64 = 0xff;
const MAX_POINTERS: u64 = 999;

/// Syntactic markers on adjective lemmas: `(a)`, `(p)`, `(ip)`
static ADJECTIVE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?:a|p|ip)\)$").expect("valid adjective marker pattern"));

// ============================================================================
// Line records
// ============================================================================

/// One `index.<pos>` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub lemma: String,
    pub pos: char,
    /// Synset offsets in sense order
    pub offsets: Vec<u64>,
}

/// A pointer from a `data.<pos>` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    pub symbol: String,
    pub offset: u64,
    pub pos: char,
}

/// One `data.<pos>` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRecord {
    pub offset: u64,
    /// Synset type: `n`, `v`, `a`, `s` or `r`
    pub pos: char,
    pub words: Vec<String>,
    pub pointers: Vec<Pointer>,
    pub gloss: String,
}

fn field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> std::result::Result<&'a str, String> {
    fields.next().ok_or_else(|| format!("missing {what}"))
}

fn number(raw: &str, radix: u32, what: &str) -> std::result::Result<u64, String> {
    u64::from_str_radix(raw, radix).map_err(|_| format!("invalid {what}: {raw}"))
}

fn pos_char(raw: &str) -> std::result::Result<char, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if PartOfSpeech::from_char(c).is_some() => Ok(c),
        _ => Err(format!("invalid part of speech: {raw}")),
    }
}

/// Index files list satellites under `a`
fn index_pos(pos: char) -> char {
    if pos == 's' {
        'a'
    } else {
        pos
    }
}

/// Parse `lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt offset...`
pub fn parse_index_line(line: &str) -> std::result::Result<IndexEntry, String> {
    let mut fields = line.split_whitespace();
    let lemma = field(&mut fields, "lemma")?.to_string();
    let pos = pos_char(field(&mut fields, "pos")?)?;
    let synset_cnt = number(field(&mut fields, "synset_cnt")?, 10, "synset_cnt")? as usize;
    let p_cnt = number(field(&mut fields, "p_cnt")?, 10, "p_cnt")? as usize;
    for _ in 0..p_cnt {
        field(&mut fields, "pointer symbol")?;
    }
    field(&mut fields, "sense_cnt")?;
    field(&mut fields, "tagsense_cnt")?;

    let offsets = fields
        .map(|raw| number(raw, 10, "synset offset"))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if offsets.len() != synset_cnt {
        return Err(format!(
            "expected {synset_cnt} offsets for {lemma}, found {}",
            offsets.len()
        ));
    }

    Ok(IndexEntry {
        lemma,
        pos,
        offsets,
    })
}

/// Parse `offset lex_filenum ss_type w_cnt word lex_id... p_cnt pointer... [frames] | gloss`
pub fn parse_data_line(line: &str) -> std::result::Result<DataRecord, String> {
    let (columns, gloss) = line.split_once('|').unwrap_or((line, ""));
    let mut fields = columns.split_whitespace();

    let offset = number(field(&mut fields, "offset")?, 10, "offset")?;
    field(&mut fields, "lex_filenum")?;
    let pos = pos_char(field(&mut fields, "ss_type")?)?;

    let w_cnt = number(field(&mut fields, "w_cnt")?, 16, "w_cnt")?;
    if w_cnt == 0 {
        return Err(format!("synset {offset} has no words"));
    }
    if w_cnt > MAX_WORDS {
        return Err(format!("synset {offset} claims {w_cnt} words"));
    }
    let mut words = Vec::with_capacity(w_cnt as usize);
    for _ in 0..w_cnt {
        let word = field(&mut fields, "word")?;
        field(&mut fields, "lex_id")?;
        words.push(ADJECTIVE_MARKER.replace(word, "").into_owned());
    }

    let p_cnt = number(field(&mut fields, "p_cnt")?, 10, "p_cnt")?;
    if p_cnt > MAX_POINTERS {
        return Err(format!("synset {offset} claims {p_cnt} pointers"));
    }
    let mut pointers = Vec::with_capacity(p_cnt as usize);
    for _ in 0..p_cnt {
        let symbol = field(&mut fields, "pointer symbol")?.to_string();
        let target = number(field(&mut fields, "pointer offset")?, 10, "pointer offset")?;
        let target_pos = pos_char(field(&mut fields, "pointer pos")?)?;
        field(&mut fields, "source/target")?;
        pointers.push(Pointer {
            symbol,
            offset: target,
            pos: target_pos,
        });
    }

    Ok(DataRecord {
        offset,
        pos,
        words,
        pointers,
        gloss: gloss.trim().to_string(),
    })
}

/// Gloss with quoted example sentences removed
pub fn definition_from_gloss(gloss: &str) -> String {
    gloss
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty() && !part.starts_with('"'))
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Loader
// ============================================================================

/// Load every `data.<pos>` file present in `dir`
pub fn load_wndb(dir: impl AsRef<Path>) -> Result<WordNetGraph> {
    let dir = dir.as_ref();
    let mut index_files = Vec::new();
    let mut data_files = Vec::new();

    for suffix in POS_FILES {
        let data_path = dir.join(format!("data.{suffix}"));
        if !data_path.is_file() {
            tracing::debug!(path = %data_path.display(), "Skipping missing data file");
            continue;
        }
        let index_path = dir.join(format!("index.{suffix}"));

        let data = read(&data_path)?;
        let index = read(&index_path)?;
        data_files.push((data_path, data));
        index_files.push((index_path, index));
    }

    if data_files.is_empty() {
        return Err(WnlError::graph_load(dir, "no WordNet data files found"));
    }

    let graph = from_sources(&index_files, &data_files)?;
    tracing::info!(
        path = %dir.display(),
        concepts = graph.len(),
        links = graph.edge_count(),
        "Loaded WordNet database"
    );
    Ok(graph)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| WnlError::file_access(path, e))
}

/// Content lines with their 1-based line numbers; license header lines start with spaces
fn content_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.starts_with("  ") && !line.trim().is_empty())
        .map(|(n, line)| (n + 1, line))
}

/// Build a graph from already read index and data file contents
pub fn from_sources(
    index_files: &[(PathBuf, String)],
    data_files: &[(PathBuf, String)],
) -> Result<WordNetGraph> {
    let mut senses: HashMap<(String, char), Vec<u64>> = HashMap::new();
    for (path, content) in index_files {
        for (line_no, line) in content_lines(content) {
            let entry = parse_index_line(line)
                .map_err(|m| WnlError::graph_load(path, format!("line {line_no}: {m}")))?;
            senses.insert((entry.lemma, entry.pos), entry.offsets);
        }
    }

    let mut records = Vec::new();
    for (path, content) in data_files {
        for (line_no, line) in content_lines(content) {
            let record = parse_data_line(line)
                .map_err(|m| WnlError::graph_load(path, format!("line {line_no}: {m}")))?;
            records.push((path, record));
        }
    }

    let mut builder = GraphBuilder::new();
    let mut ids: HashMap<(char, u64), ConceptId> = HashMap::with_capacity(records.len());

    for (path, record) in &records {
        let lemma = record.words[0].to_lowercase();
        let sense = senses
            .get(&(lemma.clone(), index_pos(record.pos)))
            .and_then(|offsets| offsets.iter().position(|&o| o == record.offset))
            .ok_or_else(|| {
                WnlError::graph_load(
                    *path,
                    format!("synset {:08} is not indexed under {lemma}", record.offset),
                )
            })?;

        let pos = PartOfSpeech::from_char(record.pos)
            .ok_or_else(|| WnlError::graph_load(*path, format!("bad ss_type {}", record.pos)))?;
        let concept = Concept {
            name: format!("{lemma}.{}.{:02}", record.pos, sense + 1),
            pos,
            lemmas: record.words.clone(),
            definition: definition_from_gloss(&record.gloss),
        };

        let id = builder
            .add_concept(concept)
            .map_err(|e| WnlError::graph_load(*path, e.to_string()))?;
        ids.insert((index_pos(record.pos), record.offset), id);
    }

    for (path, record) in &records {
        let id = ids[&(index_pos(record.pos), record.offset)];
        for pointer in &record.pointers {
            let is_hypernym = match pointer.symbol.as_str() {
                "@" => true,
                "~" => false,
                _ => continue,
            };

            let target = ids
                .get(&(index_pos(pointer.pos), pointer.offset))
                .copied()
                .ok_or_else(|| {
                    WnlError::graph_load(
                        *path,
                        format!(
                            "synset {:08} points to missing synset {:08} {}",
                            record.offset, pointer.offset, pointer.pos
                        ),
                    )
                })?;

            if is_hypernym {
                builder.add_hyponym(target, id);
            } else {
                builder.add_hyponym(id, target);
            }
        }
    }

    Ok(builder.build())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const LICENSE: &str = "  1 This software and database is being provided to you, the LICENSEE, by  \n";

    const INDEX_NOUN: &str = "\
entity n 1 1 ~ 1 1 00001740
physical_entity n 1 2 @ ~ 1 0 00001930
abstraction n 6 2 @ ~ 6 3 05854150 00002137 14009763 05913275 04671697 04671464
abstract_entity n 1 2 @ ~ 1 0 00002137
";

    const DATA_NOUN: &str = "\
00001740 03 n 01 entity 0 003 ~ 00001930 n 0000 ~ 00002137 n 0000 ~ 04431553 n 0000 | that which is perceived or known or inferred to have its own distinct existence (living or nonliving)
00001930 03 n 01 physical_entity 0 001 @ 00001740 n 0000 | an entity that has physical existence
00002137 03 n 02 abstraction 0 abstract_entity 0 001 @ 00001740 n 0000 | a general concept formed by extracting common features from specific examples
";

    const INDEX_ADJ: &str = "\
ablaze a 2 1 & 2 0 00226618 00508192
";

    const DATA_ADJ: &str = "\
00226618 00 s 01 ablaze(p) 0 000 | lighted up by or as if by flames; \"the night sky ablaze with stars\"
00508192 00 s 02 ablaze(p) 0 afire(p) 0 000 | keenly excited (especially sexually) or indicating excitement; \"his face ablaze with excitement\"; very bright
";

    fn sources(pairs: &[(&str, &str)]) -> Vec<(PathBuf, String)> {
        pairs
            .iter()
            .map(|(name, content)| (PathBuf::from(name), format!("{LICENSE}{content}")))
            .collect()
    }

    #[test]
    fn test_parse_index_line() {
        let entry =
            parse_index_line("abstraction n 6 2 @ ~ 6 3 05854150 00002137 14009763 05913275 04671697 04671464  ")
                .unwrap();
        assert_eq!(entry.lemma, "abstraction");
        assert_eq!(entry.pos, 'n');
        assert_eq!(entry.offsets[1], 2137);
        assert_eq!(entry.offsets.len(), 6);

        assert!(parse_index_line("dog n 3 0 3 0 02084071").is_err());
    }

    #[test]
    fn test_parse_data_line_with_verb_frames() {
        let record = parse_data_line(
            "00001740 29 v 04 breathe 0 take_a_breath 0 respire 0 suspire 3 002 @ 00002325 v 0000 ~ 00002573 v 0000 02 + 02 00 + 08 00 | draw air into, and expel out of, the lungs; \"I can breathe better now\"",
        )
        .unwrap();

        assert_eq!(record.offset, 1740);
        assert_eq!(record.pos, 'v');
        assert_eq!(record.words, ["breathe", "take_a_breath", "respire", "suspire"]);
        assert_eq!(record.pointers.len(), 2);
        assert_eq!(record.pointers[0].symbol, "@");
        assert_eq!(record.pointers[1].offset, 2573);
    }

    #[test]
    fn test_parse_data_line_errors() {
        assert!(parse_data_line("00001740 03 n 00 000 | empty").is_err());
        assert!(parse_data_line("00001740 03 x 01 dog 0 000 | bad pos").is_err());
        assert!(parse_data_line("00001740 03 n 01 dog 0 002 @ 00002137 n 0000 | truncated").is_err());
    }

    #[test]
    fn test_parse_data_line_rejects_oversized_counts() {
        let err = parse_data_line("00000001 03 n ffffffffffffffff dog 0 000 | x").unwrap_err();
        assert!(err.contains("words"), "{err}");

        let err = parse_data_line("00000001 03 n 01 dog 0 18446744073709551615 | x").unwrap_err();
        assert!(err.contains("pointers"), "{err}");

        let index = sources(&[("index.noun", INDEX_NOUN)]);
        let data = sources(&[("data.noun", "00000001 03 n 1000 dog 0 000 | x\n")]);
        let err = from_sources(&index, &data).unwrap_err();
        assert!(matches!(err, WnlError::GraphLoad { message, .. } if message.starts_with("line 2")));
    }

    #[test]
    fn test_definition_drops_examples() {
        assert_eq!(
            definition_from_gloss("keenly excited; \"his face ablaze with excitement\"; very bright"),
            "keenly excited; very bright"
        );
        assert_eq!(definition_from_gloss(""), "");
    }

    #[test]
    fn test_from_sources_names_and_links() {
        let index = sources(&[("index.noun", INDEX_NOUN), ("index.adj", INDEX_ADJ)]);
        let data = sources(&[
            (
                "data.noun",
                // drop the pointer to a synset outside this fixture
                DATA_NOUN
                    .replace(
                        "003 ~ 00001930 n 0000 ~ 00002137 n 0000 ~ 04431553 n 0000",
                        "002 ~ 00001930 n 0000 ~ 00002137 n 0000",
                    )
                    .as_str(),
            ),
            ("data.adj", DATA_ADJ),
        ]);

        let graph = from_sources(&index, &data).unwrap();
        assert_eq!(graph.len(), 5);

        let entity = graph.synset("entity.n.01").unwrap();
        let abstraction = graph.synset("abstraction.n.02").unwrap();
        assert_eq!(graph.hyponyms(entity).len(), 2);
        assert_eq!(graph.hypernyms(abstraction), vec![entity]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.concept(abstraction).lemma_names(),
            ["abstraction", "abstract_entity"]
        );

        let bright = graph.synset("ablaze.s.02").unwrap();
        assert_eq!(graph.concept(bright).lemma_names(), ["ablaze", "afire"]);
        assert_eq!(
            graph.concept(bright).definition(),
            "keenly excited (especially sexually) or indicating excitement; very bright"
        );
        assert_eq!(graph.all_synsets(PartOfSpeech::Adjective).len(), 2);
    }

    #[test]
    fn test_dangling_hyponym_pointer() {
        let index = sources(&[("index.noun", INDEX_NOUN)]);
        let data = sources(&[("data.noun", DATA_NOUN)]);

        let err = from_sources(&index, &data).unwrap_err();
        assert!(matches!(err, WnlError::GraphLoad { message, .. } if message.contains("04431553")));
    }

    #[test]
    fn test_unindexed_synset() {
        let index = sources(&[("index.noun", "entity n 1 1 ~ 1 1 00001740\n")]);
        let data = sources(&[("data.noun", "00009999 03 n 01 thing 0 000 | a thing\n")]);

        let err = from_sources(&index, &data).unwrap_err();
        assert!(matches!(err, WnlError::GraphLoad { path, .. } if path == Path::new("data.noun")));
    }

    #[test]
    fn test_load_wndb_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.adj"), INDEX_ADJ).unwrap();
        std::fs::write(dir.path().join("data.adj"), DATA_ADJ).unwrap();

        let graph = load_wndb(dir.path()).unwrap();
        assert!(graph.synset("ablaze.s.01").is_ok());

        let empty = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_wndb(empty.path()),
            Err(WnlError::GraphLoad { .. })
        ));
    }

    #[test]
    fn test_load_wndb_missing_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.adj"), DATA_ADJ).unwrap();

        assert!(matches!(
            load_wndb(dir.path()),
            Err(WnlError::FileAccess { .. })
        ));
    }
}
