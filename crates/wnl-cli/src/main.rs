//! WNL CLI - Generates word lists from WordNet
//!
//! Usage:
//!   wn-lists --list lemmas --root animal.n.01
//!   wn-lists --list tokens --root animal.n.01 --no-expand
//!   wn-lists --list pos_n --graph /usr/share/wordnet/dict

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use wnl_core::config::{AppConfig, GraphFormat, LoggingConfig};
use wnl_core::PartOfSpeech;
use wnl_lists::{ListBuilder, ListKind, Tokenizer};

#[derive(Parser, Debug)]
#[command(name = "wn-lists")]
#[command(about = "Generates lists from WordNet")]
#[command(version)]
struct Cli {
    /// Create a list analysing one of these
    #[arg(long, value_enum)]
    list: ListArg,

    /// Starting synset (ignored by pos_* lists)
    #[arg(long)]
    root: Option<String>,

    /// JSON snapshot or WordNet database directory
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Graph source format (auto, json, wndb)
    #[arg(long)]
    graph_format: Option<GraphFormat>,

    /// Use the root alone instead of its ranked hyponyms
    #[arg(long)]
    no_expand: bool,

    /// Directory to write lists into
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Stopword language for definition tokens
    #[arg(long)]
    language: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ListArg {
    Lemmas,
    Tokens,
    #[value(name = "pos_n")]
    PosN,
    #[value(name = "pos_a")]
    PosA,
    #[value(name = "pos_v")]
    PosV,
    #[value(name = "pos_r")]
    PosR,
}

impl ListArg {
    fn kind(self) -> ListKind {
        match self {
            Self::Lemmas => ListKind::Lemmas,
            Self::Tokens => ListKind::DefinitionTokens,
            Self::PosN => ListKind::PartOfSpeech(PartOfSpeech::Noun),
            Self::PosA => ListKind::PartOfSpeech(PartOfSpeech::Adjective),
            Self::PosV => ListKind::PartOfSpeech(PartOfSpeech::Verb),
            Self::PosR => ListKind::PartOfSpeech(PartOfSpeech::Adverb),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_tracing(&config.logging);

    let path = run(&cli, &config)?;
    tracing::info!(path = %path.display(), "List complete");
    Ok(())
}

/// File (when given), then environment, then flags
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let base = match &cli.config {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(apply_cli(base, cli))
}

/// Command-line flags take precedence over file and environment
fn apply_cli(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(root) = &cli.root {
        config.lists.default_root = root.clone();
    }
    if let Some(graph) = &cli.graph {
        config.graph.path = graph.clone();
    }
    if let Some(format) = cli.graph_format {
        config.graph.format = format;
    }
    if cli.no_expand {
        config.lists.expanded = false;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(language) = &cli.language {
        config.tokenizer.language = language.clone();
    }
    config
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.level.as_str().into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Build the selected list and write it; returns the written file
fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<PathBuf> {
    let graph = wnl_graph::load_graph(&config.graph)
        .with_context(|| format!("loading graph from {}", config.graph.path.display()))?;

    let kind = cli.list.kind();
    let tokenizer = match kind {
        ListKind::DefinitionTokens => Some(Tokenizer::for_language(&config.tokenizer.language)?),
        _ => None,
    };

    let root = config.lists.default_root.as_str();
    let mut builder = ListBuilder::new(&graph);
    let report = builder.build(kind, root, config.lists.expanded, tokenizer.as_ref())?;

    Ok(report.write_to(&config.output.dir)?)
}
