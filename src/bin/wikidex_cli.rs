use clap::{Parser, Subcommand, ValueEnum};
use std::io::BufRead;
use std::path::PathBuf;
use wikidex::builder::FieldIndexBuilder;
use wikidex::core::config::Config;
use wikidex::core::types::{FieldDoc, FieldKind};
use wikidex::storage::layout::StorageLayout;
use wikidex::Engine;

#[derive(Parser)]
#[command(name = "wikidex-cli", about = "Build and query a sharded inverted-index corpus")]
struct Cli {
    /// Root of the on-disk layout (defaults to WIKIDEX_STORAGE_ROOT, then ./data)
    #[arg(long, global = true)]
    storage_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build one field's posting shards and descriptor from a JSON-lines
    /// file of `{"doc_id": <u32>, "text": "<string>"}` records.
    Build {
        #[arg(long, value_enum)]
        field: CliField,
        #[arg(long)]
        input: PathBuf,
    },
    /// Run a ranked query against an already-built corpus.
    Query {
        query: String,
        #[arg(long, value_enum, default_value = "search")]
        endpoint: CliEndpoint,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CliField {
    Body,
    Title,
    Anchor,
}

impl From<CliField> for FieldKind {
    fn from(field: CliField) -> Self {
        match field {
            CliField::Body => FieldKind::Body,
            CliField::Title => FieldKind::Title,
            CliField::Anchor => FieldKind::Anchor,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CliEndpoint {
    Search,
    SearchTitle,
    SearchBody,
    SearchAnchor,
}

#[derive(serde::Deserialize)]
struct FieldDocRecord {
    doc_id: u32,
    text: String,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let config = storage_config(cli.storage_root);

    let result = match cli.command {
        Command::Build { field, input } => run_build(config, field.into(), input),
        Command::Query { query, endpoint } => run_query(config, &query, endpoint),
    };

    if let Err(err) = result {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn storage_config(storage_root: Option<PathBuf>) -> Config {
    let mut config = Config::from_env();
    if let Some(root) = storage_root {
        config.storage_root = root;
    }
    config
}

fn run_build(config: Config, field: FieldKind, input: PathBuf) -> wikidex::core::error::Result<()> {
    let layout = StorageLayout::new(config.storage_root.clone())?;

    let file = std::fs::File::open(&input)?;
    let reader = std::io::BufReader::new(file);
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: FieldDocRecord = serde_json::from_str(&line)?;
        docs.push(FieldDoc::new(record.doc_id.into(), record.text));
    }

    log::info!("building {} field from {} documents", field.folder_name(), docs.len());
    let builder = FieldIndexBuilder::new(field, &layout, &config);
    let descriptor = builder.build(&docs)?;
    log::info!("wrote descriptor with {} terms", descriptor.term_count());
    Ok(())
}

fn run_query(config: Config, query: &str, endpoint: CliEndpoint) -> wikidex::core::error::Result<()> {
    let engine = Engine::load(config)?;
    let results = match endpoint {
        CliEndpoint::Search => engine.search(query)?,
        CliEndpoint::SearchTitle => engine.search_title(query)?,
        CliEndpoint::SearchBody => engine.search_body(query)?,
        CliEndpoint::SearchAnchor => engine.search_anchor(query)?,
    };

    for (doc_id, title) in results {
        println!("{}\t{}", doc_id.value(), title);
    }
    Ok(())
}
