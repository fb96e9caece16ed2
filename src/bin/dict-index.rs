//! Command-line interface for dict-index
//! Builds a search index from a dictionary XML export and queries it.
//!
//! Usage:
//!   dict-index index --xml `<file>` --lang `<hu|no>` --index-dir `<dir>`   - Build an index
//!   dict-index dump --xml `<file>`                                     - Print parsed entries as JSON lines
//!   dict-index search --index-dir `<dir>` `<query>`                      - Search an index

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{error, info};

use dict_index::indexer::{IndexService, IndexerConfig};
use dict_index::parser::{EntryParser, XmlEventSource};
use dict_index::readers::DictionarySearcher;
use dict_index::utils::ProgressState;
use dict_index::{Language, Result};

#[derive(Parser)]
#[command(name = "dict-index", version, about = "Index and search a bilingual dictionary export")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an export and write it into a fresh index
    Index {
        /// JSON file with indexer settings; command-line values override it
        #[arg(long)]
        config: Option<PathBuf>,
        /// XML export to read
        #[arg(long)]
        xml: Option<String>,
        /// Headword language of the export (hu or no)
        #[arg(long)]
        lang: Option<Language>,
        /// Directory to create the index in
        #[arg(long)]
        index_dir: Option<String>,
        /// Skip the headword suggestion documents
        #[arg(long)]
        no_suggestions: bool,
    },
    /// Print every parsed entry of an export as one JSON line
    Dump {
        #[arg(long)]
        xml: PathBuf,
    },
    /// Search an index
    Search {
        #[arg(long)]
        index_dir: PathBuf,
        /// Restrict headword matches to one language (hu or no)
        #[arg(long)]
        lang: Option<Language>,
        /// Maximum number of results
        #[arg(long, default_value_t = 20)]
        max: usize,
        /// List headword completions instead of entries
        #[arg(long)]
        suggest: bool,
        query: String,
    },
}

fn report_progress(state: &ProgressState) -> bool {
    info!("{}: {}% ({} entries)", state.state_id, state.percent(), state.entries);
    false
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Index { config, xml, lang, index_dir, no_suggestions } => {
            let mut indexer_config = match config {
                Some(path) => IndexerConfig::from_json_file(path)?,
                None => IndexerConfig::default(),
            };
            if let Some(xml) = xml {
                indexer_config.input_file = xml;
            }
            if let Some(lang) = lang {
                indexer_config.language = lang;
            }
            if let Some(index_dir) = index_dir {
                indexer_config.index_dir = index_dir;
            }
            if no_suggestions {
                indexer_config.build_suggestions = false;
            }
            let stats = IndexService::index_file(&indexer_config, Some(report_progress))?;
            println!("{}", serde_json::to_string(&stats)?);
        }
        Commands::Dump { xml } => {
            let parser = EntryParser::new(XmlEventSource::from_file(&xml)?);
            let mut out = BufWriter::new(io::stdout().lock());
            for entry in parser {
                serde_json::to_writer(&mut out, &entry?)?;
                writeln!(out)?;
            }
            out.flush()?;
        }
        Commands::Search { index_dir, lang, max, suggest, query } => {
            let searcher = DictionarySearcher::open(&index_dir)?;
            if suggest {
                for suggestion in searcher.suggestions(&query, max)? {
                    println!("{}", suggestion);
                }
            } else {
                for hit in searcher.search(&query, lang, max)? {
                    println!("{}", serde_json::to_string(&hit)?);
                }
            }
        }
    }
    Ok(())
}
