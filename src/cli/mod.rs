//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "docsense",
    version,
    about = "Document understanding and semantic retrieval core",
    long_about = "Docsense extracts text from uploaded documents (PDF, DOCX, images, plain text, \
                  with OCR fallback for scanned pages), classifies them into a fixed taxonomy via \
                  weighted multi-signal heuristics, and ranks documents and sentences against \
                  free-text queries using local sentence embeddings."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/docsense/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract plain text from a document file
    Extract {
        /// Document file (format inferred from the extension)
        file: PathBuf,
    },

    /// Classify a document into a taxonomy category
    Classify {
        /// Document file (format inferred from the extension)
        file: PathBuf,

        /// Show the per-category scoreboard alongside the winner
        #[arg(long)]
        scores: bool,
    },

    /// Run the full upload pipeline on a document: extract, classify, embed
    Ingest {
        /// Document file (format inferred from the extension)
        file: PathBuf,

        /// Document description stored alongside the upload
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Rank the documents of a directory against a query
    Search {
        /// Search query text
        query: String,

        /// Directory of documents to rank
        #[arg(short, long)]
        dir: PathBuf,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Show results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Highlight the sentences of a document most relevant to a query
    Highlight {
        /// Document file
        file: PathBuf,

        /// Query text
        query: String,

        /// Show results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
