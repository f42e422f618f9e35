//! CLI module - Command-line interface for mangadb

mod commands;

use clap::{Parser, Subcommand};

use crate::services::IngestSource;

/// mangadb - Manga metadata collector
/// Pulls manga from Jikan into a local catalog and serves it over HTTP
#[derive(Parser)]
#[command(name = "mangadb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    #[command(alias = "web")]
    Serve,

    /// Store every manga from a Jikan listing
    #[command(alias = "i")]
    Ingest {
        /// Listing to ingest
        #[arg(value_enum)]
        source: IngestSource,
    },

    /// Find a manga on Jikan by name and store the best match
    #[command(alias = "s")]
    Search {
        /// Manga name
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// List stored manga
    #[command(alias = "ls", alias = "l")]
    List {
        /// Case-insensitive substring of the name
        #[arg(long)]
        name: Option<String>,
        /// Comma-separated genres; any match
        #[arg(long)]
        genres: Option<String>,
        /// Exact status, e.g. Publishing
        #[arg(long)]
        status: Option<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
