//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "questlog")]
#[command(about = "Generate game documents from a catalog using IGDB metadata", long_about = None)]
pub(crate) struct Cli {
    /// Catalog CSV with name,status,platform,notes columns
    #[arg(long, global = true, default_value = "games.csv")]
    pub catalog: PathBuf,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for the batch `generate` command.
#[derive(Args, Clone)]
pub(crate) struct GenerateArgs {
    /// Directory documents are written to
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Follow-up report path (default: <output>/follow-up.csv)
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Minimum pause between entries, in seconds
    #[arg(long, default_value_t = 5)]
    pub min_delay: u64,

    /// Maximum pause between entries, in seconds
    #[arg(long, default_value_t = 30)]
    pub max_delay: u64,

    /// Process only the first N catalog entries
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate a document for every catalog entry
    Generate(GenerateArgs),

    /// Generate the document for a single game
    #[command(name = "generate:single")]
    Single {
        /// Game name (looked up in the catalog, otherwise used as-is)
        name: String,

        /// Write the document instead of printing it
        #[arg(long)]
        save: bool,

        /// Directory documents are written to with --save
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },

    /// Show the cached access token, obtaining one if needed
    Token {
        /// Always exchange credentials for a new token
        #[arg(long)]
        refresh: bool,
    },
}
