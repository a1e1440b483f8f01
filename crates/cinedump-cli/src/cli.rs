//! Command-line interface definition.

use std::path::PathBuf;

use cinedump_core::config::CliOverrides;
use cinedump_parse::FormatKind;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cinedump")]
#[command(version, about = "Parse movie metadata list dumps into typed records")]
pub struct Cli {
    /// Directory containing cinedump.toml
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Directory holding the .list dumps
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory for saved collections
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Replace existing archives on save
    #[arg(long, global = true)]
    pub overwrite: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the supported dumps
    Formats,

    /// Parse one dump and print its records
    Parse {
        /// Dump to parse (e.g. "genres", "running-times")
        format: FormatKind,

        /// Dump file (default: <data-dir>/<conventional file name>)
        file: Option<PathBuf>,

        /// Print at most this many records
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Drop ratings with fewer votes
        #[arg(long)]
        min_votes: Option<u32>,

        /// Save the parsed collection under this name
        #[arg(long)]
        save: Option<String>,
    },

    /// Parse several dumps and print the entities present in all of them
    Combine {
        /// Dumps to combine, read from the data directory
        #[arg(required = true)]
        formats: Vec<FormatKind>,

        /// Keep only the running intersection in memory
        #[arg(long)]
        streaming: bool,

        /// Print at most this many records
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Print a saved collection
    Load {
        /// Archive name
        name: String,

        /// Print at most this many records
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

impl Cli {
    /// Flags that override config files and environment.
    pub fn overrides(&self) -> CliOverrides {
        let min_votes = match self.command {
            Commands::Parse { min_votes, .. } => min_votes,
            _ => None,
        };
        CliOverrides {
            data_dir: self.data_dir.clone(),
            storage_dir: self.storage_dir.clone(),
            overwrite: self.overwrite.then_some(true),
            min_votes,
        }
    }
}
