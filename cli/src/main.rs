//! `wordvec` command line entry point.

mod commands;
mod config;
mod telemetry;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Inspect pretrained word vectors and materialize embedding matrices.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report size, width and vocabulary coverage of a word vector file.
    Inspect {
        /// TOML settings; defaults to `inspect.toml` when present.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Build a dense embedding matrix for a vocabulary.
    Matrix {
        /// TOML settings; defaults to `matrix.toml` when present.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Export the pretrained vectors of the vocabulary tokens that have one.
    Dict {
        /// TOML settings; defaults to `dict.toml` when present.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry();
    match cli.command {
        Command::Inspect { config } => commands::run_inspect(config),
        Command::Matrix { config } => commands::run_matrix(config),
        Command::Dict { config } => commands::run_dict(config),
    }
}
