// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # electra-eval
//!
//! Command-line interface for timing ELECTRA discriminators.
//!
//! ## Usage
//! ```bash
//! # Evaluate the default small/base/large models on the default sentences
//! electra-eval evaluate
//!
//! # Custom run from a config file, as JSON
//! electra-eval --config configs/fact-check.toml evaluate --format json
//!
//! # Per-token scores for one sentence
//! electra-eval score "the cat barked"
//!
//! # Process and host memory
//! electra-eval status
//! ```

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "electra-eval",
    about = "Time and score ELECTRA replaced-token discriminators",
    version,
    author
)]
struct Cli {
    /// Path to a TOML evaluation config (CLI arguments override it).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Table, charts and summaries.
    Table,
    /// Records, summaries and agreement as JSON on stdout.
    Json,
}

/// Where models come from, overriding the config file.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Treat model ids as local directories instead of hub repositories.
    #[arg(long)]
    local: bool,

    /// Hugging Face cache directory.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Hub revision (branch, tag or commit).
    #[arg(long)]
    revision: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every model over every sentence and report timing, memory and predictions.
    Evaluate {
        /// Model id to evaluate (repeatable; replaces the configured list).
        #[arg(short, long = "model")]
        models: Vec<String>,

        /// Sentence to evaluate (repeatable; replaces the configured list).
        #[arg(short, long = "sentence")]
        sentences: Vec<String>,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show per-token discriminator scores for one sentence.
    Score {
        /// Model id to load.
        #[arg(short, long, default_value = "google/electra-small-discriminator")]
        model: String,

        /// Sentence to score.
        sentence: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Display current process and host memory.
    Status,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Evaluate {
            models,
            sentences,
            format,
            source,
        } => commands::evaluate::execute(cli.config, models, sentences, format, source),
        Commands::Score {
            model,
            sentence,
            source,
        } => commands::score::execute(cli.config, model, sentence, source),
        Commands::Status => commands::status::execute(),
    }
}
