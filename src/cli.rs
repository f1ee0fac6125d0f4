//! CLI interface for the assessment recommender

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "assessment-recommender")]
#[command(about = "Recommend professional assessments for a job description")]
#[command(
    long_about = "Semantic similarity search over an assessment catalog with rule-based category balancing for mixed technical/behavioral queries"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend assessments for a query or job description URL
    Recommend {
        /// Free-text job description, or a URL pointing at one
        query: String,

        /// Number of recommendations to return (clamped to 5-10)
        #[arg(short = 'k', long, default_value_t = 10)]
        top_k: usize,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Analyze the intent of a query without searching
    Analyze {
        /// Free-text query
        query: String,
    },

    /// Run recommendations for every query in a file
    Batch {
        /// Input file with one query per line
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV of (query, assessment_url) pairs
        #[arg(short, long)]
        output: PathBuf,

        /// Recommendations per query (clamped to 5-10)
        #[arg(short = 'k', long, default_value_t = 10)]
        top_k: usize,
    },

    /// Catalog data commands
    Data {
        #[command(subcommand)]
        action: DataAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum DataAction {
    /// Write the built-in sample catalog to the data directory
    Seed {
        /// Overwrite an existing catalog file
        #[arg(short, long)]
        force: bool,
    },

    /// List catalog records
    Show {
        /// Maximum number of records to print
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}
