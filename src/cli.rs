use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Movie and show lookup against the OMDb catalog, with small in-memory caches.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log output format
    #[arg(long, value_enum, default_value_t = DEFAULT_TRACING_FORMAT)]
    pub tracing: TracingFormat,

    /// TOML file with configuration; environment variables take precedence
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search titles once and print the results
    Search {
        query: String,
        /// Override the configured minimum query length
        #[arg(long)]
        min_length: Option<usize>,
    },
    /// Print details for one IMDb id
    Details { id: String },
    /// Read input values from stdin, one per line; `:d <id>` shows details
    Interactive,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable output for development
    Pretty,
    /// Structured JSON for log aggregation
    Json,
}

#[cfg(debug_assertions)]
const DEFAULT_TRACING_FORMAT: TracingFormat = TracingFormat::Pretty;
#[cfg(not(debug_assertions))]
const DEFAULT_TRACING_FORMAT: TracingFormat = TracingFormat::Json;
