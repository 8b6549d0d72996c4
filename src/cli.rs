//! Command-line interface parsing for wildfacts
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! a validated [`PipelineConfig`].

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::data::wikipedia::PAGE_CACHE_TTL_DAYS;
use crate::pipeline::{CacheMode, PipelineConfig, DEFAULT_SEARCH_LIMIT};

/// Longest accepted page cache TTL, in days
pub const MAX_CACHE_TTL_DAYS: i64 = 36_500;

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("Invalid search limit: {0}. Must be at least 1")]
    InvalidLimit(usize),

    #[error("Invalid cache TTL: {0} days. Must be between 1 and {max}", max = MAX_CACHE_TTL_DAYS)]
    InvalidTtl(i64),

    #[error("Invalid timeout: {0} seconds. Must be at least 1")]
    InvalidTimeout(u64),
}

/// wildfacts - Discover wildlife facts
#[derive(Parser, Debug)]
#[command(name = "wildfacts")]
#[command(about = "Wildlife facts from live sources with an offline fallback")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Skip the random animal API, e.g. when the network blocks it
    #[arg(long, global = true, env = "WILDFACTS_SKIP_RANDOM_API")]
    pub skip_random_api: bool,

    /// Keep the Wikipedia page cache in memory only
    #[arg(long, global = true, conflicts_with = "cache_dir")]
    pub no_cache: bool,

    /// Directory for the persistent page cache
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Days before a cached Wikipedia page is refreshed
    #[arg(long, global = true, value_name = "DAYS", default_value_t = PAGE_CACHE_TTL_DAYS)]
    pub cache_ttl_days: i64,

    /// Maximum Wikipedia hits resolved per search
    #[arg(long, global = true, value_name = "N", default_value_t = DEFAULT_SEARCH_LIMIT)]
    pub limit: usize,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_name = "SECS", default_value_t = 5)]
    pub timeout_secs: u64,

    /// Print records as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show a random animal (default)
    Random,
    /// Search animals by name
    Search { query: String },
    /// Show a random animal from a category of the bundled dataset
    Category { category: String },
    /// Show one Wikipedia species page by exact title
    Species { title: String },
    /// List the categories of the bundled dataset
    Categories,
}

impl Cli {
    /// The command to run, defaulting to a random animal
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Random)
    }
}

impl PipelineConfig {
    /// Creates a PipelineConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(PipelineConfig)` with appropriate settings
    /// * `Err(CliError)` if a numeric option is out of range
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.limit == 0 {
            return Err(CliError::InvalidLimit(cli.limit));
        }
        if !(1..=MAX_CACHE_TTL_DAYS).contains(&cli.cache_ttl_days) {
            return Err(CliError::InvalidTtl(cli.cache_ttl_days));
        }
        if cli.timeout_secs == 0 {
            return Err(CliError::InvalidTimeout(cli.timeout_secs));
        }

        let cache = if cli.no_cache {
            CacheMode::Memory
        } else {
            CacheMode::Persistent {
                dir: cli.cache_dir.clone(),
            }
        };

        Ok(PipelineConfig {
            skip_random_source: cli.skip_random_api,
            search_limit: cli.limit,
            request_timeout: Duration::from_secs(cli.timeout_secs),
            cache_ttl: chrono::Duration::days(cli.cache_ttl_days),
            cache,
        })
    }
}
