//! Integration tests for CLI argument handling
//!
//! None of these reach the network: they either stop at argument validation
//! or run commands served by the bundled dataset.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_wildfacts"))
        .args(args)
        .env_remove("WILDFACTS_SKIP_RANDOM_API")
        .output()
        .expect("Failed to execute wildfacts")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wildfacts"), "Help should mention wildfacts");
    assert!(stdout.contains("search"), "Help should list the search command");
    assert!(
        stdout.contains("--skip-random-api"),
        "Help should mention --skip-random-api"
    );
}

#[test]
fn test_zero_limit_prints_error_and_exits() {
    let output = run_cli(&["--limit", "0", "search", "lion"]);
    assert!(!output.status.success(), "Expected zero limit to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid"),
        "Should print error message about the limit: {}",
        stderr
    );
}

#[test]
fn test_zero_cache_ttl_prints_error_and_exits() {
    let output = run_cli(&["--cache-ttl-days", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid cache TTL"), "{}", stderr);
}

#[test]
fn test_huge_cache_ttl_exits_with_usage_error() {
    let output = run_cli(&["--cache-ttl-days", "200000000000000", "categories"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid cache TTL"), "{}", stderr);
}

#[test]
fn test_search_requires_query() {
    let output = run_cli(&["search"]);
    assert!(!output.status.success());
}

#[test]
fn test_categories_lists_bundled_categories() {
    let output = run_cli(&["categories"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for category in ["Mammal", "Bird", "Insect", "Sea", "Reptile", "Amphibian"] {
        assert!(stdout.lines().any(|l| l == category), "missing {category}");
    }
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use wildfacts::cli::{Cli, CliError, Command};
    use wildfacts::pipeline::{CacheMode, PipelineConfig};

    #[test]
    fn test_cli_species_takes_title() {
        let cli = Cli::parse_from(["wildfacts", "species", "Red fox"]);
        assert_eq!(
            cli.command(),
            Command::Species {
                title: "Red fox".to_string()
            }
        );
    }

    #[test]
    fn test_config_from_cli_memory_cache() {
        let cli = Cli::parse_from(["wildfacts", "--no-cache", "random"]);
        let config = PipelineConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache, CacheMode::Memory);
        assert!(!config.skip_random_source);
    }

    #[test]
    fn test_config_from_cli_invalid_timeout() {
        let cli = Cli::parse_from(["wildfacts", "--timeout-secs", "0"]);
        assert_eq!(
            PipelineConfig::from_cli(&cli).unwrap_err(),
            CliError::InvalidTimeout(0)
        );
    }
}
