//! wildfacts - Wildlife facts from the command line
//!
//! Resolves animal facts from a random animal API, Wikipedia and Wikimedia
//! Commons, falling back to a bundled dataset when the network is unavailable.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wildfacts::cli::{Cli, Command};
use wildfacts::data::{local, CanonicalAnimal};
use wildfacts::pipeline::{Pipeline, PipelineConfig};

/// Routes log output to stderr so stdout stays parseable with --json
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// What a command produced
enum Output {
    Animals(Vec<CanonicalAnimal>),
    Categories(Vec<&'static str>),
}

/// Prints records as text blocks or as a JSON array
fn print_animals(
    animals: &[CanonicalAnimal],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, animals)?;
        writeln!(stdout)?;
    } else {
        for (i, animal) in animals.iter().enumerate() {
            if i > 0 {
                writeln!(stdout)?;
            }
            write!(stdout, "{animal}")?;
        }
    }
    Ok(())
}

async fn run_command(pipeline: &Pipeline, command: Command) -> Output {
    let animals = match command {
        Command::Random => pipeline.random_fact().await.into_iter().collect(),
        Command::Search { query } => pipeline.search_by_name(&query).await,
        Command::Category { category } => {
            pipeline.random_by_category(&category).await.into_iter().collect()
        }
        Command::Species { title } => {
            pipeline.species_by_title(&title).await.into_iter().collect()
        }
        Command::Categories => return Output::Categories(local::categories(pipeline.dataset())),
    };
    Output::Animals(animals)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let config = match PipelineConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(ExitCode::from(2));
        }
    };

    let pipeline = Pipeline::new(config)?;
    match run_command(&pipeline, cli.command()).await {
        Output::Categories(categories) => {
            for category in categories {
                println!("{category}");
            }
        }
        Output::Animals(animals) if animals.is_empty() => {
            eprintln!("No animals found");
            return Ok(ExitCode::FAILURE);
        }
        Output::Animals(animals) => print_animals(&animals, cli.json)?,
    }
    Ok(ExitCode::SUCCESS)
}
