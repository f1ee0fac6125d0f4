//! Assessment recommender: semantic assessment recommendations for job descriptions

mod batch;
mod catalog;
mod cli;
mod config;
mod embedding;
mod engine;
mod error;
mod fetch;
mod intent;
mod output;
mod search;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction, DataAction};
use colored::Colorize;
use config::{parse_output_format, Config, OutputFormat};
use engine::{validate_query, RecommendationEngine};
use error::{RecommenderError, Result};
use log::{error, info};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Recommend {
            query,
            top_k,
            output,
        } => {
            let format = parse_output_format(&output).map_err(RecommenderError::InvalidInput)?;
            validate_query(&query)?;

            let engine = init_engine(&config).await?;
            let results = engine.recommend(&query, top_k).await?;

            match format {
                OutputFormat::Console => {
                    print!("{}", output::formatter::format_console(&query, &results))
                }
                OutputFormat::Json => println!("{}", output::formatter::format_json(&results)?),
                OutputFormat::Markdown => {
                    print!("{}", output::formatter::format_markdown(&query, &results))
                }
            }
        }

        Commands::Analyze { query } => {
            validate_query(&query)?;
            let engine = RecommendationEngine::new(&config)?;
            let intent = engine.analyze(&query);
            let body = serde_json::json!({ "query": query, "intent": intent });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Batch {
            input,
            output,
            top_k,
        } => {
            let engine = init_engine(&config).await?;
            let report = batch::run_batch(&engine, &input, &output, top_k).await?;
            println!(
                "Processed {} queries ({} skipped), wrote {} rows to {}",
                report.processed,
                report.skipped,
                report.rows,
                output.display()
            );
        }

        Commands::Data { action } => run_data_command(action, &config)?,

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    RecommenderError::Configuration(format!("Failed to serialize config: {e}"))
                })?;
                println!("{content}");
            }
            ConfigAction::Reset => {
                Config::default().save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}

fn run_data_command(action: DataAction, config: &Config) -> Result<()> {
    match action {
        DataAction::Seed { force } => {
            let path = config.catalog_path();
            if path.exists() && !force {
                return Err(RecommenderError::InvalidInput(format!(
                    "catalog already exists at {} (use --force to overwrite)",
                    path.display()
                )));
            }
            let assessments = catalog::sample_assessments();
            catalog::store::save_catalog(&path, &assessments)?;
            println!(
                "Seeded {} assessments to {}",
                assessments.len(),
                path.display()
            );
        }

        DataAction::Show { limit } => {
            let assessments = catalog::load_or_seed(&config.catalog_path())?;
            println!("{} assessments in catalog:", assessments.len());
            for a in assessments.iter().take(limit) {
                println!(
                    "  {} {} ({} min)",
                    a.name.bold(),
                    format!("[{}]", a.category).dimmed(),
                    a.duration
                );
            }
        }
    }
    Ok(())
}

/// Build the engine: rehydrate from a snapshot when one matches the current
/// provider, otherwise embed the catalog from scratch and persist a fresh
/// snapshot for the next run.
async fn init_engine(config: &Config) -> Result<RecommendationEngine> {
    let engine = RecommendationEngine::new(config)?;
    let snapshot_path = config.snapshot_path();

    if engine.load_snapshot(&snapshot_path) {
        info!("Loaded {} assessments from snapshot", engine.catalog_len());
        return Ok(engine);
    }

    let assessments = catalog::load_or_seed(&config.catalog_path())?;
    info!("Building embeddings for {} assessments", assessments.len());
    engine.build_index(assessments).await?;

    if let Err(e) = engine.save_snapshot(&snapshot_path) {
        log::warn!("Failed to persist embedding snapshot: {e}");
    }

    Ok(engine)
}
