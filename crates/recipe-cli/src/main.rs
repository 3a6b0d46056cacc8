//! CLI entry point for the recipe store.
//!
//! Loads configuration, installs the tracing subscriber, opens the
//! process-wide store once and dispatches a single subcommand.

mod cli;
mod config;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use recipe_store::{Recipe, RecipeId, RecipeStore};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::config::{AppConfig, DATA_DIR_ENV};

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    config.override_data_dir(std::env::var(DATA_DIR_ENV).ok(), cli.data_dir);

    init_tracing(&config.log.level);
    debug!(?config, "configuration loaded");

    let store = recipe_store::init(&config.store)
        .await
        .context("failed to open recipe database")?;

    match cli.command {
        Commands::List => cmd_list(store).await,
        Commands::Add(args) => cmd_put(store, args.into_recipe()).await,
        Commands::Update { id, recipe } => cmd_put(store, recipe.into_recipe().with_id(id)).await,
        Commands::Get { id } => cmd_get(store, id).await,
        Commands::Delete { id } => cmd_delete(store, id).await,
        Commands::Status => cmd_status(store, &config).await,
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

async fn cmd_list(store: &RecipeStore) -> Result<ExitCode> {
    let recipes = store.get_recipes().await.context("failed to list recipes")?;
    println!("{}", serde_json::to_string_pretty(&recipes)?);
    Ok(ExitCode::SUCCESS)
}

async fn cmd_put(store: &RecipeStore, recipe: Recipe) -> Result<ExitCode> {
    let id = store
        .add_or_update_recipe(&recipe)
        .await
        .context("failed to store recipe")?;
    info!(recipe_id = id, "recipe saved");
    println!("{id}");
    Ok(ExitCode::SUCCESS)
}

async fn cmd_get(store: &RecipeStore, id: RecipeId) -> Result<ExitCode> {
    match store.get_recipe(id).await.context("failed to read recipe")? {
        Some(recipe) => {
            println!("{}", serde_json::to_string_pretty(&recipe)?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("recipe {id} not found");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn cmd_delete(store: &RecipeStore, id: RecipeId) -> Result<ExitCode> {
    let removed = store
        .delete_recipe(id)
        .await
        .context("failed to delete recipe")?;
    if removed {
        println!("deleted recipe {id}");
    } else {
        println!("recipe {id} was not stored");
    }
    Ok(ExitCode::SUCCESS)
}

async fn cmd_status(store: &RecipeStore, config: &AppConfig) -> Result<ExitCode> {
    let version = store
        .database()
        .execute(|conn| recipe_store::schema::current_version(conn))
        .await?;
    let count = store.count().await?;

    println!();
    println!("  Recipe store status");
    println!("  ===================");
    println!();
    println!("  Database:         {}", config.store.database_path().display());
    println!("  Schema version:   {version}");
    println!("  Recipes:          {count}");
    println!();

    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
