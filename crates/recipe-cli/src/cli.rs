//! CLI argument definitions for the `recipes` binary.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use recipe_store::{Recipe, RecipeId};

/// recipes -- keep your recipes in a local database.
#[derive(Parser)]
#[command(name = "recipes", version, about = "Manage recipes in a local database")]
pub struct Cli {
    /// Directory holding the recipe database (overrides config and
    /// `RECIPES_DATA_DIR`).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "config/default.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every stored recipe as JSON, ascending by id.
    List,

    /// Store a new recipe and print its id.
    Add(RecipeArgs),

    /// Replace the recipe stored under an id.
    Update {
        id: RecipeId,
        #[command(flatten)]
        recipe: RecipeArgs,
    },

    /// Print one recipe as JSON.
    Get { id: RecipeId },

    /// Delete a recipe. Deleting a missing id is not an error.
    Delete { id: RecipeId },

    /// Show database location, schema version and recipe count.
    Status,
}

/// Fields of a recipe as given on the command line.
#[derive(Args)]
pub struct RecipeArgs {
    #[arg(long)]
    pub title: String,

    /// Repeat once per ingredient; order is kept.
    #[arg(long = "ingredient", short = 'i')]
    pub ingredients: Vec<String>,

    #[arg(long)]
    pub steps: String,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub rating: Option<f64>,
}

impl RecipeArgs {
    pub fn into_recipe(self) -> Recipe {
        Recipe {
            id: None,
            title: self.title,
            ingredients: self.ingredients,
            steps: self.steps,
            category: self.category,
            rating: self.rating,
        }
    }
}
