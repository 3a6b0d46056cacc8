//! # recipe-store
//!
//! Local persistence for recipes.
//!
//! A single SQLite file named `recipeDB` holds one record collection,
//! `recipes`, keyed by an auto-incrementing integer. Each recipe is stored
//! as a JSON document and written with put semantics: a write under an
//! existing key replaces the whole record.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  global::init / store  (OnceCell)       │
//! ├─────────────────────────────────────────┤
//! │  RecipeStore  (list / put / get / del)  │
//! ├─────────────────────────────────────────┤
//! │  Database (rusqlite WAL, spawn_blocking)│
//! │  Schema   (single version, auto-inc id) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```ignore
//! use recipe_store::{Recipe, StoreConfig};
//!
//! let store = recipe_store::init(&StoreConfig::default()).await?;
//! let id = store
//!     .add_or_update_recipe(&Recipe::new("Tea", ["water", "tea leaves"], "Boil, steep 3 min"))
//!     .await?;
//! let tea = store.get_recipe(id).await?;
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod global;
pub mod recipe;
pub mod schema;

// ── re-exports ───────────────────────────────────────────────────────

pub use config::StoreConfig;
pub use db::Database;
pub use error::{StoreError, StoreResult};
pub use global::{init, store};
pub use recipe::{Recipe, RecipeId, RecipeStore};
pub use schema::{DB_NAME, SCHEMA_VERSION, STORE_NAME};
