//! Recipe records and the [`RecipeStore`] that persists them.
//!
//! Each recipe is one JSON document in the `recipes` collection, keyed by
//! an integer the database assigns on first insert. Writes are whole-record
//! puts: storing a recipe under an existing key replaces every field,
//! including optional ones the new value leaves out.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::db::Database;
use crate::error::{StoreError, StoreResult};

/// Primary key of a stored recipe.
pub type RecipeId = i64;

// ═══════════════════════════════════════════════════════════════════════
//  Types
// ═══════════════════════════════════════════════════════════════════════

/// A recipe, persisted or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Assigned by the store on first insert; `None` until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecipeId>,
    pub title: String,
    /// Listing order is preserved.
    pub ingredients: Vec<String>,
    /// Free-form instructions.
    pub steps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Recipe {
    /// Build an unsaved recipe with no category or rating.
    pub fn new(
        title: impl Into<String>,
        ingredients: impl IntoIterator<Item = impl Into<String>>,
        steps: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            steps: steps.into(),
            category: None,
            rating: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Target an existing key; the next write replaces that record.
    pub fn with_id(mut self, id: RecipeId) -> Self {
        self.id = Some(id);
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  RecipeStore
// ═══════════════════════════════════════════════════════════════════════

/// CRUD operations over the `recipes` collection.
#[derive(Clone)]
pub struct RecipeStore {
    db: Database,
}

impl RecipeStore {
    /// Create a recipe store backed by `db`. The schema must already be
    /// in place (see [`Database::open_and_upgrade`]).
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Every stored recipe, ascending by id.
    #[instrument(skip(self))]
    pub async fn get_recipes(&self) -> StoreResult<Vec<Recipe>> {
        self.db
            .execute(|conn| {
                let mut stmt = conn.prepare("SELECT id, value FROM recipes ORDER BY id ASC")?;
                let rows = stmt
                    .query_map([], |row| {
                        Ok(RecipeRow {
                            id: row.get(0)?,
                            value: row.get(1)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;

                rows.into_iter().map(RecipeRow::into_recipe).collect()
            })
            .await
    }

    /// Insert or replace a recipe and return its id.
    ///
    /// Without an id a new record is created under a freshly generated key.
    /// With an id the record at that key is replaced wholesale, or created
    /// there if the key is unused. `recipe` itself is left untouched.
    #[instrument(skip(self, recipe), fields(id = ?recipe.id, title = %recipe.title))]
    pub async fn add_or_update_recipe(&self, recipe: &Recipe) -> StoreResult<RecipeId> {
        let id = recipe.id;
        let body = encode_body(recipe)?;

        let id = self
            .db
            .execute(move |conn| match id {
                Some(id) => {
                    conn.execute(
                        "INSERT INTO recipes (id, value) VALUES (?1, ?2) \
                         ON CONFLICT(id) DO UPDATE SET value = excluded.value",
                        rusqlite::params![id, body],
                    )?;
                    Ok(id)
                }
                None => {
                    conn.execute(
                        "INSERT INTO recipes (value) VALUES (?1)",
                        rusqlite::params![body],
                    )?;
                    Ok(conn.last_insert_rowid())
                }
            })
            .await?;

        debug!(recipe_id = id, "recipe stored");
        Ok(id)
    }

    /// Look up a recipe by id, returning `None` if nothing is stored there.
    #[instrument(skip(self))]
    pub async fn get_recipe(&self, id: RecipeId) -> StoreResult<Option<Recipe>> {
        self.db
            .execute(move |conn| {
                let result = conn.query_row(
                    "SELECT id, value FROM recipes WHERE id = ?1",
                    rusqlite::params![id],
                    |row| {
                        Ok(RecipeRow {
                            id: row.get(0)?,
                            value: row.get(1)?,
                        })
                    },
                );
                match result {
                    Ok(row) => row.into_recipe().map(Some),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
    }

    /// Whether a recipe is stored under `id`.
    #[instrument(skip(self))]
    pub async fn is_recipe_stored(&self, id: RecipeId) -> StoreResult<bool> {
        self.db
            .execute(move |conn| {
                let exists: bool = conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM recipes WHERE id = ?1)",
                    rusqlite::params![id],
                    |row| row.get(0),
                )?;
                Ok(exists)
            })
            .await
    }

    /// Delete a recipe, returning `true` if one was removed.
    ///
    /// Deleting an id that is not stored is a no-op.
    #[instrument(skip(self))]
    pub async fn delete_recipe(&self, id: RecipeId) -> StoreResult<bool> {
        let deleted = self
            .db
            .execute(move |conn| {
                let deleted =
                    conn.execute("DELETE FROM recipes WHERE id = ?1", rusqlite::params![id])?;
                Ok(deleted > 0)
            })
            .await?;

        debug!(recipe_id = id, deleted, "recipe delete");
        Ok(deleted)
    }

    /// Number of stored recipes.
    #[instrument(skip(self))]
    pub async fn count(&self) -> StoreResult<i64> {
        self.db
            .execute(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Internal row mapping
// ═══════════════════════════════════════════════════════════════════════

/// Raw row before JSON decoding, so the `rusqlite` row closure stays
/// infallible with respect to JSON.
struct RecipeRow {
    id: RecipeId,
    value: String,
}

impl RecipeRow {
    fn into_recipe(self) -> StoreResult<Recipe> {
        let mut recipe: Recipe = serde_json::from_str(&self.value)?;
        recipe.id = Some(self.id);
        Ok(recipe)
    }
}

/// Serialize a recipe body. The key column owns the id, so it is stripped.
///
/// JSON has no encoding for non-finite numbers, so such a rating would be
/// read back as absent; it is refused instead.
fn encode_body(recipe: &Recipe) -> StoreResult<String> {
    if let Some(rating) = recipe.rating.filter(|r| !r.is_finite()) {
        return Err(StoreError::InvalidArgument(format!(
            "rating must be a finite number, got {rating}"
        )));
    }

    let mut value = serde_json::to_value(recipe)?;
    if let Some(obj) = value.as_object_mut() {
        obj.remove("id");
    }
    Ok(value.to_string())
}

// ── tests ────────────────────────────────────────────────────────────
