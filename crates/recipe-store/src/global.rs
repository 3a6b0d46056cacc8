//! Process-wide recipe store.
//!
//! One database connection is opened per process, on the first successful
//! [`init`], and shared by every caller afterwards. It is never closed.

use tokio::sync::OnceCell;
use tracing::info;

use crate::config::StoreConfig;
use crate::db::Database;
use crate::error::{StoreError, StoreResult};
use crate::recipe::RecipeStore;

static STORE: OnceCell<RecipeStore> = OnceCell::const_new();

/// Open the process-wide store described by `config`.
///
/// Only the first successful call opens anything; later calls return the
/// existing store and ignore `config`. Concurrent first calls wait on a
/// single open. If opening fails the error is returned and the store stays
/// uninitialized.
pub async fn init(config: &StoreConfig) -> StoreResult<&'static RecipeStore> {
    STORE
        .get_or_try_init(|| async move {
            let dir_config = config.clone();
            tokio::task::spawn_blocking(move || dir_config.ensure_data_dir().map(|_| ()))
                .await??;
            let path = config.database_path();
            let db = Database::open_and_upgrade(path.clone()).await?;
            info!(path = %path.display(), "recipe store initialized");
            Ok::<_, StoreError>(RecipeStore::new(db))
        })
        .await
}

/// The process-wide store, if [`init`] has completed.
pub fn store() -> StoreResult<&'static RecipeStore> {
    STORE.get().ok_or(StoreError::NotInitialized)
}

// Only one test may touch the static: the cell cannot be reset.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Recipe;

    #[tokio::test]
    async fn init_once_then_shared() {
        assert!(matches!(store(), Err(StoreError::NotInitialized)));

        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("nested").join("data"));
        let first = init(&config).await.unwrap();
        assert!(config.database_path().exists());
        let id = first
            .add_or_update_recipe(&Recipe::new("Tea", ["water"], "Boil"))
            .await
            .unwrap();

        // A second init with another directory returns the same store.
        let other = tempfile::tempdir().unwrap();
        let second = init(&StoreConfig::new(other.path())).await.unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(second.is_recipe_stored(id).await.unwrap());
        assert!(!StoreConfig::new(other.path()).database_path().exists());

        assert!(std::ptr::eq(store().unwrap(), first));
    }
}
