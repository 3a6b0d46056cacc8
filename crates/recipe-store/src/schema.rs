//! Single-version schema bootstrap.
//!
//! The database carries exactly one record collection, `recipes`, keyed by
//! an auto-incrementing integer. The applied version is tracked in a
//! `_schema` table. Opening a database written at a higher version is an
//! error; there is no migration path between versions.

use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Logical database name. Also the stem of the on-disk file.
pub const DB_NAME: &str = "recipeDB";

/// Name of the one record collection.
pub const STORE_NAME: &str = "recipes";

/// Schema version this build creates and accepts.
pub const SCHEMA_VERSION: u32 = 1;

/// `id` is the key path; `AUTOINCREMENT` guarantees keys are never reused,
/// even after the highest one is deleted.
const CREATE_RECIPES: &str = r#"
    CREATE TABLE IF NOT EXISTS recipes (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        value TEXT NOT NULL
    );
"#;

// ── public API ───────────────────────────────────────────────────────

/// Bring the schema to [`SCHEMA_VERSION`].
///
/// This is a **synchronous** function — call it from `spawn_blocking`.
pub fn upgrade(conn: &Connection) -> StoreResult<()> {
    ensure_schema_table(conn)?;

    let current = current_version(conn)?;
    if current == SCHEMA_VERSION {
        debug!(version = current, "recipe schema is up to date");
        return Ok(());
    }
    if current > SCHEMA_VERSION {
        return Err(StoreError::Schema {
            version: current,
            message: format!(
                "database {DB_NAME} is at version {current}, this build supports {SCHEMA_VERSION}"
            ),
        });
    }

    info!(from = current, to = SCHEMA_VERSION, "creating recipe schema");

    // `conn.transaction()` needs `&mut Connection`, so the transaction is
    // driven by hand.
    conn.execute_batch("BEGIN IMMEDIATE;")
        .map_err(|e| schema_error(format!("failed to begin transaction: {e}")))?;

    let result = (|| -> StoreResult<()> {
        if !collection_exists(conn, STORE_NAME)? {
            conn.execute_batch(CREATE_RECIPES)
                .map_err(|e| schema_error(format!("failed to create {STORE_NAME}: {e}")))?;
            info!(collection = STORE_NAME, "record collection created");
        }

        let now = chrono::Utc::now().timestamp();
        conn.execute(
            "INSERT INTO _schema (version, applied_at) VALUES (?1, ?2)",
            rusqlite::params![SCHEMA_VERSION, now],
        )
        .map_err(|e| schema_error(format!("failed to record version: {e}")))?;

        Ok(())
    })();

    match &result {
        Ok(()) => {
            conn.execute_batch("COMMIT;")
                .map_err(|e| schema_error(format!("failed to commit: {e}")))?;
        }
        Err(err) => {
            warn!(%err, "schema creation failed, rolling back");
            let _ = conn.execute_batch("ROLLBACK;");
        }
    }

    result
}

/// Return the applied schema version, or 0 if the database is fresh.
pub fn current_version(conn: &Connection) -> StoreResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM _schema",
        [],
        |row| row.get(0),
    )
    .map_err(|e| StoreError::Schema {
        version: 0,
        message: format!("failed to read current version: {e}"),
    })
}

// ── internals ────────────────────────────────────────────────────────

fn ensure_schema_table(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _schema (
            version    INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        );",
    )
    .map_err(|e| StoreError::Schema {
        version: 0,
        message: format!("failed to create _schema table: {e}"),
    })
}

fn collection_exists(conn: &Connection, name: &str) -> StoreResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        rusqlite::params![name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn schema_error(message: String) -> StoreError {
    StoreError::Schema {
        version: SCHEMA_VERSION,
        message,
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_conn() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn fresh_database_reports_version_zero() {
        let conn = setup_conn();
        ensure_schema_table(&conn).unwrap();
        assert_eq!(current_version(&conn).unwrap(), 0);
    }

    #[test]
    fn upgrade_on_fresh_db() {
        let conn = setup_conn();
        upgrade(&conn).unwrap();

        assert_eq!(current_version(&conn).unwrap(), SCHEMA_VERSION);
        assert!(collection_exists(&conn, STORE_NAME).unwrap());
    }

    #[test]
    fn upgrade_is_idempotent() {
        let conn = setup_conn();
        upgrade(&conn).unwrap();
        upgrade(&conn).unwrap();

        let rows: i64 = conn
            .query_row("SELECT count(*) FROM _schema", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn upgrade_keeps_existing_collection() {
        let conn = setup_conn();
        conn.execute_batch(CREATE_RECIPES).unwrap();
        conn.execute("INSERT INTO recipes (value) VALUES ('{}')", [])
            .unwrap();

        upgrade(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT count(*) FROM recipes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn newer_database_is_rejected() {
        let conn = setup_conn();
        upgrade(&conn).unwrap();
        conn.execute(
            "INSERT INTO _schema (version, applied_at) VALUES (2, 0)",
            [],
        )
        .unwrap();

        let err = upgrade(&conn).unwrap_err();
        assert!(matches!(err, StoreError::Schema { version: 2, .. }));
    }

    #[test]
    fn only_the_recipes_collection_is_created() {
        let conn = setup_conn();
        upgrade(&conn).unwrap();

        let tables: Vec<String> = {
            let mut stmt = conn
                .prepare(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE '\\_%' ESCAPE '\\' AND name NOT LIKE 'sqlite_%' ORDER BY name",
                )
                .unwrap();
            stmt.query_map([], |row| row.get(0))
                .unwrap()
                .map(|r| r.unwrap())
                .collect()
        };
        assert_eq!(tables, vec![STORE_NAME.to_string()]);
    }
}
