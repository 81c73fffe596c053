//! SQL schema for the snippet store.
//!
//! Migrations are additive only. Databases created before `pinned` existed
//! get the column added in place, and rows written in the older
//! `YYYY-MM-DD HH:MM:SS` timestamp form are restamped to the RFC 3339 form so
//! that text order stays chronological. The resulting layout is recorded in
//! `PRAGMA user_version`.

use rusqlite::Connection;

pub const SCHEMA_VERSION: i64 = 3;

/// Base DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS snippets (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    category    TEXT,                        -- NULL means uncategorized
    tags        TEXT,                        -- whitespace/comma delimited
    created_at  TEXT NOT NULL,               -- RFC 3339 UTC; server-assigned
    last_copied TEXT,                        -- NULL until first use
    pinned      INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS snippets_created_idx  ON snippets(created_at);
CREATE INDEX IF NOT EXISTS snippets_category_idx ON snippets(category);
";

const ADD_PINNED: &str =
  "ALTER TABLE snippets ADD COLUMN pinned INTEGER NOT NULL DEFAULT 0";

/// Rewrite space-separated timestamps as `YYYY-MM-DDTHH:MM:SS.000000Z` and
/// empty category/tags strings as NULL. Values SQLite cannot parse are left
/// alone.
const NORMALIZE_LEGACY_ROWS: &str = "
UPDATE snippets
   SET created_at = strftime('%Y-%m-%dT%H:%M:%S', created_at) || '.000000Z'
 WHERE created_at NOT LIKE '%T%'
   AND strftime('%Y-%m-%dT%H:%M:%S', created_at) IS NOT NULL;

UPDATE snippets
   SET last_copied = strftime('%Y-%m-%dT%H:%M:%S', last_copied) || '.000000Z'
 WHERE last_copied NOT LIKE '%T%'
   AND strftime('%Y-%m-%dT%H:%M:%S', last_copied) IS NOT NULL;

UPDATE snippets SET category = NULL WHERE trim(category) = '';
UPDATE snippets SET tags     = NULL WHERE trim(tags) = '';
";

/// Bring the database at `conn` up to [`SCHEMA_VERSION`].
pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
  let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
  if version >= SCHEMA_VERSION {
    return Ok(());
  }

  conn.execute_batch(SCHEMA)?;
  if !has_column(conn, "snippets", "pinned")? {
    conn.execute(ADD_PINNED, [])?;
  }
  conn.execute_batch(NORMALIZE_LEGACY_ROWS)?;
  conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
  Ok(())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
  let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
  let names = stmt
    .query_map([], |row| row.get::<_, String>(1))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(names.iter().any(|n| n == column))
}
