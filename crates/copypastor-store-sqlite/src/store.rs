//! [`SqliteStore`], the SQLite implementation of [`SnippetStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use copypastor_core::{
  meta::Meta,
  query::SnippetQuery,
  snippet::{Snippet, SnippetFields, SnippetId},
  store::SnippetStore,
};

use crate::{
  Error, Result,
  encode::{RawSnippet, SNIPPET_COLUMNS, encode_dt, now},
  query::{ORDER_EXPORT, list_statement},
  schema,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A snippet store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        schema::migrate(conn)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert `seeds` if, and only if, the table is empty. Returns the number of
  /// rows inserted.
  pub async fn seed_if_empty(&self, seeds: Vec<SnippetFields>) -> Result<usize> {
    for seed in &seeds {
      seed.validate()?;
    }
    let created_at = encode_dt(now());

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let count: i64 =
          tx.query_row("SELECT COUNT(*) FROM snippets", [], |r| r.get(0))?;
        if count > 0 {
          return Ok(0);
        }
        {
          let mut stmt = tx.prepare(
            "INSERT INTO snippets (title, content, category, tags, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
          )?;
          for seed in &seeds {
            stmt.execute(rusqlite::params![
              seed.title,
              seed.content,
              seed.category,
              seed.tags,
              created_at,
            ])?;
          }
        }
        tx.commit()?;
        Ok(seeds.len())
      })
      .await?;

    Ok(inserted)
  }

  async fn query_snippets(
    &self,
    sql: String,
    params: Vec<String>,
  ) -> Result<Vec<Snippet>> {
    let raws: Vec<RawSnippet> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), RawSnippet::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSnippet::into_snippet).collect()
  }

  /// Run a single-row write and map "no row affected" to `NotFound`.
  async fn execute_for(
    &self,
    id: SnippetId,
    sql: &'static str,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<()> {
    let affected = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, rusqlite::params_from_iter(params))?))
      .await?;

    if affected == 0 {
      return Err(copypastor_core::Error::NotFound(id).into());
    }
    Ok(())
  }
}

// ─── SnippetStore impl ───────────────────────────────────────────────────────

impl SnippetStore for SqliteStore {
  type Error = Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list(&self, query: &SnippetQuery) -> Result<Vec<Snippet>> {
    let stmt = list_statement(query);
    self.query_snippets(stmt.sql, stmt.params).await
  }

  async fn get(&self, id: SnippetId) -> Result<Option<Snippet>> {
    let raw: Option<RawSnippet> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {SNIPPET_COLUMNS} FROM snippets WHERE id = ?1"),
            rusqlite::params![id],
            RawSnippet::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSnippet::into_snippet).transpose()
  }

  async fn export(&self) -> Result<Vec<Snippet>> {
    let sql = format!("SELECT {SNIPPET_COLUMNS} FROM snippets {ORDER_EXPORT}");
    self.query_snippets(sql, Vec::new()).await
  }

  async fn meta(&self) -> Result<Meta> {
    let (tag_fields, categories): (Vec<String>, Vec<String>) = self
      .conn
      .call(|conn| {
        let tag_fields = conn
          .prepare("SELECT tags FROM snippets WHERE tags IS NOT NULL ORDER BY id")?
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;

        let categories = conn
          .prepare("SELECT DISTINCT category FROM snippets WHERE category IS NOT NULL")?
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok((tag_fields, categories))
      })
      .await?;

    Ok(Meta::aggregate(tag_fields, categories))
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn create(&self, fields: SnippetFields) -> Result<Snippet> {
    let fields = fields.normalized();
    fields.validate()?;

    let created_at = now();
    let created_at_str = encode_dt(created_at);
    let row = fields.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO snippets (title, content, category, tags, created_at, pinned)
           VALUES (?1, ?2, ?3, ?4, ?5, 0)",
          rusqlite::params![row.title, row.content, row.category, row.tags, created_at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Snippet {
      id,
      title: fields.title,
      content: fields.content,
      category: fields.category,
      tags: fields.tags,
      created_at,
      last_copied: None,
      pinned: false,
    })
  }

  async fn update(&self, id: SnippetId, fields: SnippetFields) -> Result<Snippet> {
    let fields = fields.normalized();
    fields.validate()?;

    self
      .execute_for(
        id,
        "UPDATE snippets SET title = ?1, content = ?2, category = ?3, tags = ?4
         WHERE id = ?5",
        vec![
          fields.title.into(),
          fields.content.into(),
          fields.category.into(),
          fields.tags.into(),
          id.into(),
        ],
      )
      .await?;

    // A concurrent delete may land between the two statements.
    self
      .get(id)
      .await?
      .ok_or_else(|| copypastor_core::Error::NotFound(id).into())
  }

  async fn set_pinned(&self, id: SnippetId, pinned: bool) -> Result<bool> {
    self
      .execute_for(
        id,
        "UPDATE snippets SET pinned = ?1 WHERE id = ?2",
        vec![i64::from(pinned).into(), id.into()],
      )
      .await?;
    Ok(pinned)
  }

  async fn touch(&self, id: SnippetId) -> Result<DateTime<Utc>> {
    let at = now();
    self
      .execute_for(
        id,
        "UPDATE snippets SET last_copied = ?1 WHERE id = ?2",
        vec![encode_dt(at).into(), id.into()],
      )
      .await?;
    Ok(at)
  }

  async fn delete(&self, id: SnippetId) -> Result<()> {
    self
      .execute_for(id, "DELETE FROM snippets WHERE id = ?1", vec![id.into()])
      .await
  }
}
