//! [`SqliteStore`] — the SQLite implementation of [`QueryStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use genelink_core::{
  query::{NewQuery, QueryRecord},
  store::QueryStore,
  user::User,
};

use crate::{
  encode::{encode_dt, encode_uuid, RawQuery, RawUser},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A genelink query store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
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

  /// Open an in-memory store — useful for testing.
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
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn username_exists(&self, username: &str) -> Result<bool> {
    let username = username.to_owned();
    let exists: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM users WHERE username = ?1",
              rusqlite::params![username],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }
}

// ─── QueryStore impl ─────────────────────────────────────────────────────────

impl QueryStore for SqliteStore {
  type Error = Error;

  async fn create_user(&self, username: &str, api_key: &str) -> Result<User> {
    if self.username_exists(username).await? {
      return Err(Error::UsernameTaken(username.to_owned()));
    }

    let user = User {
      user_id:    Uuid::new_v4(),
      username:   username.to_owned(),
      api_key:    api_key.to_owned(),
      created_at: Utc::now(),
    };

    let id_str   = encode_uuid(user.user_id);
    let name_str = user.username.clone();
    let key_str  = user.api_key.clone();
    let at_str   = encode_dt(user.created_at);

    // The UNIQUE constraint on username backstops the existence check.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, username, api_key, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name_str, key_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  async fn find_user_by_name(&self, username: &str) -> Result<Option<User>> {
    let name_str = username.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, username, api_key, created_at
               FROM users WHERE username = ?1",
              rusqlite::params![name_str],
              |row| {
                Ok(RawUser {
                  user_id:    row.get(0)?,
                  username:   row.get(1)?,
                  api_key:    row.get(2)?,
                  created_at: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn append_query(&self, input: NewQuery) -> Result<QueryRecord> {
    let record = QueryRecord {
      query_id:    Uuid::new_v4(),
      user_id:     input.user_id,
      gene:        input.gene,
      disease:     input.disease,
      association: input.association,
      summary:     input.summary,
      created_at:  Utc::now(),
    };

    let query_id_str = encode_uuid(record.query_id);
    let user_id_str  = encode_uuid(record.user_id);
    let gene_str     = record.gene.clone();
    let disease_str  = record.disease.clone();
    let assoc_str    = serde_json::to_string(&record.association)?;
    let summary_str  = record
      .summary
      .as_ref()
      .map(serde_json::to_string)
      .transpose()?;
    let at_str       = encode_dt(record.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO queries (
             query_id, user_id, gene, disease,
             association_json, summary_json, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            query_id_str,
            user_id_str,
            gene_str,
            disease_str,
            assoc_str,
            summary_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn list_queries(&self, user_id: Uuid) -> Result<Vec<QueryRecord>> {
    let user_id_str = encode_uuid(user_id);

    let raws: Vec<RawQuery> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT query_id, user_id, gene, disease,
                  association_json, summary_json, created_at
           FROM queries
           WHERE user_id = ?1
           ORDER BY rowid",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![user_id_str], |row| {
            Ok(RawQuery {
              query_id:         row.get(0)?,
              user_id:          row.get(1)?,
              gene:             row.get(2)?,
              disease:          row.get(3)?,
              association_json: row.get(4)?,
              summary_json:     row.get(5)?,
              created_at:       row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawQuery::into_query).collect()
  }
}
