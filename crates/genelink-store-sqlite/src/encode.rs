//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. The association and
//! summary payloads are stored as compact JSON. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use genelink_core::{
  association::AssociationRecord, query::QueryRecord, summary::SummaryRecord,
  user::User,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:    String,
  pub username:   String,
  pub api_key:    String,
  pub created_at: String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:    decode_uuid(&self.user_id)?,
      username:   self.username,
      api_key:    self.api_key,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `queries` row.
pub struct RawQuery {
  pub query_id:         String,
  pub user_id:          String,
  pub gene:             String,
  pub disease:          String,
  pub association_json: String,
  pub summary_json:     Option<String>,
  pub created_at:       String,
}

impl RawQuery {
  pub fn into_query(self) -> Result<QueryRecord> {
    let association: AssociationRecord =
      serde_json::from_str(&self.association_json)?;
    let summary: Option<SummaryRecord> = self
      .summary_json
      .as_deref()
      .map(serde_json::from_str)
      .transpose()?;

    Ok(QueryRecord {
      query_id: decode_uuid(&self.query_id)?,
      user_id: decode_uuid(&self.user_id)?,
      gene: self.gene,
      disease: self.disease,
      association,
      summary,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
