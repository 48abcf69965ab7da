//! User — the registered owner of a query history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. Created once; never updated or deleted.
///
/// `api_key` is the credential forwarded to the summarization provider on
/// the user's behalf. It is a bare identifier here, not a secret the
/// service hashes or protects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:    Uuid,
  pub username:   String,
  pub api_key:    String,
  pub created_at: DateTime<Utc>,
}

impl User {
  /// Whether the summarization step runs for this user's queries.
  pub fn has_api_key(&self) -> bool { !self.api_key.is_empty() }
}
