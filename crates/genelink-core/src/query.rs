//! Query log entries — one per successful pipeline run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{association::AssociationRecord, summary::SummaryRecord};

/// Input for [`QueryStore::append_query`](crate::store::QueryStore::append_query).
/// The store assigns the id and the timestamp.
#[derive(Debug, Clone)]
pub struct NewQuery {
  pub user_id:     Uuid,
  pub gene:        String,
  pub disease:     String,
  pub association: AssociationRecord,
  pub summary:     Option<SummaryRecord>,
}

/// One persisted query. Append-only: never mutated or deleted. Belongs to
/// exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
  pub query_id:    Uuid,
  pub user_id:     Uuid,
  pub gene:        String,
  pub disease:     String,
  pub association: AssociationRecord,
  /// Absent when the user carried no api key at query time.
  pub summary:     Option<SummaryRecord>,
  pub created_at:  DateTime<Utc>,
}
