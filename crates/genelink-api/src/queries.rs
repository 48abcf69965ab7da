//! Handlers for `/query` and `/queries/{username}`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/query` | Body: `{"username","gene","disease","context"?}` — runs the pipeline |
//! | `GET`  | `/queries/{username}` | Query history in insertion order |

use axum::{
  Json,
  extract::{Path, State},
};
use serde::Deserialize;
use serde_json::Value;

use genelink_core::{
  association::AssociationSource, store::QueryStore, summary::Summarizer,
};

use crate::{AppState, error::ApiError, response::success};

// ─── Run one query ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QueryBody {
  pub username: String,
  pub gene:     String,
  pub disease:  String,
  /// Extra free-text guidance forwarded to the summarization prompt.
  #[serde(default)]
  pub context:  Option<String>,
}

/// `POST /query`
pub async fn run_query<S, A, L>(
  State(state): State<AppState<S, A, L>>,
  Json(body): Json<QueryBody>,
) -> Result<Json<Value>, ApiError>
where
  S: QueryStore,
  A: AssociationSource,
  L: Summarizer,
{
  let record = state
    .pipeline
    .run(
      &body.username,
      &body.gene,
      &body.disease,
      body.context.as_deref(),
    )
    .await?;

  Ok(success("query executed successfully", record))
}

// ─── Query history ────────────────────────────────────────────────────────────

/// `GET /queries/{username}`
pub async fn list_queries<S, A, L>(
  State(state): State<AppState<S, A, L>>,
  Path(username): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: QueryStore,
  A: AssociationSource,
  L: Summarizer,
{
  let user = state
    .store
    .find_user_by_name(&username)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("user {username:?} not found")))?;

  let queries = state
    .store
    .list_queries(user.user_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(success("user queries retrieved", queries))
}
