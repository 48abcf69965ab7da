//! Handlers for `/login` and `/user/{username}`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/login` | Body: `{"username":"alice","api_key":"k1"}` — registers when `api_key` is non-empty, logs in otherwise |
//! | `GET`  | `/user/{username}` | 404 if not registered |

use axum::{
  Json,
  extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use genelink_core::{
  association::AssociationSource, store::QueryStore, summary::Summarizer,
};

use crate::{AppState, error::ApiError, response::success};

// ─── Login / registration ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub username: String,
  #[serde(default)]
  pub api_key:  Option<String>,
}

/// `POST /login`
///
/// A non-empty `api_key` makes this a registration: 409 when the username
/// is taken (the first registration's credential is retained). Without
/// one, it is a login attempt: 404 when unregistered.
pub async fn login<S, A, L>(
  State(state): State<AppState<S, A, L>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<Value>, ApiError>
where
  S: QueryStore,
  A: AssociationSource,
  L: Summarizer,
{
  let existing = state
    .store
    .find_user_by_name(&body.username)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  match body.api_key.as_deref().filter(|key| !key.is_empty()) {
    Some(api_key) => {
      if existing.is_some() {
        return Err(ApiError::Conflict("username already taken".to_owned()));
      }
      let user = state
        .store
        .create_user(&body.username, api_key)
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?;
      info!(user = %user.username, "user registered");
      Ok(success(
        "user registered and logged in",
        json!({ "username": user.username }),
      ))
    }
    None => {
      let user = existing.ok_or_else(|| {
        ApiError::NotFound("user not found, registration required".to_owned())
      })?;
      Ok(success(
        "user logged in successfully",
        json!({ "username": user.username }),
      ))
    }
  }
}

// ─── User info ────────────────────────────────────────────────────────────────

/// `GET /user/{username}`
pub async fn get_user<S, A, L>(
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

  Ok(success(
    "user info retrieved",
    json!({ "username": user.username, "has_api_key": user.has_api_key() }),
  ))
}
