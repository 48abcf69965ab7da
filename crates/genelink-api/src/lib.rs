//! JSON REST API for genelink.
//!
//! Exposes an axum [`Router`] backed by any [`QueryStore`] plus a pair of
//! providers behind the [`AssociationSource`] and [`Summarizer`] seams.
//! Transport concerns (TLS, listeners) are the caller's responsibility.
//!
//! All endpoints answer with the `{status, message, data}` envelope; see
//! [`response`].

pub mod error;
pub mod queries;
pub mod response;
pub mod users;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{get, post},
};
use serde_json::Value;

use genelink_core::{
  association::AssociationSource, pipeline::QueryPipeline, store::QueryStore,
  summary::Summarizer,
};

pub use error::ApiError;
use response::success_message;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, A, L> {
  pub store:    Arc<S>,
  pub pipeline: Arc<QueryPipeline<S, A, L>>,
}

// Hand-rolled so cloning never requires `S: Clone` — both fields are Arcs.
impl<S, A, L> Clone for AppState<S, A, L> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      pipeline: Arc::clone(&self.pipeline),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised router for `state`.
pub fn router<S, A, L>(state: AppState<S, A, L>) -> Router
where
  S: QueryStore + 'static,
  A: AssociationSource + 'static,
  L: Summarizer + 'static,
{
  Router::new()
    .route("/", get(root))
    .route("/login", post(users::login::<S, A, L>))
    .route("/user/{username}", get(users::get_user::<S, A, L>))
    .route("/query", post(queries::run_query::<S, A, L>))
    .route("/queries/{username}", get(queries::list_queries::<S, A, L>))
    .with_state(state)
}

/// `GET /` — liveness probe.
async fn root() -> Json<Value> {
  success_message("genelink is running")
}

// ─── Integration tests ────────────────────────────────────────────────────────
