//! The `QueryStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `genelink-store-sqlite`). Higher layers (`genelink-api`, the pipeline)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  query::{NewQuery, QueryRecord},
  user::User,
};

/// Abstraction over the users-and-queries persistence backend.
///
/// Users are created once and never updated or deleted; queries are
/// append-only. Each operation is a self-contained transaction — no
/// cross-call transaction spanning, no application-level locking.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait QueryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create and persist a new user.
  ///
  /// Username uniqueness is enforced here: registering a taken name fails
  /// and the credential stored by the first registration is retained.
  fn create_user<'a>(
    &'a self,
    username: &'a str,
    api_key: &'a str,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + 'a;

  /// Look a user up by username. Returns `None` if not registered.
  fn find_user_by_name<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Append one query record. The `created_at` timestamp is set by the
  /// store.
  fn append_query(
    &self,
    input: NewQuery,
  ) -> impl Future<Output = Result<QueryRecord, Self::Error>> + Send + '_;

  /// All queries ever run by `user_id`, in insertion order.
  fn list_queries(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<QueryRecord>, Self::Error>> + Send + '_;
}
