//! Error types for `genelink-core`.

use thiserror::Error;

/// A failure while resolving names or fetching an association from the
/// knowledge-graph service.
#[derive(Debug, Error)]
pub enum LookupError {
  /// The gene name produced zero search hits.
  #[error("no gene found for {0:?}")]
  NoGeneMatch(String),

  /// The disease name produced zero search hits.
  #[error("no disease found for {0:?}")]
  NoDiseaseMatch(String),

  /// The service was unreachable or answered with a non-success status.
  #[error("knowledge graph request failed: {0}")]
  Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The response decoded as JSON but lacked the expected `data` envelope.
  #[error("malformed knowledge graph response: {0}")]
  MalformedResponse(String),
}

/// A failure of a full pipeline run. Any of these aborts the run before a
/// query record is written.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("user not found: {0:?}")]
  UserNotFound(String),

  /// Association lookup failures propagate; summarization failures never
  /// reach this type (they degrade into the stored summary instead).
  #[error(transparent)]
  Lookup(#[from] LookupError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}
