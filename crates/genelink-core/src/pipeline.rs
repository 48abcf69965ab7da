//! The query pipeline: user resolution, association lookup, optional
//! summarization, persistence.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
  association::AssociationSource,
  error::PipelineError,
  query::{NewQuery, QueryRecord},
  store::QueryStore,
  summary::Summarizer,
};

/// Orchestrates one gene-disease query from username to persisted record.
///
/// The run is strictly linear: resolve the user, fetch the association,
/// summarize, append the record. Summarization happens only when the
/// resolved user carries a non-empty api key, and a summarization problem
/// degrades into the stored summary rather than failing the run. A lookup
/// failure, by contrast, aborts the run before anything is written.
///
/// Providers are injected through the trait seams so tests can run the
/// pipeline without network access.
pub struct QueryPipeline<S, A, L> {
  store:      Arc<S>,
  source:     A,
  summarizer: L,
}

impl<S, A, L> QueryPipeline<S, A, L>
where
  S: QueryStore,
  A: AssociationSource,
  L: Summarizer,
{
  pub fn new(store: Arc<S>, source: A, summarizer: L) -> Self {
    Self { store, source, summarizer }
  }

  /// Run one query for `username` and append exactly one record on
  /// success. No retries: a single failed attempt is a failed run.
  pub async fn run(
    &self,
    username: &str,
    gene: &str,
    disease: &str,
    additional_context: Option<&str>,
  ) -> Result<QueryRecord, PipelineError> {
    let user = self
      .store
      .find_user_by_name(username)
      .await
      .map_err(|e| PipelineError::Store(Box::new(e)))?
      .ok_or_else(|| PipelineError::UserNotFound(username.to_owned()))?;

    let association = self.source.fetch_association(gene, disease).await?;
    debug!(%gene, %disease, "association fetched");

    let summary = if user.has_api_key() {
      Some(
        self
          .summarizer
          .summarize(&association, &user.api_key, additional_context)
          .await,
      )
    } else {
      debug!(user = %username, "no api key, skipping summarization");
      None
    };

    let record = self
      .store
      .append_query(NewQuery {
        user_id: user.user_id,
        gene: gene.to_owned(),
        disease: disease.to_owned(),
        association,
        summary,
      })
      .await
      .map_err(|e| PipelineError::Store(Box::new(e)))?;

    info!(user = %username, query = %record.query_id, "query recorded");
    Ok(record)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
