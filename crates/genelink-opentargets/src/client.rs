//! [`OpenTargetsClient`] — the HTTP client for the Open Targets GraphQL
//! endpoint.

use std::time::Duration;

use genelink_core::{
  association::{AssociationRecord, AssociationSource},
  error::LookupError,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::queries;

pub const DEFAULT_BASE_URL: &str =
  "https://api.platform.opentargets.org/api/v4/graphql";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Open Targets platform API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct OpenTargetsClient {
  client:   Client,
  base_url: String,
}

impl OpenTargetsClient {
  pub fn new() -> reqwest::Result<Self> {
    Self::with_base_url(DEFAULT_BASE_URL)
  }

  /// Point the client at a non-default endpoint (tests use a mock server).
  pub fn with_base_url(base_url: impl Into<String>) -> reqwest::Result<Self> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    Ok(Self { client, base_url: base_url.into() })
  }

  /// The shared query-execution primitive: POST one GraphQL document,
  /// raise on non-2xx, decode the JSON body.
  async fn run_query(
    &self,
    document: &str,
    variables: Value,
  ) -> Result<Value, LookupError> {
    let response = self
      .client
      .post(&self.base_url)
      .json(&json!({ "query": document, "variables": variables }))
      .send()
      .await
      .and_then(|r| r.error_for_status())
      .map_err(|e| LookupError::Transport(Box::new(e)))?;

    response
      .json()
      .await
      .map_err(|e| LookupError::Transport(Box::new(e)))
  }

  async fn resolve_gene_id(&self, gene_name: &str) -> Result<String, LookupError> {
    let body = self
      .run_query(queries::GENE_SEARCH, json!({ "queryString": gene_name }))
      .await?;
    let id = first_hit(body)?
      .ok_or_else(|| LookupError::NoGeneMatch(gene_name.to_owned()))?;
    debug!(gene = %gene_name, %id, "gene resolved");
    Ok(id)
  }

  async fn resolve_disease_id(
    &self,
    disease_name: &str,
  ) -> Result<String, LookupError> {
    let body = self
      .run_query(queries::DISEASE_SEARCH, json!({ "queryString": disease_name }))
      .await?;
    let id = first_hit(body)?
      .ok_or_else(|| LookupError::NoDiseaseMatch(disease_name.to_owned()))?;
    debug!(disease = %disease_name, %id, "disease resolved");
    Ok(id)
  }
}

impl AssociationSource for OpenTargetsClient {
  async fn fetch_association(
    &self,
    gene_name: &str,
    disease_name: &str,
  ) -> Result<AssociationRecord, LookupError> {
    let gene_id = self.resolve_gene_id(gene_name).await?;
    let disease_id = self.resolve_disease_id(disease_name).await?;

    let body = self
      .run_query(
        queries::TARGET_DISEASE_EVIDENCE,
        json!({ "geneId": gene_id, "diseaseId": disease_id }),
      )
      .await?;

    let disease = body
      .get("data")
      .and_then(|data| data.get("disease"))
      .filter(|disease| !disease.is_null())
      .cloned()
      .ok_or_else(|| {
        LookupError::MalformedResponse("missing data.disease".to_owned())
      })?;

    Ok(AssociationRecord::from_value(disease))
  }
}

// ─── Search response shape ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SearchEnvelope {
  data: SearchData,
}

#[derive(Deserialize)]
struct SearchData {
  search: SearchResults,
}

#[derive(Deserialize)]
struct SearchResults {
  hits: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
  id: String,
}

/// `data.search.hits[0].id`, or `None` when the search came back empty.
fn first_hit(body: Value) -> Result<Option<String>, LookupError> {
  let envelope: SearchEnvelope = serde_json::from_value(body)
    .map_err(|e| LookupError::MalformedResponse(e.to_string()))?;
  Ok(envelope.data.search.hits.into_iter().next().map(|hit| hit.id))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
