//! [`OpenRouterClient`] — the chat-completion HTTP client.

use std::time::Duration;

use genelink_core::{
  association::AssociationRecord,
  summary::{SummaryRecord, Summarizer},
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::reply::parse_reply;

pub const DEFAULT_BASE_URL: &str =
  "https://openrouter.ai/api/v1/chat/completions";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed instruction demanding strict JSON output with exactly the three
/// summary keys.
const SYSTEM_PROMPT: &str = "You are a helpful assistant that summarizes gene-disease associations. \
You must strictly respond in the following JSON format:\n\
{\n  \"summary_text\": str,\n  \"key_findings\": [str],\n  \"confidence\": float (0.0 - 1.0, optional)\n}\n\
Do not include any extra text outside this JSON. \
If any field is missing or unknown, use empty string or empty array or null.";

// ─── Model configuration ──────────────────────────────────────────────────────

/// Per-request model parameters. Low temperature and bounded `max_tokens`
/// favor deterministic, parseable replies.
#[derive(Debug, Clone)]
pub struct ModelConfig {
  pub model_name:    String,
  pub max_tokens:    u32,
  pub temperature:   f32,
  pub system_prompt: String,
}

impl Default for ModelConfig {
  fn default() -> Self {
    Self {
      model_name:    "google/gemini-2.0-flash-001".to_owned(),
      max_tokens:    2000,
      temperature:   0.1,
      system_prompt: SYSTEM_PROMPT.to_owned(),
    }
  }
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// What went wrong inside one chat-completion round trip. Never escapes
/// [`Summarizer::summarize`]; absorbed into a degraded record instead.
#[derive(Debug, Error)]
enum AskError {
  #[error("chat completion request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("chat completion reply carried no choices")]
  NoContent,
}

/// Client for an OpenRouter-compatible chat-completions endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. The
/// bearer credential is supplied per call, not held by the client: it
/// belongs to the querying user.
#[derive(Clone)]
pub struct OpenRouterClient {
  client:   Client,
  base_url: String,
  model:    ModelConfig,
}

impl OpenRouterClient {
  pub fn new(model: ModelConfig) -> reqwest::Result<Self> {
    Self::with_base_url(DEFAULT_BASE_URL, model)
  }

  /// Point the client at a non-default endpoint (tests use a mock server).
  pub fn with_base_url(
    base_url: impl Into<String>,
    model: ModelConfig,
  ) -> reqwest::Result<Self> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    Ok(Self { client, base_url: base_url.into(), model })
  }

  fn build_prompt(
    &self,
    record: &AssociationRecord,
    additional_context: Option<&str>,
  ) -> String {
    let gene = record.gene.as_deref().unwrap_or("Unknown");
    let disease = record.disease.as_deref().unwrap_or("Unknown");
    let data =
      serde_json::to_string_pretty(&record.raw).unwrap_or_default();

    let mut prompt = format!(
      "{}\n\nGene: {gene}\nDisease: {disease}\nData: {data}",
      self.model.system_prompt
    );
    if let Some(context) = additional_context {
      prompt.push_str(&format!("\n\nContext: {context}"));
    }
    prompt
  }

  /// One chat-completion round trip; returns the trimmed reply text.
  async fn ask_model(
    &self,
    prompt: &str,
    api_key: &str,
  ) -> Result<String, AskError> {
    let payload = json!({
      "model": self.model.model_name,
      "messages": [{ "role": "user", "content": prompt }],
      "max_tokens": self.model.max_tokens,
      "temperature": self.model.temperature,
    });

    let body: ChatResponse = self
      .client
      .post(&self.base_url)
      .bearer_auth(api_key)
      .json(&payload)
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;

    let content = body
      .choices
      .into_iter()
      .next()
      .map(|choice| choice.message.content)
      .ok_or(AskError::NoContent)?;
    Ok(content.trim().to_owned())
  }
}

impl Summarizer for OpenRouterClient {
  async fn summarize(
    &self,
    record: &AssociationRecord,
    api_key: &str,
    additional_context: Option<&str>,
  ) -> SummaryRecord {
    let prompt = self.build_prompt(record, additional_context);
    match self.ask_model(&prompt, api_key).await {
      Ok(reply) => parse_reply(&reply),
      Err(e) => {
        warn!(error = %e, "summarization degraded");
        SummaryRecord::degraded(e)
      }
    }
  }
}

// ─── Chat response shape ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChatResponse {
  #[serde(default)]
  choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
  message: Message,
}

#[derive(Deserialize)]
struct Message {
  content: String,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use serde_json::Value;
  use wiremock::matchers::{body_string_contains, header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  async fn client(server: &MockServer) -> OpenRouterClient {
    OpenRouterClient::with_base_url(server.uri(), ModelConfig::default())
      .expect("client")
  }

  fn record(gene: &str, disease: &str) -> AssociationRecord {
    AssociationRecord::from_value(serde_json::json!({
      "gene": gene,
      "disease": disease,
      "association_data": { "score": 0.95 },
    }))
  }

  fn chat_reply(content: &str) -> Value {
    serde_json::json!({
      "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
  }

  #[test]
  fn prompt_defaults_missing_names_to_unknown() {
    let c = OpenRouterClient::with_base_url("http://unused", ModelConfig::default())
      .unwrap();
    let prompt = c.build_prompt(
      &AssociationRecord::from_value(serde_json::json!({ "rows": [] })),
      None,
    );
    assert!(prompt.contains("Gene: Unknown"));
    assert!(prompt.contains("Disease: Unknown"));
  }

  #[test]
  fn prompt_embeds_names_payload_and_context() {
    let c = OpenRouterClient::with_base_url("http://unused", ModelConfig::default())
      .unwrap();
    let prompt = c.build_prompt(
      &record("EGFR", "Lung Cancer"),
      Some("Consider latest research papers."),
    );
    assert!(prompt.contains("Gene: EGFR"));
    assert!(prompt.contains("Disease: Lung Cancer"));
    assert!(prompt.contains("\"score\""));
    assert!(prompt.ends_with("Context: Consider latest research papers."));
  }

  #[tokio::test]
  async fn summarize_sends_bearer_auth_and_parses_the_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/"))
      .and(header("authorization", "Bearer test-api-key"))
      .and(body_string_contains("gene-disease associations"))
      .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
        r#"{"summary_text":"TP53 is strongly associated with Cancer.","key_findings":["TP53 mutation linked to Cancer"],"confidence":0.95}"#,
      )))
      .mount(&server)
      .await;

    let summary = client(&server)
      .await
      .summarize(&record("TP53", "Cancer"), "test-api-key", None)
      .await;

    assert_eq!(summary.summary_text, "TP53 is strongly associated with Cancer.");
    assert_eq!(
      summary.key_findings,
      vec!["TP53 mutation linked to Cancer".to_owned()]
    );
    assert_eq!(summary.confidence, Some(0.95));
  }

  #[tokio::test]
  async fn summarize_strips_a_fenced_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
        "```json\n{\"summary_text\":\"T\",\"key_findings\":[\"F\"],\"confidence\":0.9}\n```",
      )))
      .mount(&server)
      .await;

    let summary = client(&server)
      .await
      .summarize(&record("TP53", "Cancer"), "k", None)
      .await;

    assert_eq!(summary.summary_text, "T");
    assert_eq!(summary.key_findings, vec!["F".to_owned()]);
    assert_eq!(summary.confidence, Some(0.9));
  }

  #[tokio::test]
  async fn summarize_passes_additional_context_through_the_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(body_string_contains("Context: Consider latest research papers."))
      .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
        r#"{"summary_text":"EGFR associated with Lung Cancer.","key_findings":[],"confidence":0.9}"#,
      )))
      .expect(1)
      .mount(&server)
      .await;

    let summary = client(&server)
      .await
      .summarize(
        &record("EGFR", "Lung Cancer"),
        "k",
        Some("Consider latest research papers."),
      )
      .await;

    assert_eq!(summary.summary_text, "EGFR associated with Lung Cancer.");
  }

  #[tokio::test]
  async fn non_json_reply_degrades_into_the_summary_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(chat_reply("Oops, malformed response")),
      )
      .mount(&server)
      .await;

    let summary = client(&server)
      .await
      .summarize(&record("BRCA1", "Breast Cancer"), "k", None)
      .await;

    assert!(summary.summary_text.contains("Oops, malformed response"));
    assert!(summary.key_findings.is_empty());
    assert_eq!(summary.confidence, None);
  }

  #[tokio::test]
  async fn server_error_degrades_instead_of_failing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(500))
      .mount(&server)
      .await;

    let summary = client(&server)
      .await
      .summarize(&record("TP53", "Cancer"), "k", None)
      .await;

    assert!(summary.summary_text.starts_with("Error:"));
    assert!(summary.key_findings.is_empty());
    assert_eq!(summary.confidence, None);
  }

  #[tokio::test]
  async fn empty_choices_degrade_instead_of_failing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(serde_json::json!({ "choices": [] })),
      )
      .mount(&server)
      .await;

    let summary = client(&server)
      .await
      .summarize(&record("TP53", "Cancer"), "k", None)
      .await;

    assert!(summary.summary_text.starts_with("Error:"));
  }
}
