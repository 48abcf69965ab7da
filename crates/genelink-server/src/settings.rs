//! Runtime configuration for the genelink server binary.

use std::path::PathBuf;

use serde::Deserialize;

/// Runtime server configuration, deserialised from `config.toml` layered
/// with `GENELINK_*` environment variables. Every field has a baked-in
/// default, so the server starts with no file at all.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,

  /// Override the Open Targets GraphQL endpoint.
  #[serde(default)]
  pub opentargets_url: Option<String>,

  /// Override the OpenRouter chat-completions endpoint.
  #[serde(default)]
  pub openrouter_url: Option<String>,

  /// Override the summarization model name.
  #[serde(default)]
  pub model: Option<String>,
}
