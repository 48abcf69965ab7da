//! SummaryRecord and the summarization-provider seam.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::association::AssociationRecord;

/// A language-model summary of an association record.
///
/// All three keys are present after any parse; missing ones are backfilled
/// with the empty string / empty list / `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryRecord {
  pub summary_text: String,
  pub key_findings: Vec<String>,
  /// Model-reported confidence in `[0.0, 1.0]`.
  pub confidence:   Option<f64>,
}

impl SummaryRecord {
  /// A degraded record carrying an error message instead of a summary.
  ///
  /// A summarization problem must not block returning the underlying
  /// association data, so provider failures are absorbed into this shape.
  pub fn degraded(cause: impl std::fmt::Display) -> Self {
    Self {
      summary_text: format!("Error: {cause}"),
      key_findings: Vec::new(),
      confidence:   None,
    }
  }
}

/// Abstraction over a summarization provider.
///
/// Infallible by contract: provider-side transport and parse failures come
/// back as a degraded [`SummaryRecord`], never as an error.
pub trait Summarizer: Send + Sync {
  /// Summarize `record`, authenticating upstream with `api_key`.
  fn summarize<'a>(
    &'a self,
    record: &'a AssociationRecord,
    api_key: &'a str,
    additional_context: Option<&'a str>,
  ) -> impl Future<Output = SummaryRecord> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::SummaryRecord;

  #[test]
  fn missing_keys_are_backfilled() {
    let record: SummaryRecord = serde_json::from_str("{}").unwrap();
    assert_eq!(record.summary_text, "");
    assert!(record.key_findings.is_empty());
    assert_eq!(record.confidence, None);
  }

  #[test]
  fn confidence_serializes_as_null_when_absent() {
    let record = SummaryRecord {
      summary_text: "t".into(),
      ..Default::default()
    };
    let value = serde_json::to_value(&record).unwrap();
    assert!(value["confidence"].is_null());
    assert_eq!(value["key_findings"], serde_json::json!([]));
  }

  #[test]
  fn degraded_embeds_the_cause() {
    let record = SummaryRecord::degraded("connection refused");
    assert_eq!(record.summary_text, "Error: connection refused");
    assert!(record.key_findings.is_empty());
    assert_eq!(record.confidence, None);
  }
}
