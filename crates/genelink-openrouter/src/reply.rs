//! Parsing of model replies into [`SummaryRecord`]s.

use genelink_core::summary::SummaryRecord;

/// Strip a wrapping ``` code fence by dropping the first and last lines.
/// Unfenced text passes through unchanged.
pub fn strip_code_fence(text: &str) -> String {
  if !text.starts_with("```") {
    return text.to_owned();
  }
  let lines: Vec<&str> = text.lines().collect();
  if lines.len() <= 2 {
    return String::new();
  }
  lines[1..lines.len() - 1].join("\n")
}

/// Parse a (possibly fenced) model reply.
///
/// Strict JSON parsing, with serde defaults backfilling any of the three
/// keys the model omitted. A reply that is not valid JSON becomes the
/// `summary_text` of the returned record, with empty findings and absent
/// confidence.
pub fn parse_reply(reply: &str) -> SummaryRecord {
  let body = strip_code_fence(reply.trim());
  serde_json::from_str(&body).unwrap_or_else(|_| SummaryRecord {
    summary_text: body,
    key_findings: Vec::new(),
    confidence:   None,
  })
}
