//! The `{status, message, data}` response envelope.

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

/// A success envelope carrying a payload.
pub fn success(message: &str, data: impl Serialize) -> Json<Value> {
  Json(json!({ "status": "success", "message": message, "data": data }))
}

/// A success envelope with no payload.
pub fn success_message(message: &str) -> Json<Value> {
  Json(json!({ "status": "success", "message": message }))
}
