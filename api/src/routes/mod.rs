pub mod products;
pub mod purchases;
pub mod returns;

use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Query parameters shared by the list endpoints.
///
/// Unknown parameters such as `limit` are ignored: the page size is fixed.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ListParams {
    /// Missing, non-numeric and sub-1 page numbers all mean page 1.
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .and_then(|p| usize::try_from(p).ok())
            .unwrap_or(1)
    }
}

/// Build a success envelope: `{ "success": true, "message": ..., ...payload }`.
pub fn envelope(message: &str, payload: Value) -> Json<Value> {
    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(true));
    body.insert("message".into(), Value::String(message.to_string()));
    if let Value::Object(fields) = payload {
        body.extend(fields);
    }
    Json(Value::Object(body))
}

/// GET /health
pub async fn health() -> Json<Value> {
    envelope("ok", json!({}))
}
