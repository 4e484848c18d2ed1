pub mod access;
pub mod users;

use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::store::SharedStore;

/// GET /health - store connectivity probe
pub async fn health(Extension(store): Extension<SharedStore>) -> impl IntoResponse {
    let now = Utc::now();

    match store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "store_error": e.to_string()
            })),
        ),
    }
}

/// Required non-empty string field from a JSON body.
pub(crate) fn require_string(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
