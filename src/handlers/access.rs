use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::ApiError;
use crate::models::access_record::format_timestamp;
use crate::models::AccessRecord;
use crate::store::SharedStore;

use super::require_string;

/// POST /api/access - record a check-in with a server-assigned timestamp
pub async fn record(
    Extension(store): Extension<SharedStore>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let (student_id, role) =
        match (require_string(&payload, "studentId"), require_string(&payload, "role")) {
            (Some(student_id), Some(role)) => (student_id, role),
            _ => {
                warn!(body = %payload, "access validation failed");
                return Err(ApiError::validation("Valid Student ID and role are required"));
            }
        };

    let timestamp = Utc::now();
    store
        .add(AccessRecord::COLLECTION, AccessRecord::fields(&student_id, &role, timestamp))
        .await
        .map_err(|e| ApiError::storage("Error recording access", e))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Access recorded",
            "timestamp": format_timestamp(timestamp)
        })),
    )
        .into_response())
}

/// GET /api/access - full check-in history
pub async fn list(Extension(store): Extension<SharedStore>) -> Result<Response, ApiError> {
    let docs = store
        .list(AccessRecord::COLLECTION)
        .await
        .map_err(|e| ApiError::storage("Error fetching access records", e))?;

    // An empty collection is a distinct condition, not an empty success list
    if docs.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No records found" })),
        )
            .into_response());
    }

    let records: Vec<AccessRecord> = docs.into_iter().map(AccessRecord::from_document).collect();
    Ok(Json(records).into_response())
}
