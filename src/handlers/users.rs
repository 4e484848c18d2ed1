use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use futures::future::try_join_all;
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::error::ApiError;
use crate::models::{User, UserStatus};
use crate::store::SharedStore;

use super::require_string;

/// POST /api/addUser - create a roster entry, always starting active
pub async fn add_user(
    Extension(store): Extension<SharedStore>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let (student_id, role) =
        match (require_string(&payload, "studentId"), require_string(&payload, "role")) {
            (Some(student_id), Some(role)) => (student_id, role),
            _ => {
                warn!(body = %payload, "add user validation failed");
                return Err(ApiError::validation("Valid Student ID and role are required"));
            }
        };

    let user = User::new(student_id, role);
    store
        .add(User::COLLECTION, user.into_fields())
        .await
        .map_err(|e| ApiError::storage("Error adding user", e))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User added successfully" })),
    )
        .into_response())
}

/// POST /api/updateStatus - set the status on every roster entry matching
/// the studentId
pub async fn update_status(
    Extension(store): Extension<SharedStore>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let student_id = require_string(&payload, "studentId");
    let status = payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(UserStatus::parse);

    let (student_id, status) = match (student_id, status) {
        (Some(student_id), Some(status)) => (student_id, status),
        _ => {
            warn!(body = %payload, "status validation failed");
            return Err(ApiError::validation("Valid Student ID and status are required"));
        }
    };

    let matches = store
        .find_eq(User::COLLECTION, "studentId", &student_id)
        .await
        .map_err(|e| ApiError::storage("Error updating user status", e))?;

    if matches.is_empty() {
        return Err(ApiError::not_found("User not found"));
    }

    // Patch every matching entry concurrently. The call fails as a whole if
    // any single patch fails; patches already applied are not rolled back.
    let updates = matches.iter().map(|doc| {
        let mut patch = Map::new();
        patch.insert("status".into(), Value::String(status.as_str().to_string()));
        store.update(User::COLLECTION, doc.id, patch)
    });
    try_join_all(updates)
        .await
        .map_err(|e| ApiError::storage("Error updating user status", e))?;

    Ok(Json(json!({
        "message": format!("User ID {} updated to {}", student_id, status)
    }))
    .into_response())
}
