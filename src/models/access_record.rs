use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

use crate::store::Document;

/// Immutable log entry of a student/role check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRecord {
    pub id: Uuid,
    pub student_id: String,
    pub role: String,
    /// None when the stored value is missing or not a parseable timestamp.
    pub timestamp: Option<DateTime<Utc>>,
}

impl AccessRecord {
    pub const COLLECTION: &'static str = "accessRecords";

    /// Document fields for a new check-in stamped at `timestamp`.
    pub fn fields(student_id: &str, role: &str, timestamp: DateTime<Utc>) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("studentId".into(), Value::String(student_id.to_string()));
        fields.insert("role".into(), Value::String(role.to_string()));
        fields.insert("timestamp".into(), Value::String(format_timestamp(timestamp)));
        fields
    }

    /// Read a stored document back into the wire shape. A timestamp that
    /// fails to parse is reported as a diagnostic only, never to the caller.
    pub fn from_document(doc: Document) -> Self {
        let timestamp = match doc.fields.get("timestamp").and_then(Value::as_str) {
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(ts) => Some(ts.with_timezone(&Utc)),
                Err(_) => {
                    warn!(id = %doc.id, value = raw, "invalid stored timestamp");
                    None
                }
            },
            None => {
                warn!(id = %doc.id, "missing stored timestamp");
                None
            }
        };

        Self {
            id: doc.id,
            student_id: string_field(&doc.fields, "studentId"),
            role: string_field(&doc.fields, "role"),
            timestamp,
        }
    }
}

/// ISO-8601 with millisecond precision, the format clients receive.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
