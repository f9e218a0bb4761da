use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::models::application::{Document, CURRENT_STAGE, DEFAULT_STAGE, LAST_UPDATED, STATUS};
use crate::utils::time::to_rfc3339;

/// Makes sure a storage-convention document carries `status.current_stage`
/// and `status.last_updated`. Values supplied by the caller are kept.
pub fn ensure_status(document: &mut Document, now: DateTime<Utc>) {
    let timestamp = Value::String(to_rfc3339(now));

    let status = document
        .entry(STATUS)
        .or_insert_with(|| Value::Object(Map::new()));
    if !status.is_object() {
        tracing::debug!(supplied = %status, "Replacing non-object status with defaults");
        *status = Value::Object(Map::new());
    }

    if let Value::Object(fields) = status {
        if fields.get(CURRENT_STAGE).map_or(true, Value::is_null) {
            fields.insert(CURRENT_STAGE.to_string(), Value::String(DEFAULT_STAGE.to_string()));
        }
        if fields.get(LAST_UPDATED).map_or(true, Value::is_null) {
            fields.insert(LAST_UPDATED.to_string(), timestamp);
        }
    }
}
