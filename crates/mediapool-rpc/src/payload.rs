//! The payload shapes the pool touches.
//!
//! Per-server responses are either a bare JSON array or an object exposing
//! an `Items` collection and a `TotalRecordCount`. Nothing else about the
//! wire schema is interpreted at this layer.

use serde::Serialize;
use serde_json::Value;

/// A unified paged collection, the output shape of the merge-paged
/// strategy. Serializes with the wire field names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Paged {
    pub items: Vec<Value>,
    pub total_record_count: u64,
}

impl From<Paged> for Value {
    fn from(paged: Paged) -> Self {
        serde_json::json!({
            "Items": paged.items,
            "TotalRecordCount": paged.total_record_count,
        })
    }
}

/// Borrows the payload's item collection: the array itself, or the
/// object's `Items` field.
pub fn items_of(payload: &Value) -> Option<&Vec<Value>> {
    match payload {
        Value::Array(items) => Some(items),
        Value::Object(map) => match map.get("Items") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

/// Takes ownership of the payload's item collection. Payloads without one
/// contribute nothing to a merge.
pub fn into_items(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("Items") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// The reported total count, when the payload carries one.
pub fn total_of(payload: &Value) -> Option<u64> {
    payload.get("TotalRecordCount").and_then(Value::as_u64)
}
