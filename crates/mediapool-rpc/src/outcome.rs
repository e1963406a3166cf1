use mediapool_core::{PoolError, ServerId};
use serde_json::Value;

/// The tagged result of one per-server invocation.
///
/// Created once, never mutated, consumed exactly once by the aggregation
/// that receives it. The server tag keeps merged views traceable to their
/// source.
#[derive(Debug, Clone)]
pub struct OperationOutcome {
    pub server_id: ServerId,
    pub server_name: String,
    pub result: Result<Value, PoolError>,
}

impl OperationOutcome {
    pub fn success(server_id: ServerId, server_name: impl Into<String>, payload: Value) -> Self {
        Self {
            server_id,
            server_name: server_name.into(),
            result: Ok(payload),
        }
    }

    pub fn failure(server_id: ServerId, server_name: impl Into<String>, error: PoolError) -> Self {
        Self {
            server_id,
            server_name: server_name.into(),
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// A per-server failure retained alongside a still-computed aggregate.
#[derive(Debug, Clone)]
pub struct OutcomeFailure {
    pub server_id: ServerId,
    pub server_name: String,
    pub error: PoolError,
}

/// Injects the originating server's identity into every item object of the
/// payload, so rows in a merged view can be routed back to their server.
///
/// Only the pool's own copies are touched; scalar items and non-collection
/// payloads are left as-is.
pub fn tag_payload(payload: &mut Value, server_id: &ServerId, server_name: &str) {
    match payload {
        Value::Array(items) => {
            for item in items {
                tag_item(item, server_id, server_name);
            }
        }
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get_mut("Items") {
                for item in items {
                    tag_item(item, server_id, server_name);
                }
            }
        }
        _ => {}
    }
}

fn tag_item(item: &mut Value, server_id: &ServerId, server_name: &str) {
    if let Value::Object(map) = item {
        map.insert(
            "ServerId".to_string(),
            Value::String(server_id.as_str().to_string()),
        );
        map.insert(
            "ServerName".to_string(),
            Value::String(server_name.to_string()),
        );
    }
}
