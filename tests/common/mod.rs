//! Shared test transport: scripted per-server responses, optional delays,
//! and call recording.

#![allow(dead_code)]

use futures::future::BoxFuture;
use media_pool::{ApiTransport, ResolvedCall, ServerRecord, ServerRegistry, TransportError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone)]
enum Script {
    Succeed(Value, Option<Duration>),
    Fail(String, Option<Duration>),
    /// Never completes; only a configured timeout can unstick the call.
    Hang,
}

/// Transport whose behavior is scripted per server address.
pub struct MockTransport {
    scripts: Mutex<HashMap<String, Script>>,
    calls: AtomicUsize,
    recorded: Mutex<Vec<ResolvedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            recorded: Mutex::new(Vec::new()),
        }
    }

    pub fn on_success(self, address: &str, payload: Value) -> Self {
        self.script(address, Script::Succeed(payload, None))
    }

    pub fn on_success_after(self, address: &str, payload: Value, delay: Duration) -> Self {
        self.script(address, Script::Succeed(payload, Some(delay)))
    }

    pub fn on_failure(self, address: &str, message: &str) -> Self {
        self.script(address, Script::Fail(message.to_string(), None))
    }

    pub fn on_failure_after(self, address: &str, message: &str, delay: Duration) -> Self {
        self.script(address, Script::Fail(message.to_string(), Some(delay)))
    }

    pub fn on_hang(self, address: &str) -> Self {
        self.script(address, Script::Hang)
    }

    fn script(self, address: &str, script: Script) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(address.to_string(), script);
        self
    }

    /// Total transport invocations, across every server.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every resolved call the pool handed to the transport, in arrival
    /// order.
    pub fn recorded_calls(&self) -> Vec<ResolvedCall> {
        self.recorded.lock().unwrap().clone()
    }
}

impl ApiTransport for MockTransport {
    fn invoke(&self, call: ResolvedCall) -> BoxFuture<'_, Result<Value, TransportError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recorded.lock().unwrap().push(call.clone());
        let script = self.scripts.lock().unwrap().get(&call.address).cloned();
        Box::pin(async move {
            match script {
                Some(Script::Succeed(payload, delay)) => {
                    if let Some(delay) = delay {
                        tokio::time::sleep(delay).await;
                    }
                    Ok(payload)
                }
                Some(Script::Fail(message, delay)) => {
                    if let Some(delay) = delay {
                        tokio::time::sleep(delay).await;
                    }
                    Err(TransportError::new(message))
                }
                Some(Script::Hang) => {
                    futures::future::pending::<()>().await;
                    unreachable!()
                }
                None => Err(TransportError::new(format!(
                    "no script for {}",
                    call.address
                ))),
            }
        })
    }
}

/// A record with predictable fields derived from the id.
pub fn record(id: &str) -> ServerRecord {
    ServerRecord {
        id: id.into(),
        name: format!("Server {id}"),
        address: format!("http://{id}.local:8096"),
        access_token: format!("{id}-token"),
        user_id: format!("{id}-user"),
        online: true,
    }
}

/// Registry seeded with one record per id, in the given order.
pub fn registry_of(ids: &[&str]) -> ServerRegistry {
    let registry = ServerRegistry::new();
    for id in ids.iter().copied() {
        registry.insert(record(id));
    }
    registry
}
