use mediapool_core::{PoolError, ServerId, ServerRegistry, ServerUpdate, TransportError};
use mediapool_rpc::{ApiTransport, Operation, OperationOutcome};
use std::sync::Arc;
use std::time::Duration;

/// Issues one logical operation against one named server.
///
/// Every invocation ends with exactly one liveness write: the target's
/// `online` flag is set from this call's outcome before the outcome is
/// handed back, so liveness tracking cannot be skipped by a caller.
pub struct RequestExecutor {
    registry: Arc<ServerRegistry>,
    transport: Arc<dyn ApiTransport>,
    request_timeout: Option<Duration>,
}

impl RequestExecutor {
    pub fn new(registry: Arc<ServerRegistry>, transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            registry,
            transport,
            request_timeout: None,
        }
    }

    /// Caps every transport call; an elapsed timer becomes a per-server
    /// failure outcome instead of stalling the caller.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.request_timeout = Some(limit);
        self
    }

    /// Resolves the operation against the named server and invokes the
    /// transport.
    ///
    /// An unregistered id fails with `UnknownServer` before any network
    /// activity and without touching the registry; the failure travels the
    /// same return path as network outcomes. The outcome for an unknown
    /// server carries the id string in place of a display name.
    pub async fn execute(&self, server_id: &ServerId, operation: &Operation) -> OperationOutcome {
        let Some(server) = self.registry.get(server_id) else {
            tracing::warn!(server = %server_id, "dispatch to unregistered server");
            return OperationOutcome::failure(
                server_id.clone(),
                server_id.as_str(),
                PoolError::UnknownServer {
                    id: server_id.clone(),
                },
            );
        };

        let call = operation.resolve(&server);
        tracing::debug!(server = %server.id, method = %call.method, "dispatching");

        let result = match self.request_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.transport.invoke(call)).await {
                Ok(completed) => completed,
                Err(_) => Err(TransportError::new(format!(
                    "no response within {}s",
                    limit.as_secs_f64()
                ))),
            },
            None => self.transport.invoke(call).await,
        };

        // Liveness reflects only the most recent call, and is written before
        // the caller sees the outcome.
        self.registry
            .update(&server.id, ServerUpdate::online(result.is_ok()));

        match result {
            Ok(payload) => OperationOutcome::success(server.id, server.name, payload),
            Err(error) => {
                tracing::warn!(server = %server.id, %error, "call failed");
                OperationOutcome::failure(server.id, server.name, PoolError::Transport(error))
            }
        }
    }
}
