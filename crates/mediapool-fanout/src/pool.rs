use crate::aggregate::{self, Aggregated, AggregatedResult, AggregationPolicy};
use crate::executor::RequestExecutor;
use futures::future;
use mediapool_core::{PoolConfig, PoolError, ServerId, ServerRegistry};
use mediapool_rpc::{tag_payload, ApiTransport, Operation, OperationOutcome, OutcomeFailure};
use serde_json::Value;
use std::sync::Arc;

/// The connection pool: routes a logical operation to one, several, or all
/// configured servers and folds the outcomes into one answer.
pub struct ConnectionPool {
    registry: Arc<ServerRegistry>,
    executor: RequestExecutor,
}

impl ConnectionPool {
    pub fn new(registry: Arc<ServerRegistry>, transport: Arc<dyn ApiTransport>) -> Self {
        let executor = RequestExecutor::new(registry.clone(), transport);
        Self { registry, executor }
    }

    /// Pool seeded from a config file: bootstrap servers, active
    /// designation, and the per-request timeout when one is set.
    pub fn from_config(config: &PoolConfig, transport: Arc<dyn ApiTransport>) -> Self {
        let registry = Arc::new(ServerRegistry::from_config(config));
        let mut executor = RequestExecutor::new(registry.clone(), transport);
        if let Some(limit) = config.request_timeout() {
            executor = executor.with_timeout(limit);
        }
        Self { registry, executor }
    }

    /// Caps every per-server call; see [`RequestExecutor::with_timeout`].
    pub fn with_timeout(mut self, limit: std::time::Duration) -> Self {
        self.executor = self.executor.with_timeout(limit);
        self
    }

    pub fn registry(&self) -> &Arc<ServerRegistry> {
        &self.registry
    }

    /// Direct single-server dispatch through the executor.
    pub async fn execute_on(
        &self,
        server_id: &ServerId,
        operation: &Operation,
    ) -> OperationOutcome {
        self.executor.execute(server_id, operation).await
    }

    /// Dispatch to the registry's designated active server. No fan-out, no
    /// aggregation.
    pub async fn execute_active(&self, operation: &Operation) -> Result<Value, PoolError> {
        let Some(active) = self.registry.get_active() else {
            return Err(PoolError::NoActiveServer);
        };
        self.executor.execute(&active.id, operation).await.result
    }

    /// Issues the operation against every registered server concurrently
    /// and aggregates the outcomes under the supplied policy.
    ///
    /// The server set is snapshotted at dispatch; completion happens
    /// exactly once, after every dispatched call has finished, whatever
    /// order they finish in. Per-server failures never abort the fan-out.
    /// If every server failed, the first failure in snapshot order is the
    /// top-level error.
    pub async fn execute_all(
        &self,
        operation: &Operation,
        policy: &AggregationPolicy,
    ) -> Result<AggregatedResult, PoolError> {
        let snapshot = self.registry.list_all();
        if snapshot.is_empty() {
            return Err(PoolError::NoServersConfigured);
        }

        tracing::debug!(
            servers = snapshot.len(),
            method = operation.method(),
            "fan-out dispatch"
        );

        // join_all is the barrier: it waits for every call and preserves
        // snapshot order, so nothing is dropped or double-counted and no
        // failure short-circuits the rest.
        let calls = snapshot
            .iter()
            .map(|server| self.executor.execute(&server.id, operation));
        let outcomes = future::join_all(calls).await;
        debug_assert_eq!(outcomes.len(), snapshot.len());

        let mut payloads: Vec<Value> = Vec::with_capacity(outcomes.len());
        let mut failures: Vec<OutcomeFailure> = Vec::new();
        for outcome in outcomes {
            let server_id = outcome.server_id.clone();
            let server_name = outcome.server_name.clone();
            match outcome.result {
                Ok(mut payload) => {
                    tag_payload(&mut payload, &server_id, &server_name);
                    payloads.push(payload);
                }
                Err(error) => failures.push(OutcomeFailure {
                    server_id,
                    server_name,
                    error,
                }),
            }
        }

        if payloads.is_empty() {
            let first = failures
                .first()
                .map(|failure| failure.error.clone())
                .expect("non-empty snapshot yielded no outcomes");
            tracing::warn!(
                failed = failures.len(),
                method = operation.method(),
                "every server failed"
            );
            return Err(first);
        }

        let payload = aggregate::combine(payloads, policy);
        let errors = if policy.ignore_errors {
            Vec::new()
        } else {
            failures
        };
        Ok(AggregatedResult { payload, errors })
    }

    /// Broadcast variant for writes where any one success suffices: the
    /// first successful payload in snapshot order is kept.
    pub async fn execute_any(&self, operation: &Operation) -> Result<Value, PoolError> {
        let result = self
            .execute_all(operation, &AggregationPolicy::first_success())
            .await?;
        match result.payload {
            Aggregated::Single(value) => Ok(value),
            // first_success policy always yields Single.
            _ => Ok(Value::Null),
        }
    }
}
