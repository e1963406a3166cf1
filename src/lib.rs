//! Multi-server connection pool for media backend servers: request
//! fan-out, partial-failure tolerance, result aggregation, and per-server
//! liveness tracking.

pub use mediapool_core::{
    ConfigError, PoolConfig, PoolError, ServerEntry, ServerId, ServerRecord, ServerRegistry,
    ServerUpdate, TransportError,
};
pub use mediapool_fanout::{
    concatenate, first_success, merge_paged, views, AggregateMode, Aggregated, AggregatedResult,
    AggregationPolicy, ConnectionPool, RequestExecutor,
};
pub use mediapool_rpc::{
    payload, tag_payload, ApiTransport, OpArg, Operation, OperationOutcome, OutcomeFailure, Paged,
    ResolvedCall,
};
