use crate::server::ServerId;

/// Opaque per-call failure passed through from the transport boundary.
///
/// The pool never inspects the message; it only records it against the
/// originating server and, on an all-failed fan-out, promotes the first one
/// to the top-level error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the connection pool.
///
/// Registration-level errors short-circuit before any network activity but
/// travel the same result channel as network outcomes, so callers have one
/// uniform failure path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PoolError {
    /// The requested server id is not registered.
    #[error("unknown server: {id}")]
    UnknownServer { id: ServerId },

    /// Fan-out attempted against an empty registry.
    #[error("no servers configured")]
    NoServersConfigured,

    /// Single-active dispatch with no designated default server.
    #[error("no active server designated")]
    NoActiveServer,

    /// The underlying per-server call failed or timed out.
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
}

impl PoolError {
    pub fn is_transport(&self) -> bool {
        matches!(self, PoolError::Transport(_))
    }
}
