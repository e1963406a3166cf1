use crate::operation::ResolvedCall;
use futures::future::BoxFuture;
use mediapool_core::TransportError;
use serde_json::Value;

/// The pool's only external boundary: one RPC invocation against one
/// server.
///
/// Implementations complete each call exactly once, with either a JSON
/// payload or an opaque transport failure. The pool is agnostic to what
/// the operation does; it only relies on the collection shape described in
/// [`crate::payload`].
pub trait ApiTransport: Send + Sync {
    fn invoke(&self, call: ResolvedCall) -> BoxFuture<'_, Result<Value, TransportError>>;
}
