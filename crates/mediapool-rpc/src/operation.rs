use mediapool_core::ServerRecord;
use serde_json::Value;

/// One argument slot of an [`Operation`].
///
/// Injection slots replace the source system's magic sentinel strings: the
/// substitution point is a typed variant, so a credential can never be
/// confused with a literal argument.
#[derive(Debug, Clone, PartialEq)]
pub enum OpArg {
    /// A literal JSON value forwarded as-is.
    Value(Value),
    /// Substituted with the target server's access token.
    AccessToken,
    /// Substituted with the signed-in user's id on the target server.
    UserId,
}

/// A logical remote operation, independent of any particular server.
///
/// Immutable per invocation; the same descriptor can be resolved against
/// every server of a fan-out snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    method: String,
    args: Vec<OpArg>,
}

impl Operation {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: Vec::new(),
        }
    }

    /// Appends a literal argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(OpArg::Value(value.into()));
        self
    }

    /// Appends an access-token injection slot.
    pub fn token_arg(mut self) -> Self {
        self.args.push(OpArg::AccessToken);
        self
    }

    /// Appends a user-id injection slot.
    pub fn user_arg(mut self) -> Self {
        self.args.push(OpArg::UserId);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &[OpArg] {
        &self.args
    }

    /// Binds the operation to one server: the record's address and
    /// credential are substituted, every injection slot is filled, and the
    /// result is ready for the transport.
    pub fn resolve(&self, server: &ServerRecord) -> ResolvedCall {
        let args = self
            .args
            .iter()
            .map(|arg| match arg {
                OpArg::Value(value) => value.clone(),
                OpArg::AccessToken => Value::String(server.access_token.clone()),
                OpArg::UserId => Value::String(server.user_id.clone()),
            })
            .collect();

        ResolvedCall {
            address: server.address.clone(),
            access_token: server.access_token.clone(),
            method: self.method.clone(),
            args,
        }
    }
}

/// A fully substituted call bound to one server.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCall {
    pub address: String,
    pub access_token: String,
    pub method: String,
    pub args: Vec<Value>,
}
