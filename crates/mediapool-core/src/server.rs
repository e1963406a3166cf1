use std::fmt;

/// Opaque identity of a configured backend server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerId(String);

impl ServerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ServerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One configured backend server and its last observed liveness.
///
/// Records are owned by the [`crate::ServerRegistry`] and mutated only
/// through its update path. Fan-outs operate on cloned snapshots, so a
/// record removed mid-flight never disturbs an in-flight aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerRecord {
    pub id: ServerId,
    /// Display name shown alongside merged results.
    pub name: String,
    /// Base address the transport dials.
    pub address: String,
    /// Per-server credential, substituted into resolved calls.
    pub access_token: String,
    /// Identity of the signed-in user on this server.
    pub user_id: String,
    /// Whether the most recent call against this server succeeded.
    pub online: bool,
}

/// Partial record applied to a [`ServerRecord`] as a shallow merge.
#[derive(Debug, Clone, Default)]
pub struct ServerUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub access_token: Option<String>,
    pub user_id: Option<String>,
    pub online: Option<bool>,
}

impl ServerUpdate {
    /// Update that only touches the liveness flag.
    pub fn online(flag: bool) -> Self {
        Self {
            online: Some(flag),
            ..Self::default()
        }
    }
}

impl ServerRecord {
    /// Applies the supplied fields, leaving absent ones untouched.
    pub fn apply(&mut self, update: ServerUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(access_token) = update.access_token {
            self.access_token = access_token;
        }
        if let Some(user_id) = update.user_id {
            self.user_id = user_id;
        }
        if let Some(online) = update.online {
            self.online = online;
        }
    }
}
