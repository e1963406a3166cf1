use crate::config::PoolConfig;
use crate::server::{ServerId, ServerRecord, ServerUpdate};
use std::sync::RwLock;

/// Owns the configured server set and the designated active server.
///
/// All accessors take `&self`: mutation is serialized behind an interior
/// lock so concurrent fan-out completions can write liveness without
/// external coordination. Reads hand out clones, which is what makes
/// dispatch-time snapshots safe to iterate while the registry changes.
pub struct ServerRegistry {
    inner: RwLock<Inner>,
}

struct Inner {
    /// Registration order is preserved; it defines snapshot order.
    servers: Vec<ServerRecord>,
    active: Option<ServerId>,
}

impl ServerRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                servers: Vec::new(),
                active: None,
            }),
        }
    }

    /// Registers the config's bootstrap servers and active designation.
    ///
    /// A freshly registered server starts `online = true`; the flag tracks
    /// the most recent call outcome from then on.
    pub fn from_config(config: &PoolConfig) -> Self {
        let registry = Self::new();
        for entry in &config.servers {
            registry.insert(ServerRecord {
                id: ServerId::new(entry.id.clone()),
                name: entry.name.clone(),
                address: entry.address.clone(),
                access_token: entry.access_token.clone(),
                user_id: entry.user_id.clone(),
                online: true,
            });
        }
        if let Some(id) = &config.active_server {
            registry.set_active(&ServerId::new(id.clone()));
        }
        registry
    }

    pub fn get(&self, id: &ServerId) -> Option<ServerRecord> {
        let inner = self.inner.read().expect("registry lock poisoned");
        inner.servers.iter().find(|s| &s.id == id).cloned()
    }

    /// Snapshot of every record, in registration order.
    pub fn list_all(&self) -> Vec<ServerRecord> {
        let inner = self.inner.read().expect("registry lock poisoned");
        inner.servers.clone()
    }

    /// The designated default server, if one is set and still registered.
    pub fn get_active(&self) -> Option<ServerRecord> {
        let inner = self.inner.read().expect("registry lock poisoned");
        let active = inner.active.as_ref()?;
        inner.servers.iter().find(|s| &s.id == active).cloned()
    }

    /// Designates the default server. No-op if the id is not registered.
    pub fn set_active(&self, id: &ServerId) {
        let mut inner = self.inner.write().expect("registry lock poisoned");
        if inner.servers.iter().any(|s| &s.id == id) {
            inner.active = Some(id.clone());
        } else {
            tracing::debug!(server = %id, "set_active ignored for unregistered server");
        }
    }

    /// Registers a record, replacing any existing one with the same id in
    /// place so registration order stays stable.
    pub fn insert(&self, record: ServerRecord) {
        let mut inner = self.inner.write().expect("registry lock poisoned");
        match inner.servers.iter_mut().find(|s| s.id == record.id) {
            Some(existing) => *existing = record,
            None => inner.servers.push(record),
        }
    }

    /// Removes a record. In-flight fan-outs are unaffected: they hold a
    /// snapshot, and a later liveness write for this id becomes a no-op.
    pub fn remove(&self, id: &ServerId) {
        let mut inner = self.inner.write().expect("registry lock poisoned");
        inner.servers.retain(|s| &s.id != id);
        if inner.active.as_ref() == Some(id) {
            inner.active = None;
        }
    }

    /// Shallow-merges the supplied fields onto the matching record. No-op
    /// if the id is absent.
    pub fn update(&self, id: &ServerId, update: ServerUpdate) {
        let mut inner = self.inner.write().expect("registry lock poisoned");
        match inner.servers.iter_mut().find(|s| &s.id == id) {
            Some(record) => record.apply(update),
            None => {
                tracing::debug!(server = %id, "update ignored for unregistered server");
            }
        }
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().expect("registry lock poisoned");
        inner.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ServerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
