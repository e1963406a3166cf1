pub mod config;
pub mod error;
pub mod registry;
pub mod server;

pub use config::{ConfigError, PoolConfig, ServerEntry};
pub use error::{PoolError, TransportError};
pub use registry::ServerRegistry;
pub use server::{ServerId, ServerRecord, ServerUpdate};
