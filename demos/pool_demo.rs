use futures::future::BoxFuture;
use media_pool::{
    ApiTransport, ConnectionPool, Operation, PoolConfig, ResolvedCall, TransportError,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// In-process stand-in for two media servers: the den server answers, the
/// attic server is unreachable.
struct DemoTransport;

impl ApiTransport for DemoTransport {
    fn invoke(&self, call: ResolvedCall) -> BoxFuture<'_, Result<Value, TransportError>> {
        Box::pin(async move {
            if call.address.contains("attic") {
                return Err(TransportError::new("connection refused"));
            }
            match call.method.as_str() {
                "getUserViews" => Ok(json!({
                    "Items": [
                        { "Name": "Movies", "Type": "CollectionFolder" },
                        { "Name": "Shows", "Type": "CollectionFolder" },
                    ],
                    "TotalRecordCount": 2,
                })),
                _ => Ok(json!({ "Items": [], "TotalRecordCount": 0 })),
            }
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = PoolConfig::from_toml_str(
        r#"
        request_timeout_secs = 10
        active_server = "den"

        [[servers]]
        id = "den"
        name = "Den"
        address = "http://den.local:8096"
        access_token = "den-token"
        user_id = "user-1"

        [[servers]]
        id = "attic"
        name = "Attic"
        address = "http://attic.local:8096"
        access_token = "attic-token"
        user_id = "user-2"
    "#,
    )?;

    let pool = ConnectionPool::from_config(&config, Arc::new(DemoTransport));

    // Libraries across every reachable server, merged and sorted by name.
    let views = pool.user_views().await?;
    println!("merged libraries: {:?}", views.payload);

    // Liveness after the fan-out: den stays online, attic is marked off.
    for server in pool.registry().list_all() {
        println!("{}: online={}", server.name, server.online);
    }

    // Single-server dispatch against the designated active server.
    let active = pool
        .execute_active(&Operation::new("getUserViews").user_arg())
        .await?;
    println!("active server answered with {active}");

    Ok(())
}
