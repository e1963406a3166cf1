//! # Resiliency Tests
//!
//! Validates the timeout hardening path and snapshot insulation against
//! registry edits made while a fan-out is in flight.

mod common;

use common::MockTransport;
use media_pool::{
    AggregationPolicy, ConnectionPool, Operation, PoolConfig, RequestExecutor, ServerId,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Verifies that a configured timeout converts a hung server into a
/// failure outcome instead of stalling the caller, and flips liveness.
#[tokio::test]
async fn test_timeout_converts_hang_to_failure() {
    let registry = Arc::new(common::registry_of(&["alpha"]));
    let transport = Arc::new(MockTransport::new().on_hang("http://alpha.local:8096"));
    let executor = RequestExecutor::new(registry.clone(), transport)
        .with_timeout(Duration::from_millis(50));

    let outcome = executor
        .execute(&ServerId::new("alpha"), &Operation::new("ping"))
        .await;

    let error = outcome.result.expect_err("hung call must time out");
    assert!(error.is_transport(), "A timeout is reported as a transport failure");
    assert!(
        error.to_string().contains("no response within"),
        "Timeout failures should say so, got: {error}"
    );
    assert!(
        !registry.get(&ServerId::new("alpha")).unwrap().online,
        "A timed-out server goes offline"
    );
}

/// Verifies that one unreachable server cannot stall the barrier when a
/// timeout is configured: the fan-out completes with the survivor's data.
#[tokio::test]
async fn test_hung_server_does_not_stall_fanout() {
    let transport = Arc::new(
        MockTransport::new()
            .on_success("http://alpha.local:8096", json!({ "Items": [{ "Name": "A" }], "TotalRecordCount": 1 }))
            .on_hang("http://beta.local:8096"),
    );
    let registry = Arc::new(common::registry_of(&["alpha", "beta"]));
    let pool = ConnectionPool::new(registry, transport).with_timeout(Duration::from_millis(100));

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        pool.execute_all(
            &Operation::new("getUserViews"),
            &AggregationPolicy::merge_paged().surface_errors(),
        ),
    )
    .await
    .expect("the barrier must complete once the timeout fires")
    .expect("the reachable server succeeded");

    let items = result.payload.items().unwrap();
    assert_eq!(items.len(), 1, "Survivor's items should be aggregated");
    assert_eq!(result.errors.len(), 1, "The hung server should surface as a failure");
}

/// Verifies that a pool seeded from config picks up the configured
/// timeout and bootstrap servers together.
#[tokio::test]
async fn test_pool_from_config_applies_timeout() {
    let config = PoolConfig::from_toml_str(
        r#"
        request_timeout_secs = 1

        [[servers]]
        id = "alpha"
        name = "Alpha"
        address = "http://alpha.local:8096"
        access_token = "alpha-token"
        user_id = "alpha-user"
    "#,
    )
    .expect("parse config");

    let transport = Arc::new(MockTransport::new().on_hang("http://alpha.local:8096"));
    let pool = ConnectionPool::from_config(&config, transport);

    let error = tokio::time::timeout(
        Duration::from_secs(5),
        pool.execute_all(&Operation::new("ping"), &AggregationPolicy::merge_paged()),
    )
    .await
    .expect("the configured timeout must unstick the call")
    .expect_err("the only server hung");

    assert!(error.is_transport(), "All-failed fan-out surfaces the timeout failure");
}

/// Verifies that removing a server while a fan-out is in flight neither
/// loses outcomes nor crashes the aggregation: the snapshot governs.
#[tokio::test]
async fn test_removal_mid_flight_keeps_snapshot() {
    let transport = Arc::new(
        MockTransport::new()
            .on_success_after(
                "http://alpha.local:8096",
                json!({ "Items": [{ "Name": "A" }], "TotalRecordCount": 1 }),
                Duration::from_millis(80),
            )
            .on_success(
                "http://beta.local:8096",
                json!({ "Items": [{ "Name": "B" }], "TotalRecordCount": 1 }),
            ),
    );
    let registry = Arc::new(common::registry_of(&["alpha", "beta"]));
    let pool = Arc::new(ConnectionPool::new(registry.clone(), transport));

    let in_flight = {
        let pool = pool.clone();
        tokio::spawn(async move {
            pool.execute_all(
                &Operation::new("getUserViews"),
                &AggregationPolicy::merge_paged(),
            )
            .await
        })
    };

    // Drop alpha from the registry while its call is still pending.
    tokio::time::sleep(Duration::from_millis(20)).await;
    registry.remove(&ServerId::new("alpha"));

    let result = in_flight
        .await
        .expect("fan-out task must not panic")
        .expect("both snapshot servers succeeded");

    let items = result.payload.items().unwrap();
    assert_eq!(items.len(), 2, "Both snapshot outcomes should be aggregated despite the removal");
    assert_eq!(registry.len(), 1, "The registry itself saw the removal");
}
