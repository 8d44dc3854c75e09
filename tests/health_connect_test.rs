// ABOUTME: Integration tests for the Health Connect adapter over the synthetic client
// ABOUTME: Request-vs-check negotiation, aggregate steps and minutes, start-up and read failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use activity_monitor::constants::health_connect::{
    EXERCISE_SESSION_RECORD_TYPE, STEPS_RECORD_TYPE,
};
use activity_monitor::errors::HealthError;
use activity_providers::spi::{AccessType, Permission};
use activity_providers::{
    HealthConnectProvider, HealthProvider, InitializationOptions, SyntheticHealthConnect,
};
use chrono::Duration;
use common::{granted_health_connect, init_test_logging, utc};
use std::sync::Arc;

fn adapter(client: &Arc<SyntheticHealthConnect>) -> HealthConnectProvider {
    HealthConnectProvider::new(client.clone())
}

#[test]
fn test_adapter_requires_read_access_to_both_record_types() {
    let provider = adapter(&Arc::new(SyntheticHealthConnect::new()));
    let permissions = provider.permissions();

    assert_eq!(permissions.len(), 2);
    assert!(permissions.iter().all(|p| p.access_type == AccessType::Read));
    assert!(permissions.contains(&Permission::read(STEPS_RECORD_TYPE)));
    assert!(permissions.contains(&Permission::read(EXERCISE_SESSION_RECORD_TYPE)));
}

#[tokio::test]
async fn test_request_prompts_once_and_succeeds() {
    init_test_logging();
    let client = Arc::new(SyntheticHealthConnect::new());

    adapter(&client)
        .initialize(InitializationOptions::requesting())
        .await
        .unwrap();

    let calls = client.calls();
    assert_eq!(calls.initialize, 1);
    assert_eq!(calls.request_permissions, 1);
    assert_eq!(calls.check_permissions, 0);
}

#[tokio::test]
async fn test_check_reads_granted_permissions_without_prompting() {
    let client = Arc::new(granted_health_connect());

    adapter(&client)
        .initialize(InitializationOptions::checking())
        .await
        .unwrap();

    let calls = client.calls();
    assert_eq!(calls.request_permissions, 0);
    assert_eq!(calls.check_permissions, 1);
}

#[tokio::test]
async fn test_initialize_rechecks_every_time() {
    let client = Arc::new(granted_health_connect());
    let provider = adapter(&client);

    for _ in 0..3 {
        provider
            .initialize(InitializationOptions::checking())
            .await
            .unwrap();
    }

    assert_eq!(client.calls().initialize, 3);
    assert_eq!(client.calls().check_permissions, 3);
}

#[tokio::test]
async fn test_client_that_does_not_start_fails_initialization() {
    let client = Arc::new(granted_health_connect());
    client.set_available(false).unwrap();

    let err = adapter(&client)
        .initialize(InitializationOptions::requesting())
        .await
        .unwrap_err();

    assert!(matches!(err, HealthError::InitializationFailed { .. }));
    assert!(err.to_string().starts_with("Error initializing HealthConnect Service"));
    assert_eq!(client.calls().request_permissions, 0);
}

#[tokio::test]
async fn test_missing_scope_is_permission_denied() {
    let client = Arc::new(SyntheticHealthConnect::granted(&[STEPS_RECORD_TYPE]));

    let err = adapter(&client)
        .initialize(InitializationOptions::checking())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        HealthError::PermissionDenied {
            provider: "HealthConnect".to_owned(),
            missing: vec![EXERCISE_SESSION_RECORD_TYPE.to_owned()],
        }
    );
    assert_eq!(
        err.to_string(),
        "Error getting permissions for HealthConnect Service"
    );
}

#[tokio::test]
async fn test_declined_prompt_is_permission_denied() {
    let client = Arc::new(SyntheticHealthConnect::new());
    client.set_grant_on_request(false).unwrap();

    let err = adapter(&client)
        .initialize(InitializationOptions::requesting())
        .await
        .unwrap_err();

    assert!(matches!(err, HealthError::PermissionDenied { ref missing, .. } if missing.len() == 2));
}

#[tokio::test]
async fn test_failed_permission_call_keeps_native_details() {
    let client = Arc::new(SyntheticHealthConnect::new());
    client
        .set_permission_failure(Some("RemoteException: service died"))
        .unwrap();
    let provider = adapter(&client);

    for options in [
        InitializationOptions::requesting(),
        InitializationOptions::checking(),
    ] {
        let err = provider.initialize(options).await.unwrap_err();
        assert_eq!(
            err,
            HealthError::InitializationFailed {
                provider: "HealthConnect".to_owned(),
                details: "RemoteException: service died".to_owned(),
            }
        );
        assert!(err.is_permission_error());
    }
}

#[tokio::test]
async fn test_aggregates_steps_and_rounds_exercise_minutes() {
    let client = Arc::new(granted_health_connect());
    client.add_steps(utc(2001, 1, 1, 9, 0), 700).unwrap();
    client.add_steps(utc(2001, 1, 1, 17, 0), 300).unwrap();
    let session_start = utc(2001, 1, 1, 6, 0);
    client
        .add_exercise_session(session_start, session_start + Duration::seconds(3_600))
        .unwrap();
    client
        .add_exercise_session(
            utc(2001, 1, 1, 19, 0),
            utc(2001, 1, 1, 19, 0) + Duration::seconds(89),
        )
        .unwrap();
    let provider = adapter(&client);

    let start = utc(2001, 1, 1, 0, 0);
    let end = utc(2001, 1, 1, 23, 59);
    assert_eq!(provider.get_steps(start, end).await.unwrap(), 1_000);
    // 3689 s = 61.48 min
    assert_eq!(provider.get_activity_minutes(start, end).await.unwrap(), 61);
}

#[tokio::test]
async fn test_sessions_are_clipped_to_the_range() {
    let client = Arc::new(granted_health_connect());
    client
        .add_exercise_session(utc(2000, 12, 31, 23, 30), utc(2001, 1, 1, 0, 30))
        .unwrap();

    let minutes = adapter(&client)
        .get_activity_minutes(utc(2001, 1, 1, 0, 0), utc(2001, 1, 1, 23, 59))
        .await
        .unwrap();

    assert_eq!(minutes, 30);
}

#[tokio::test]
async fn test_read_failure_fails_outward() {
    let client = Arc::new(granted_health_connect());
    client.set_query_failure(Some("remote exception")).unwrap();

    let err = adapter(&client)
        .get_steps(utc(2001, 1, 1, 0, 0), utc(2001, 1, 1, 23, 59))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        HealthError::QueryFailed {
            provider: "HealthConnect".to_owned(),
            query: STEPS_RECORD_TYPE.to_owned(),
            details: "remote exception".to_owned(),
        }
    );
}

#[tokio::test]
async fn test_reading_without_grant_fails() {
    let client = Arc::new(SyntheticHealthConnect::new());

    let err = adapter(&client)
        .get_activity_minutes(utc(2001, 1, 1, 0, 0), utc(2001, 1, 1, 23, 59))
        .await
        .unwrap_err();

    assert!(matches!(err, HealthError::QueryFailed { .. }));
}
