// ABOUTME: Integration tests for the provider selection registry
// ABOUTME: One cached adapter per platform, unsupported platforms never cached, injected backends used
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use activity_monitor::errors::HealthError;
use activity_monitor::health::{
    global_registry, HealthProviderHandle, HealthProviderRegistry, HealthService, NativeBackends,
};
use activity_monitor::models::Platform;
use activity_providers::{
    HealthConnectClient, HealthKitClient, HealthProvider, InitializationOptions, ProviderKind,
};
use common::{authorized_health_kit, granted_health_connect, init_test_logging, utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn test_same_platform_resolves_to_identical_instance() {
    init_test_logging();
    let registry = HealthProviderRegistry::default();

    let first = registry.resolve(&Platform::Android).unwrap();
    let second = registry.resolve(&Platform::Android).unwrap();
    let third = registry.resolve(&Platform::from_identifier("ANDROID")).unwrap();

    assert!(first.same_instance(&second));
    assert!(first.same_instance(&third));
    assert!(matches!(first, HealthProviderHandle::HealthConnect(_)));
    assert_eq!(registry.constructed_count(), 1);
}

#[test]
fn test_platforms_map_to_their_adapters() {
    let registry = HealthProviderRegistry::default();

    assert_eq!(
        registry.resolve(&Platform::Ios).unwrap().kind(),
        ProviderKind::AppleHealth
    );
    assert_eq!(
        registry.resolve(&Platform::Android).unwrap().kind(),
        ProviderKind::HealthConnect
    );
}

#[test]
fn test_unsupported_platform_fails_even_after_successful_resolutions() {
    let registry = HealthProviderRegistry::default();
    registry.resolve(&Platform::Ios).unwrap();
    registry.resolve(&Platform::Android).unwrap();

    for _ in 0..3 {
        let err = registry
            .resolve(&Platform::from_identifier("web"))
            .unwrap_err();
        assert_eq!(
            err,
            HealthError::UnsupportedPlatform {
                platform: "web".to_owned()
            }
        );
        assert_eq!(err.to_string(), "Invalid platform for health service: web");
    }
    assert_eq!(registry.constructed_count(), 2);
}

#[test]
fn test_backend_constructors_run_once_per_platform() {
    let kit_builds = Arc::new(AtomicUsize::new(0));
    let connect_builds = Arc::new(AtomicUsize::new(0));
    let backends = {
        let kit_builds = Arc::clone(&kit_builds);
        let connect_builds = Arc::clone(&connect_builds);
        NativeBackends::new(
            move || {
                kit_builds.fetch_add(1, Ordering::SeqCst);
                Arc::new(authorized_health_kit()) as Arc<dyn HealthKitClient>
            },
            move || {
                connect_builds.fetch_add(1, Ordering::SeqCst);
                Arc::new(granted_health_connect()) as Arc<dyn HealthConnectClient>
            },
        )
    };
    let registry = Arc::new(HealthProviderRegistry::new(backends));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let platform = if i % 2 == 0 {
                    Platform::Ios
                } else {
                    Platform::Android
                };
                registry.resolve(&platform).unwrap()
            })
        })
        .collect();
    let resolved: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(kit_builds.load(Ordering::SeqCst), 1);
    assert_eq!(connect_builds.load(Ordering::SeqCst), 1);
    assert!(resolved[0].same_instance(&resolved[2]));
    assert!(resolved[1].same_instance(&resolved[3]));
    assert!(!resolved[0].same_instance(&resolved[1]));
}

#[tokio::test]
async fn test_resolved_adapter_uses_injected_backend() {
    let client = Arc::new(granted_health_connect());
    client.add_steps(utc(2001, 1, 1, 10, 0), 4_321).unwrap();
    let registry = HealthProviderRegistry::new(NativeBackends::from_clients(
        Arc::new(authorized_health_kit()),
        client.clone(),
    ));

    let service = HealthService::for_platform(&registry, &Platform::Android).unwrap();
    service
        .initialize(InitializationOptions::checking())
        .await
        .unwrap();
    let steps = service
        .provider()
        .get_steps(utc(2001, 1, 1, 0, 0), utc(2001, 1, 1, 23, 59))
        .await
        .unwrap();

    assert_eq!(steps, 4_321);
    assert_eq!(client.calls().queries, 1);
}

#[test]
fn test_global_registry_is_a_process_singleton() {
    let first = global_registry();
    let second = global_registry();
    assert!(Arc::ptr_eq(&first, &second));

    let a = first.resolve(&Platform::Ios).unwrap();
    let b = second.resolve(&Platform::Ios).unwrap();
    assert!(a.same_instance(&b));
}
