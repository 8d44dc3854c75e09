// ABOUTME: Provider selection factory caching one adapter per platform for the process lifetime
// ABOUTME: Maps the runtime platform to the HealthKit or Health Connect adapter, built lazily once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Provider Registry
//!
//! `resolve(platform)` returns the adapter for a platform:
//!
//! - `ios` → [`AppleHealthProvider`]
//! - `android` → [`HealthConnectProvider`]
//! - anything else → `HealthError::UnsupportedPlatform`, nothing cached
//!
//! Each adapter is constructed on the first successful resolution for its
//! platform and reused for every later one. The cache is never invalidated.
//!
//! Native SDK bridges are injected through [`NativeBackends`]; the registry
//! itself never decides which bridge a platform uses.

use activity_core::constants::demo;
use activity_core::errors::{HealthError, HealthResult};
use activity_core::models::Platform;
use activity_providers::synthetic::seed_demo_week;
use activity_providers::{
    AppleHealthProvider, HealthConnectClient, HealthConnectProvider, HealthKitClient,
    HealthProvider, InitializationOptions, ProviderKind, SyntheticHealthConnect,
    SyntheticHealthKit,
};
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

/// Constructor for a HealthKit bridge
pub type HealthKitFactoryFn = Box<dyn Fn() -> Arc<dyn HealthKitClient> + Send + Sync>;

/// Constructor for a Health Connect bridge
pub type HealthConnectFactoryFn = Box<dyn Fn() -> Arc<dyn HealthConnectClient> + Send + Sync>;

/// Native SDK bridges handed to adapters when they are first built
pub struct NativeBackends {
    health_kit: HealthKitFactoryFn,
    health_connect: HealthConnectFactoryFn,
}

impl NativeBackends {
    /// Backends built by the given constructors
    pub fn new<K, C>(health_kit: K, health_connect: C) -> Self
    where
        K: Fn() -> Arc<dyn HealthKitClient> + Send + Sync + 'static,
        C: Fn() -> Arc<dyn HealthConnectClient> + Send + Sync + 'static,
    {
        Self {
            health_kit: Box::new(health_kit),
            health_connect: Box::new(health_connect),
        }
    }

    /// Backends sharing existing bridge instances
    #[must_use]
    pub fn from_clients(
        health_kit: Arc<dyn HealthKitClient>,
        health_connect: Arc<dyn HealthConnectClient>,
    ) -> Self {
        Self::new(move || Arc::clone(&health_kit), move || Arc::clone(&health_connect))
    }

    /// In-memory bridges holding a week of demo data ending today (local time)
    #[must_use]
    pub fn synthetic(seed: u64) -> Self {
        Self::new(
            move || {
                let kit = SyntheticHealthKit::new();
                let data = seed_demo_week(Local::now().date_naive(), &Local, seed);
                if let Err(e) = kit.load_demo(&data) {
                    warn!(error = %e, "Failed to load HealthKit demo data");
                }
                Arc::new(kit)
            },
            move || {
                let connect = SyntheticHealthConnect::new();
                let data = seed_demo_week(Local::now().date_naive(), &Local, seed);
                if let Err(e) = connect.load_demo(&data) {
                    warn!(error = %e, "Failed to load Health Connect demo data");
                }
                Arc::new(connect)
            },
        )
    }
}

impl Default for NativeBackends {
    fn default() -> Self {
        Self::synthetic(demo::DEFAULT_SEED)
    }
}

impl fmt::Debug for NativeBackends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeBackends").finish_non_exhaustive()
    }
}

/// The adapter resolved for a platform
///
/// A closed set of variants; cloning shares the cached instance.
#[derive(Clone)]
pub enum HealthProviderHandle {
    /// HealthKit adapter
    AppleHealth(Arc<AppleHealthProvider>),
    /// Health Connect adapter
    HealthConnect(Arc<HealthConnectProvider>),
}

impl HealthProviderHandle {
    /// Whether both handles point at the same adapter instance
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AppleHealth(a), Self::AppleHealth(b)) => Arc::ptr_eq(a, b),
            (Self::HealthConnect(a), Self::HealthConnect(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn provider(&self) -> &dyn HealthProvider {
        match self {
            Self::AppleHealth(provider) => provider.as_ref(),
            Self::HealthConnect(provider) => provider.as_ref(),
        }
    }
}

impl fmt::Debug for HealthProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HealthProviderHandle")
            .field(&self.provider().kind())
            .finish()
    }
}

#[async_trait]
impl HealthProvider for HealthProviderHandle {
    fn kind(&self) -> ProviderKind {
        self.provider().kind()
    }

    async fn initialize(&self, options: InitializationOptions) -> HealthResult<()> {
        self.provider().initialize(options).await
    }

    async fn get_steps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> HealthResult<u64> {
        self.provider().get_steps(start, end).await
    }

    async fn get_activity_minutes(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> HealthResult<u64> {
        self.provider().get_activity_minutes(start, end).await
    }
}

/// Lazily built, never evicted adapter cache keyed by platform
pub struct HealthProviderRegistry {
    backends: NativeBackends,
    apple_health: OnceLock<Arc<AppleHealthProvider>>,
    health_connect: OnceLock<Arc<HealthConnectProvider>>,
    constructions: AtomicUsize,
}

impl HealthProviderRegistry {
    /// Empty registry over the given native bridges
    #[must_use]
    pub fn new(backends: NativeBackends) -> Self {
        Self {
            backends,
            apple_health: OnceLock::new(),
            health_connect: OnceLock::new(),
            constructions: AtomicUsize::new(0),
        }
    }

    /// Adapter for `platform`, constructing it on first use
    ///
    /// # Errors
    ///
    /// Returns `HealthError::UnsupportedPlatform` for platforms other than
    /// iOS and Android. Nothing is cached in that case.
    pub fn resolve(&self, platform: &Platform) -> HealthResult<HealthProviderHandle> {
        match platform {
            Platform::Ios => {
                let provider = self.apple_health.get_or_init(|| {
                    self.record_construction(ProviderKind::AppleHealth);
                    Arc::new(AppleHealthProvider::new((self.backends.health_kit)()))
                });
                Ok(HealthProviderHandle::AppleHealth(Arc::clone(provider)))
            }
            Platform::Android => {
                let provider = self.health_connect.get_or_init(|| {
                    self.record_construction(ProviderKind::HealthConnect);
                    Arc::new(HealthConnectProvider::new((self.backends.health_connect)()))
                });
                Ok(HealthProviderHandle::HealthConnect(Arc::clone(provider)))
            }
            Platform::Other(name) => {
                warn!(platform = %name, "No health provider for platform");
                Err(HealthError::UnsupportedPlatform {
                    platform: name.clone(),
                })
            }
        }
    }

    /// Number of adapters constructed so far
    #[must_use]
    pub fn constructed_count(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    fn record_construction(&self, kind: ProviderKind) {
        self.constructions.fetch_add(1, Ordering::SeqCst);
        info!(provider = kind.name(), "Constructing health provider");
    }
}

impl fmt::Debug for HealthProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthProviderRegistry")
            .field("apple_health_built", &self.apple_health.get().is_some())
            .field("health_connect_built", &self.health_connect.get().is_some())
            .field("constructions", &self.constructed_count())
            .finish_non_exhaustive()
    }
}

impl Default for HealthProviderRegistry {
    fn default() -> Self {
        Self::new(NativeBackends::default())
    }
}

/// Global provider registry instance (singleton)
///
/// For test isolation, prefer local `HealthProviderRegistry::new()` instances.
static REGISTRY: OnceLock<Arc<HealthProviderRegistry>> = OnceLock::new();

/// Install the process-wide registry with specific native bridges
///
/// Returns `false` when the global registry was already initialized, in which
/// case `backends` is dropped.
pub fn install_global_registry(backends: NativeBackends) -> bool {
    REGISTRY
        .set(Arc::new(HealthProviderRegistry::new(backends)))
        .is_ok()
}

/// Get the global provider registry
///
/// Falls back to synthetic bridges seeded with the default demo seed when
/// nothing was installed.
#[must_use]
pub fn global_registry() -> Arc<HealthProviderRegistry> {
    REGISTRY
        .get_or_init(|| Arc::new(HealthProviderRegistry::default()))
        .clone() // Safe: Arc clone for registry access
}
