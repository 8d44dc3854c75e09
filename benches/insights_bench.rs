// ABOUTME: Criterion benchmarks for daily and weekly insight aggregation
// ABOUTME: Measures concurrent per-day fan-out over the synthetic HealthKit and Health Connect stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for insight aggregation.
//!
//! Each adapter is backed by a synthetic store seeded with a demo week, so the
//! numbers reflect adapter and fan-out overhead rather than native latency.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use activity_monitor::constants::health_connect::{
    EXERCISE_SESSION_RECORD_TYPE, STEPS_RECORD_TYPE,
};
use activity_monitor::constants::health_kit::{STEP_COUNT_PERMISSION, WORKOUT_PERMISSION};
use activity_monitor::dates::date_range;
use activity_monitor::health::{daily_insights, weekly_insights};
use activity_providers::{
    seed_demo_week, AppleHealthProvider, HealthConnectProvider, HealthProvider,
    InitializationOptions, SyntheticHealthConnect, SyntheticHealthKit,
};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use tokio::runtime::Runtime;

const SEED: u64 = 7;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2001, 1, 31).unwrap()
}

fn providers(rt: &Runtime) -> Vec<(&'static str, Arc<dyn HealthProvider>)> {
    let demo = seed_demo_week(today(), &Utc, SEED);

    let health_kit = Arc::new(SyntheticHealthKit::authorized(&[
        STEP_COUNT_PERMISSION,
        WORKOUT_PERMISSION,
    ]));
    health_kit.load_demo(&demo).unwrap();
    let health_connect = Arc::new(SyntheticHealthConnect::granted(&[
        STEPS_RECORD_TYPE,
        EXERCISE_SESSION_RECORD_TYPE,
    ]));
    health_connect.load_demo(&demo).unwrap();

    let providers: Vec<(&'static str, Arc<dyn HealthProvider>)> = vec![
        ("apple_health", Arc::new(AppleHealthProvider::new(health_kit))),
        (
            "health_connect",
            Arc::new(HealthConnectProvider::new(health_connect)),
        ),
    ];
    rt.block_on(async {
        for (_, provider) in &providers {
            provider
                .initialize(InitializationOptions::checking())
                .await
                .unwrap();
        }
    });
    providers
}

fn bench_daily_insights(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("daily_insights");

    for (name, provider) in providers(&rt) {
        group.bench_function(name, |b| {
            b.iter(|| {
                rt.block_on(async {
                    daily_insights(provider.as_ref(), black_box(today()), &Utc)
                        .await
                        .unwrap()
                })
            });
        });
    }

    group.finish();
}

fn bench_weekly_insights(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("weekly_insights");
    let end = Utc.from_utc_datetime(&today().and_hms_opt(23, 0, 0).unwrap());

    for (name, provider) in providers(&rt) {
        for span in [7_i64, 30] {
            let start = end - Duration::days(span - 1);
            group.bench_with_input(BenchmarkId::new(name, span), &start, |b, start| {
                b.iter(|| {
                    rt.block_on(async {
                        weekly_insights(provider.as_ref(), black_box(*start), end)
                            .await
                            .unwrap()
                    })
                });
            });
        }
    }

    group.finish();
}

fn bench_date_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("date_range");

    for span in [7_i64, 365] {
        let start = today() - Duration::days(span - 1);
        group.bench_with_input(BenchmarkId::from_parameter(span), &start, |b, start| {
            b.iter(|| date_range(black_box(*start), today()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_daily_insights,
    bench_weekly_insights,
    bench_date_range
);
criterion_main!(benches);
