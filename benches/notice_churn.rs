// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for notice lifecycle throughput.
//!
//! Measures:
//! - Opening and expiring batches of notices through the headless overlay
//! - Replacing a notice by external id over and over

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::rc::Rc;
use std::time::Duration;

use aura_notify::notice::{
    HeadlessOverlay, ManualScheduler, NoticeManager, NoticeOptions, OverlayTiming,
};

fn stack() -> (NoticeManager, Rc<ManualScheduler>) {
    let scheduler = Rc::new(ManualScheduler::new());
    let overlay = HeadlessOverlay::new(scheduler.clone(), OverlayTiming::default());
    let manager = NoticeManager::new(overlay, scheduler.clone());
    (manager, scheduler)
}

/// Opens `n` notices and runs the clock until all of them are gone.
fn bench_open_and_expire(c: &mut Criterion) {
    let mut group = c.benchmark_group("notice_churn");

    for n in [10_u64, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("open_and_expire", n), &n, |b, &n| {
            b.iter(|| {
                let (manager, scheduler) = stack();
                for i in 0..n {
                    let delay = i64::try_from(100 + i % 50).unwrap_or(100);
                    manager.open(NoticeOptions::new("tick").auto_close_ms(delay));
                }
                scheduler.advance(Duration::from_secs(1));
                black_box(manager.is_empty());
            });
        });
    }

    group.finish();
}

/// Replaces a single external id repeatedly.
fn bench_replace_by_external_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("notice_churn");

    group.bench_function("replace_by_external_id", |b| {
        let (manager, _scheduler) = stack();
        b.iter(|| {
            black_box(manager.open(NoticeOptions::new("progress").external_id("job")));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_open_and_expire, bench_replace_by_external_id);
criterion_main!(benches);
