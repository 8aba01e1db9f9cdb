// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_timing::TimerQueue;

fn bench_schedule_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing/schedule_cancel");

    // Tooltip-style churn: every timer is cancelled and replaced before it fires.
    for pending in [4_usize, 64, 1_024] {
        group.throughput(Throughput::Elements(pending as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pending), &pending, |b, &n| {
            let mut queue = TimerQueue::new();
            let mut ids: Vec<_> = (0..n as u64)
                .map(|i| queue.schedule(0, 1_000 + i, i))
                .collect();
            b.iter(|| {
                for (i, id) in ids.iter_mut().enumerate() {
                    let payload = queue.cancel(*id).unwrap_or(0);
                    *id = queue.schedule(i as u64, 750, payload);
                }
                black_box(queue.next_deadline())
            });
        });
    }
    group.finish();
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing/drain");
    for len in [64_usize, 1_024, 16_384] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &n| {
            b.iter(|| {
                let mut queue = TimerQueue::new();
                for i in 0..n as u64 {
                    // Interleave deadlines so insertion is not already sorted.
                    queue.schedule(0, (i * 7_919) % 10_000, i);
                }
                let mut fired = 0;
                while queue.pop_due(10_000).is_some() {
                    fired += 1;
                }
                black_box(fired)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_schedule_cancel, bench_drain);
criterion_main!(benches);
