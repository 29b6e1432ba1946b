// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use std::time::Duration;
use understory_scroll_chain::{
    BoundedRegion, FlingScroller, PointerId, ScrollChain, ScrollConfig, ScrollDistributor,
    ScrollRegistry, TouchAction, TouchEvent,
};

fn registry(regions: usize, extent: i32) -> ScrollRegistry<BoundedRegion> {
    ScrollRegistry::from_regions((0..regions).map(|_| BoundedRegion::new(extent)))
}

fn bench_distribute(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_chain/distribute");

    // Worst case for spillover: one request that walks the whole chain and back.
    for regions in [2usize, 16, 128, 1_024] {
        let extent = 100;
        let total = i32::try_from(regions).unwrap_or(i32::MAX) * extent;
        group.throughput(Throughput::Elements(regions as u64));

        group.bench_with_input(
            BenchmarkId::new("full_sweep", regions),
            &regions,
            |b, &regions| {
                b.iter_batched(
                    || (registry(regions, extent), ScrollDistributor::new()),
                    |(mut registry, mut distributor)| {
                        black_box(distributor.distribute_to(&mut registry, total));
                        black_box(distributor.distribute_to(&mut registry, 0));
                    },
                    BatchSize::SmallInput,
                );
            },
        );

        // Typical drag frames: small deltas served by the cursor region.
        group.bench_with_input(
            BenchmarkId::new("drag_frames", regions),
            &regions,
            |b, &regions| {
                b.iter_batched(
                    || (registry(regions, extent), ScrollDistributor::new()),
                    |(mut registry, mut distributor)| {
                        for _ in 0..64 {
                            black_box(distributor.scroll_by(&mut registry, 7));
                        }
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_fling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_chain/fling");
    group.measurement_time(Duration::from_secs(3));

    let config = ScrollConfig::default();
    group.bench_function("construct", |b| {
        b.iter(|| black_box(FlingScroller::new(black_box(&config))));
    });

    for velocity in [500.0, 4_000.0, 8_000.0] {
        group.bench_with_input(
            BenchmarkId::new("ticks_to_rest", velocity),
            &velocity,
            |b, &velocity| {
                b.iter_batched(
                    || {
                        let mut scroller = FlingScroller::new(&config);
                        scroller.fling(0, velocity, 0);
                        scroller
                    },
                    |mut scroller| {
                        let mut now = 0;
                        while scroller.compute_offset(now) {
                            now += 16;
                        }
                        black_box(scroller.current());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_chain/gesture");

    // A full swipe: down, 32 moves, up, then the fling to rest.
    let mut events = vec![TouchEvent::single(
        TouchAction::Down,
        PointerId(0),
        Point::new(100.0, 900.0),
        0,
    )];
    for i in 1..=32_u32 {
        events.push(TouchEvent::single(
            TouchAction::Move,
            PointerId(0),
            Point::new(100.0, 900.0 - f64::from(i) * 20.0),
            u64::from(i) * 8,
        ));
    }
    events.push(TouchEvent::single(
        TouchAction::Up,
        PointerId(0),
        Point::new(100.0, 260.0),
        256,
    ));
    group.throughput(Throughput::Elements(events.len() as u64));

    group.bench_function("swipe_and_fling", |b| {
        b.iter_batched(
            || ScrollChain::new(registry(8, 2_000), ScrollConfig::default()),
            |mut chain| {
                for event in &events {
                    chain.handle(event);
                }
                let mut now = 256;
                while chain.compute_scroll(now) {
                    now += 16;
                }
                black_box(chain.scroll());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_distribute, bench_fling, bench_gesture);
criterion_main!(benches);
