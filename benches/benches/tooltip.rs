// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use understory_tooltip::overlay::HeadlessSurface;
use understory_tooltip::owner::{ComponentTooltip, OwnerKind, OwnerTree, resolve};
use understory_tooltip::position::{AnchorPoint, Viewport, solve};
use understory_tooltip::router::TooltipEvent;
use understory_tooltip::{TooltipConfig, TooltipInfo, TooltipManager};

/// A chain of `depth` content-less components under one described root; the
/// leaf is bound to element 0.
fn chain(depth: usize) -> OwnerTree<u32> {
    let mut tree = OwnerTree::new();
    let mut parent = tree.insert(
        None,
        OwnerKind::Component(ComponentTooltip::with_description(TooltipInfo::new(
            "Root",
        ))),
    );
    for _ in 0..depth {
        parent = tree.insert(Some(parent), OwnerKind::Component(ComponentTooltip::new()));
    }
    tree.bind(0, parent);
    tree
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("tooltip/resolve");
    for depth in [1_usize, 16, 256] {
        let tree = chain(depth);
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &tree, |b, tree| {
            b.iter(|| black_box(resolve(tree, black_box(&0))));
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let viewport = Viewport::new(Size::new(1280.0, 720.0), Vec2::new(0.0, 2400.0));
    c.bench_function("tooltip/solve", |b| {
        b.iter(|| {
            solve(
                black_box(AnchorPoint::Pointer(Point::new(1270.0, 710.0))),
                black_box(Size::new(900.0, 20.0)),
                |w| Size::new(w, 40.0),
                &viewport,
                500.0,
                4.0,
            )
        });
    });
}

fn bench_hover_sweep(c: &mut Criterion) {
    // Pointer sweeping across a row of described buttons, one move per 16 ms frame.
    let mut tree = OwnerTree::new();
    for i in 0..64_u32 {
        let owner = tree.insert(
            None,
            OwnerKind::Component(ComponentTooltip::with_description(TooltipInfo::new(
                "Button",
            ))),
        );
        tree.bind(i, owner);
    }
    let moves: Vec<TooltipEvent<u32>> = (0..1_024_u32)
        .map(|i| TooltipEvent::PointerMove {
            target: i / 16,
            position: Point::new(f64::from(i), 20.0),
        })
        .collect();

    let mut group = c.benchmark_group("tooltip/hover_sweep");
    group.throughput(Throughput::Elements(moves.len() as u64));
    group.bench_function("manager", |b| {
        b.iter(|| {
            let mut manager =
                TooltipManager::new(TooltipConfig::default(), HeadlessSurface::default());
            for (frame, event) in (0_u64..).zip(&moves) {
                manager.handle_event(frame * 16, event, &tree);
            }
            black_box(manager.overlay().surface().show_count())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_solve, bench_hover_sweep);
criterion_main!(benches);
