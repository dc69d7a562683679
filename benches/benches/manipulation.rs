// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Vec2};
use understory_manipulation::{GestureEvent, ManipulationControl, Modifiers};

/// A pinch-and-rotate stream: `ticks` deltas circling the view center, then a release.
fn pinch_stream(ticks: usize) -> Vec<GestureEvent> {
    let mut events: Vec<GestureEvent> = (0..ticks)
        .map(|i| {
            let t = i as f64 * 0.05;
            GestureEvent::Delta {
                position: Point::new(400.0 + 40.0 * t.cos(), 300.0 + 40.0 * t.sin()),
                rotation_degrees: 0.5,
                scale: if i % 2 == 0 { 1.01 } else { 0.995 },
                translation: Vec2::new(0.75, -0.25),
            }
        })
        .collect();
    events.push(GestureEvent::Completed);
    events
}

fn bench_continuous(c: &mut Criterion) {
    let mut group = c.benchmark_group("manipulation/continuous");

    for ticks in [16usize, 256, 4_096] {
        let events = pinch_stream(ticks);
        group.throughput(Throughput::Elements(events.len() as u64));

        group.bench_with_input(BenchmarkId::new("pinch_rotate", ticks), &events, |b, events| {
            b.iter_batched(
                ManipulationControl::default,
                |mut control| {
                    for event in events {
                        black_box(control.handle(*event));
                    }
                    black_box(control.render_transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_wheel(c: &mut Criterion) {
    let mut group = c.benchmark_group("manipulation/wheel");

    // Alternating directions keep every step inside the default zoom limits.
    for steps in [64usize, 1_024] {
        let events: Vec<GestureEvent> = (0..steps)
            .map(|i| GestureEvent::Wheel {
                position: Point::new(120.0, 80.0),
                delta: if i % 2 == 0 { 120.0 } else { -120.0 },
                modifiers: if i % 4 < 2 {
                    Modifiers::CTRL
                } else {
                    Modifiers::CTRL | Modifiers::SHIFT
                },
            })
            .collect();
        group.throughput(Throughput::Elements(steps as u64));

        group.bench_with_input(BenchmarkId::new("zoom_rotate", steps), &events, |b, events| {
            b.iter_batched(
                ManipulationControl::default,
                |mut control| {
                    for event in events {
                        black_box(control.handle(*event));
                    }
                    black_box(control.render_transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_continuous, bench_wheel);
criterion_main!(benches);
