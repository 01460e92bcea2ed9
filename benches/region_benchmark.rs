//! Region benchmark: Measure clip region subtraction.
//!
//! Target: < 50µs to clip a rect against 100 occluders

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gadgetry::layout::region::{subtract, visible_rects};
use gadgetry::{ClipRegion, Rect};

/// A scatter of overlapping rectangles across a 200×50 area.
fn occluders(count: i32) -> Vec<Rect> {
    (0..count)
        .map(|i| Rect::new((i * 37) % 180, (i * 11) % 40, 8 + i % 13, 3 + i % 7))
        .collect()
}

fn subtract_single(c: &mut Criterion) {
    let rect = Rect::new(0, 0, 200, 50);
    let hole = Rect::new(50, 10, 20, 10);
    c.bench_function("subtract_single_hole", |b| {
        b.iter(|| subtract(black_box(rect), black_box(hole)));
    });
}

fn visible_against_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("visible_rects");
    let rect = Rect::new(0, 0, 200, 50);
    for count in [10, 50, 100] {
        let above = occluders(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &above, |b, above| {
            b.iter(|| visible_rects(black_box(rect), black_box(above)));
        });
    }
    group.finish();
}

fn region_intersect(c: &mut Criterion) {
    let mut region = ClipRegion::from_rect(Rect::new(0, 0, 200, 50));
    for hole in occluders(50) {
        region.subtract(hole);
    }
    c.bench_function("region_intersect_50", |b| {
        b.iter(|| {
            let mut copy = region.clone();
            copy.intersect(black_box(Rect::new(40, 10, 100, 30)));
            copy
        });
    });
}

criterion_group!(benches, subtract_single, visible_against_many, region_intersect);
criterion_main!(benches);
