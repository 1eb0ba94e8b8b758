use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tf_contour::{TraceConfig, build_edge_set, trace_contours};
use tf_core::PixelGrid;

fn checker_rings(width: usize, height: usize) -> PixelGrid {
    let mut on = Vec::with_capacity(width * height / 2);
    for y in 0..height {
        for x in 0..width {
            // 8x8 rings with a 4x4 hole, plus diagonal speckle between them.
            let (cx, cy) = (x % 8, y % 8);
            let ring = !(2..6).contains(&cx) || !(2..6).contains(&cy);
            if (ring && (x / 8 + y / 8) % 2 == 0) || (x + y) % 7 == 0 {
                on.push((x, y));
            }
        }
    }
    PixelGrid::from_on_pixels(width, height, on).expect("valid grid")
}

fn bench_build_edge_set(c: &mut Criterion) {
    let grid = checker_rings(256, 256);

    c.bench_function("tf_contour_build_edge_set_256", |b| {
        b.iter(|| {
            let edges = build_edge_set(black_box(&grid));
            black_box(edges.len());
        });
    });
}

fn bench_trace(c: &mut Criterion) {
    let grid = checker_rings(256, 256);
    let edges = build_edge_set(&grid);
    let cfg = TraceConfig::default();

    c.bench_function("tf_contour_trace_256", |b| {
        b.iter(|| {
            let out = trace_contours(black_box(edges.clone()), black_box(&cfg));
            black_box(out.contours.len());
        });
    });
}

criterion_group!(benches, bench_build_edge_set, bench_trace);
criterion_main!(benches);
