//! Cost of a full shading rebuild, which runs after every toggle.
//!
//! ```sh
//! cargo bench -p twostars-core --bench shading
//! ```

use std::hint;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use twostars_core::{BoardLayout, Coord2, ToNdIndex, compute_shading, extract_regions};

const BOARD: [&str; 10] = [
    "AAAAAAAABB",
    "AAAAAACABB",
    "DEEEACCCBB",
    "DDDDFGGCBB",
    "DDDFFFGGBB",
    "DDHFFFGGBB",
    "DDHHHGGGIB",
    "DDDDDDGGIB",
    "DJJJJJJJII",
    "JJJJJJJJJI",
];

const STARS: [Coord2; 10] = [
    (0, 1),
    (0, 4),
    (1, 6),
    (1, 8),
    (2, 1),
    (2, 3),
    (3, 7),
    (3, 9),
    (4, 3),
    (4, 5),
];

fn bench_compute_shading(c: &mut Criterion) {
    let layout = BoardLayout::from_strs(&BOARD).unwrap();
    let regions = extract_regions(&layout);

    let mut group = c.benchmark_group("compute_shading");
    for placed in [0, 4, STARS.len()] {
        let mut stars = layout.empty_grid();
        for coords in &STARS[..placed] {
            stars[coords.to_nd_index()] = true;
        }
        group.bench_with_input(BenchmarkId::from_parameter(placed), &stars, |b, stars| {
            b.iter(|| compute_shading(hint::black_box(stars), hint::black_box(&regions)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_shading);
criterion_main!(benches);
