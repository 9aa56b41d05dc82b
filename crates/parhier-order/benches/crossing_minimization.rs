use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use parhier_order::order::{AdjacencyLayer, OrderOptions, order};
use std::hint::black_box;
use std::time::Duration;

#[derive(Debug, Clone)]
struct LayerShape {
    columns: Vec<usize>,
    /// Ribbons per source category.
    fanout: usize,
}

impl LayerShape {
    fn build(&self) -> Vec<AdjacencyLayer<()>> {
        // Fixed LCG so every run sees the same arrangement.
        let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
        let mut next = |bound: usize| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as usize) % bound.max(1)
        };

        self.columns
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let (n, m) = (w[0], w[1]);
                let mut layer = AdjacencyLayer::new();
                for s in 0..n {
                    let row = layer.entry(format!("d{i}:{s}")).or_insert_with(Default::default);
                    for _ in 0..self.fanout {
                        row.insert(format!("d{}:{}", i + 1, next(m)), ());
                    }
                }
                layer
            })
            .collect()
    }
}

fn bench_crossing_minimization(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossing_minimization");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("dims3_cats10_f2", vec![10usize, 10, 10], 2usize),
        ("dims5_cats30_f3", vec![30usize, 30, 30, 30, 30], 3usize),
        ("dims4_cats80_f3", vec![80usize, 60, 80, 60], 3usize),
    ];

    for (name, columns, fanout) in cases {
        let layers = LayerShape { columns, fanout }.build();
        for greedy in [false, true] {
            let id = if greedy { "order+greedy" } else { "order" };
            group.bench_with_input(BenchmarkId::new(id, name), &layers, |b, layers| {
                b.iter(|| {
                    let result = order(
                        black_box(layers),
                        &OrderOptions {
                            greedy,
                            ..Default::default()
                        },
                    );
                    black_box(result.crossings);
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_crossing_minimization);
criterion_main!(benches);
