use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tombola::{pick_indices_with_rng, Collection};

fn bench_unique_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("unique_indices");

    let sizes = [1_000, 10_000, 100_000];

    // Dense requests land on the shuffle, which should stay linear in n.
    for &size in &sizes {
        let amount = size * 9 / 10;
        group.bench_function(format!("shuffle_n{}_k{}", size, amount), |b| {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            b.iter(|| {
                black_box(pick_indices_with_rng(
                    black_box(size),
                    black_box(amount),
                    true,
                    &mut rng,
                ));
            })
        });
    }

    // Sparse requests land on rejection sampling, which should not pay for n.
    for &size in &sizes {
        let amount = (size / 100).max(1);
        group.bench_function(format!("rejection_n{}_k{}", size, amount), |b| {
            let mut rng = ChaCha8Rng::seed_from_u64(2);
            b.iter(|| {
                black_box(pick_indices_with_rng(
                    black_box(size),
                    black_box(amount),
                    true,
                    &mut rng,
                ));
            })
        });
    }
    group.finish();
}

fn bench_replacement_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("replacement_indices");

    let sizes = [1_000, 10_000, 100_000];
    let k = 100;

    for &size in &sizes {
        group.bench_function(format!("n{}_k{}", size, k), |b| {
            let mut rng = ChaCha8Rng::seed_from_u64(3);
            b.iter(|| {
                black_box(pick_indices_with_rng(
                    black_box(size),
                    black_box(k),
                    false,
                    &mut rng,
                ));
            })
        });
    }
    group.finish();
}

fn bench_collection_draws(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection");

    let sizes = [1_000, 10_000];
    let k = 100;

    for &size in &sizes {
        let deck: Collection<u32, u32> = (0..size as u32).map(|i| (i, i.wrapping_mul(3))).collect();
        group.bench_function(format!("random_values_n{}_k{}", size, k), |b| {
            let mut rng = ChaCha8Rng::seed_from_u64(4);
            b.iter(|| {
                let drawn = deck
                    .random_values_with_rng(black_box(k), true, &mut rng)
                    .unwrap();
                black_box(drawn);
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_unique_indices,
    bench_replacement_indices,
    bench_collection_draws
);
criterion_main!(benches);
