use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dhondt::{allocate, Party};

fn vote_table(rows: usize) -> Vec<Party> {
    (0..rows)
        .map(|i| Party::new(format!("Party {}", i), ((i as i64 * 7919) % 100_000) + 1))
        .collect()
}

fn bench_allocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate");
    for &(rows, seats) in &[(5usize, 4i64), (20, 50), (50, 200)] {
        let parties = vote_table(rows);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", rows, seats)),
            &parties,
            |b, parties| b.iter(|| allocate(black_box(parties), black_box(seats))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_allocate);
criterion_main!(benches);
