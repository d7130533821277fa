use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use referral_graph::{LinearAdoptionCurve, ReferralGraph};

/// Wide, shallow forest: user i is referred by user (i - 1) / 4
fn build_forest(size: usize) -> ReferralGraph {
    let mut graph = ReferralGraph::with_capacity(size);
    for i in 1..size {
        let _ = graph.add_referral(format!("user{}", (i - 1) / 4), format!("user{}", i));
    }
    graph
}

/// Benchmark referral insertion, including the cycle check
fn bench_add_referral(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_referral");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| criterion::black_box(build_forest(size)));
        });
    }
    group.finish();
}

/// Benchmark single-user reach against the bulk pass
fn bench_reach(c: &mut Criterion) {
    let mut group = c.benchmark_group("reach");

    for size in [1000, 10_000, 100_000].iter() {
        let graph = build_forest(*size);

        group.bench_with_input(BenchmarkId::new("root", size), size, |b, _| {
            b.iter(|| criterion::black_box(graph.calculate_network_reach("user0")));
        });
        group.bench_with_input(BenchmarkId::new("all_users", size), size, |b, _| {
            b.iter(|| criterion::black_box(graph.all_network_reaches().len()));
        });
    }
    group.finish();
}

/// Benchmark the full dashboard statistics
fn bench_network_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_stats");
    group.sample_size(20);

    for size in [1000, 10_000, 100_000].iter() {
        let graph = build_forest(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| criterion::black_box(graph.get_network_stats()));
        });
    }
    group.finish();
}

/// Benchmark growth projection and minimum-bonus search
fn bench_bonus_search(c: &mut Criterion) {
    let graph = build_forest(10_000);
    let curve = LinearAdoptionCurve::default();

    c.bench_function("simulate_60_days", |b| {
        b.iter(|| criterion::black_box(graph.simulate(0.35, 60)));
    });
    c.bench_function("min_bonus_for_target", |b| {
        b.iter(|| criterion::black_box(graph.min_bonus_for_target(60, 500_000, &curve)));
    });
}

criterion_group!(
    benches,
    bench_add_referral,
    bench_reach,
    bench_network_stats,
    bench_bonus_search
);
criterion_main!(benches);
