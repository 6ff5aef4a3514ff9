//! Benchmarks for placement and routing policies
//!
//! Run with: cargo bench -p alsvid-route

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use alsvid_device::{CouplingGraph, RoutingTable};
use alsvid_route::sequence::generate_sequence;
use alsvid_route::{BridgeRouter, CostModel, Mapping, Placer, RouteContext, RoutePolicy, SwapRouter};

/// Benchmark routing-table construction
fn bench_table_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_build");

    for n in &[5u32, 16, 32, 64] {
        let graph = CouplingGraph::ring(*n);
        group.bench_with_input(BenchmarkId::new("ring", n), &graph, |b, graph| {
            b.iter(|| RoutingTable::build(black_box(graph)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark initial placement
fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");

    for n in &[8u32, 16, 32] {
        let graph = CouplingGraph::ring(*n);
        let ops = generate_sequence(*n, 200, 42);
        group.bench_with_input(BenchmarkId::new("ring", n), &(*n), |b, _| {
            b.iter(|| Placer::default().place(black_box(&graph), black_box(&ops)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark full policy runs
fn bench_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_run");

    let graph = CouplingGraph::ring(16);
    let table = RoutingTable::build(&graph).unwrap();
    let cost = CostModel::default();
    let ctx = RouteContext::new(&graph, &table, &cost);
    let ops = generate_sequence(16, 500, 7);
    let placed = Placer::default().place(&graph, &ops).unwrap();

    group.bench_function("swap_500_ops", |b| {
        b.iter(|| {
            let mut mapping = placed.clone();
            SwapRouter.run(&ctx, &mut mapping, black_box(&ops)).unwrap()
        });
    });

    group.bench_function("bridge_500_ops", |b| {
        b.iter(|| {
            let mut mapping = placed.clone();
            BridgeRouter.run(&ctx, &mut mapping, black_box(&ops)).unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_table_build, bench_placement, bench_policies);

criterion_main!(benches);
