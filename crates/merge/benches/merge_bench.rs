//! Benchmarks for the mirra-merge reconciliation engine.
//!
//! Target: merging a single point update into a tracked range < 1μs.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion,
};
use mirra_core::{Graph, Key, Node};
use mirra_merge::{merge, stamp_clock};

fn wide_range() -> Graph {
    Graph::from_sorted(vec![Node::range("a", "z", 0)]).unwrap()
}

/// A change graph of `count` points with distinct keys inside [k, l).
fn point_changes(count: usize) -> Graph {
    let nodes: Vec<Node> = (0..count)
        .map(|i| Node::value(format!("k{:04}", i), 1, i as i64))
        .collect();
    Graph::from_sorted(nodes).unwrap()
}

/// A graph of nested branches `depth` levels deep.
fn deep_branch(depth: usize) -> Graph {
    let mut graph = Graph::from_sorted(vec![Node::value("x", 0, 1i64)]).unwrap();
    for _ in 0..depth {
        graph = Graph::from_sorted(vec![Node::branch("b", 0, graph)]).unwrap();
    }
    graph
}

fn bench_point_into_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge/point_into_range");

    group.bench_function("single", |b| {
        b.iter_batched(
            || {
                (
                    wide_range(),
                    Graph::from_sorted(vec![Node::value("m", 1, 7i64)]).unwrap(),
                )
            },
            |(mut current, changes)| merge(&mut current, black_box(changes)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_many_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge/many_points");

    for size in [1, 10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("into_wide_range", size), &size, |b, &size| {
            b.iter_batched(
                || (wide_range(), point_changes(size)),
                |(mut current, changes)| merge(&mut current, black_box(changes)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_range_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge/range_refresh");

    // Refresh a span that has already been split into many fragments.
    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("over_fragments", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut current = wide_range();
                    merge(&mut current, point_changes(size));
                    let refresh =
                        Graph::from_sorted(vec![Node::range("a", "z", 2)]).unwrap();
                    (current, refresh)
                },
                |(mut current, changes)| merge(&mut current, black_box(changes)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_stamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("stamp");

    for depth in [1, 10, 100] {
        group.bench_with_input(BenchmarkId::new("deep_branch", depth), &depth, |b, &depth| {
            b.iter_batched(
                || deep_branch(depth),
                |mut graph| {
                    stamp_clock(&mut graph, black_box(9));
                    graph
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("fragmented", size), &size, |b, &size| {
            let mut current = wide_range();
            merge(&mut current, point_changes(size));
            let key = Key::from("k0000");
            b.iter(|| current.lookup(black_box(&key)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_point_into_range,
    bench_many_points,
    bench_range_refresh,
    bench_stamp,
    bench_lookup
);
criterion_main!(benches);
