// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Planner benchmarks on the built-in Les Arcs map

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use skiroute::prelude::*;
use skiroute::resort::les_arcs;
use skiroute::speeds::SpeedTable;

// =============================================================================
// Helpers
// =============================================================================

fn resort() -> ResortGraph {
    les_arcs().build(&SpeedTable::default()).unwrap()
}

// =============================================================================
// Search Benchmarks
// =============================================================================

fn bench_exact_search(c: &mut Criterion) {
    let graph = resort();
    let config = SearchConfig::default();
    let mut group = c.benchmark_group("exact_search");
    group.sample_size(20);

    for budget in [30.0, 60.0, 90.0] {
        group.bench_with_input(BenchmarkId::from_parameter(budget), &budget, |b, &budget| {
            let request = SearchRequest::new("Vallandry", budget, 1000.0);
            b.iter(|| Planner::new(&graph, &config).search(black_box(&request)));
        });
    }
    group.finish();
}

fn bench_coarse_search(c: &mut Criterion) {
    let graph = resort();
    let config = SearchConfig::coarse();
    let mut group = c.benchmark_group("coarse_search");

    for budget in [60.0, 240.0, 480.0] {
        group.bench_with_input(BenchmarkId::from_parameter(budget), &budget, |b, &budget| {
            let request = SearchRequest::new("Vallandry", budget, 100.0);
            b.iter(|| Planner::new(&graph, &config).search(black_box(&request)));
        });
    }
    group.finish();
}

fn bench_build_resort(c: &mut Criterion) {
    let spec = les_arcs();
    let speeds = SpeedTable::default();
    c.bench_function("build_les_arcs", |b| b.iter(|| spec.build(black_box(&speeds))));
}

criterion_group!(benches, bench_exact_search, bench_coarse_search, bench_build_resort);
criterion_main!(benches);
