// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use skiroute::prelude::*;

#[derive(Debug, Arbitrary)]
struct FuzzRun {
    from: u8,
    to: u8,
    lift: bool,
    tenths_km: u8,
    minutes: u8,
    name: u8,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    runs: Vec<FuzzRun>,
    budget: u8,
    target: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut graph = ResortGraph::new("fuzz");
    for run in input.runs.iter().take(16) {
        let name = format!("R{}", run.name % 4);
        let minutes = f64::from(run.minutes % 20 + 1);
        let run_value = if run.lift {
            Run::lift(name, minutes)
        } else {
            Run::descent(name, f64::from(run.tenths_km % 50 + 1) / 10.0, minutes, Grade::Red)
        };
        let from = format!("L{}", run.from % 6);
        let to = format!("L{}", run.to % 6);
        graph.add_location(&from, None);
        graph.add_location(&to, None);
        graph.add_run(&from, &to, run_value).unwrap();
    }

    let config = SearchConfig {
        max_expansions: 200_000,
        ..SearchConfig::default()
    };
    let budget = f64::from(input.budget);
    let outcome = Planner::new(&graph, &config).search(&SearchRequest::new("L0", budget, f64::from(input.target)));

    let used: f64 = outcome.runs.iter().map(|&e| graph.run(e).minutes).sum();
    assert!(used <= budget);
    assert_eq!(outcome.path.len(), outcome.runs.len());
});
