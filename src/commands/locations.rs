// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Locations command - lists the resort by row with outgoing runs

use crate::config::Config;
use crate::types::RunKind;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Serialize)]
struct RunEntry<'a> {
    name: &'a str,
    to: &'a str,
    distance_km: f64,
    minutes: f64,
    kind: RunKind,
}

#[derive(Serialize)]
struct LocationEntry<'a> {
    name: &'a str,
    row: Option<usize>,
    runs: Vec<RunEntry<'a>>,
}

/// Run the locations command
pub fn run(config: &Config, json: bool, color: bool) -> Result<()> {
    let graph = config.resort()?;

    let entries: Vec<LocationEntry<'_>> = graph
        .rows()
        .into_iter()
        .flatten()
        .map(|idx| {
            let loc = graph.location(idx);
            let runs = graph
                .runs_from(idx)
                .iter()
                .map(|&e| {
                    let run = graph.run(e);
                    RunEntry {
                        name: &run.name,
                        to: &graph.location(graph.target(e)).name,
                        distance_km: run.distance_km,
                        minutes: run.minutes,
                        kind: run.kind,
                    }
                })
                .collect();
            LocationEntry {
                name: &loc.name,
                row: loc.row,
                runs,
            }
        })
        .collect();

    if json {
        let text = serde_json::to_string_pretty(&entries).context("Failed to serialize locations")?;
        println!("{text}");
        return Ok(());
    }

    println!("{} ({} locations, {} runs)", graph.name, graph.node_count(), graph.edge_count());
    for entry in &entries {
        println!();
        if color {
            println!("{}", entry.name.bold());
        } else {
            println!("{}", entry.name);
        }
        if entry.runs.is_empty() {
            println!("  (no outgoing runs)");
        }
        for run in &entry.runs {
            let kind = match run.kind {
                RunKind::Lift => "lift".to_string(),
                RunKind::Descent(grade) => format!("{grade} {} km", run.distance_km),
            };
            println!("  {} -> {} [{kind}, {} min]", run.name, run.to, run.minutes);
        }
    }
    Ok(())
}
