// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Plan command - finds the longest-descent route and prints it

use crate::config::Config;
use crate::planner::{Planner, PruneMode, SearchConfig, SearchOutcome, SearchRequest, StreakPolicy};
use crate::report::Itinerary;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

/// Command-line overrides for a plan
#[derive(Debug, Clone, Default)]
pub struct PlanArgs {
    /// Start location
    pub start: Option<String>,
    /// Time budget in minutes
    pub budget: Option<f64>,
    /// Target distance in km
    pub target: Option<f64>,
    /// Pruning key
    pub prune: Option<PruneMode>,
    /// Streak counting rule
    pub policy: Option<StreakPolicy>,
    /// Consecutive-use cap
    pub max_streak: Option<u32>,
    /// Segment size for the printed breakdown
    pub segment_km: Option<f64>,
}

#[derive(Serialize)]
struct PlanReport<'a> {
    resort: &'a str,
    start: &'a str,
    time_budget_minutes: f64,
    target_km: f64,
    outcome: &'a SearchOutcome,
    itinerary: &'a Itinerary,
}

/// Run the plan command
pub fn run(config: &Config, args: PlanArgs, json: bool, color: bool) -> Result<()> {
    let graph = config.resort()?;

    let request = SearchRequest::new(
        args.start.unwrap_or_else(|| config.plan.start.clone()),
        args.budget.unwrap_or(config.plan.time_budget_minutes),
        args.target.unwrap_or(config.plan.target_km),
    );
    let search_config = SearchConfig {
        prune: args.prune.unwrap_or(config.search.prune),
        streak_policy: args.policy.unwrap_or(config.search.streak_policy),
        max_streak: args.max_streak.unwrap_or(config.search.max_streak),
        ..config.search.clone()
    };
    let segment_km = args.segment_km.unwrap_or(config.report.segment_km);

    if graph.node(&request.start).is_none() {
        warn!("Start location {:?} is not in {}", request.start, graph.name);
    }

    info!(
        "Planning from {} with {} min, target {} km",
        request.start, request.time_budget_minutes, request.target_km
    );
    let outcome = Planner::new(&graph, &search_config).search(&request);
    if outcome.truncated {
        warn!(
            "Search stopped after {} states; the route may not be the best possible",
            outcome.states_visited
        );
    }

    let itinerary = Itinerary::walk(&graph, &request.start, outcome.distance_km, &outcome.path, segment_km);

    if json {
        let report = PlanReport {
            resort: &graph.name,
            start: &request.start,
            time_budget_minutes: request.time_budget_minutes,
            target_km: request.target_km,
            outcome: &outcome,
            itinerary: &itinerary,
        };
        let text = serde_json::to_string_pretty(&report).context("Failed to serialize plan")?;
        println!("{text}");
        return Ok(());
    }

    print!("{}", itinerary.render(color));
    if !outcome.is_empty() {
        println!();
        println!(
            "{} runs, {:.1} of {} min used{}",
            outcome.path.len(),
            outcome.minutes_used,
            request.time_budget_minutes,
            if outcome.meets(request.target_km) { "" } else { " (target not reached)" }
        );
    }
    Ok(())
}
