// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Breadth-first maximum-descent search.
//!
//! Finds the run sequence from a start location that descends the most
//! kilometres within a time budget, capping back-to-back uses of a name.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::graph::ResortGraph;
use crate::types::Run;

use super::config::{PruneMode, SearchConfig, StreakPolicy};
use super::trail::Trail;

/// Remaining time is keyed in thousandths of a minute so that float
/// drift between equal sums does not split identical states.
const TIME_KEY_SCALE: f64 = 1000.0;

/// Request for route search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Location to start from.
    pub start: String,

    /// Time available, in minutes.
    pub time_budget_minutes: f64,

    /// Distance after which a route is good enough to stop extending.
    pub target_km: f64,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(start: impl Into<String>, time_budget_minutes: f64, target_km: f64) -> Self {
        Self {
            start: start.into(),
            time_budget_minutes,
            target_km,
        }
    }
}

/// Result of route search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Total descended distance of the best route.
    pub distance_km: f64,

    /// Time the best route takes.
    pub minutes_used: f64,

    /// Run names in traversal order.
    pub path: Vec<String>,

    /// Run indices in traversal order.
    #[serde(skip)]
    pub runs: Vec<EdgeIndex>,

    /// Number of states taken off the queue.
    pub states_visited: usize,

    /// True when the expansion cap stopped the search early.
    pub truncated: bool,
}

impl SearchOutcome {
    /// The zero-distance, empty-path outcome.
    pub fn empty() -> Self {
        Self {
            distance_km: 0.0,
            minutes_used: 0.0,
            path: Vec::new(),
            runs: Vec::new(),
            states_visited: 0,
            truncated: false,
        }
    }

    /// True when no run was taken.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the route reached `target_km`.
    pub fn meets(&self, target_km: f64) -> bool {
        self.distance_km >= target_km
    }
}

/// Queued search state.
struct Entry<'g> {
    node: NodeIndex,
    time_left: f64,
    distance: f64,
    trail: Trail,
    last_name: Option<&'g str>,
    streak: u32,
}

/// Dominance key. Two states with equal keys have the same future, so the
/// one reached with less distance can be dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum StateKey<'g> {
    Coarse(NodeIndex, i64),
    Exact(NodeIndex, i64, Option<&'g str>, u32),
}

/// Best route seen so far.
struct Best {
    distance: f64,
    time_left: f64,
    trail: Trail,
}

/// Route planner over a borrowed resort graph.
///
/// Each call to [`Planner::search`] owns its queue and dominance table, so
/// one planner can serve any number of independent searches.
pub struct Planner<'g> {
    graph: &'g ResortGraph,
    config: &'g SearchConfig,
}

impl<'g> Planner<'g> {
    /// Create a new planner.
    pub fn new(graph: &'g ResortGraph, config: &'g SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Find the longest-descent route for `request`.
    ///
    /// An empty graph, unknown start or non-positive budget yields
    /// [`SearchOutcome::empty`].
    pub fn search(&self, request: &SearchRequest) -> SearchOutcome {
        let budget = request.time_budget_minutes;
        let Some(start) = self.graph.node(&request.start) else {
            debug!(start = %request.start, "start location not in graph");
            return SearchOutcome::empty();
        };
        if !(budget > 0.0) {
            debug!(budget, "non-positive time budget");
            return SearchOutcome::empty();
        }

        debug!(
            start = %request.start,
            budget,
            target = request.target_km,
            prune = ?self.config.prune,
            policy = ?self.config.streak_policy,
            "starting route search"
        );

        let mut queue = VecDeque::new();
        queue.push_back(Entry {
            node: start,
            time_left: budget,
            distance: 0.0,
            trail: Trail::new(),
            last_name: None,
            streak: 0,
        });

        let mut visited: HashMap<StateKey<'g>, f64> = HashMap::new();
        let mut best = Best {
            distance: 0.0,
            time_left: budget,
            trail: Trail::new(),
        };
        let mut states_visited = 0usize;
        let mut truncated = false;

        while let Some(entry) = queue.pop_front() {
            if states_visited >= self.config.max_expansions {
                warn!(
                    cap = self.config.max_expansions,
                    queued = queue.len() + 1,
                    "expansion cap reached, returning best route so far"
                );
                truncated = true;
                break;
            }
            states_visited += 1;

            if entry.time_left < 0.0 {
                continue;
            }

            if entry.distance > best.distance {
                trace!(distance = entry.distance, runs = entry.trail.len(), "new best route");
                best = Best {
                    distance: entry.distance,
                    time_left: entry.time_left,
                    trail: entry.trail.clone(),
                };
            }

            let key = self.key(entry.node, entry.time_left, entry.last_name, entry.streak);
            if visited.get(&key).is_some_and(|&seen| seen >= entry.distance) {
                continue;
            }
            visited.insert(key, entry.distance);

            if entry.distance >= request.target_km {
                continue;
            }

            for &edge in self.graph.runs_from(entry.node) {
                let run = self.graph.run(edge);
                if run.minutes > entry.time_left {
                    continue;
                }
                let Some((last_name, streak)) = self.advance_streak(entry.last_name, entry.streak, run) else {
                    continue;
                };

                let node = self.graph.target(edge);
                let time_left = entry.time_left - run.minutes;
                let distance = entry.distance + run.distance_km;

                // Anything already dominated here would be dropped on dequeue.
                let child_key = self.key(node, time_left, last_name, streak);
                if visited.get(&child_key).is_some_and(|&seen| seen >= distance) {
                    continue;
                }

                queue.push_back(Entry {
                    node,
                    time_left,
                    distance,
                    trail: entry.trail.push(edge),
                    last_name,
                    streak,
                });
            }
        }

        let runs = best.trail.to_vec();
        let path = runs.iter().map(|&e| self.graph.run(e).name.clone()).collect();

        debug!(
            distance = best.distance,
            runs = runs.len(),
            states_visited,
            truncated,
            "route search finished"
        );

        SearchOutcome {
            distance_km: best.distance,
            minutes_used: budget - best.time_left,
            path,
            runs,
            states_visited,
            truncated,
        }
    }

    /// Streak state after taking `run`, or `None` if the cap forbids it.
    fn advance_streak(&self, last_name: Option<&'g str>, streak: u32, run: &'g Run) -> Option<(Option<&'g str>, u32)> {
        if self.config.streak_policy == StreakPolicy::LiftsOnly && !run.is_lift() {
            return Some((last_name, streak));
        }

        if last_name == Some(run.name.as_str()) {
            let next = streak + 1;
            (next <= self.config.max_streak).then_some((last_name, next))
        } else {
            Some((Some(run.name.as_str()), 1))
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn key(&self, node: NodeIndex, time_left: f64, last_name: Option<&'g str>, streak: u32) -> StateKey<'g> {
        match self.config.prune {
            PruneMode::Coarse => {
                let bucket = (time_left / self.config.bucket_minutes).floor() as i64;
                StateKey::Coarse(node, bucket)
            }
            PruneMode::Exact => {
                let ticks = (time_left * TIME_KEY_SCALE).round() as i64;
                StateKey::Exact(node, ticks, last_name, streak)
            }
        }
    }
}

/// Run a search with the default configuration.
///
/// Returns the best distance and the run names of the route. The default
/// uses exact pruning; for day-long budgets on a full resort pass
/// [`SearchConfig::coarse`] to [`Planner`] instead.
pub fn find_max_distance_route(
    graph: &ResortGraph,
    start: &str,
    time_budget_minutes: f64,
    target_km: f64,
) -> (f64, Vec<String>) {
    let config = SearchConfig::default();
    let outcome = Planner::new(graph, &config).search(&SearchRequest::new(start, time_budget_minutes, target_km));
    (outcome.distance_km, outcome.path)
}
