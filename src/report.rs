// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Itinerary reporting - breaks a route into readable segments

use crate::graph::ResortGraph;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::{self, Write as _};

/// Default distance after which a segment is closed
pub const DEFAULT_SEGMENT_KM: f64 = 20.0;

/// One run as walked from the start location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    /// Run name
    pub name: String,
    /// Where the run starts
    pub from: String,
    /// Where the run ends
    pub to: String,
    /// Descended distance
    pub distance_km: f64,
    /// Traversal time
    pub minutes: f64,
}

/// A group of consecutive legs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// Legs in order
    pub legs: Vec<Leg>,
    /// Distance covered in this segment
    pub distance_km: f64,
    /// Distance covered up to the end of this segment
    pub cumulative_km: f64,
}

/// A path name that could not be matched while re-walking the route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Desync {
    /// Location the walk was at
    pub at: String,
    /// Name with no matching outgoing run
    pub run: String,
}

/// A route laid out for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    /// Total distance reported by the planner
    pub total_km: f64,
    /// Closed segments
    pub segments: Vec<Segment>,
    /// Set when the walk stopped on an unknown name
    pub desync: Option<Desync>,
    /// True when the path had no runs
    pub empty: bool,
}

impl Itinerary {
    /// Re-walk `path` from `start`, closing a segment every `segment_km`.
    ///
    /// Each name matches the first outgoing run of the current location
    /// with that name. A name with no match stops the walk and the open
    /// segment is dropped.
    #[must_use]
    pub fn walk(graph: &ResortGraph, start: &str, total_km: f64, path: &[String], segment_km: f64) -> Self {
        let mut itinerary = Self {
            total_km,
            segments: Vec::new(),
            desync: None,
            empty: path.is_empty(),
        };

        let mut current = graph.node(start);
        let mut legs = Vec::new();
        let mut segment_distance = 0.0;
        let mut cumulative = 0.0;

        for (i, name) in path.iter().enumerate() {
            let step = current.and_then(|node| {
                graph
                    .runs_from(node)
                    .iter()
                    .copied()
                    .find(|&e| graph.run(e).name == *name)
                    .map(|e| (node, e))
            });

            let Some((node, edge)) = step else {
                itinerary.desync = Some(Desync {
                    at: current.map_or_else(|| start.to_string(), |n| graph.location(n).name.clone()),
                    run: name.clone(),
                });
                break;
            };

            let run = graph.run(edge);
            let next = graph.target(edge);
            segment_distance += run.distance_km;
            cumulative += run.distance_km;
            legs.push(Leg {
                name: run.name.clone(),
                from: graph.location(node).name.clone(),
                to: graph.location(next).name.clone(),
                distance_km: run.distance_km,
                minutes: run.minutes,
            });
            current = Some(next);

            if segment_distance >= segment_km || i == path.len() - 1 {
                itinerary.segments.push(Segment {
                    legs: std::mem::take(&mut legs),
                    distance_km: segment_distance,
                    cumulative_km: cumulative,
                });
                segment_distance = 0.0;
            }
        }

        itinerary
    }

    /// Render as plain or colored text
    #[must_use]
    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();
        let total = format!("{:.1} km", self.total_km);
        if color {
            let _ = writeln!(out, "Max distance: {}", total.bold());
        } else {
            let _ = writeln!(out, "Max distance: {total}");
        }

        if self.empty {
            out.push_str("No path found.\n");
            return out;
        }

        out.push_str("\nPath breakdown:\n");
        for segment in &self.segments {
            let header = format!(
                "--- ({:.1}km, cumulative: {:.1}km) ---",
                segment.distance_km, segment.cumulative_km
            );
            if color {
                let _ = writeln!(out, "\n{}", header.cyan());
            } else {
                let _ = writeln!(out, "\n{header}");
            }
            let names: Vec<&str> = segment.legs.iter().map(|l| l.name.as_str()).collect();
            let _ = writeln!(out, "{}", names.join(" → "));
        }

        if let Some(desync) = &self.desync {
            let line = format!("ERROR: Invalid path segment from {} with edge {}", desync.at, desync.run);
            if color {
                let _ = writeln!(out, "{}", line.red());
            } else {
                let _ = writeln!(out, "{line}");
            }
        }

        out
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
