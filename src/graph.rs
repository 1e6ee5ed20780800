// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Resort graph with petgraph backing
//!
//! Parallel runs between the same pair of locations are kept as separate
//! edges. Outgoing runs are listed in insertion order, which the planner
//! relies on for deterministic tie-breaking.

use crate::error::ResortError;
use crate::speeds::SpeedTable;
use crate::types::{Grade, Location, Run};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::trace;

/// A ski resort: locations joined by lifts and slopes
#[derive(Debug, Clone, Default)]
pub struct ResortGraph {
    /// Display name of the resort
    pub name: String,
    /// The underlying directed multigraph
    graph: DiGraph<Location, Run>,
    /// Map from location name to node index
    node_indices: HashMap<String, NodeIndex>,
    /// Outgoing runs per node, in insertion order
    outgoing: Vec<Vec<EdgeIndex>>,
}

impl ResortGraph {
    /// Create a new empty resort graph
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a location, returning the existing index if the name is known
    pub fn add_location(&mut self, name: &str, row: Option<usize>) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(name) {
            if row.is_some() {
                self.graph[idx].row = row;
            }
            return idx;
        }
        let idx = self.graph.add_node(Location {
            name: name.to_string(),
            row,
        });
        self.node_indices.insert(name.to_string(), idx);
        self.outgoing.push(Vec::new());
        idx
    }

    /// Add a run between two declared locations
    pub fn add_run(&mut self, from: &str, to: &str, run: Run) -> Result<EdgeIndex, ResortError> {
        run.validate()?;
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;

        trace!(from, to, run = %run.name, "adding run");
        let edge = self.graph.add_edge(from_idx, to_idx, run);
        self.outgoing[from_idx.index()].push(edge);
        Ok(edge)
    }

    /// Add a lift taking `minutes`
    pub fn add_lift(&mut self, from: &str, to: &str, minutes: f64, name: &str) -> Result<EdgeIndex, ResortError> {
        self.add_run(from, to, Run::lift(name, minutes))
    }

    /// Add a descent whose time is derived from its grade's average speed
    pub fn add_descent(
        &mut self,
        from: &str,
        to: &str,
        distance_km: f64,
        grade: Grade,
        name: &str,
        speeds: &SpeedTable,
    ) -> Result<EdgeIndex, ResortError> {
        let minutes = speeds.descent_minutes(distance_km, grade)?;
        self.add_run(from, to, Run::descent(name, distance_km, minutes, grade))
    }

    fn index_of(&self, name: &str) -> Result<NodeIndex, ResortError> {
        self.node_indices
            .get(name)
            .copied()
            .ok_or_else(|| ResortError::UnknownLocation(name.to_string()))
    }

    /// Look up a location's node index
    #[must_use]
    pub fn node(&self, name: &str) -> Option<NodeIndex> {
        self.node_indices.get(name).copied()
    }

    /// Get a location by index
    #[must_use]
    pub fn location(&self, idx: NodeIndex) -> &Location {
        &self.graph[idx]
    }

    /// Get a run by index
    #[must_use]
    pub fn run(&self, edge: EdgeIndex) -> &Run {
        &self.graph[edge]
    }

    /// Destination of a run
    #[must_use]
    pub fn target(&self, edge: EdgeIndex) -> NodeIndex {
        // Edges are never removed, so every stored index has endpoints
        self.graph
            .edge_endpoints(edge)
            .map_or(NodeIndex::end(), |(_, to)| to)
    }

    /// Outgoing runs of a node, in insertion order
    #[must_use]
    pub fn runs_from(&self, idx: NodeIndex) -> &[EdgeIndex] {
        self.outgoing.get(idx.index()).map_or(&[], Vec::as_slice)
    }

    /// All locations in insertion order
    pub fn locations(&self) -> impl Iterator<Item = (NodeIndex, &Location)> + '_ {
        self.graph.node_indices().map(move |idx| (idx, &self.graph[idx]))
    }

    /// All runs as `(from, to, run)` in insertion order
    pub fn runs(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &Run)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
    }

    /// Locations grouped by display row; unplaced locations come last
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<NodeIndex>> {
        let mut rows: Vec<Vec<NodeIndex>> = Vec::new();
        let mut unplaced = Vec::new();
        for (idx, loc) in self.locations() {
            match loc.row {
                Some(r) => {
                    if rows.len() <= r {
                        rows.resize_with(r + 1, Vec::new);
                    }
                    rows[r].push(idx);
                }
                None => unplaced.push(idx),
            }
        }
        if !unplaced.is_empty() {
            rows.push(unplaced);
        }
        rows
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if the graph has no locations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_stop_graph() -> ResortGraph {
        let mut graph = ResortGraph::new("test");
        graph.add_location("Top", Some(0));
        graph.add_location("Bottom", Some(1));
        graph
    }

    #[test]
    fn test_add_location_is_idempotent() {
        let mut graph = two_stop_graph();
        let again = graph.add_location("Top", None);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node("Top"), Some(again));
        assert_eq!(graph.location(again).row, Some(0));
    }

    #[test]
    fn test_parallel_runs_are_kept() {
        let mut graph = two_stop_graph();
        let speeds = SpeedTable::default();

        graph.add_descent("Top", "Bottom", 1.2, Grade::Red, "Belette", &speeds).unwrap();
        graph.add_descent("Top", "Bottom", 1.0, Grade::Red, "Belette", &speeds).unwrap();

        let top = graph.node("Top").unwrap();
        let runs = graph.runs_from(top);
        assert_eq!(runs.len(), 2);
        assert_eq!(graph.run(runs[0]).distance_km, 1.2);
        assert_eq!(graph.run(runs[1]).distance_km, 1.0);
    }

    #[test]
    fn test_outgoing_order_is_insertion_order() {
        let mut graph = two_stop_graph();
        graph.add_location("Middle", Some(1));
        graph.add_run("Top", "Middle", Run::descent("first", 1.0, 2.0, Grade::Blue)).unwrap();
        graph.add_run("Top", "Bottom", Run::descent("second", 1.0, 2.0, Grade::Blue)).unwrap();
        graph.add_run("Top", "Middle", Run::descent("third", 1.0, 2.0, Grade::Blue)).unwrap();

        let top = graph.node("Top").unwrap();
        let names: Vec<_> = graph
            .runs_from(top)
            .iter()
            .map(|&e| graph.run(e).name.as_str())
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert_eq!(graph.target(graph.runs_from(top)[1]), graph.node("Bottom").unwrap());
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let mut graph = two_stop_graph();
        let err = graph.add_lift("Nowhere", "Top", 5.0, "Ghost Lift").unwrap_err();
        assert_eq!(err, ResortError::UnknownLocation("Nowhere".into()));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_rows_group_locations() {
        let mut graph = two_stop_graph();
        graph.add_location("Floating", None);
        let rows = graph.rows();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![graph.node("Top").unwrap()]);
        assert_eq!(rows[2], vec![graph.node("Floating").unwrap()]);
    }
}
