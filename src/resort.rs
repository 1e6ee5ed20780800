// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Resort tables: the built-in Les Arcs map and file loading

use crate::error::ResortError;
use crate::graph::ResortGraph;
use crate::speeds::SpeedTable;
use crate::types::Grade;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// A slope entry in a resort table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlopeSpec {
    /// Upper location
    pub from: String,
    /// Lower location
    pub to: String,
    /// Length in kilometres
    pub km: f64,
    /// Difficulty grade
    pub grade: Grade,
    /// Slope name
    pub name: String,
}

/// A lift entry in a resort table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftSpec {
    /// Boarding location
    pub from: String,
    /// Arrival location
    pub to: String,
    /// Ride time in minutes
    pub minutes: f64,
    /// Lift name
    pub name: String,
}

/// A complete resort table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortSpec {
    /// Resort display name
    pub name: String,
    /// Location names by display row, top of the mountain first
    pub rows: Vec<Vec<String>>,
    /// Slopes
    #[serde(default)]
    pub slopes: Vec<SlopeSpec>,
    /// Lifts
    #[serde(default)]
    pub lifts: Vec<LiftSpec>,
}

impl ResortSpec {
    /// Load a resort table from a `.toml` or `.json` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let spec: Self = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        };

        info!(resort = %spec.name, path = %path.display(), "loaded resort table");
        Ok(spec)
    }

    /// Build the graph, deriving slope times from `speeds`
    pub fn build(&self, speeds: &SpeedTable) -> Result<ResortGraph, ResortError> {
        let mut graph = ResortGraph::new(&self.name);
        let mut seen = HashSet::new();

        for (row_idx, row) in self.rows.iter().enumerate() {
            for name in row {
                if !seen.insert(name.as_str()) {
                    return Err(ResortError::DuplicateLocation(name.clone()));
                }
                graph.add_location(name, Some(row_idx));
            }
        }

        for slope in &self.slopes {
            graph.add_descent(&slope.from, &slope.to, slope.km, slope.grade, &slope.name, speeds)?;
        }

        for lift in &self.lifts {
            graph.add_lift(&lift.from, &lift.to, lift.minutes, &lift.name)?;
        }

        debug!(
            locations = graph.node_count(),
            runs = graph.edge_count(),
            "built resort graph"
        );
        Ok(graph)
    }
}

fn slope(from: &str, to: &str, km: f64, grade: Grade, name: &str) -> SlopeSpec {
    SlopeSpec {
        from: from.into(),
        to: to.into(),
        km,
        grade,
        name: name.into(),
    }
}

fn lift(from: &str, to: &str, minutes: f64, name: &str) -> LiftSpec {
    LiftSpec {
        from: from.into(),
        to: to.into(),
        minutes,
        name: name.into(),
    }
}

/// The Les Arcs / Peisey-Vallandry sector
#[must_use]
pub fn les_arcs() -> ResortSpec {
    use Grade::{Black, Blue, Red};

    let rows = [
        vec!["Comborciere Top", "Mont Blanc Top", "Bois de l'Ours Top", "Transarc Top"],
        vec!["Arc 1950", "La Bulle Restaurant", "Le Derby Top", "Grizzly top"],
        vec!["Comborciere Bottom", "Arpette Bottom", "Transarc Middle", "Le Derby Bottom"],
        vec!["Arc 1600", "Arc 1800", "Vallandry"],
    ]
    .into_iter()
    .map(|row| row.into_iter().map(String::from).collect())
    .collect();

    let slopes = vec![
        slope("Grizzly top", "Le Derby Bottom", 1.4, Red, "Myrtilles upper part"),
        slope("La Bulle Restaurant", "Arc 1950", 1.25, Blue, "Vallee De L'Arc 1 upper part"),
        slope("Arc 1950", "Comborciere Bottom", 1.25, Blue, "Vallee De L'Arc 1 lower part"),
        slope("Comborciere Top", "Mont Blanc Top", 0.3, Blue, "Belvedere 4"),
        // Belette is rounded up, the piste is not complete
        slope("Le Derby Top", "Le Derby Bottom", 1.2, Red, "Belette"),
        slope("Transarc Top", "La Bulle Restaurant", 2.74, Blue, "Plan des eaux"),
        // estimated
        slope("Le Derby Top", "Transarc Middle", 1.0, Blue, "Traversee 3"),
        slope("Grizzly top", "Vallandry", 2.27, Red, "Aigle"),
        slope("Le Derby Top", "Le Derby Bottom", 1.0, Red, "Belette"),
        slope("Bois de l'Ours Top", "Arc 1950", 1.5, Black, "Bois de l'Ours"),
        slope("Mont Blanc Top", "Arpette Bottom", 0.73, Blue, "Belvedere 3"),
        slope("Le Derby Bottom", "Vallandry", 1.1 + 1.2, Blue, "Myrtille lower + barmont"),
        slope("Mont Blanc Top", "Arc 1600", 3.7, Blue, "Mont Blanc slope"),
        slope("Mont Blanc Top", "Arc 1600", 3.6, Red, "Arolles slope"),
        slope("Bois de l'Ours Top", "Le Derby Bottom", 5.0, Blue, "Arpette to Le Derby"),
    ];

    let lifts = vec![
        lift("Vallandry", "Grizzly top", 7.0, "Grizzly Lift"),
        lift("Le Derby Bottom", "Le Derby Top", 6.0, "Derby Chairlift"),
        lift("Arc 1600", "Mont Blanc Top", 5.0, "Mont Blanc Lift"),
        lift("Arc 1800", "Transarc Middle", 6.0, "Transarc 1"),
        lift("Transarc Middle", "Transarc Top", 9.0, "Transarc 2"),
        lift("La Bulle Restaurant", "Transarc Top", 6.0, "Arcabulle Chairlift"),
        lift("Comborciere Bottom", "Comborciere Top", 6.0, "Comborciere Chairlift"),
        lift("Comborciere Bottom", "La Bulle Restaurant", 9.0, "Pre-Saint-Esprit lift"),
        lift("Arc 1950", "Bois de l'Ours Top", 12.0, "Bois de l'Ours Lift"),
        lift("Arpette Bottom", "Bois de l'Ours Top", 6.0, "Arpette Chairlift"),
    ];

    ResortSpec {
        name: "Les Arcs".into(),
        rows,
        slopes,
        lifts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn les_arcs_builds() {
        let graph = les_arcs().build(&SpeedTable::default()).unwrap();

        assert_eq!(graph.node_count(), 15);
        assert_eq!(graph.edge_count(), 25);

        // Both Belette variants survive as parallel edges
        let derby_top = graph.node("Le Derby Top").unwrap();
        let belettes = graph
            .runs_from(derby_top)
            .iter()
            .filter(|&&e| graph.run(e).name == "Belette")
            .count();
        assert_eq!(belettes, 2);
    }

    #[test]
    fn slope_times_come_from_speeds() {
        let graph = les_arcs().build(&SpeedTable::default()).unwrap();
        let grizzly = graph.node("Grizzly top").unwrap();
        let aigle = graph
            .runs_from(grizzly)
            .iter()
            .map(|&e| graph.run(e))
            .find(|r| r.name == "Aigle")
            .unwrap();
        assert_eq!(aigle.minutes, 3.9);
    }

    #[test]
    fn missing_speed_fails_build() {
        let speeds = SpeedTable::from_codes([("blue", 25.0), ("red", 35.0)]).unwrap();
        let err = les_arcs().build(&speeds).unwrap_err();
        assert_eq!(err, ResortError::UnknownGrade("black".into()));
    }

    #[test]
    fn duplicate_location_rejected() {
        let mut spec = les_arcs();
        spec.rows[3].push("Arc 1950".into());
        assert_eq!(
            spec.build(&SpeedTable::default()).unwrap_err(),
            ResortError::DuplicateLocation("Arc 1950".into())
        );
    }

    #[test]
    fn load_toml_table() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
name = "Tiny"
rows = [["Top"], ["Base"]]

[[slopes]]
from = "Top"
to = "Base"
km = 2.5
grade = "blue"
name = "Home Run"

[[lifts]]
from = "Base"
to = "Top"
minutes = 8
name = "Chair"
"#
        )
        .unwrap();

        let spec = ResortSpec::load(file.path()).unwrap();
        let graph = spec.build(&SpeedTable::default()).unwrap();
        assert_eq!(graph.name, "Tiny");
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn load_rejects_unknown_grade() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"name":"Bad","rows":[["A","B"]],"slopes":[{{"from":"A","to":"B","km":1,"grade":"green","name":"S"}}]}}"#
        )
        .unwrap();

        assert!(ResortSpec::load(file.path()).is_err());
    }
}
