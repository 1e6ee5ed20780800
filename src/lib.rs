// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Skiroute library - time-boxed maximum-descent route planning
//!
//! This crate models a ski resort as a directed multigraph of lifts and
//! slopes and searches for the route that descends the most kilometres
//! within a fixed time budget, without riding the same named run more than
//! three times back-to-back.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod planner;
pub mod render;
pub mod report;
pub mod resort;
pub mod speeds;

/// Core data types for locations and runs
pub mod types {
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::str::FromStr;

    use crate::error::ResortError;

    // =========================================================================
    // Grades
    // =========================================================================

    /// Difficulty grade of a descent
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Grade {
        /// Easy slope
        Blue,
        /// Intermediate slope
        Red,
        /// Difficult slope
        Black,
    }

    impl Grade {
        /// All grades, easiest first
        pub const ALL: [Self; 3] = [Self::Blue, Self::Red, Self::Black];

        /// Get the lowercase code for this grade
        #[must_use]
        pub fn code(&self) -> &'static str {
            match self {
                Self::Blue => "blue",
                Self::Red => "red",
                Self::Black => "black",
            }
        }
    }

    impl FromStr for Grade {
        type Err = ResortError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_lowercase().as_str() {
                "blue" => Ok(Self::Blue),
                "red" => Ok(Self::Red),
                "black" => Ok(Self::Black),
                _ => Err(ResortError::UnknownGrade(s.to_string())),
            }
        }
    }

    impl fmt::Display for Grade {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.code())
        }
    }

    // =========================================================================
    // Runs (Edges)
    // =========================================================================

    /// Whether a run goes up or down
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum RunKind {
        /// Mechanical ascent, no descended distance
        Lift,
        /// Downhill slope of the given grade
        Descent(Grade),
    }

    /// A directed, timed, named connection between two locations
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Run {
        /// Display name; several runs may share one
        pub name: String,
        /// Descended distance in kilometres (zero for lifts)
        pub distance_km: f64,
        /// Traversal time in minutes
        pub minutes: f64,
        /// Lift or descent
        pub kind: RunKind,
    }

    impl Run {
        /// Build a lift run
        #[must_use]
        pub fn lift(name: impl Into<String>, minutes: f64) -> Self {
            Self {
                name: name.into(),
                distance_km: 0.0,
                minutes,
                kind: RunKind::Lift,
            }
        }

        /// Build a descent with an explicit traversal time
        #[must_use]
        pub fn descent(name: impl Into<String>, distance_km: f64, minutes: f64, grade: Grade) -> Self {
            Self {
                name: name.into(),
                distance_km,
                minutes,
                kind: RunKind::Descent(grade),
            }
        }

        /// True for lifts
        #[must_use]
        pub fn is_lift(&self) -> bool {
            matches!(self.kind, RunKind::Lift)
        }

        /// Grade of a descent, `None` for lifts
        #[must_use]
        pub fn grade(&self) -> Option<Grade> {
            match self.kind {
                RunKind::Lift => None,
                RunKind::Descent(grade) => Some(grade),
            }
        }

        /// Check the run's numbers are usable by the planner
        pub fn validate(&self) -> Result<(), ResortError> {
            if !self.minutes.is_finite() || self.minutes <= 0.0 {
                return Err(ResortError::InvalidTime {
                    run: self.name.clone(),
                    minutes: self.minutes,
                });
            }
            let distance_ok = match self.kind {
                RunKind::Lift => self.distance_km == 0.0,
                RunKind::Descent(_) => self.distance_km.is_finite() && self.distance_km > 0.0,
            };
            if !distance_ok {
                return Err(ResortError::InvalidDistance {
                    run: self.name.clone(),
                    distance_km: self.distance_km,
                });
            }
            Ok(())
        }
    }

    // =========================================================================
    // Locations (Nodes)
    // =========================================================================

    /// A named place in the resort
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Location {
        /// Unique name
        pub name: String,
        /// Display row, top of the mountain first; layout only
        pub row: Option<usize>,
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::graph::ResortGraph;
    pub use crate::planner::{Planner, SearchConfig, SearchOutcome, SearchRequest};
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
