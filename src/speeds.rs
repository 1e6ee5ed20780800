// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Average descent speeds per grade and the descent-time rule

use std::collections::BTreeMap;

use crate::error::ResortError;
use crate::types::Grade;

/// Average speed (km/h) for each grade
///
/// Passed explicitly to graph construction; nothing reads a global table.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTable {
    kmh: BTreeMap<Grade, f64>,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            kmh: BTreeMap::from([(Grade::Blue, 25.0), (Grade::Red, 35.0), (Grade::Black, 15.0)]),
        }
    }
}

impl SpeedTable {
    /// An empty table; every lookup fails until speeds are set
    #[must_use]
    pub fn empty() -> Self {
        Self { kmh: BTreeMap::new() }
    }

    /// Build a table from grade codes, as found in configuration
    pub fn from_codes<'a, I>(entries: I) -> Result<Self, ResortError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut table = Self::empty();
        for (code, kmh) in entries {
            table.set(code.parse()?, kmh)?;
        }
        Ok(table)
    }

    /// Set the speed for one grade
    pub fn set(&mut self, grade: Grade, kmh: f64) -> Result<(), ResortError> {
        if !kmh.is_finite() || kmh <= 0.0 {
            return Err(ResortError::InvalidSpeed {
                grade: grade.to_string(),
                kmh,
            });
        }
        self.kmh.insert(grade, kmh);
        Ok(())
    }

    /// Speed for a grade
    pub fn speed(&self, grade: Grade) -> Result<f64, ResortError> {
        self.kmh
            .get(&grade)
            .copied()
            .ok_or_else(|| ResortError::UnknownGrade(grade.to_string()))
    }

    /// Minutes needed to ski `distance_km` of the given grade, to one decimal
    pub fn descent_minutes(&self, distance_km: f64, grade: Grade) -> Result<f64, ResortError> {
        let speed = self.speed(grade)?;
        let minutes = distance_km / (speed / 60.0);
        Ok((minutes * 10.0).round() / 10.0)
    }

    /// Iterate configured speeds, easiest grade first
    pub fn iter(&self) -> impl Iterator<Item = (Grade, f64)> + '_ {
        self.kmh.iter().map(|(g, s)| (*g, *s))
    }
}
