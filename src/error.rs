// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Errors raised while building a resort graph or checking settings
//!
//! Search itself never fails: degenerate requests produce an empty outcome.
//! Everything here points at malformed resort data or planner settings.

/// Resort data errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResortError {
    /// Grade string not recognised, or no speed configured for it
    #[error("unknown slope grade: {0}")]
    UnknownGrade(String),

    /// A run references a location that was never declared
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    /// A location appears twice in the row table
    #[error("location declared twice: {0}")]
    DuplicateLocation(String),

    /// Traversal time must be positive and finite
    #[error("run {run} has invalid time {minutes} min")]
    InvalidTime {
        /// Run name
        run: String,
        /// Offending value
        minutes: f64,
    },

    /// Descents need a positive distance, lifts exactly zero
    #[error("run {run} has invalid distance {distance_km} km")]
    InvalidDistance {
        /// Run name
        run: String,
        /// Offending value
        distance_km: f64,
    },

    /// Average speed must be positive and finite
    #[error("invalid speed {kmh} km/h for {grade}")]
    InvalidSpeed {
        /// Grade code
        grade: String,
        /// Offending value
        kmh: f64,
    },

    /// Coarse pruning bucket must be positive and finite
    #[error("invalid pruning bucket {0} min")]
    InvalidBucket(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ResortError::UnknownGrade("green".into());
        assert_eq!(err.to_string(), "unknown slope grade: green");

        let err = ResortError::UnknownLocation("Arc 2000".into());
        assert_eq!(err.to_string(), "unknown location: Arc 2000");

        let err = ResortError::InvalidTime {
            run: "Aigle".into(),
            minutes: -1.0,
        };
        assert_eq!(err.to_string(), "run Aigle has invalid time -1 min");

        let err = ResortError::InvalidBucket(0.0);
        assert_eq!(err.to_string(), "invalid pruning bucket 0 min");
    }
}
