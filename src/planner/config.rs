// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Search configuration for the route planner.

use crate::error::ResortError;
use serde::{Deserialize, Serialize};

/// How search states are merged for dominance pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PruneMode {
    /// Key on node, remaining time, last run name and streak.
    /// Only exact duplicates with an equal-or-better distance are dropped.
    #[default]
    Exact,
    /// Key on node and remaining time bucketed to `bucket_minutes`,
    /// ignoring the streak. Keeps the frontier small but may drop the optimum.
    Coarse,
}

/// Which runs count towards the consecutive-use cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StreakPolicy {
    /// Every back-to-back repeat of a name counts, lift or descent.
    #[default]
    AllNames,
    /// Only lifts are counted. Descents neither extend nor reset the streak.
    LiftsOnly,
}

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum consecutive uses of the same run name.
    pub max_streak: u32,

    /// Dominance key used for pruning.
    pub prune: PruneMode,

    /// Bucket width (minutes) for coarse pruning.
    pub bucket_minutes: f64,

    /// Streak counting rule.
    pub streak_policy: StreakPolicy,

    /// Upper bound on dequeued states before the search gives up
    /// and returns the best route found so far.
    pub max_expansions: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_streak: u32,
        prune: PruneMode,
        bucket_minutes: f64,
        streak_policy: StreakPolicy,
        max_expansions: usize,
    ) -> Self {
        Self {
            max_streak,
            prune,
            bucket_minutes,
            streak_policy,
            max_expansions,
        }
    }

    /// Check values that would make the dominance key meaningless.
    pub fn validate(&self) -> Result<(), ResortError> {
        if !self.bucket_minutes.is_finite() || self.bucket_minutes <= 0.0 {
            return Err(ResortError::InvalidBucket(self.bucket_minutes));
        }
        Ok(())
    }

    /// Configuration using coarse 5-minute buckets.
    pub fn coarse() -> Self {
        Self {
            prune: PruneMode::Coarse,
            ..Self::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_streak: 3,
            prune: PruneMode::Exact,
            bucket_minutes: 5.0,
            streak_policy: StreakPolicy::AllNames,
            max_expansions: 5_000_000,
        }
    }
}
