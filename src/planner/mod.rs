// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Route planner using breadth-first search.
//!
//! This module answers: "starting here, with this much time, which sequence
//! of lifts and slopes covers the most downhill distance?"
//!
//! The search explores (location, time left, streak) states in FIFO order
//! and prunes states dominated by an already-seen state under the same key.

mod config;
mod search;
mod trail;

pub use config::{PruneMode, SearchConfig, StreakPolicy};
pub use search::{find_max_distance_route, Planner, SearchOutcome, SearchRequest};
pub use trail::Trail;
