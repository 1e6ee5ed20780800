// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Settings are layered: built-in defaults, then a TOML file (the one given
//! on the command line, or `config.toml` in the platform config directory),
//! then `SKIROUTE_*` environment variables with `__` between sections, e.g.
//! `SKIROUTE_SEARCH__PRUNE=coarse`.

use crate::error::ResortError;
use crate::graph::ResortGraph;
use crate::planner::SearchConfig;
use crate::report::DEFAULT_SEGMENT_KM;
use crate::resort::{les_arcs, ResortSpec};
use crate::speeds::SpeedTable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default route request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanDefaults {
    /// Start location
    pub start: String,
    /// Time available in minutes
    pub time_budget_minutes: f64,
    /// Distance considered good enough
    pub target_km: f64,
}

impl Default for PlanDefaults {
    fn default() -> Self {
        Self {
            start: "Vallandry".to_string(),
            time_budget_minutes: 8.0 * 60.0,
            target_km: 100.0,
        }
    }
}

/// Itinerary output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Distance after which a printed segment is closed
    pub segment_km: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            segment_km: DEFAULT_SEGMENT_KM,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resort table to load instead of the built-in map
    pub resort_file: Option<PathBuf>,
    /// Default route request
    pub plan: PlanDefaults,
    /// Planner settings
    pub search: SearchConfig,
    /// Itinerary settings
    pub report: ReportConfig,
    /// Average speed (km/h) by grade code
    pub speeds: BTreeMap<String, f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resort_file: None,
            plan: PlanDefaults::default(),
            search: SearchConfig::coarse(),
            report: ReportConfig::default(),
            speeds: SpeedTable::default()
                .iter()
                .map(|(grade, kmh)| (grade.code().to_string(), kmh))
                .collect(),
        }
    }
}

impl Config {
    /// Speed table built from the `speeds` section
    pub fn speed_table(&self) -> Result<SpeedTable, ResortError> {
        SpeedTable::from_codes(self.speeds.iter().map(|(code, kmh)| (code.as_str(), *kmh)))
    }

    /// Build the configured resort graph
    pub fn resort(&self) -> Result<ResortGraph> {
        let spec = match &self.resort_file {
            Some(path) => ResortSpec::load(path)?,
            None => les_arcs(),
        };
        let speeds = self.speed_table().context("Invalid speeds in configuration")?;
        spec.build(&speeds)
            .with_context(|| format!("Invalid resort table for {}", spec.name))
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Platform default config file, e.g. `~/.config/skiroute/config.toml`
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "hyperpolymath", "skiroute")
        .map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration from disk and environment over the defaults
///
/// An explicit `path` must exist; the platform default file is optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let defaults = ::config::Config::try_from(&Config::default()).context("Failed to encode default configuration")?;
    let mut builder = ::config::Config::builder().add_source(defaults);

    match path {
        Some(p) => {
            debug!(path = %p.display(), "loading configuration file");
            builder = builder.add_source(::config::File::from(p).required(true));
        }
        None => {
            if let Some(p) = default_path() {
                debug!(path = %p.display(), "checking default configuration file");
                builder = builder.add_source(::config::File::from(p).required(false));
            }
        }
    }

    builder = builder.add_source(
        ::config::Environment::with_prefix("SKIROUTE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config: Config = builder
        .build()
        .context("Failed to load configuration")?
        .try_deserialize()
        .context("Failed to parse configuration")?;

    config.search.validate().context("Invalid [search] settings")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{PruneMode, StreakPolicy};
    use std::io::Write;

    #[test]
    fn defaults_match_reference_parameters() {
        let config = Config::default();

        assert_eq!(config.plan.start, "Vallandry");
        assert_eq!(config.plan.time_budget_minutes, 480.0);
        assert_eq!(config.plan.target_km, 100.0);
        assert_eq!(config.report.segment_km, 20.0);
        assert_eq!(config.search.prune, PruneMode::Coarse);
        assert_eq!(config.speed_table().unwrap(), SpeedTable::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[plan]
start = "Arc 1600"

[search]
prune = "coarse"
streak_policy = "lifts-only"

[speeds]
blue = 20.0
red = 30.0
black = 10.0
"#
        )
        .unwrap();

        let config = load(Some(file.path())).unwrap();

        assert_eq!(config.plan.start, "Arc 1600");
        assert_eq!(config.plan.time_budget_minutes, 480.0);
        assert_eq!(config.search.prune, PruneMode::Coarse);
        assert_eq!(config.search.streak_policy, StreakPolicy::LiftsOnly);
        assert_eq!(config.search.max_streak, 3);
        assert_eq!(config.speeds["black"], 10.0);
    }

    #[test]
    fn zero_bucket_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[search]\nbucket_minutes = 0.0\n").unwrap();

        let err = load(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("invalid pruning bucket"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn unknown_speed_grade_fails() {
        let mut config = Config::default();
        config.speeds.insert("green".into(), 30.0);
        assert!(config.speed_table().is_err());
        assert!(config.resort().is_err());
    }

    #[test]
    fn toml_round_trip_of_defaults() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
