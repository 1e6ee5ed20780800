// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - shows the effective configuration

use crate::config::{default_path, Config};
use anyhow::Result;

/// Print the effective configuration, or just the default file location
pub fn run(config: &Config, path_only: bool) -> Result<()> {
    if path_only {
        match default_path() {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("No configuration directory on this platform"),
        }
        return Ok(());
    }

    print!("{}", config.to_toml()?);
    Ok(())
}
