// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Render command - draws the resort graph

use crate::config::Config;
use crate::render::{render, RenderFormat};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Run the render command
pub fn run(config: &Config, format: RenderFormat, output: Option<PathBuf>) -> Result<()> {
    info!("Rendering to {}", format.extension());

    let graph = config.resort()?;
    if graph.is_empty() {
        eprintln!("Warning: resort {} has no locations.", graph.name);
    }

    let content = render(&graph, format)?;

    match output {
        Some(path) => {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            println!("Rendered to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&content)?;
        }
    }

    Ok(())
}
