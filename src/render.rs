// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Graphviz rendering of a resort graph

use crate::graph::ResortGraph;
use crate::types::{Grade, RunKind};
use anyhow::{bail, Context, Result};
use std::fmt::Write as _;
use std::io::Write as _;
use std::process::{Command, Stdio};
use tracing::debug;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RenderFormat {
    /// Graphviz DOT source
    Dot,
    /// SVG via the `dot` executable
    Svg,
    /// PNG via the `dot` executable
    Png,
}

impl RenderFormat {
    /// Get file extension for format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// Wrap text at word boundaries to lines of at most `width` characters
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn grade_colors(grade: Grade) -> (&'static str, &'static str) {
    match grade {
        Grade::Blue => ("blue", "lightblue"),
        Grade::Red => ("red", "lightpink"),
        Grade::Black => ("black", "lightgray"),
    }
}

/// Export to DOT format for Graphviz
///
/// Locations sharing a display row are ranked together, top row first.
/// Lifts are gray and dashed; slopes take their grade's color.
#[must_use]
pub fn to_dot(graph: &ResortGraph) -> String {
    let mut dot = String::from("digraph resort {\n");
    let _ = writeln!(dot, "  label=\"{} Ski Resort Graph\";", escape(&graph.name));
    dot.push_str("  labelloc=t;\n");
    dot.push_str("  rankdir=TB;\n");
    dot.push_str("  node [shape=ellipse, style=filled, fillcolor=lightblue, fontname=\"Helvetica-Bold\"];\n");
    dot.push_str("  edge [fontsize=9];\n\n");

    for (row_idx, row) in graph.rows().iter().enumerate() {
        let _ = writeln!(dot, "  subgraph row_{row_idx} {{");
        dot.push_str("    rank=same;\n");
        for &idx in row {
            let name = &graph.location(idx).name;
            let _ = writeln!(
                dot,
                "    \"{}\" [label=\"{}\"];",
                escape(name),
                escape(&wrap_text(name, 15))
            );
        }
        dot.push_str("  }\n");
    }

    dot.push('\n');

    for (from, to, run) in graph.runs() {
        let from = escape(&graph.location(from).name);
        let to = escape(&graph.location(to).name);
        let name = wrap_text(&run.name, 10);
        match run.kind {
            RunKind::Lift => {
                let label = escape(&format!("{name}\n{}m", run.minutes));
                let _ = writeln!(
                    dot,
                    "  \"{from}\" -> \"{to}\" [label=\"{label}\", color=gray, fontcolor=black, style=dashed];"
                );
            }
            RunKind::Descent(grade) => {
                let (color, _) = grade_colors(grade);
                let label = escape(&format!("{name}\n{}km\n{}m", run.distance_km, run.minutes));
                let _ = writeln!(
                    dot,
                    "  \"{from}\" -> \"{to}\" [label=\"{label}\", color={color}, fontcolor={color}];"
                );
            }
        }
    }

    dot.push_str("\n  subgraph cluster_legend {\n");
    dot.push_str("    label=\"Legend\";\n");
    dot.push_str("    style=dashed;\n");
    dot.push_str("    node [shape=box, style=filled];\n");
    dot.push_str("    legend_lift [label=\"Lifts\", fillcolor=lightgray];\n");
    for grade in Grade::ALL {
        let (_, fill) = grade_colors(grade);
        let _ = writeln!(
            dot,
            "    legend_{code} [label=\"{title} Slopes\", fillcolor={fill}];",
            code = grade.code(),
            title = capitalize(grade.code())
        );
    }
    dot.push_str("  }\n");

    dot.push_str("}\n");
    dot
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|c| c.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// Render the graph in `format`, piping through `dot` for images
pub fn render(graph: &ResortGraph, format: RenderFormat) -> Result<Vec<u8>> {
    let dot = to_dot(graph);
    if format == RenderFormat::Dot {
        return Ok(dot.into_bytes());
    }

    debug!(format = format.extension(), "invoking graphviz");
    let mut child = Command::new("dot")
        .arg(format!("-T{}", format.extension()))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("Failed to run `dot`; is Graphviz installed?")?;

    child
        .stdin
        .take()
        .context("Failed to open stdin of `dot`")?
        .write_all(dot.as_bytes())
        .context("Failed to write DOT source to `dot`")?;

    let output = child.wait_with_output().context("Failed to wait for `dot`")?;
    if !output.status.success() {
        bail!(
            "`dot` exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(output.stdout)
}
