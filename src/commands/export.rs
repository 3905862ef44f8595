// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Output formats shared by the parse and generate commands

use crate::graph::MindMapGraph;
use crate::parser::ParseOutcome;
use crate::render::{render, DotOptions, DotRenderer};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Graphviz DOT format
    Dot,
    /// JSON format
    Json,
    /// TOML format
    Toml,
    /// Canonical `parent -> child` lines
    Text,
    /// Human-readable structure report
    Summary,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(Self::Dot),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "text" | "txt" => Ok(Self::Text),
            "summary" => Ok(Self::Summary),
            other => Err(format!(
                "Unknown export format: {other}. Supported: dot, json, toml, text, summary"
            )),
        }
    }
}

/// Render a parse outcome in the requested format
pub fn format_outcome(
    outcome: &ParseOutcome,
    format: ExportFormat,
    dot: &DotOptions,
    color: bool,
) -> Result<String> {
    let map = &outcome.map;
    match format {
        ExportFormat::Dot => Ok(render(map, DotRenderer::new(dot.clone()))),
        ExportFormat::Json => {
            serde_json::to_string_pretty(map).context("Failed to serialize mind map to JSON")
        }
        ExportFormat::Toml => {
            toml::to_string_pretty(map).context("Failed to serialize mind map to TOML")
        }
        ExportFormat::Text => Ok(map.to_text()),
        ExportFormat::Summary => Ok(summary(outcome, color)),
    }
}

fn summary(outcome: &ParseOutcome, color: bool) -> String {
    let s = MindMapGraph::from_map(&outcome.map).summary();
    let heading = format!(
        "Mind map: {}, {}",
        plural(s.nodes, "node"),
        plural(s.edges, "edge")
    );
    let list = |items: &[String]| {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        }
    };

    let mut out = String::new();
    if color {
        let _ = writeln!(out, "{}", heading.bold());
    } else {
        let _ = writeln!(out, "{heading}");
    }
    let _ = writeln!(out, "  roots:    {}", list(&s.roots));
    let _ = writeln!(out, "  isolated: {}", list(&s.isolated));
    let _ = writeln!(out, "  cycle:    {}", if s.has_cycle { "yes" } else { "no" });

    if !outcome.skipped.is_empty() {
        let line = format!(
            "  skipped:  {}",
            plural(outcome.skipped.len(), "malformed line")
        );
        if color {
            let _ = writeln!(out, "{}", line.yellow());
        } else {
            let _ = writeln!(out, "{line}");
        }
        for m in &outcome.skipped {
            let _ = writeln!(out, "    {m}");
        }
    }
    out
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("1 {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Write to a file, or to stdout when no path is given
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            eprintln!("Exported to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
