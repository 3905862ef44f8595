// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Parse command - turns mind-map text from a file or stdin into a graph

use super::export::{format_outcome, write_output, ExportFormat};
use crate::config::Config;
use crate::parser::parse_with_diagnostics;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Run the parse command
pub fn run(
    input: Option<PathBuf>,
    format: ExportFormat,
    output: Option<PathBuf>,
    config: &Config,
    color: bool,
) -> Result<()> {
    let raw = read_input(input.as_deref())?;
    let outcome = parse_with_diagnostics(&raw);

    info!(
        "Parsed {} nodes and {} edges",
        outcome.map.node_count(),
        outcome.map.edge_count()
    );
    if outcome.map.is_empty() {
        eprintln!("Warning: no nodes found in input.");
    }

    // No escape codes in files
    let color = color && output.is_none();
    let content = format_outcome(&outcome, format, &config.render, color)?;
    write_output(&content, output.as_deref())
}

/// Read a file, or stdin for `None` and `-`
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
