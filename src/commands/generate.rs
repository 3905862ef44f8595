// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Generate command - asks the hosted model for a mind map and renders it

use super::export::{format_outcome, write_output, ExportFormat};
use crate::config::Config;
use crate::parser::parse_with_diagnostics;
use crate::request::{ContentRequestService, GeminiClient, MindMapRequest};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Run the generate command
pub fn run(
    request: &MindMapRequest,
    format: ExportFormat,
    output: Option<PathBuf>,
    show_text: bool,
    config: &Config,
    color: bool,
) -> Result<()> {
    let client = GeminiClient::from_config(&config.generation)?;
    run_with(&client, request, format, output, show_text, config, color)
}

/// Same as [`run`], against any request service
pub fn run_with<S: ContentRequestService>(
    service: &S,
    request: &MindMapRequest,
    format: ExportFormat,
    output: Option<PathBuf>,
    show_text: bool,
    config: &Config,
    color: bool,
) -> Result<()> {
    info!("Generating mind map for {:?}", request.topic);

    let raw = service
        .generate(request)
        .context("Failed to generate mind map")?;

    if show_text {
        eprintln!("{}", raw.as_str().trim_end());
        eprintln!();
    }

    let outcome = parse_with_diagnostics(raw.as_str());
    if !outcome.skipped.is_empty() {
        info!("Skipped {} malformed line(s)", outcome.skipped.len());
    }

    let color = color && output.is_none();
    let content = format_outcome(&outcome, format, &config.render, color)?;
    write_output(&content, output.as_deref())
}
