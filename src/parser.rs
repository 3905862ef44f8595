// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Tolerant line parser for mind-map text
//!
//! Each non-empty line is either a standalone node label or a
//! `parent -> child` edge. The text comes from a non-deterministic
//! generator, so nothing is rejected: an edge line missing a label is
//! skipped and logged, and parsing always yields a map.

use crate::types::{MindMap, MindMapBuilder};
use std::fmt;
use tracing::{debug, warn};

/// Marker separating parent and child on an edge line
pub const EDGE_MARKER: &str = "->";

/// Which side of an edge line was empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingLabel {
    /// Nothing before the marker
    Parent,
    /// Nothing after the marker
    Child,
    /// Nothing on either side
    Both,
}

impl fmt::Display for MissingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => f.write_str("parent label is empty"),
            Self::Child => f.write_str("child label is empty"),
            Self::Both => f.write_str("both labels are empty"),
        }
    }
}

/// An edge line that could not be split into two non-empty labels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line_number}: {missing}: {text:?}")]
pub struct MalformedLine {
    /// 1-based line number in the raw text
    pub line_number: usize,
    /// The trimmed line
    pub text: String,
    /// What was missing
    pub missing: MissingLabel,
}

/// A parsed map plus the lines that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// The parsed map
    pub map: MindMap,
    /// Edge lines that contributed nothing
    pub skipped: Vec<MalformedLine>,
}

/// Parse mind-map text into a node set and an ordered edge list.
///
/// Never fails. Malformed edge lines are logged at `warn` and dropped.
#[must_use]
pub fn parse(raw: &str) -> MindMap {
    parse_with_diagnostics(raw).map
}

/// Like [`parse`], but also hands back the skipped lines
#[must_use]
pub fn parse_with_diagnostics(raw: &str) -> ParseOutcome {
    let mut builder = MindMapBuilder::new();
    let mut skipped = Vec::new();

    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match split_edge(line) {
            None => builder.add_node(line),
            Some(Ok((parent, child))) => builder.add_edge(parent, child),
            Some(Err(missing)) => {
                let malformed = MalformedLine {
                    line_number: idx + 1,
                    text: line.to_string(),
                    missing,
                };
                warn!("Skipping malformed edge line: {}", malformed);
                skipped.push(malformed);
            }
        }
    }

    let map = builder.build();
    debug!(
        nodes = map.node_count(),
        edges = map.edge_count(),
        skipped = skipped.len(),
        "Parsed mind map"
    );

    ParseOutcome { map, skipped }
}

/// `None` for a plain label line, otherwise the split on the first marker
fn split_edge(line: &str) -> Option<Result<(&str, &str), MissingLabel>> {
    let (left, right) = line.split_once(EDGE_MARKER)?;
    let (parent, child) = (left.trim(), right.trim());

    Some(match (parent.is_empty(), child.is_empty()) {
        (false, false) => Ok((parent, child)),
        (true, false) => Err(MissingLabel::Parent),
        (false, true) => Err(MissingLabel::Child),
        (true, true) => Err(MissingLabel::Both),
    })
}
