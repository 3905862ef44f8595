// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Rendering seam between a parsed mind map and a drawing backend

use crate::parser;
use crate::types::{node_id, MindMap};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A drawing backend fed one node or edge at a time.
///
/// [`render`] registers every unique label exactly once, then every edge
/// tuple exactly once in source order (duplicates included). Vertices are
/// keyed by label.
pub trait GraphRenderer {
    /// What the backend produces
    type Output;

    /// Register one vertex
    fn register_node(&mut self, label: &str);

    /// Register one directed connection between two registered vertices
    fn register_edge(&mut self, parent: &str, child: &str);

    /// Produce the output
    fn finish(self) -> Self::Output;
}

/// Feed a map to a renderer
pub fn render<R: GraphRenderer>(map: &MindMap, mut renderer: R) -> R::Output {
    for label in map.nodes() {
        renderer.register_node(label);
    }
    for edge in map.edges() {
        renderer.register_edge(&edge.parent, &edge.child);
    }
    renderer.finish()
}

/// Parse raw text and render it as Graphviz DOT
#[must_use]
pub fn visualize(raw: &str, options: &DotOptions) -> String {
    let map = parser::parse(raw);
    render(&map, DotRenderer::new(options.clone()))
}

/// Graph-level DOT attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotOptions {
    /// Drawing size in inches, Graphviz syntax (`50,50!` forces the size)
    pub size: String,
    /// Output resolution
    pub dpi: u32,
    /// Layout direction
    pub rankdir: RankDir,
}

/// Graphviz `rankdir` values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDir {
    /// Top to bottom
    #[default]
    #[serde(rename = "TB")]
    TopBottom,
    /// Left to right
    #[serde(rename = "LR")]
    LeftRight,
    /// Bottom to top
    #[serde(rename = "BT")]
    BottomTop,
    /// Right to left
    #[serde(rename = "RL")]
    RightLeft,
}

impl fmt::Display for RankDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TopBottom => "TB",
            Self::LeftRight => "LR",
            Self::BottomTop => "BT",
            Self::RightLeft => "RL",
        })
    }
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            size: "50,50!".to_string(),
            dpi: 500,
            rankdir: RankDir::TopBottom,
        }
    }
}

/// Renders to Graphviz DOT source
#[derive(Debug)]
pub struct DotRenderer {
    options: DotOptions,
    nodes: String,
    edges: String,
}

impl DotRenderer {
    /// Create a renderer with the given graph attributes
    #[must_use]
    pub fn new(options: DotOptions) -> Self {
        Self {
            options,
            nodes: String::new(),
            edges: String::new(),
        }
    }
}

impl GraphRenderer for DotRenderer {
    type Output = String;

    fn register_node(&mut self, label: &str) {
        self.nodes.push_str(&format!(
            "  \"{}\" [label=\"{}\"];\n",
            node_id(label),
            escape(label)
        ));
    }

    fn register_edge(&mut self, parent: &str, child: &str) {
        self.edges.push_str(&format!(
            "  \"{}\" -> \"{}\";\n",
            node_id(parent),
            node_id(child)
        ));
    }

    fn finish(self) -> String {
        let mut dot = String::from("// Mind Map\ndigraph mindmap {\n");
        dot.push_str(&format!(
            "  graph [size=\"{}\", dpi={}, rankdir={}];\n",
            escape(&self.options.size),
            self.options.dpi,
            self.options.rankdir
        ));
        dot.push_str("  node [shape=box, style=rounded];\n\n");
        dot.push_str(&self.nodes);
        dot.push('\n');
        dot.push_str(&self.edges);
        dot.push_str("}\n");
        dot
    }
}

/// Escape a string for a double-quoted DOT attribute
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
