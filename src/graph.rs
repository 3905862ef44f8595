// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! petgraph view of a mind map, for structural questions about it

use crate::render::{render, GraphRenderer};
use crate::types::MindMap;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;
use std::collections::HashMap;

/// A mind map loaded into a petgraph directed graph
#[derive(Debug, Default)]
pub struct MindMapGraph {
    /// The underlying directed graph, weighted by label
    graph: DiGraph<String, ()>,
    /// Map from label to node index
    node_indices: HashMap<String, NodeIndex>,
}

impl MindMapGraph {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for a parsed map
    #[must_use]
    pub fn from_map(map: &MindMap) -> Self {
        render(map, Self::new())
    }

    fn index_of(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(label.to_string());
        self.node_indices.insert(label.to_string(), idx);
        idx
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Labels with outgoing edges but no incoming ones, in insertion order
    #[must_use]
    pub fn roots(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.degree(idx, Direction::Incoming) == 0
                    && self.degree(idx, Direction::Outgoing) > 0
            })
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// Labels that take part in no edge, in insertion order
    #[must_use]
    pub fn isolated(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.degree(idx, Direction::Incoming) == 0
                    && self.degree(idx, Direction::Outgoing) == 0
            })
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// Children of a label in edge order, duplicates included
    #[must_use]
    pub fn children(&self, label: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(label) else {
            return vec![];
        };
        // petgraph walks adjacency lists newest-first
        let mut children: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.graph[n].as_str())
            .collect();
        children.reverse();
        children
    }

    /// True when some chain of edges leads back to where it started
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Counts and shape of the graph
    #[must_use]
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            nodes: self.node_count(),
            edges: self.edge_count(),
            roots: self.roots().into_iter().map(String::from).collect(),
            isolated: self.isolated().into_iter().map(String::from).collect(),
            has_cycle: self.has_cycle(),
        }
    }

    fn degree(&self, idx: NodeIndex, dir: Direction) -> usize {
        self.graph.neighbors_directed(idx, dir).count()
    }
}

impl GraphRenderer for MindMapGraph {
    type Output = Self;

    fn register_node(&mut self, label: &str) {
        self.index_of(label);
    }

    fn register_edge(&mut self, parent: &str, child: &str) {
        let from = self.index_of(parent);
        let to = self.index_of(child);
        self.graph.add_edge(from, to, ());
    }

    fn finish(self) -> Self {
        self
    }
}

/// Structural summary of a mind map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    /// Unique labels
    pub nodes: usize,
    /// Edge tuples, duplicates included
    pub edges: usize,
    /// Labels with children and no parent
    pub roots: Vec<String>,
    /// Labels with no edges at all
    pub isolated: Vec<String>,
    /// Whether the edges form a cycle
    pub has_cycle: bool,
}
