// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Studymap library - mind maps for study plans
//!
//! A hosted text-generation model is asked for a mind map of a study plan.
//! Its answer is loose, line-oriented text; this crate turns that text into
//! a directed graph and renders it (Graphviz DOT, JSON, TOML).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod graph;
pub mod parser;
pub mod render;
pub mod request;

pub use parser::{parse, parse_with_diagnostics, MalformedLine, ParseOutcome};
pub use render::{render, visualize, GraphRenderer};
pub use request::{ContentRequestService, MindMapRequest};
pub use types::{Edge, MindMap, RawGraphText};

/// Core data types shared by the parser, the renderers and the exports
pub mod types {
    use serde::{Serialize, Serializer};
    use sha2::{Digest, Sha256};
    use std::collections::HashSet;
    use std::fmt;

    // =========================================================================
    // Raw Text
    // =========================================================================

    /// Unstructured text returned by the generation service.
    ///
    /// Interpreted as a line-oriented graph description; nothing about its
    /// shape is guaranteed.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct RawGraphText(String);

    impl RawGraphText {
        /// Wrap raw text
        #[must_use]
        pub fn new(text: impl Into<String>) -> Self {
            Self(text.into())
        }

        /// Borrow the text
        #[must_use]
        pub fn as_str(&self) -> &str {
            &self.0
        }

        /// True when the text holds nothing but whitespace
        #[must_use]
        pub fn is_blank(&self) -> bool {
            self.0.trim().is_empty()
        }
    }

    impl From<String> for RawGraphText {
        fn from(text: String) -> Self {
            Self(text)
        }
    }

    impl From<&str> for RawGraphText {
        fn from(text: &str) -> Self {
            Self(text.to_string())
        }
    }

    impl fmt::Display for RawGraphText {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    // =========================================================================
    // Node Ids
    // =========================================================================

    /// Stable render id for a label: `node:<first 12 hex chars of sha256>`.
    ///
    /// Labels stay the identity of a node; the id only spares renderers from
    /// using arbitrary text as an identifier.
    #[must_use]
    pub fn node_id(label: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(label.as_bytes());
        let hash = hex::encode(hasher.finalize());
        format!("node:{}", &hash[..12])
    }

    // =========================================================================
    // Edge
    // =========================================================================

    /// Directed relationship from `parent` to `child`
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
    pub struct Edge {
        /// Parent label
        pub parent: String,
        /// Child label
        pub child: String,
    }

    impl Edge {
        /// Create an edge
        #[must_use]
        pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
            Self {
                parent: parent.into(),
                child: child.into(),
            }
        }
    }

    impl From<(&str, &str)> for Edge {
        fn from((parent, child): (&str, &str)) -> Self {
            Self::new(parent, child)
        }
    }

    // =========================================================================
    // Mind Map
    // =========================================================================

    /// A parsed mind map: unique node labels plus edges in source order.
    ///
    /// Nodes are kept in first-seen order so every rendering of the same
    /// text is identical. Every edge endpoint is a member of the node set.
    /// Built once by [`MindMapBuilder`] (or the parser) and read-only after.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct MindMap {
        nodes: Vec<String>,
        edges: Vec<Edge>,
    }

    impl MindMap {
        /// Node labels, first-seen order
        #[must_use]
        pub fn nodes(&self) -> &[String] {
            &self.nodes
        }

        /// Edges, source order (duplicates kept)
        #[must_use]
        pub fn edges(&self) -> &[Edge] {
            &self.edges
        }

        /// Node membership by exact label
        #[must_use]
        pub fn contains_node(&self, label: &str) -> bool {
            self.nodes.iter().any(|n| n == label)
        }

        /// Get node count
        #[must_use]
        pub fn node_count(&self) -> usize {
            self.nodes.len()
        }

        /// Get edge count
        #[must_use]
        pub fn edge_count(&self) -> usize {
            self.edges.len()
        }

        /// Check if the map is empty
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.nodes.is_empty()
        }

        /// Labels that take part in no edge
        #[must_use]
        pub fn isolated_nodes(&self) -> Vec<&str> {
            let linked: HashSet<&str> = self
                .edges
                .iter()
                .flat_map(|e| [e.parent.as_str(), e.child.as_str()])
                .collect();
            self.nodes
                .iter()
                .map(String::as_str)
                .filter(|n| !linked.contains(n))
                .collect()
        }

        /// Canonical line form: isolated nodes as bare lines, then one
        /// `parent -> child` line per edge. Parses back to the same map as
        /// long as no label itself contains the edge marker.
        #[must_use]
        pub fn to_text(&self) -> String {
            let mut out = String::new();
            for label in self.isolated_nodes() {
                out.push_str(label);
                out.push('\n');
            }
            for edge in &self.edges {
                out.push_str(&format!("{} -> {}\n", edge.parent, edge.child));
            }
            out
        }
    }

    /// Serialized shape of a node in JSON/TOML exports
    #[derive(Serialize)]
    struct NodeRecord<'a> {
        id: String,
        label: &'a str,
    }

    /// Serialized shape of an edge in JSON/TOML exports
    #[derive(Serialize)]
    struct EdgeRecord<'a> {
        from: String,
        to: String,
        parent: &'a str,
        child: &'a str,
    }

    impl Serialize for MindMap {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            #[derive(Serialize)]
            struct Doc<'a> {
                nodes: Vec<NodeRecord<'a>>,
                edges: Vec<EdgeRecord<'a>>,
            }

            let doc = Doc {
                nodes: self
                    .nodes
                    .iter()
                    .map(|label| NodeRecord {
                        id: node_id(label),
                        label,
                    })
                    .collect(),
                edges: self
                    .edges
                    .iter()
                    .map(|e| EdgeRecord {
                        from: node_id(&e.parent),
                        to: node_id(&e.child),
                        parent: &e.parent,
                        child: &e.child,
                    })
                    .collect(),
            };
            doc.serialize(serializer)
        }
    }

    /// Accumulates nodes and edges while keeping the membership invariant
    #[derive(Debug, Default)]
    pub struct MindMapBuilder {
        seen: HashSet<String>,
        map: MindMap,
    }

    impl MindMapBuilder {
        /// Start an empty map
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a node; no-op if the label is already present
        pub fn add_node(&mut self, label: &str) {
            if self.seen.insert(label.to_string()) {
                self.map.nodes.push(label.to_string());
            }
        }

        /// Add both endpoints, then append the edge
        pub fn add_edge(&mut self, parent: &str, child: &str) {
            self.add_node(parent);
            self.add_node(child);
            self.map.edges.push(Edge::new(parent, child));
        }

        /// Finish building
        #[must_use]
        pub fn build(self) -> MindMap {
            self.map
        }
    }

}
