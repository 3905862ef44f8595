// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Invariant tests for the mind-map parser
//!
//! These tests verify critical invariants:
//! 1. Totality - parsing never panics and always yields a map
//! 2. Membership - every edge endpoint is a node, every node is unique
//! 3. Order - edges keep source order, duplicates included
//! 4. Tolerance - malformed and blank lines contribute nothing

use proptest::prelude::*;
use std::collections::HashSet;
use studymap::graph::MindMapGraph;
use studymap::parser::{parse, parse_with_diagnostics, MissingLabel};
use studymap::render::{render, GraphRenderer};
use studymap::Edge;

// =============================================================================
// Test Helpers
// =============================================================================

fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
    pairs.iter().map(|&p| Edge::from(p)).collect()
}

fn node_set(map: &studymap::MindMap) -> HashSet<String> {
    map.nodes().iter().cloned().collect()
}

/// A trimmed, non-empty label without the edge marker
fn label() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]([A-Za-z0-9 ]{0,10}[A-Za-z0-9])?"
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_study_plan_scenario() {
    let map = parse("Topic\nDay 1 -> Task A\nDay 1 -> Task B\nTask A");

    let expected: HashSet<String> = ["Topic", "Day 1", "Task A", "Task B"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(node_set(&map), expected);
    assert_eq!(map.edges(), edges(&[("Day 1", "Task A"), ("Day 1", "Task B")]));
}

#[test]
fn test_empty_string() {
    let map = parse("");
    assert!(map.nodes().is_empty());
    assert!(map.edges().is_empty());
}

#[test]
fn test_whitespace_only_lines() {
    let outcome = parse_with_diagnostics("\n   \n\t\n \r\n");
    assert!(outcome.map.is_empty());
    assert!(outcome.skipped.is_empty());
}

#[test]
fn test_unstructured_text_gives_isolated_nodes() {
    let map = parse("Photosynthesis is how plants eat.\nIt needs light.");

    assert_eq!(
        map.nodes(),
        ["Photosynthesis is how plants eat.", "It needs light."]
    );
    assert_eq!(map.edge_count(), 0);
}

#[test]
fn test_two_markers_split_on_first() {
    let map = parse("A -> B -> C");

    assert_eq!(map.edges(), edges(&[("A", "B -> C")]));
    assert!(map.contains_node("A"));
    assert!(map.contains_node("B -> C"));
    assert!(!map.contains_node("B"));
    assert!(!map.contains_node("C"));
}

#[test]
fn test_dangling_marker_contributes_nothing() {
    let outcome = parse_with_diagnostics("A ->");

    assert!(!outcome.map.contains_node("A"));
    assert!(outcome.map.edges().is_empty());
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].missing, MissingLabel::Child);
}

#[test]
fn test_malformed_line_does_not_affect_neighbours() {
    let map = parse("a -> b\n-> orphan\nb -> c");

    assert_eq!(map.edges(), edges(&[("a", "b"), ("b", "c")]));
    assert!(!map.contains_node("orphan"));
}

#[test]
fn test_label_repeated_on_many_lines_is_one_node() {
    let map = parse("Topic\nTopic\nTopic -> Day 1\nDay 1 -> Topic\n  Topic  ");

    assert_eq!(map.nodes().iter().filter(|n| *n == "Topic").count(), 1);
    assert_eq!(map.node_count(), 2);
}

#[test]
fn test_markdown_is_kept_verbatim() {
    // No cleanup of bullets or fences: they are part of the label
    let map = parse("```\n- Day 1 -> Task\n```");

    assert_eq!(map.nodes(), ["```", "- Day 1", "Task"]);
}

#[test]
fn test_duplicate_edges_survive_to_renderers() {
    struct Count(usize, usize);

    impl GraphRenderer for Count {
        type Output = (usize, usize);
        fn register_node(&mut self, _label: &str) {
            self.0 += 1;
        }
        fn register_edge(&mut self, _parent: &str, _child: &str) {
            self.1 += 1;
        }
        fn finish(self) -> (usize, usize) {
            (self.0, self.1)
        }
    }

    let map = parse("a -> b\na -> b\na -> b");
    assert_eq!(render(&map, Count(0, 0)), (2, 3));
    assert_eq!(MindMapGraph::from_map(&map).edge_count(), 3);
}

#[test]
fn test_parse_is_deterministic() {
    let text = "x -> y\nz\ny -> z\nw -> x\n";
    let first = parse(text);
    for _ in 0..5 {
        assert_eq!(parse(text), first);
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_parse_never_panics(text in "\\PC*(\n\\PC*){0,8}") {
        let outcome = parse_with_diagnostics(&text);
        prop_assert!(outcome.map.node_count() <= text.lines().count() * 2);
    }

    #[test]
    fn prop_endpoints_are_nodes(text in "([a-c ]{0,3}(->)?[a-c ]{0,3}\n){0,12}") {
        let map = parse(&text);
        let nodes = node_set(&map);
        for e in map.edges() {
            prop_assert!(nodes.contains(&e.parent));
            prop_assert!(nodes.contains(&e.child));
            prop_assert!(!e.parent.is_empty() && !e.child.is_empty());
        }
        prop_assert_eq!(nodes.len(), map.node_count());
    }

    #[test]
    fn prop_edges_keep_source_order(pairs in prop::collection::vec((label(), label()), 0..20)) {
        let text: String = pairs
            .iter()
            .map(|(p, c)| format!("  {p} ->{c}\n\n"))
            .collect();
        let map = parse(&text);

        let expected: Vec<Edge> = pairs.iter().map(|(p, c)| Edge::new(p.as_str(), c.as_str())).collect();
        prop_assert_eq!(map.edges(), expected.as_slice());
    }

    #[test]
    fn prop_canonical_text_reparses_to_same_graph(
        isolated in prop::collection::vec(label(), 0..5),
        pairs in prop::collection::vec((label(), label()), 0..10),
    ) {
        let mut text = String::new();
        for l in &isolated {
            text.push_str(l);
            text.push('\n');
        }
        for (p, c) in &pairs {
            text.push_str(&format!("{p} -> {c}\n"));
        }

        let map = parse(&text);
        let again = parse(&map.to_text());

        prop_assert_eq!(node_set(&again), node_set(&map));
        prop_assert_eq!(again.edges(), map.edges());
    }
}
