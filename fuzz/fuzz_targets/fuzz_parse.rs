// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use libfuzzer_sys::fuzz_target;
use studymap::graph::MindMapGraph;
use studymap::render::{visualize, DotOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let outcome = studymap::parse_with_diagnostics(text);
    for edge in outcome.map.edges() {
        assert!(outcome.map.contains_node(&edge.parent));
        assert!(outcome.map.contains_node(&edge.child));
    }

    let graph = MindMapGraph::from_map(&outcome.map);
    assert_eq!(graph.node_count(), outcome.map.node_count());
    assert_eq!(graph.edge_count(), outcome.map.edge_count());

    let _ = visualize(text, &DotOptions::default());
});
